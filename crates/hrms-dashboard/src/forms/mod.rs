//! Input validation for the login, candidate, employee and leave forms.
//!
//! Every form reports all failing fields at once so the caller can show them
//! together. Validated forms turn into the payload types the API client sends.

mod attachment;
mod candidate;
mod employee;
mod leave;
mod login;

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

pub use attachment::{Attachment, MAX_ATTACHMENT_BYTES, SUPPORTED_DOCUMENT_TYPES};
pub use candidate::{CandidateForm, NewCandidate};
pub use employee::{EmployeeForm, EmployeeUpdate};
pub use leave::{leave_eligible_employees, LeaveForm, NewLeave};
pub use login::{LoginCredentials, LoginForm};

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every failing field of a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|error| error.field).collect()
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid form input")?;
        for (idx, error) in self.errors.iter().enumerate() {
            let sep = if idx == 0 { ": " } else { "; " };
            write!(f, "{sep}{} ({})", error.message, error.field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Accumulates failures field by field. A field that fails `required` skips
/// its remaining rules.
#[derive(Default)]
struct Checker {
    errors: ValidationErrors,
}

impl Checker {
    fn required<'v>(&mut self, field: &'static str, value: &'v str, message: &str) -> Option<&'v str> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.errors.push(field, message);
            None
        } else {
            Some(trimmed)
        }
    }

    fn min_chars(&mut self, field: &'static str, value: Option<&str>, min: usize, message: &str) {
        if let Some(value) = value {
            if value.chars().count() < min {
                self.errors.push(field, message);
            }
        }
    }

    fn pattern(&mut self, field: &'static str, value: Option<&str>, regex: &Regex, message: &str) {
        if let Some(value) = value {
            if !regex.is_match(value) {
                self.errors.push(field, message);
            }
        }
    }

    fn email(&mut self, field: &'static str, value: Option<&str>) {
        self.pattern(field, value, email_pattern(), "Invalid email address");
    }

    fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(field, message);
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_every_field() {
        let mut errors = ValidationErrors::default();
        errors.push("email", "Invalid email address");
        errors.push("password", "Password is required");
        assert_eq!(
            errors.to_string(),
            "invalid form input: Invalid email address (email); Password is required (password)"
        );
        assert_eq!(errors.message_for("password"), Some("Password is required"));
    }

    #[test]
    fn required_short_circuits_later_rules() {
        let mut checker = Checker::default();
        let name = checker.required("name", "   ", "Name is required");
        checker.min_chars("name", name, 2, "too short");
        let errors = checker.finish().expect_err("blank name fails");
        assert_eq!(errors.fields(), vec!["name"]);
        assert_eq!(errors.message_for("name"), Some("Name is required"));
    }

    #[test]
    fn email_pattern_accepts_plain_addresses() {
        assert!(email_pattern().is_match("hr.team@example.co"));
        assert!(!email_pattern().is_match("hr team@example.com"));
        assert!(!email_pattern().is_match("hr@example"));
    }
}
