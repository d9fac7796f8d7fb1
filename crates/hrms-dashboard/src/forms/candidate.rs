use std::sync::OnceLock;

use regex::Regex;

use super::{Attachment, Checker, ValidationErrors};
use crate::records::POSITION_OPTIONS;

/// Raw input of the "Add Candidate" form.
#[derive(Debug, Clone, Default)]
pub struct CandidateForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub experience: String,
    pub resume: Option<Attachment>,
    pub declaration: bool,
}

/// Validated candidate ready for multipart submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub experience: String,
    pub resume: Attachment,
}

impl NewCandidate {
    pub fn display_position(&self) -> String {
        format!("{} {}", self.department, self.position)
    }
}

impl CandidateForm {
    pub fn validate(&self) -> Result<NewCandidate, ValidationErrors> {
        let mut checker = Checker::default();

        let full_name = checker.required("full_name", &self.full_name, "Full name is required");
        checker.min_chars(
            "full_name",
            full_name,
            2,
            "Full name must be at least 2 characters",
        );

        let email = checker.required("email", &self.email, "Email address is required");
        checker.email("email", email);

        let phone = checker.required("phone", &self.phone, "Phone number is required");
        checker.pattern("phone", phone, phone_pattern(), "Invalid phone number");

        let department = checker.required("department", &self.department, "Department is required");
        checker.min_chars(
            "department",
            department,
            2,
            "Department must be at least 2 characters",
        );

        let position = checker
            .required("position", &self.position, "Position is required")
            .and_then(|raw| {
                let known = POSITION_OPTIONS
                    .iter()
                    .find(|option| option.eq_ignore_ascii_case(raw))
                    .copied();
                if known.is_none() {
                    checker.fail("position", "Please select a valid position");
                }
                known
            });

        let experience = checker.required("experience", &self.experience, "Experience is required");

        let resume = match &self.resume {
            None => {
                checker.fail("resume", "Resume is required");
                None
            }
            Some(file) => match file.document_problem() {
                Some(problem) => {
                    checker.fail("resume", problem);
                    None
                }
                None => Some(file),
            },
        };

        if !self.declaration {
            checker.fail("declaration", "You must accept the declaration");
        }

        let output = (full_name, email, phone, department, position, experience, resume);
        checker.finish()?;

        match output {
            (
                Some(full_name),
                Some(email),
                Some(phone),
                Some(department),
                Some(position),
                Some(experience),
                Some(resume),
            ) => Ok(NewCandidate {
                full_name: full_name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                department: department.to_string(),
                position: position.to_string(),
                experience: experience.to_string(),
                resume: resume.clone(),
            }),
            _ => Err(ValidationErrors::default()),
        }
    }
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[+]?[1-9]\d{0,15}$").expect("phone pattern compiles"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CandidateForm {
        CandidateForm {
            full_name: "Jacob William".to_string(),
            email: "jacob.william@example.com".to_string(),
            phone: "+15550142".to_string(),
            department: "Design".to_string(),
            position: "senior".to_string(),
            experience: "3 years".to_string(),
            resume: Some(Attachment::new("jacob.pdf", vec![0x25, 0x50, 0x44, 0x46])),
            declaration: true,
        }
    }

    #[test]
    fn normalizes_position_to_offered_label() {
        let candidate = filled().validate().expect("valid form");
        assert_eq!(candidate.position, "Senior");
        assert_eq!(candidate.display_position(), "Design Senior");
    }

    #[test]
    fn collects_every_failure() {
        let form = CandidateForm {
            full_name: "J".to_string(),
            phone: "0123".to_string(),
            position: "CEO".to_string(),
            resume: Some(Attachment::new("jacob.png", vec![1])),
            declaration: false,
            ..filled()
        };
        let errors = form.validate().expect_err("invalid form");
        assert_eq!(
            errors.fields(),
            vec!["full_name", "phone", "position", "resume", "declaration"]
        );
        assert_eq!(errors.message_for("resume"), Some("Unsupported file format"));
    }

    #[test]
    fn resume_is_required() {
        let form = CandidateForm {
            resume: None,
            ..filled()
        };
        let errors = form.validate().expect_err("missing resume");
        assert_eq!(errors.message_for("resume"), Some("Resume is required"));
    }
}
