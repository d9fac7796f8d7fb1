use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::{Checker, ValidationErrors};
use crate::records::Employee;

/// Raw input of the "Edit Employee" form.
#[derive(Debug, Clone, Default)]
pub struct EmployeeForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub date_of_joining: Option<NaiveDate>,
}

impl EmployeeForm {
    /// Prefill from the record being edited.
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            full_name: employee.full_name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            date_of_joining: employee.joined_on(),
        }
    }

    pub fn validate(&self) -> Result<EmployeeUpdate, ValidationErrors> {
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

        let position = checker.required("position", &self.position, "Position is required");
        let department = checker.required("department", &self.department, "Department is required");

        if self.date_of_joining.is_none() {
            checker.fail("date_of_joining", "Date of joining is required");
        }

        checker.finish()?;

        match (full_name, email, phone, position, department, self.date_of_joining) {
            (
                Some(full_name),
                Some(email),
                Some(phone),
                Some(position),
                Some(department),
                Some(date_of_joining),
            ) => Ok(EmployeeUpdate {
                full_name: full_name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                position: position.to_string(),
                department: department.to_string(),
                date_of_joining,
            }),
            _ => Err(ValidationErrors::default()),
        }
    }
}

/// Validated employee edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub date_of_joining: NaiveDate,
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4}$")
            .expect("phone pattern compiles")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{AttendanceStatus, RecordId};

    fn employee() -> Employee {
        Employee {
            id: RecordId::from("e-1"),
            full_name: "Jane Cooper".to_string(),
            email: "jane@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            department: "Design".to_string(),
            position: "Senior".to_string(),
            date_of_joining: "12-02-2023".to_string(),
            attendance: Some(AttendanceStatus::Present),
            is_employee: true,
        }
    }

    #[test]
    fn prefilled_form_validates() {
        let update = EmployeeForm::from_employee(&employee())
            .validate()
            .expect("prefill is valid");
        assert_eq!(
            update.date_of_joining,
            NaiveDate::from_ymd_opt(2023, 2, 12).expect("valid date")
        );
    }

    #[test]
    fn accepts_common_north_american_phone_shapes() {
        for phone in ["5551234567", "555-123-4567", "555.123.4567", "(555)123-4567"] {
            let form = EmployeeForm {
                phone: phone.to_string(),
                ..EmployeeForm::from_employee(&employee())
            };
            assert!(form.validate().is_ok(), "{phone} should be accepted");
        }
    }

    #[test]
    fn missing_joining_date_is_reported() {
        let form = EmployeeForm {
            date_of_joining: None,
            phone: "12345".to_string(),
            ..EmployeeForm::from_employee(&employee())
        };
        let errors = form.validate().expect_err("invalid edit");
        assert_eq!(errors.fields(), vec!["phone", "date_of_joining"]);
    }
}
