use chrono::NaiveDate;

use super::{Attachment, Checker, ValidationErrors};
use crate::dashboard::calendar::LeaveSpan;
use crate::records::{AttendanceStatus, Employee, RecordId};

/// Raw input of the "Add Leave" form.
#[derive(Debug, Clone, Default)]
pub struct LeaveForm {
    pub employee_id: Option<RecordId>,
    /// Falls back to the selected employee's position when left blank.
    pub designation: String,
    pub start: Option<NaiveDate>,
    /// Last day of a multi-day leave.
    pub end: Option<NaiveDate>,
    pub reason: String,
    pub document: Option<Attachment>,
}

/// Validated leave request ready for multipart submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeave {
    pub employee_id: RecordId,
    pub employee_name: String,
    pub designation: String,
    pub span: LeaveSpan,
    pub reason: String,
    pub document: Option<Attachment>,
}

impl LeaveForm {
    /// Validate against the current employee list; only employees marked
    /// present today can file leave.
    pub fn validate(&self, employees: &[Employee]) -> Result<NewLeave, ValidationErrors> {
        let mut checker = Checker::default();

        let employee = match &self.employee_id {
            None => {
                checker.fail("employee", "Employee name is required");
                None
            }
            Some(id) => match employees.iter().find(|employee| &employee.id == id) {
                None => {
                    checker.fail("employee", format!("No employee with id {id}"));
                    None
                }
                Some(employee) if employee.attendance != Some(AttendanceStatus::Present) => {
                    checker.fail(
                        "employee",
                        format!("{} is not marked Present", employee.full_name),
                    );
                    None
                }
                Some(employee) => Some(employee),
            },
        };

        let designation = if self.designation.trim().is_empty() {
            employee.map(|employee| employee.position.trim().to_string())
        } else {
            Some(self.designation.trim().to_string())
        }
        .filter(|designation| !designation.is_empty());
        if designation.is_none() && employee.is_some() {
            checker.fail("designation", "Designation is required");
        }

        let span = match (self.start, self.end) {
            (None, _) => {
                checker.fail("leave_date", "Leave date is required");
                None
            }
            (Some(start), None) => Some(LeaveSpan::single(start)),
            (Some(start), Some(end)) => match LeaveSpan::new(start, end) {
                Ok(span) => Some(span),
                Err(_) => {
                    checker.fail("leave_date", "Leave end date cannot precede the start date");
                    None
                }
            },
        };

        let reason = checker.required("reason", &self.reason, "Reason is required");
        checker.min_chars("reason", reason, 5, "Reason must be at least 5 characters");

        if let Some(problem) = self.document.as_ref().and_then(Attachment::document_problem) {
            checker.fail("document", problem);
        }

        checker.finish()?;

        match (employee, designation, span, reason) {
            (Some(employee), Some(designation), Some(span), Some(reason)) => Ok(NewLeave {
                employee_id: employee.id.clone(),
                employee_name: employee.full_name.clone(),
                designation,
                span,
                reason: reason.to_string(),
                document: self.document.clone(),
            }),
            _ => Err(ValidationErrors::default()),
        }
    }
}

/// Employees offered by the leave form's picker: present today and, when a
/// query is typed, whose name contains it.
pub fn leave_eligible_employees<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    let needle = query.trim().to_lowercase();
    employees
        .iter()
        .filter(|employee| employee.attendance == Some(AttendanceStatus::Present))
        .filter(|employee| needle.is_empty() || employee.full_name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, name: &str, attendance: Option<AttendanceStatus>) -> Employee {
        Employee {
            id: RecordId::from(id),
            full_name: name.to_string(),
            email: format!("{id}@example.com"),
            phone: "555-123-4567".to_string(),
            department: "Ops".to_string(),
            position: "Junior".to_string(),
            date_of_joining: "01-01-2024".to_string(),
            attendance,
            is_employee: true,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).expect("valid date")
    }

    fn staff() -> Vec<Employee> {
        vec![
            employee("e1", "Jane Cooper", Some(AttendanceStatus::Present)),
            employee("e2", "Cody Fisher", Some(AttendanceStatus::Absent)),
            employee("e3", "Janet Kim", Some(AttendanceStatus::Present)),
        ]
    }

    #[test]
    fn designation_defaults_to_employee_position() {
        let leave = LeaveForm {
            employee_id: Some(RecordId::from("e1")),
            start: Some(day(15)),
            end: Some(day(18)),
            reason: "Family visit".to_string(),
            ..LeaveForm::default()
        }
        .validate(&staff())
        .expect("valid leave");
        assert_eq!(leave.designation, "Junior");
        assert_eq!(leave.employee_name, "Jane Cooper");
        assert_eq!(leave.span.to_wire(), "15-06-2025 to 18-06-2025");
    }

    #[test]
    fn absent_employees_cannot_file_leave() {
        let errors = LeaveForm {
            employee_id: Some(RecordId::from("e2")),
            start: Some(day(15)),
            reason: "Family visit".to_string(),
            ..LeaveForm::default()
        }
        .validate(&staff())
        .expect_err("absent employee");
        assert_eq!(
            errors.message_for("employee"),
            Some("Cody Fisher is not marked Present")
        );
    }

    #[test]
    fn reversed_dates_and_short_reason_are_reported() {
        let errors = LeaveForm {
            employee_id: Some(RecordId::from("e1")),
            start: Some(day(18)),
            end: Some(day(15)),
            reason: "sick".to_string(),
            ..LeaveForm::default()
        }
        .validate(&staff())
        .expect_err("invalid leave");
        assert_eq!(errors.fields(), vec!["leave_date", "reason"]);
    }

    #[test]
    fn picker_lists_present_employees_matching_query() {
        let staff = staff();
        let names: Vec<_> = leave_eligible_employees(&staff, "JAN")
            .into_iter()
            .map(|employee| employee.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["Jane Cooper", "Janet Kim"]);
        assert_eq!(leave_eligible_employees(&staff, "").len(), 2);
    }
}
