//! Dashboard record kinds as held in the client-side cache.
//!
//! Records are owned by the backend. The client keeps a transient copy per
//! entity kind that is replaced wholesale whenever the lists are refetched.

mod status;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use status::{AttendanceStatus, CandidateStatus, LeaveStatus, UnknownStatus};

/// Task label shown on every attendance row until the backend tracks assignments.
pub const DEFAULT_ATTENDANCE_TASK: &str = "HRMS Development";

/// Wire format the backend uses for calendar dates.
pub const WIRE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Positions offered by the hiring forms and the position filter.
pub const POSITION_OPTIONS: [&str; 5] = ["Intern", "Full Time", "Junior", "Senior", "Team Lead"];

/// Backend document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Job applicant tracked through the hiring pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: RecordId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub status: CandidateStatus,
    pub experience: String,
    pub resume_url: Option<String>,
}

impl Candidate {
    /// Department and position as shown in the candidates table ("Design Senior").
    pub fn display_position(&self) -> String {
        format!("{} {}", self.department, self.position)
    }
}

/// Confirmed hire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: RecordId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    /// Raw joining date as stored by the backend (`DD-MM-YYYY`).
    pub date_of_joining: String,
    pub attendance: Option<AttendanceStatus>,
    pub is_employee: bool,
}

impl Employee {
    pub fn joined_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date_of_joining.trim(), WIRE_DATE_FORMAT).ok()
    }
}

/// Per-employee attendance row derived from the employee list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_id: RecordId,
    pub employee_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub status: Option<AttendanceStatus>,
    pub task: String,
}

impl AttendanceRecord {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id.clone(),
            employee_name: employee.full_name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            department: employee.department.clone(),
            position: employee.position.clone(),
            status: employee.attendance,
            task: DEFAULT_ATTENDANCE_TASK.to_string(),
        }
    }
}

/// Requested absence with an approval workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub id: RecordId,
    pub employee_name: String,
    /// Single date or `start to end` range, kept verbatim from the backend.
    pub date: String,
    pub reason: String,
    pub status: LeaveStatus,
    pub document: Option<String>,
}

/// Two-digit serial number shown in the first table column.
pub fn serial_number(index: usize) -> String {
    format!("{:02}", index + 1)
}
