//! JSON shapes exchanged with the backend and their mapping onto records.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::AuthUser;
use crate::records::{
    AttendanceStatus, Candidate, CandidateStatus, Employee, LeaveRecord, LeaveStatus, RecordId,
};

/// Value of `msg` on every successful mutation.
pub(crate) const SUCCESS_MSG: &str = "success";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CandidateDto {
    #[serde(rename = "_id")]
    id: String,
    full_name: String,
    email_address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    phone_number: String,
    #[serde(default)]
    department: String,
    #[serde(default)]
    position: String,
    status: CandidateStatus,
    #[serde(default, deserialize_with = "lenient_string")]
    experience: String,
    #[serde(default)]
    resume_url: Option<String>,
}

impl From<CandidateDto> for Candidate {
    fn from(dto: CandidateDto) -> Self {
        Candidate {
            id: RecordId(dto.id),
            full_name: dto.full_name,
            email: dto.email_address,
            phone: dto.phone_number,
            department: dto.department,
            position: dto.position,
            status: dto.status,
            experience: dto.experience,
            resume_url: dto.resume_url.filter(|url| !url.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmployeeDto {
    #[serde(rename = "_id")]
    id: String,
    full_name: String,
    email_address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    phone_number: String,
    #[serde(default)]
    department: String,
    #[serde(default)]
    position: String,
    #[serde(default, deserialize_with = "lenient_string")]
    date_of_joining: String,
    #[serde(default, deserialize_with = "optional_attendance")]
    attendance_status: Option<AttendanceStatus>,
    #[serde(default = "default_true")]
    is_employee: bool,
}

fn default_true() -> bool {
    true
}

impl From<EmployeeDto> for Employee {
    fn from(dto: EmployeeDto) -> Self {
        Employee {
            id: RecordId(dto.id),
            full_name: dto.full_name,
            email: dto.email_address,
            phone: dto.phone_number,
            department: dto.department,
            position: dto.position,
            date_of_joining: dto.date_of_joining,
            attendance: dto.attendance_status,
            is_employee: dto.is_employee,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LeaveDto {
    #[serde(rename = "_id")]
    id: String,
    employee_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    leave_date: String,
    #[serde(default)]
    reason: String,
    status: LeaveStatus,
    #[serde(default)]
    documents: Option<String>,
}

impl From<LeaveDto> for LeaveRecord {
    fn from(dto: LeaveDto) -> Self {
        LeaveRecord {
            id: RecordId(dto.id),
            employee_name: dto.employee_name,
            date: dto.leave_date,
            reason: dto.reason,
            status: dto.status,
            document: dto.documents.filter(|doc| !doc.is_empty()),
        }
    }
}

/// Acknowledgement returned by status changes, edits and deletes.
#[derive(Debug, Deserialize)]
pub(crate) struct MutationAck {
    #[serde(default)]
    pub(crate) msg: Option<String>,
}

impl MutationAck {
    pub(crate) fn accepted(&self) -> bool {
        self.msg.as_deref() == Some(SUCCESS_MSG)
    }
}

/// Response to `POST /candidates/addCandidate`. Missing fields fall back to
/// what was submitted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCandidateAck {
    #[serde(default)]
    pub(crate) msg: Option<String>,
    #[serde(default, alias = "_id")]
    pub(crate) id: Option<String>,
    #[serde(default)]
    pub(crate) full_name: Option<String>,
    #[serde(default)]
    pub(crate) email_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub(crate) phone_number: Option<String>,
    #[serde(default)]
    pub(crate) department: Option<String>,
    #[serde(default)]
    pub(crate) position: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<CandidateStatus>,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub(crate) experience: Option<String>,
    #[serde(default)]
    pub(crate) resume_url: Option<String>,
}

/// Response to `POST /leaves/addLeave`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddLeaveAck {
    #[serde(default)]
    pub(crate) msg: Option<String>,
    #[serde(default, rename = "_id")]
    pub(crate) id: Option<String>,
    #[serde(default)]
    pub(crate) new_leave: Option<StoredLeave>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredLeave {
    #[serde(default, rename = "_id")]
    pub(crate) id: Option<String>,
    #[serde(default)]
    pub(crate) employee_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub(crate) leave_date: Option<String>,
    #[serde(default)]
    pub(crate) reason: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<LeaveStatus>,
    #[serde(default)]
    pub(crate) documents: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub(crate) msg: Option<String>,
    #[serde(default)]
    pub(crate) token: Option<String>,
    #[serde(default)]
    pub(crate) user: Option<AuthUser>,
}

/// Error body; the backend uses `message` on most routes and `msg` on auth.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusPatch<'a> {
    pub(crate) status: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AttendancePatch<'a> {
    pub(crate) attendance_status: &'a str,
}

/// Body of `PUT /employees/{id}`; the backend names the field `employeeName`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmployeePut<'a> {
    pub(crate) employee_name: &'a str,
    pub(crate) email_address: &'a str,
    pub(crate) phone_number: &'a str,
    pub(crate) position: &'a str,
    pub(crate) department: &'a str,
    pub(crate) date_of_joining: String,
}

// Phone numbers and experience are sometimes stored as numbers.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        other => Err(de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

fn optional_attendance<'de, D>(deserializer: D) -> Result<Option<AttendanceStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(label) if !label.trim().is_empty() => {
            label.parse().map(Some).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}
