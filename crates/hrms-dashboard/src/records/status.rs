use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Raised when a status label does not belong to the expected pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind} status")]
pub struct UnknownStatus {
    pub kind: &'static str,
    pub value: String,
}

/// Position in the hiring pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum CandidateStatus {
    New,
    Scheduled,
    Ongoing,
    Selected,
    Rejected,
}

impl CandidateStatus {
    pub const fn ordered() -> [CandidateStatus; 5] {
        [
            CandidateStatus::New,
            CandidateStatus::Scheduled,
            CandidateStatus::Ongoing,
            CandidateStatus::Selected,
            CandidateStatus::Rejected,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            CandidateStatus::New => "New",
            CandidateStatus::Scheduled => "Scheduled",
            CandidateStatus::Ongoing => "Ongoing",
            CandidateStatus::Selected => "Selected",
            CandidateStatus::Rejected => "Rejected",
        }
    }
}

/// Daily presence mark recorded against an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[serde(rename = "Medical Leave")]
    MedicalLeave,
    #[serde(rename = "Work From Home")]
    WorkFromHome,
}

impl AttendanceStatus {
    pub const fn ordered() -> [AttendanceStatus; 4] {
        [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::MedicalLeave,
            AttendanceStatus::WorkFromHome,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::MedicalLeave => "Medical Leave",
            AttendanceStatus::WorkFromHome => "Work From Home",
        }
    }
}

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub const fn ordered() -> [LeaveStatus; 3] {
        [
            LeaveStatus::Pending,
            LeaveStatus::Approved,
            LeaveStatus::Rejected,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
        }
    }
}

// Labels are matched ignoring case and surrounding whitespace, so filter values
// such as "medical leave" resolve to the same variant the backend sends.
macro_rules! label_parsing {
    ($ty:ident, $kind:literal) => {
        impl FromStr for $ty {
            type Err = UnknownStatus;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let needle = value.trim();
                $ty::ordered()
                    .into_iter()
                    .find(|status| status.label().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| UnknownStatus {
                        kind: $kind,
                        value: value.to_string(),
                    })
            }
        }

        impl TryFrom<String> for $ty {
            type Error = UnknownStatus;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

label_parsing!(CandidateStatus, "candidate");
label_parsing!(AttendanceStatus, "attendance");
label_parsing!(LeaveStatus, "leave");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(
            "medical leave".parse::<AttendanceStatus>(),
            Ok(AttendanceStatus::MedicalLeave)
        );
        assert_eq!(
            " WORK FROM HOME ".parse::<AttendanceStatus>(),
            Ok(AttendanceStatus::WorkFromHome)
        );
        assert_eq!("approved".parse::<LeaveStatus>(), Ok(LeaveStatus::Approved));
        assert_eq!(
            "scheduled".parse::<CandidateStatus>(),
            Ok(CandidateStatus::Scheduled)
        );
    }

    #[test]
    fn unknown_labels_name_the_pipeline() {
        let err = "hired".parse::<CandidateStatus>().expect_err("not a status");
        assert_eq!(err.kind, "candidate");
        assert_eq!(err.to_string(), "'hired' is not a valid candidate status");
    }

    #[test]
    fn serde_uses_backend_labels() {
        let json = serde_json::to_string(&AttendanceStatus::WorkFromHome).expect("serializes");
        assert_eq!(json, "\"Work From Home\"");

        let parsed: AttendanceStatus =
            serde_json::from_str("\"medical leave\"").expect("lenient deserialize");
        assert_eq!(parsed, AttendanceStatus::MedicalLeave);

        assert!(serde_json::from_str::<LeaveStatus>("\"Cancelled\"").is_err());
    }
}
