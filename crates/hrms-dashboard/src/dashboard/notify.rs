use std::sync::{Mutex, PoisonError};

use crate::api::ClientError;

const NETWORK_ERROR: &str = "Network error. Please check your connection.";
const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Transient message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Keeps every notification in order; used by tests and batch callers.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    events: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// Dashboard actions that report failures to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Login,
    Refresh,
    AddCandidate,
    CandidateStatus,
    DeleteCandidate,
    UpdateEmployee,
    MarkAttendance,
    DeleteEmployee,
    AddLeave,
    LeaveStatus,
}

impl Action {
    /// Used when an error response carries no message.
    fn fallback(self) -> &'static str {
        match self {
            Action::Login => "Login failed",
            Action::Refresh => "Failed to load dashboard data",
            Action::AddCandidate => "Failed to add candidate",
            Action::CandidateStatus => "Failed to update candidate status",
            Action::DeleteCandidate => "Failed to delete candidate",
            Action::UpdateEmployee => "Failed to update employee",
            Action::MarkAttendance => "Failed to update attendance status",
            Action::DeleteEmployee => "Failed to delete employee",
            Action::AddLeave => "Failed to add leave",
            Action::LeaveStatus => "Failed to update leave status",
        }
    }

    fn unexpected(self) -> &'static str {
        match self {
            Action::UpdateEmployee => "An error occurred while updating the employee.",
            Action::DeleteCandidate => {
                "An unexpected error occurred while deleting the candidate."
            }
            Action::DeleteEmployee => "An unexpected error occurred while deleting the employee.",
            _ => UNEXPECTED_ERROR,
        }
    }

    /// User-facing text for a failed call.
    pub(crate) fn describe(self, err: &ClientError) -> String {
        match err {
            ClientError::Server { message, .. } => {
                let message = message.as_deref().unwrap_or(self.fallback());
                match self {
                    Action::Login => message.to_string(),
                    _ => format!("Error: {message}"),
                }
            }
            ClientError::Transport(_) => NETWORK_ERROR.to_string(),
            ClientError::Rejected { .. } => match self {
                Action::Login => self.fallback().to_string(),
                _ => format!("{}. Please try again.", self.fallback()),
            },
            ClientError::Unauthorized | ClientError::Auth(_) => format!("Error: {err}"),
            ClientError::Setup(_)
            | ClientError::Decode(_)
            | ClientError::MissingField(_)
            | ClientError::Session(_) => self.unexpected().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_prefer_backend_message() {
        let err = ClientError::Server {
            status: 400,
            message: Some("Email already exists".to_string()),
        };
        assert_eq!(
            Action::AddCandidate.describe(&err),
            "Error: Email already exists"
        );

        let err = ClientError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(
            Action::LeaveStatus.describe(&err),
            "Error: Failed to update leave status"
        );
        assert_eq!(Action::Login.describe(&err), "Login failed");
    }

    #[test]
    fn rejected_mutations_ask_to_retry() {
        let err = ClientError::Rejected {
            msg: "fail".to_string(),
        };
        assert_eq!(
            Action::MarkAttendance.describe(&err),
            "Failed to update attendance status. Please try again."
        );
    }

    #[test]
    fn decode_problems_are_unexpected() {
        let err = ClientError::MissingField("id");
        assert_eq!(Action::AddLeave.describe(&err), UNEXPECTED_ERROR);
        assert_eq!(
            Action::DeleteEmployee.describe(&err),
            "An unexpected error occurred while deleting the employee."
        );
    }

    #[test]
    fn memory_notifier_keeps_order() {
        let notifier = MemoryNotifier::default();
        notifier.notify(Notification::success("one"));
        notifier.notify(Notification::error("two"));
        let events = notifier.events();
        assert_eq!(events.len(), 2);
        assert!(!events[0].is_error());
        assert_eq!(notifier.last(), Some(Notification::error("two")));
    }
}
