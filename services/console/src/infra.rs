use chrono::NaiveDate;
use dialoguer::{Confirm, Password};
use hrms_dashboard::dashboard::{Notification, NotificationLevel, Notifier};
use hrms_dashboard::error::AppError;

/// Prints notifications as they happen: successes on stdout, errors on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => println!("{}", notification.message),
            NotificationLevel::Error => eprintln!("{}", notification.message),
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let value = raw.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d-%m-%Y"))
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD or DD-MM-YYYY ({err})"))
}

/// First day of a `YYYY-MM` month.
pub(crate) fn parse_month(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM ({err})"))
}

pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, AppError> {
    if assume_yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|err| AppError::Output(format!("confirmation prompt failed: {err}")))
}

pub(crate) fn prompt_password() -> Result<String, AppError> {
    Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|err| AppError::Output(format!("password prompt failed: {err}")))
}
