use crate::api::ClientError;
use crate::auth::{AuthError, SessionError};
use crate::config::ConfigError;
use crate::dashboard::DashboardError;
use crate::forms::ValidationErrors;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Session(SessionError),
    Auth(AuthError),
    Dashboard(DashboardError),
    Io(std::io::Error),
    Output(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Session(err) => write!(f, "session error: {}", err),
            AppError::Auth(err) => write!(f, "{}", err),
            AppError::Dashboard(err) => write!(f, "{}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Output(message) => write!(f, "output error: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Session(err) => Some(err),
            AppError::Auth(err) => Some(err),
            AppError::Dashboard(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Output(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<DashboardError> for AppError {
    fn from(value: DashboardError) -> Self {
        Self::Dashboard(value)
    }
}

impl From<ClientError> for AppError {
    fn from(value: ClientError) -> Self {
        Self::Dashboard(DashboardError::Client(value))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        Self::Dashboard(DashboardError::Validation(value))
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
