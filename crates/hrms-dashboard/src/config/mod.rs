use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_ASSET_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_SESSION_FILE: &str = ".hrms/session.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Distinguishes runtime behavior for different stages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Log filter used when `HRMS_LOG_LEVEL` is unset.
    pub fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "info",
            Self::Test => "debug",
            Self::Production => "warn",
        }
    }
}

/// Top-level configuration for the dashboard client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("HRMS_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let api_base_url = base_url_from_env("HRMS_API_BASE_URL", DEFAULT_API_BASE_URL)?;
        let asset_base_url = base_url_from_env("HRMS_ASSET_BASE_URL", DEFAULT_ASSET_BASE_URL)?;

        let timeout_secs = match env::var("HRMS_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout { value: raw })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let session_file = env::var("HRMS_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));

        let log_level = env::var("HRMS_LOG_LEVEL")
            .unwrap_or_else(|_| environment.default_log_level().to_string());

        Ok(Self {
            environment,
            backend: BackendConfig {
                api_base_url,
                asset_base_url,
                request_timeout: Duration::from_secs(timeout_secs),
            },
            session: SessionConfig { session_file },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn base_url_from_env(key: &'static str, default: &str) -> Result<String, ConfigError> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl { key, value: raw })
    }
}

/// Where the backend lives and how long we wait for it.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub api_base_url: String,
    /// Uploaded files (resumes, leave documents) are served relative to this root.
    pub asset_base_url: String,
    pub request_timeout: Duration,
}

impl BackendConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        Self {
            asset_base_url: api_base_url.trim_end_matches("/api").to_string(),
            api_base_url,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    pub fn asset_url(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return reference.to_string();
        }
        format!(
            "{}/{}",
            self.asset_base_url,
            reference.trim_start_matches('/')
        )
    }
}

/// Persisted login state location.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub session_file: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBaseUrl { key: &'static str, value: String },
    InvalidTimeout { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaseUrl { key, value } => {
                write!(f, "{key} must be an http(s) URL, found '{value}'")
            }
            ConfigError::InvalidTimeout { value } => write!(
                f,
                "HRMS_REQUEST_TIMEOUT_SECS must be a positive number of seconds, found '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
