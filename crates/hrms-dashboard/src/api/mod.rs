//! HTTP access to the HRMS backend.

mod client;
mod wire;

pub use client::HrmsClient;

use crate::auth::{AuthError, SessionError};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("could not prepare request: {0}")]
    Setup(#[source] reqwest::Error),
    #[error("no response from backend: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("session rejected by backend, please log in again")]
    Unauthorized,
    #[error("backend responded with status {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },
    #[error("backend did not accept the request (msg: {msg:?})")]
    Rejected { msg: String },
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ClientError {
    /// Message the backend attached to an error response, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The request never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// The session is gone, either rejected by the backend or expired locally.
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized
                | ClientError::Auth(AuthError::Expired | AuthError::SignedOut)
        )
    }
}
