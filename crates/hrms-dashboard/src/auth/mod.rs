//! Login state passed explicitly to everything that talks to the backend.

mod session;
mod token;

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

pub use session::{AuthUser, FileSessionStore, MemorySessionStore, Session, SessionError, SessionStore};
pub use token::{decode_claims, is_expired, TokenClaims, TokenError};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("not logged in, run `hrms login` first")]
    SignedOut,
    #[error("session expired, please log in again")]
    Expired,
    #[error(transparent)]
    Store(#[from] SessionError),
}

/// Current session backed by a persistent store.
pub struct AuthContext<S> {
    store: Arc<S>,
    current: RwLock<Option<Session>>,
}

impl<S> AuthContext<S>
where
    S: SessionStore,
{
    /// Pick up whatever session the store already holds.
    pub fn restore(store: Arc<S>) -> Result<Self, SessionError> {
        let current = store.load()?;
        Ok(Self {
            store,
            current: RwLock::new(current),
        })
    }

    pub fn signed_out(store: Arc<S>) -> Self {
        Self {
            store,
            current: RwLock::new(None),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn session(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.token.clone())
    }

    pub fn sign_in(&self, session: Session) -> Result<(), SessionError> {
        self.store.save(&session)?;
        info!(user = session.display_name(), "signed in");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), SessionError> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.store.clear()?;
        debug!("session cleared");
        Ok(())
    }

    /// Guard for protected operations: a missing session is rejected, an
    /// expired one is cleared before being rejected.
    pub fn require_active(&self, now: DateTime<Utc>) -> Result<Session, AuthError> {
        let session = self.session().ok_or(AuthError::SignedOut)?;
        if is_expired(&session.token, now) {
            self.sign_out()?;
            return Err(AuthError::Expired);
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::TimeZone;

    fn token_expiring_at(exp: i64) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#));
        format!("h.{payload}.s")
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    #[test]
    fn restore_reads_persisted_session() {
        let store = Arc::new(MemorySessionStore::with_session(Session::new("t.o.k", None)));
        let auth = AuthContext::restore(store).expect("restores");
        assert_eq!(auth.bearer_token().as_deref(), Some("t.o.k"));
    }

    #[test]
    fn expired_session_is_cleared_by_guard() {
        let store = Arc::new(MemorySessionStore::default());
        let auth = AuthContext::signed_out(store.clone());
        auth.sign_in(Session::new(token_expiring_at(100), None))
            .expect("signed in");

        assert!(auth.require_active(at(50)).is_ok());
        assert!(matches!(auth.require_active(at(101)), Err(AuthError::Expired)));
        assert!(!auth.is_signed_in());
        assert!(store.load().expect("store readable").is_none());
        assert!(matches!(auth.require_active(at(0)), Err(AuthError::SignedOut)));
    }
}
