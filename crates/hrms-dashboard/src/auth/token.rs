use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token is not a three part JWT")]
    Malformed,
    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token payload is not a JSON object: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Claims carried in the JWT payload. Only `exp` is interpreted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decode the payload segment without verifying the signature; the backend
/// does that on every request.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut segments = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// A token is expired once `exp` lies in the past. Tokens that cannot be
/// decoded are treated as expired; tokens without `exp` never expire.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims
            .exp
            .is_some_and(|exp| exp.saturating_mul(1000) < now.timestamp_millis()),
        Err(_) => true,
    }
}
