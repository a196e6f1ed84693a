use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use userdir_core::UserId;

/// Bearer-token claims model (transport-agnostic).
///
/// This is the minimal set of claims the service expects once a token has
/// been decoded/verified. `iat`/`exp` serialize as numeric seconds so tokens
/// interoperate with standard JWT tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user this token represents.
    pub sub: UserId,

    /// Issued-at timestamp.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub iat: DateTime<Utc>,

    /// Expiration timestamp.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,
}

impl Claims {
    /// Claims issued now, valid for `ttl`.
    pub fn new(sub: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub,
            iat: now,
            exp: now + ttl,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate token claims.
///
/// Note: this validates the *claims* only. Signature verification/decoding is
/// intentionally outside this module.
pub fn validate_claims(claims: &Claims, now: DateTime<Utc>) -> Result<(), ClaimsError> {
    if claims.exp <= claims.iat {
        return Err(ClaimsError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(ClaimsError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(ClaimsError::Expired);
    }
    Ok(())
}
