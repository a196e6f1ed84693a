use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::claims::{Claims, ClaimsError, validate_claims};

/// Why a presented token was not accepted.
///
/// The error text is surfaced verbatim in rejection responses, so both
/// variants keep the underlying message intact.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token failed decoding or signature verification.
    #[error(transparent)]
    Verification(#[from] jsonwebtoken::errors::Error),

    /// The token decoded cleanly but its time window is not valid.
    #[error(transparent)]
    Claims(#[from] ClaimsError),
}

/// Verifies a presented bearer token into claims.
///
/// `now` is injected so the expiry check stays deterministic in tests.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError>;
}

/// HS256 verifier over a shared secret.
pub struct Hs256TokenVerifier {
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256TokenVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `validate_claims` against the injected clock.
        validation.validate_exp = false;

        Self {
            decoding: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }
}

impl TokenVerifier for Hs256TokenVerifier {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}
