//! `userdir-auth` — pure authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how
//! to decode and validate bearer tokens, nothing about requests or users.

pub mod claims;
pub mod token;

pub use claims::{Claims, ClaimsError, validate_claims};
pub use token::{Hs256TokenVerifier, TokenError, TokenVerifier};
