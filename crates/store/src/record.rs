use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use userdir_core::UserId;

/// A user record as the store holds it.
///
/// `password_hash` is the credential field. It never leaves the service in a
/// response body; the API maps records into DTOs that omit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input for seeding a record; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
