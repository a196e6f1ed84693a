use chrono::{DateTime, Utc};
use serde::Serialize;

use userdir_core::UserId;
use userdir_store::UserRecord;

/// Uniform success envelope for the read endpoints.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// User record as returned over HTTP.
///
/// The credential field has no counterpart here, so it cannot appear in a
/// response body.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            created_at: record.created_at,
        }
    }
}
