//! Postgres-backed user store.
//!
//! Schema expected:
//!
//! ```sql
//! CREATE TABLE users (
//!     id            TEXT PRIMARY KEY,
//!     name          TEXT NOT NULL,
//!     email         TEXT NOT NULL,
//!     password_hash TEXT NOT NULL,
//!     created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use userdir_core::UserId;

use crate::error::StoreError;
use crate::record::UserRecord;
use crate::UserStore;

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }
}

fn row_to_record(row: &PgRow) -> Result<UserRecord, StoreError> {
    let id: String = row.try_get("id")?;
    Ok(UserRecord {
        id: UserId::new(id).map_err(|e| StoreError::Query(e.to_string()))?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, email, password_hash, created_at FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_record).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_record).transpose()
    }
}
