//! `userdir-store` — the user-store collaborator.
//!
//! The HTTP surface only ever reads: it lists all users or looks one up by
//! id. Everything else about persistence (how records get created, what else
//! lives next to them) is outside this service.

use async_trait::async_trait;

use userdir_core::UserId;

pub mod error;
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod record;

pub use error::StoreError;
pub use memory::InMemoryUserStore;
#[cfg(feature = "postgres")]
pub use postgres::PgUserStore;
pub use record::{NewUser, UserRecord};

/// Read access to user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All user records, in stable id order.
    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// One record by id, `None` when nothing matches.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, StoreError>;
}
