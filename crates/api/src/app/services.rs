use std::sync::Arc;

use userdir_core::UserId;
use userdir_store::{InMemoryUserStore, StoreError, UserRecord, UserStore};

use crate::config::AppConfig;

/// Service layer behind the handlers.
///
/// Thin by design: the read endpoints delegate straight to the store, and
/// failures bubble up untouched.
pub struct AppServices {
    users: Arc<dyn UserStore>,
}

impl AppServices {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Handle for wiring the same store into the authorization guard.
    pub fn user_store(&self) -> Arc<dyn UserStore> {
        Arc::clone(&self.users)
    }

    pub async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.users.find_all().await
    }

    pub async fn get_user(&self, id: &UserId) -> Result<Option<UserRecord>, StoreError> {
        self.users.find_by_id(id).await
    }
}

/// Pick the store backend for this process.
///
/// With the `postgres` feature and a configured `DATABASE_URL` this connects
/// to Postgres; otherwise it falls back to the in-memory backend.
pub async fn build_user_store(config: &AppConfig) -> Arc<dyn UserStore> {
    #[cfg(feature = "postgres")]
    if let Some(url) = &config.database_url {
        let store = userdir_store::PgUserStore::connect(url)
            .await
            .expect("failed to connect to Postgres");
        return Arc::new(store);
    }

    #[cfg(not(feature = "postgres"))]
    if config.database_url.is_some() {
        tracing::warn!(
            "DATABASE_URL set but postgres feature not enabled, falling back to in-memory store"
        );
    }

    Arc::new(InMemoryUserStore::new())
}
