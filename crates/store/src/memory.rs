//! In-memory user store (dev/test backend).

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use userdir_core::UserId;

use crate::error::StoreError;
use crate::record::{NewUser, UserRecord};
use crate::UserStore;

/// Map-backed store. The `BTreeMap` keys on the id string so listings come
/// back in stable id order.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<BTreeMap<UserId, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, letting the store assign id and timestamp.
    pub fn insert(&self, user: NewUser) -> UserRecord {
        let record = UserRecord {
            id: UserId::generate(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        self.insert_record(record.clone());
        record
    }

    /// Seed a fully-specified record (tests use this for fixed ids).
    pub fn insert_record(&self, record: UserRecord) {
        self.inner
            .write()
            .expect("user store lock poisoned")
            .insert(record.id.clone(), record);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let inner = self.inner.read().expect("user store lock poisoned");
        Ok(inner.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, StoreError> {
        let inner = self.inner.read().expect("user store lock poisoned");
        Ok(inner.get(id).cloned())
    }
}
