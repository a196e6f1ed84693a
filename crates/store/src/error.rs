use thiserror::Error;

/// Persistence-layer failure.
///
/// Deliberately a single opaque kind: callers never recover from a store
/// failure, they forward it to the shared error path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store query failed: {0}")]
    Query(String),
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Query(err.to_string())
    }
}
