//! Storage-specific error type wrapping sqlx errors.

use hearth_domain::error::{AlreadyExistsError, HearthError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to (de)serialize a stored JSON value.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for HearthError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Map an insert failure, turning a primary-key collision into
/// [`HearthError::AlreadyExists`].
pub(crate) fn insert_error(err: sqlx::Error, entity: &'static str, id: String) -> HearthError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AlreadyExistsError { entity, id }.into()
        }
        err => StorageError::from(err).into(),
    }
}
