use thiserror::Error;

/// Anything that went wrong below the storage traits. Callers treat every variant the same way:
/// a persistence failure that aborts the current operation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("persistence failure: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("persistence failure: migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("persistence failure: stored day key {0:?} is malformed")]
    MalformedDayKey(String),
}
