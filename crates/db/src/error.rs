use std::path::PathBuf;

use portfolio_core::error::CoreError;

/// Errors raised by the project store.
///
/// `Io` and `Serialization` are storage failures; domain failures
/// (validation, not found, conflict) travel as [`CoreError`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed collection file {}: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Whether this error is an underlying read/write failure rather than a
    /// domain error.
    pub fn is_storage(&self) -> bool {
        !matches!(self, StoreError::Core(_))
    }
}
