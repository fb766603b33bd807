//! Error types for the preference facade.

use prefkit_core::CoreError;
use prefkit_store::StoreError;
use thiserror::Error;

/// Errors that can occur during preference operations.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Invalid key or type mismatch.
    #[error("preference error: {0}")]
    Core(#[from] CoreError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Store location could not be resolved or prepared.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PrefsError {
    /// Whether this is a storage access fault.
    pub fn is_io(&self) -> bool {
        matches!(self, PrefsError::Store(e) if e.is_io())
    }
}

/// Result type for preference operations.
pub type Result<T> = std::result::Result<T, PrefsError>;
