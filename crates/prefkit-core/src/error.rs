//! Error types for prefkit core.

use thiserror::Error;

use crate::value::PrefType;

/// Errors raised by key construction and typed snapshot access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("preference key name must not be empty")]
    EmptyKeyName,

    #[error("preference {name} holds a {actual} value, requested {expected}")]
    TypeMismatch {
        name: String,
        expected: PrefType,
        actual: PrefType,
    },

    #[error("unknown preference type tag: {0}")]
    UnknownTypeTag(u8),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
