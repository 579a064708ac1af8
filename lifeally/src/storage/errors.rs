//! Error types for storage operations

use std::error::Error;
use std::fmt;

/// Error type for storage operations
#[derive(Debug)]
pub enum StorageError {
    /// Configuration error
    Configuration(String),

    /// Connection error
    Connection(String),

    /// Query error
    Query(String),

    /// Internal error
    Internal(String),

    /// Validation error
    Validation(String),

    /// Data not found
    NotFound(String),

    /// Item already exists
    AlreadyExists(String),

    /// Serialization/deserialization error
    Serialization(String),

    /// Other error
    Other(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            StorageError::Connection(msg) => write!(f, "Connection error: {}", msg),
            StorageError::Query(msg) => write!(f, "Query error: {}", msg),
            StorageError::Internal(msg) => write!(f, "Internal error: {}", msg),
            StorageError::Validation(msg) => write!(f, "Validation error: {}", msg),
            StorageError::NotFound(msg) => write!(f, "Not found: {}", msg),
            StorageError::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            StorageError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::Other(msg) => write!(f, "Other error: {}", msg),
        }
    }
}

impl Error for StorageError {}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Configuration(err.to_string())
    }
}

impl From<StorageError> for crate::LifeallyError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => crate::LifeallyError::NotFound(msg),
            StorageError::Validation(msg) => crate::LifeallyError::Validation(msg),
            other => crate::LifeallyError::Storage(other.to_string()),
        }
    }
}
