//! Unified error type for SharedVault.
//!
//! Only the explicit-outcome lookups return errors; everything else reports
//! failure as an absent result.

use sharedvault_core::VaultError;
use thiserror::Error;

/// All SharedVault errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No value is shared under the key
    #[error("not found: {0}")]
    NotFound(String),

    /// The key is shared with another type
    #[error("wrong type: expected {expected}, got {actual}")]
    WrongType {
        /// Expected type
        expected: String,
        /// Actual type found
        actual: String,
    },
}

/// Result type for SharedVault operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a wrong-type error.
    pub fn is_wrong_type(&self) -> bool {
        matches!(self, Error::WrongType { .. })
    }
}

impl From<VaultError> for Error {
    fn from(e: VaultError) -> Self {
        match e {
            VaultError::NotFound { key } => Error::NotFound(key),
            VaultError::TypeMismatch {
                expected, actual, ..
            } => Error::WrongType {
                expected: expected.to_string(),
                actual: actual.to_string(),
            },
        }
    }
}
