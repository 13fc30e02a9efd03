//! Error types for registry lookups
//!
//! Nothing in the registry is fatal. The default APIs collapse every failure
//! into an absent result; [`VaultError`] is only surfaced by the
//! explicit-outcome variants (`Vault::lookup`, `Vault::try_share`) so callers
//! that care can tell a missing key from a key holding another type.

use thiserror::Error;

/// Why a key did not resolve to a cell of the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// No entry is registered under the key
    #[error("key not found: {key}")]
    NotFound {
        /// The key that was looked up
        key: String,
    },

    /// The key is registered, but with a different element type
    #[error("type mismatch for key {key}: expected {expected}, registered as {actual}")]
    TypeMismatch {
        /// The key that was looked up
        key: String,
        /// Element type the caller asked for
        expected: &'static str,
        /// Element type the key was registered with
        actual: &'static str,
    },
}

/// Result type for registry lookups.
pub type Result<T> = std::result::Result<T, VaultError>;

impl VaultError {
    /// Build a not-found error for `key`
    pub fn not_found(key: impl Into<String>) -> Self {
        VaultError::NotFound { key: key.into() }
    }

    /// Key the failed operation was about
    pub fn key(&self) -> &str {
        match self {
            VaultError::NotFound { key } | VaultError::TypeMismatch { key, .. } => key,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, VaultError::NotFound { .. })
    }

    /// Check if this is a type-mismatch error.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, VaultError::TypeMismatch { .. })
    }
}
