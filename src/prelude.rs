//! Convenient imports for SharedVault.
//!
//! ```
//! use sharedvault::prelude::*;
//!
//! let cell = share_value("docs.prelude.flag", true);
//! assert!(cell.get());
//! # cell.remove_from_registry();
//! ```

// Entry points
pub use crate::{get_shared, lookup_shared, remove_shared, share_value};

// Error handling
pub use crate::error::{Error, Result};

// Registry types
pub use sharedvault_core::VaultConfig;
pub use sharedvault_vault::{SharedCell, Vault, VaultHolder};
