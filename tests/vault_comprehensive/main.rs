//! Vault Comprehensive Test Suite
//!
//! ## Modules
//!
//! - `basic_ops`: Declare, read, write, remove
//! - `holder`: Bulk teardown through VaultHolder
//! - `concurrency`: Multi-threaded declaration and mutation
//! - `edge_cases`: Type mismatches, orphaned and detached cells
//! - `properties`: Property-based checks of the registry invariants
//!
//! Tests touching the process-wide vault run in parallel, so every such test
//! draws its keys from [`unique_key`].

pub use sharedvault::{
    get_shared, lookup_shared, remove_shared, share_value, Error, RemovedEntry, SharedCell, Vault,
    VaultConfig, VaultError, VaultHolder,
};

use std::sync::atomic::{AtomicU64, Ordering};

pub mod concurrency;
pub mod edge_cases;

static NEXT_KEY: AtomicU64 = AtomicU64::new(0);

/// Key no other test in this binary uses
pub fn unique_key(prefix: &str) -> String {
    format!("{}_{}", prefix, NEXT_KEY.fetch_add(1, Ordering::Relaxed))
}

/// Private vault that stays out of the process-wide one
pub fn create_vault() -> Vault {
    Vault::with_config(VaultConfig::quiet())
}
