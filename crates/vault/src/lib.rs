//! Keyed registry of shared mutable cells
//!
//! Components declare a value under a string key and get back a
//! [`SharedCell`]. Anyone declaring or looking up the same key later gets a
//! handle to the same storage, not a copy.
//!
//! - [`Vault`]: the registry (process-wide via [`Vault::global`], or built
//!   explicitly)
//! - [`SharedCell`]: handle to one registered value
//! - [`VaultHolder`]: removes the keys a component declared when it goes out
//!   of scope

#![warn(missing_docs)]

pub mod cell;
pub mod holder;
pub mod ops;
pub mod vault;

pub use cell::SharedCell;
pub use holder::VaultHolder;
pub use vault::{RemovedEntry, Vault};

pub use sharedvault_core::{TypeTag, VaultConfig, VaultError};
