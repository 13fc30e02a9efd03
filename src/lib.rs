//! # SharedVault
//!
//! Share one mutable value between otherwise unrelated components of a
//! process, identified by a string key, without threading references through
//! constructors.
//!
//! ## Quick Start
//!
//! ```
//! use sharedvault::prelude::*;
//!
//! // Two components declare the same key; the second declaration is ignored
//! let a = share_value("docs.quickstart.counter", 1);
//! let b = share_value("docs.quickstart.counter", 999);
//!
//! a.set(5);
//! assert_eq!(b.get(), 5);
//!
//! // Removal frees the key
//! assert_eq!(a.remove_from_registry(), Some(5));
//! assert!(get_shared::<i32>("docs.quickstart.counter").is_none());
//! ```
//!
//! ## Lifecycle
//!
//! A component that wants its keys gone when it is torn down keeps a
//! [`VaultHolder`] next to its state:
//!
//! ```
//! use sharedvault::prelude::*;
//!
//! struct Session {
//!     _holder: VaultHolder,
//!     user: SharedCell<String>,
//! }
//!
//! impl Session {
//!     fn open() -> Self {
//!         let mut holder = VaultHolder::global();
//!         let user = holder.share("docs.lifecycle.user", String::from("guest"));
//!         Session { _holder: holder, user }
//!     }
//! }
//!
//! let session = Session::open();
//! assert_eq!(session.user.get(), "guest");
//! drop(session);
//! assert!(get_shared::<String>("docs.lifecycle.user").is_none());
//! ```
//!
//! ## Failure model
//!
//! Nothing here fails loudly. Duplicate declarations return the existing
//! cell, and lookups of absent or wrongly typed keys return `None`. Use
//! [`lookup_shared`] when the difference matters.

#![warn(missing_docs)]

mod error;

pub mod prelude;

pub use error::{Error, Result};

pub use sharedvault_core::{TypeTag, VaultConfig, VaultError, DEFAULT_DIAGNOSTICS};
pub use sharedvault_vault::{RemovedEntry, SharedCell, Vault, VaultHolder};

/// Create-or-get `key` in the process-wide vault
///
/// If `key` is already declared with type `T`, the existing cell is returned
/// and `initial` is discarded.
pub fn share_value<T>(key: impl Into<String>, initial: T) -> SharedCell<T>
where
    T: Send + Sync + 'static,
{
    Vault::global().share(key, initial)
}

/// Cell declared under `key` in the process-wide vault, if it holds a `T`
pub fn get_shared<T>(key: &str) -> Option<SharedCell<T>>
where
    T: Send + Sync + 'static,
{
    Vault::global().get(key)
}

/// Like [`get_shared`], but says why nothing was found
pub fn lookup_shared<T>(key: &str) -> Result<SharedCell<T>>
where
    T: Send + Sync + 'static,
{
    Ok(Vault::global().lookup(key)?)
}

/// Remove `key` from the process-wide vault
pub fn remove_shared(key: &str) -> Option<RemovedEntry> {
    Vault::global().remove(key)
}
