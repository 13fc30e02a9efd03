//! Lifecycle holder for vault registrations
//!
//! A component that declares shared cells creates a [`VaultHolder`] and
//! tracks each key it introduced. When the holder goes out of scope (normal
//! return or unwinding) every tracked key is removed from the vault, in the
//! order it was tracked.
//!
//! Keys never tracked by a holder stay registered until someone removes them
//! explicitly.

use crate::cell::SharedCell;
use crate::vault::{Declared, Vault};
use tracing::debug;

/// Removes the keys it tracks from a [`Vault`] on teardown
///
/// Teardown runs exactly once: either through [`VaultHolder::teardown`] or
/// when the holder is dropped.
///
/// # Example
///
/// ```
/// use sharedvault_vault::{Vault, VaultHolder};
///
/// let vault = Vault::new();
/// {
///     let mut holder = VaultHolder::new(vault.clone());
///     holder.share("session.token", String::from("abc"));
///     assert!(vault.contains("session.token"));
/// }
/// assert!(!vault.contains("session.token"));
/// ```
#[derive(Debug)]
pub struct VaultHolder {
    vault: Vault,
    tracked_keys: Vec<String>,
    torn_down: bool,
}

impl VaultHolder {
    /// Create a holder bound to `vault`
    pub fn new(vault: Vault) -> Self {
        Self {
            vault,
            tracked_keys: Vec::new(),
            torn_down: false,
        }
    }

    /// Create a holder bound to the process-wide vault
    pub fn global() -> Self {
        Self::new(Vault::global().clone())
    }

    /// Vault this holder removes keys from
    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    /// Keys tracked so far, in tracking order
    pub fn tracked_keys(&self) -> &[String] {
        &self.tracked_keys
    }

    /// Track `key` for removal on teardown
    ///
    /// No deduplication: a key tracked twice is removed twice, and the
    /// second removal simply finds nothing.
    pub fn track(&mut self, key: impl Into<String>) {
        self.tracked_keys.push(key.into());
    }

    /// Create-or-get `key` in this holder's vault
    ///
    /// The key is tracked only if this call created the entry. Getting a key
    /// another component declared, or a detached cell on a type collision,
    /// leaves that registration to its owner.
    pub fn share<T>(&mut self, key: impl Into<String>, initial: T) -> SharedCell<T>
    where
        T: Send + Sync + 'static,
    {
        match self.vault.declare(key.into(), initial) {
            Declared::Created(cell) => {
                self.track(cell.key());
                cell
            }
            Declared::Existing(cell) | Declared::Detached(cell, _) => cell,
        }
    }

    /// Remove every tracked key now
    ///
    /// Returns how many removals found an entry. Dropping the holder
    /// afterwards does nothing.
    pub fn teardown(mut self) -> usize {
        self.release()
    }

    fn release(&mut self) -> usize {
        if self.torn_down {
            return 0;
        }
        self.torn_down = true;

        let keys = std::mem::take(&mut self.tracked_keys);
        let removed = keys
            .iter()
            .filter(|key| self.vault.remove(key).is_some())
            .count();

        if self.vault.config().diagnostics {
            debug!(tracked = keys.len(), removed, "vault holder torn down");
        }
        removed
    }
}

impl Default for VaultHolder {
    fn default() -> Self {
        Self::global()
    }
}

impl Drop for VaultHolder {
    fn drop(&mut self) {
        self.release();
    }
}
