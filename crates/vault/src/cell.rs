//! Shared cell handles
//!
//! A [`SharedCell`] is a handle to one named, mutable value owned by a
//! [`Vault`]. Every handle obtained for the same key aliases the same
//! storage, so a write through one handle is visible through all of them
//! immediately.
//!
//! ## Orphaned cells
//!
//! Removing a key from the vault does not invalidate outstanding handles.
//! They keep reading and writing the old storage, but the key no longer
//! resolves to it; [`SharedCell::is_registered`] reports `false` from then on.
//!
//! ## Locking
//!
//! The value sits behind a `parking_lot::RwLock`. Each accessor takes the lock
//! for its own duration only. A read followed by a write is two separate
//! critical sections; use [`SharedCell::update`] when the new value depends
//! on the old one.

use crate::vault::Vault;
use parking_lot::RwLock;
use sharedvault_core::Result;
use std::fmt;
use std::sync::Arc;

/// Storage behind every handle for one registration
pub(crate) struct CellStorage<T> {
    key: String,
    value: RwLock<T>,
}

impl<T> CellStorage<T> {
    pub(crate) fn new(key: String, value: T) -> Self {
        Self {
            key,
            value: RwLock::new(value),
        }
    }
}

/// Handle to a named value shared through a [`Vault`]
///
/// Handles are created by [`Vault::share`] (or [`SharedCell::share`] for the
/// process-wide vault) and are cheap to clone. Clones alias the same cell.
///
/// # Example
///
/// ```
/// use sharedvault_vault::Vault;
///
/// let vault = Vault::new();
/// let a = vault.share("counter", 1);
/// let b = vault.share("counter", 999); // already declared, 999 is discarded
///
/// a.set(5);
/// assert_eq!(b.get(), 5);
/// ```
pub struct SharedCell<T> {
    storage: Arc<CellStorage<T>>,
    vault: Vault,
}

impl<T> SharedCell<T>
where
    T: Send + Sync + 'static,
{
    /// Create-or-get `key` in the process-wide vault
    ///
    /// See [`Vault::share`].
    pub fn share(key: impl Into<String>, initial: T) -> Self {
        Vault::global().share(key, initial)
    }

    /// Like [`SharedCell::share`], but reports a type collision as an error
    pub fn try_share(key: impl Into<String>, initial: T) -> Result<Self> {
        Vault::global().try_share(key, initial)
    }

    pub(crate) fn from_storage(storage: Arc<CellStorage<T>>, vault: Vault) -> Self {
        Self { storage, vault }
    }

    pub(crate) fn storage(&self) -> &Arc<CellStorage<T>> {
        &self.storage
    }

    /// Key this cell was declared under
    pub fn key(&self) -> &str {
        &self.storage.key
    }

    /// Vault this handle was obtained from
    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    /// Borrow the current value for the duration of `f`
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.storage.value.read())
    }

    /// Replace the stored value
    ///
    /// Visible through every handle aliasing this cell.
    pub fn set(&self, value: T) {
        *self.storage.value.write() = value;
    }

    /// Store `value` and return the previous one
    pub fn replace(&self, value: T) -> T {
        std::mem::replace(&mut *self.storage.value.write(), value)
    }

    /// Mutate the value in place under a single write lock
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.storage.value.write())
    }

    /// Alias of [`SharedCell::set`]
    pub fn assign(&self, value: T) {
        self.set(value);
    }

    /// Check whether both handles point at the same storage
    pub fn same_cell(&self, other: &SharedCell<T>) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }

    /// Check whether the vault still maps this key to this cell
    ///
    /// Returns `false` for orphaned and detached cells, including when the
    /// key has since been re-declared with fresh storage.
    pub fn is_registered(&self) -> bool {
        self.vault.holds(self)
    }

    /// Run `f` with read access to both values
    ///
    /// Locks are taken in address order so two threads comparing the same
    /// pair in opposite directions cannot deadlock.
    pub(crate) fn with_both<R>(&self, other: &SharedCell<T>, f: impl FnOnce(&T, &T) -> R) -> R {
        if self.same_cell(other) {
            let value = self.storage.value.read();
            return f(&value, &value);
        }

        if Arc::as_ptr(&self.storage) < Arc::as_ptr(&other.storage) {
            let lhs = self.storage.value.read();
            let rhs = other.storage.value.read();
            f(&lhs, &rhs)
        } else {
            let rhs = other.storage.value.read();
            let lhs = self.storage.value.read();
            f(&lhs, &rhs)
        }
    }
}

impl<T> SharedCell<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Current value
    pub fn get(&self) -> T {
        self.storage.value.read().clone()
    }

    /// Copy `other`'s value into this cell
    ///
    /// Only the value moves; both cells keep their own keys.
    pub fn assign_from(&self, other: &SharedCell<T>) {
        if self.same_cell(other) {
            return;
        }
        let value = other.get();
        self.set(value);
    }

    /// Remove this cell's key from its vault
    ///
    /// Returns the value of the removed entry, or `None` when the key was
    /// already gone. Calling it twice returns `None` the second time. This
    /// handle stays usable afterwards as an orphaned cell.
    pub fn remove_from_registry(&self) -> Option<T> {
        self.vault.remove_cell(self)
    }
}

impl<T> Clone for SharedCell<T> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            vault: self.vault.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCell")
            .field("key", &self.storage.key)
            .field("value", &*self.storage.value.read())
            .finish()
    }
}
