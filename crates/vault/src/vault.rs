//! Keyed registry of shared cells
//!
//! Replaces the single unguarded dictionary with a DashMap keyed by the
//! cell key. Every operation is a single map call, so registration, lookup
//! and removal are atomic per key.
//!
//! # Design
//!
//! - DashMap: sharded, per-key entry API for create-or-get
//! - FxHash: keys are short strings, no need for a DoS-resistant hasher
//! - Type erasure: each slot holds `Arc<dyn Any + Send + Sync>` plus a
//!   [`TypeTag`] naming the element type for diagnostics
//!
//! # Semantics
//!
//! - First registration wins. Declaring an existing key returns the existing
//!   cell and discards the proposed value.
//! - A key registered with another element type never resolves for `T`.
//!   The default APIs report that as absence; [`Vault::lookup`] and
//!   [`Vault::try_share`] report it as [`VaultError::TypeMismatch`].
//! - Removal is unconditional. Whoever asks for a key to be removed gets it
//!   removed, registrant or not.

use crate::cell::{CellStorage, SharedCell};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use rustc_hash::FxHasher;
use sharedvault_core::{Result, TypeTag, VaultConfig, VaultError};
use std::any::{type_name, Any};
use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::Arc;
use tracing::{debug, warn};

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// The process-wide vault, created on first use
static GLOBAL_VAULT: Lazy<Vault> = Lazy::new(Vault::new);

/// Type-erased registry entry
struct Slot {
    tag: TypeTag,
    cell: Arc<dyn Any + Send + Sync>,
}

impl Slot {
    fn new<T>(storage: Arc<CellStorage<T>>) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self {
            tag: TypeTag::of::<T>(),
            cell: storage,
        }
    }

    fn downcast<T>(&self) -> Option<Arc<CellStorage<T>>>
    where
        T: Send + Sync + 'static,
    {
        if !self.tag.is::<T>() {
            return None;
        }
        Arc::clone(&self.cell).downcast::<CellStorage<T>>().ok()
    }

    fn holds<T>(&self, storage: &Arc<CellStorage<T>>) -> bool {
        Arc::as_ptr(&self.cell) as *const () == Arc::as_ptr(storage) as *const ()
    }
}

/// Outcome of a create-or-get call
pub(crate) enum Declared<T> {
    /// Key was vacant; the proposed value was stored
    Created(SharedCell<T>),
    /// Key was taken by a cell of the same type
    Existing(SharedCell<T>),
    /// Key was taken by another type; the returned cell is not registered
    Detached(SharedCell<T>, &'static str),
}

struct VaultInner {
    entries: DashMap<String, Slot, FxBuildHasher>,
    config: VaultConfig,
}

/// Registry mapping keys to shared cells
///
/// `Vault` is a cheap handle; clones refer to the same registry. Most code
/// uses the process-wide instance through [`Vault::global`] (or
/// `SharedCell::share`), but independent vaults can be built with
/// [`Vault::new`] and passed around explicitly.
///
/// # Thread Safety
///
/// All operations are thread-safe. Two threads declaring the same key at the
/// same time always end up holding the same cell.
///
/// # Example
///
/// ```
/// use sharedvault_vault::Vault;
///
/// let vault = Vault::new();
/// let theme = vault.share("ui.theme", String::from("dark"));
///
/// let seen = vault.get::<String>("ui.theme").unwrap();
/// assert!(seen.same_cell(&theme));
/// assert!(vault.get::<u32>("ui.theme").is_none());
/// ```
#[derive(Clone)]
pub struct Vault {
    inner: Arc<VaultInner>,
}

impl Vault {
    /// Create an empty vault with the default configuration
    pub fn new() -> Self {
        Self::with_config(VaultConfig::default())
    }

    /// Create an empty vault with `config`
    pub fn with_config(config: VaultConfig) -> Self {
        Self {
            inner: Arc::new(VaultInner {
                entries: DashMap::with_hasher(FxBuildHasher::default()),
                config,
            }),
        }
    }

    /// The process-wide vault
    ///
    /// Initialized on first call with [`VaultConfig::default`] and never torn
    /// down before the process exits. Keys nobody removes live as long as the
    /// process does.
    pub fn global() -> &'static Vault {
        &GLOBAL_VAULT
    }

    /// Configuration this vault was built with
    pub fn config(&self) -> &VaultConfig {
        &self.inner.config
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Check if no key is registered
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Check if `key` is registered, whatever its type
    pub fn contains(&self, key: &str) -> bool {
        self.inner.entries.contains_key(key)
    }

    /// Snapshot of the registered keys, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .entries
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Create-or-get the cell for `key`
    ///
    /// If `key` is vacant, a new cell holding `initial` is registered and
    /// returned. If `key` already holds a `T`, the existing cell is returned
    /// and `initial` is dropped.
    ///
    /// If `key` holds another type, the existing entry is left alone and the
    /// caller gets a detached cell holding `initial` that the vault does not
    /// know about. Use [`Vault::try_share`] to get an error instead.
    ///
    /// Never fails.
    pub fn share<T>(&self, key: impl Into<String>, initial: T) -> SharedCell<T>
    where
        T: Send + Sync + 'static,
    {
        match self.declare(key.into(), initial) {
            Declared::Created(cell) | Declared::Existing(cell) | Declared::Detached(cell, _) => cell,
        }
    }

    /// Create-or-get the cell for `key`, rejecting type collisions
    ///
    /// Same as [`Vault::share`] except that a key registered with another
    /// element type yields [`VaultError::TypeMismatch`].
    pub fn try_share<T>(&self, key: impl Into<String>, initial: T) -> Result<SharedCell<T>>
    where
        T: Send + Sync + 'static,
    {
        match self.declare(key.into(), initial) {
            Declared::Created(cell) | Declared::Existing(cell) => Ok(cell),
            Declared::Detached(cell, actual) => Err(VaultError::TypeMismatch {
                key: cell.key().to_string(),
                expected: type_name::<T>(),
                actual,
            }),
        }
    }

    /// Register an existing cell under its own key
    ///
    /// First registration wins: if the key is already taken by a `T`, that
    /// cell is returned instead and `cell` stays unregistered. Re-registering
    /// an orphaned cell whose key is free puts it back in the vault.
    pub fn register<T>(&self, cell: &SharedCell<T>) -> SharedCell<T>
    where
        T: Send + Sync + 'static,
    {
        match self.inner.entries.entry(cell.key().to_string()) {
            Entry::Occupied(occupied) => {
                let slot = occupied.get();
                match slot.downcast::<T>() {
                    Some(storage) => {
                        if !slot.holds(cell.storage()) {
                            self.report_duplicate(cell.key());
                        }
                        SharedCell::from_storage(storage, self.clone())
                    }
                    None => {
                        self.report_mismatch(cell.key(), type_name::<T>(), slot.tag.name());
                        cell.clone()
                    }
                }
            }
            Entry::Vacant(vacant) => {
                let storage = Arc::clone(cell.storage());
                vacant.insert(Slot::new(Arc::clone(&storage)));
                if self.inner.config.diagnostics {
                    debug!(key = %cell.key(), "cell registered");
                }
                SharedCell::from_storage(storage, self.clone())
            }
        }
    }

    pub(crate) fn declare<T>(&self, key: String, initial: T) -> Declared<T>
    where
        T: Send + Sync + 'static,
    {
        match self.inner.entries.entry(key) {
            Entry::Occupied(occupied) => {
                let slot = occupied.get();
                match slot.downcast::<T>() {
                    Some(storage) => {
                        self.report_duplicate(occupied.key());
                        Declared::Existing(SharedCell::from_storage(storage, self.clone()))
                    }
                    None => {
                        let actual = slot.tag.name();
                        self.report_mismatch(occupied.key(), type_name::<T>(), actual);
                        let storage = Arc::new(CellStorage::new(occupied.key().clone(), initial));
                        Declared::Detached(SharedCell::from_storage(storage, self.clone()), actual)
                    }
                }
            }
            Entry::Vacant(vacant) => {
                let storage = Arc::new(CellStorage::new(vacant.key().clone(), initial));
                if self.inner.config.diagnostics {
                    debug!(key = %vacant.key(), ty = type_name::<T>(), "cell added to vault");
                }
                vacant.insert(Slot::new(Arc::clone(&storage)));
                Declared::Created(SharedCell::from_storage(storage, self.clone()))
            }
        }
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Cell registered under `key`, if it holds a `T`
    ///
    /// Absent keys and keys registered with another type both return `None`.
    /// The diagnostic says which one happened.
    pub fn get<T>(&self, key: &str) -> Option<SharedCell<T>>
    where
        T: Send + Sync + 'static,
    {
        self.lookup(key).ok()
    }

    /// Cell registered under `key`, with an explicit reason on failure
    pub fn lookup<T>(&self, key: &str) -> Result<SharedCell<T>>
    where
        T: Send + Sync + 'static,
    {
        let Some(slot) = self.inner.entries.get(key) else {
            if self.inner.config.diagnostics {
                debug!(key = %key, "lookup: key not found in vault");
            }
            return Err(VaultError::not_found(key));
        };

        match slot.downcast::<T>() {
            Some(storage) => {
                if self.inner.config.diagnostics {
                    debug!(key = %key, "lookup: cell found");
                }
                Ok(SharedCell::from_storage(storage, self.clone()))
            }
            None => {
                let actual = slot.tag.name();
                self.report_mismatch(key, type_name::<T>(), actual);
                Err(VaultError::TypeMismatch {
                    key: key.to_string(),
                    expected: type_name::<T>(),
                    actual,
                })
            }
        }
    }

    pub(crate) fn holds<T>(&self, cell: &SharedCell<T>) -> bool
    where
        T: Send + Sync + 'static,
    {
        self.inner
            .entries
            .get(cell.key())
            .map(|slot| slot.holds(cell.storage()))
            .unwrap_or(false)
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Remove `key`, whatever its type
    ///
    /// Returns the removed entry, or `None` if the key was not registered.
    /// Outstanding handles to the removed cell become orphaned.
    pub fn remove(&self, key: &str) -> Option<RemovedEntry> {
        match self.inner.entries.remove(key) {
            Some((key, slot)) => {
                if self.inner.config.diagnostics {
                    debug!(key = %key, "cell removed from vault");
                }
                Some(RemovedEntry {
                    key,
                    slot,
                    vault: self.clone(),
                })
            }
            None => {
                if self.inner.config.diagnostics {
                    warn!(key = %key, "remove: key not found in vault");
                }
                None
            }
        }
    }

    /// Remove the entry under `cell`'s key and return its value
    ///
    /// The entry is removed even if it is not `cell` itself or holds another
    /// type; in the latter case `None` is returned.
    pub fn remove_cell<T>(&self, cell: &SharedCell<T>) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let removed = self.remove(cell.key())?;
        let value = removed.value::<T>();
        if value.is_none() {
            self.report_mismatch(cell.key(), type_name::<T>(), removed.type_name());
        }
        value
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    fn report_duplicate(&self, key: &str) {
        if self.inner.config.diagnostics {
            warn!(key = %key, "cell already declared, proposed value ignored");
        }
    }

    fn report_mismatch(&self, key: &str, expected: &'static str, actual: &'static str) {
        if self.inner.config.diagnostics {
            warn!(key = %key, expected, actual, "cell registered with a different type");
        }
    }
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Vault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vault")
            .field("entries", &self.inner.entries.len())
            .field("config", &self.inner.config)
            .finish()
    }
}

/// An entry taken out of a vault by [`Vault::remove`]
pub struct RemovedEntry {
    key: String,
    slot: Slot,
    vault: Vault,
}

impl RemovedEntry {
    /// Key the entry was registered under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Element type the entry was registered with
    pub fn type_name(&self) -> &'static str {
        self.slot.tag.name()
    }

    /// Handle to the removed (now orphaned) cell, if it holds a `T`
    pub fn downcast<T>(&self) -> Option<SharedCell<T>>
    where
        T: Send + Sync + 'static,
    {
        self.slot
            .downcast::<T>()
            .map(|storage| SharedCell::from_storage(storage, self.vault.clone()))
    }

    /// Value the removed cell held, if it is a `T`
    pub fn value<T>(&self) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.downcast::<T>().map(|cell| cell.get())
    }
}

impl fmt::Debug for RemovedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemovedEntry")
            .field("key", &self.key)
            .field("type", &self.slot.tag.name())
            .finish()
    }
}
