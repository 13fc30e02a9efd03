//! Registry configuration
//!
//! The only knob is whether the registry emits diagnostics through `tracing`.
//! Diagnostics cover the non-fatal paths the caller never sees as errors:
//! duplicate registrations, lookups of absent keys and type mismatches.

use serde::{Deserialize, Serialize};

/// Diagnostics are on unless a vault is built with [`VaultConfig::quiet`].
pub const DEFAULT_DIAGNOSTICS: bool = true;

/// Configuration for a `Vault` instance
///
/// The process-wide vault always uses [`VaultConfig::default`]. Vaults built
/// explicitly may pick their own settings.
///
/// # Example
///
/// ```
/// use sharedvault_core::VaultConfig;
///
/// let config = VaultConfig::default().with_diagnostics(false);
/// assert!(!config.diagnostics);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Emit `tracing` events for registrations, removals and misses
    pub diagnostics: bool,
}

impl VaultConfig {
    /// Config with diagnostics disabled
    pub fn quiet() -> Self {
        Self { diagnostics: false }
    }

    /// Set whether diagnostics are emitted
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            diagnostics: DEFAULT_DIAGNOSTICS,
        }
    }
}
