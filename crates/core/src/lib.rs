//! Core types for the SharedVault registry
//!
//! This crate defines the types shared by the registry and its facade:
//! - [`VaultError`]: Explicit outcomes for lookups that find nothing usable
//! - [`VaultConfig`]: Registry configuration (diagnostics toggle)
//! - [`TypeTag`]: Runtime identity of a cell's element type

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod type_tag;

pub use config::{VaultConfig, DEFAULT_DIAGNOSTICS};
pub use error::{Result, VaultError};
pub use type_tag::TypeTag;
