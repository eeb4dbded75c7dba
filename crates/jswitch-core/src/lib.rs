//! Core data model and host capabilities for jswitch.
//!
//! This crate defines the types shared by discovery and propagation:
//!
//! - [`RuntimeKind`] and [`InstalledRuntime`] — the inventory record model
//! - [`InventoryStore`] — the persisted per-kind inventory
//! - [`Environment`] — injected access to environment variables, the home
//!   directory and the OS family, so engines are testable without the real
//!   process environment
//! - [`SettingsStore`] and [`ComponentCatalog`] — the editor settings
//!   surface and the presence check that gates downstream consumers

pub mod env;
pub mod error;
pub mod inventory;
pub mod io;
pub mod runtime;
pub mod settings;

pub use env::{Environment, OsFamily, StubEnvironment, SystemEnvironment};
pub use error::{Error, Result};
pub use inventory::InventoryStore;
pub use runtime::{
    HomesBundle, InstalledRuntime, RuntimeKind, is_canonical_jdk_name, JAVA_HOME_KEY,
    MAVEN_HOME_KEY, TRACKED_KEYS,
};
pub use settings::{
    ComponentCatalog, ExtensionDirCatalog, JsonSettingsStore, SettingsScope, SettingsStore,
    StaticCatalog,
};
