//! nexus-core: plugin lifecycle and runtime registry for the Nexus shell
//!
//! This crate provides the foundational components for managing plugin
//! bundles:
//!
//! - **Manifest** - [`ManifestStore`] persists the aggregated descriptor list
//! - **Scanner** - [`scanner::scan`] walks the plugins root and rebuilds the manifest
//! - **Pipeline** - [`install::install`], [`uninstall::uninstall`], [`pack::pack`]
//!   mutate the plugins root and keep the manifest in sync
//! - **Runtime** - [`PluginRegistry`] holds loaded plugins with enabled state
//!   and change notification; [`loader::load`] populates it from the manifest
//!
//! # Lifecycle
//!
//! The pipeline commands (install/uninstall/pack) run as short-lived
//! invocations: they mutate the filesystem, then rescan and rewrite the
//! manifest wholesale. The loader reads the manifest once at host startup
//! and registers each resolvable entry; from then on the registry is the
//! only live state. Newly installed code is picked up at the next startup,
//! while enable/disable toggles take effect immediately and reset on
//! restart.
//!
//! # Example
//!
//! ```no_run
//! use nexus_core::{ComponentTable, PluginPaths, PluginRegistry, loader};
//!
//! fn startup(table: &ComponentTable) -> Result<(), Box<dyn std::error::Error>> {
//!     let paths = PluginPaths::default();
//!     let mut registry = PluginRegistry::new();
//!     let report = loader::load_from_disk(&paths, table, &mut registry)?;
//!     println!("loaded {} plugins", report.loaded);
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod component;
pub mod config;
pub mod deps;
pub mod descriptor;
pub mod error;
pub mod install;
pub mod loader;
pub mod manifest;
pub mod pack;
pub mod registry;
pub mod scanner;
pub mod uninstall;

// Re-export key types for convenience
pub use component::{ComponentHandle, ComponentTable, PluginComponent};
pub use config::PluginPaths;
pub use descriptor::{DESCRIPTOR_FILE, ENTRY_FILE, PluginDescriptor};
pub use error::PluginError;
pub use install::{InstalledPlugin, install};
pub use loader::{LoadReport, load_from_disk};
pub use manifest::{Manifest, ManifestEntry, ManifestStore};
pub use pack::{PackSummary, PackageInfo, PackedPlugin, pack, pack_all};
pub use registry::{PluginRegistry, RegistryEntry, Subscription};
pub use uninstall::{UninstallOutcome, uninstall};
