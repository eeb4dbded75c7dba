//! Installation discovery for jswitch.
//!
//! A fixed registry of independent probes scans the platform's well-known
//! installation conventions (package managers, IDE-managed directories,
//! environment variables, common filesystem roots). Probes run concurrently
//! and are fault-isolated: one failing probe never prevents the others from
//! reporting. Results are validated, deduplicated by path and tagged with
//! provenance, then merged into the persisted inventory by the reconciler.

pub mod error;
pub mod jdk;
pub mod maven;
pub mod probe;
pub mod reconcile;
pub mod validate;
pub mod version;

pub use error::{Error, Result};
pub use jdk::discover_jdks;
pub use maven::discover_mavens;
pub use probe::Probe;
pub use reconcile::{adopt_selection, reconcile_jdks, reconcile_mavens, ReconcileReport};
pub use validate::is_valid_installation;
pub use version::{resolve_jdk_version, resolve_maven_version};
