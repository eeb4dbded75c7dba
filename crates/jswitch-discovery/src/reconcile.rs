//! Merging discovered installations into the persisted inventory.
//!
//! Merging is keyed by path: a candidate whose path is already present is
//! dropped, never re-added or updated. JDK entries additionally get their
//! display names reconciled against the `JavaSE-<version>` convention. The
//! inventory is only rewritten when something actually changed.

use std::path::Path;

use tracing::{debug, info, warn};

use jswitch_core::{
    is_canonical_jdk_name, Environment, InstalledRuntime, InventoryStore, RuntimeKind,
};

use crate::validate::is_valid_installation;
use crate::version::{resolve_jdk_version, resolve_maven_version};
use crate::Result;

/// Outcome of one reconciliation pass, for reporting to the user.
///
/// Warnings are informational: the affected entries remain usable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Entries newly added to the inventory.
    pub added: usize,
    /// Naming non-conformance the pass could not repair.
    pub warnings: Vec<String>,
}

/// Merge discovered JDKs into the inventory and reconcile display names.
///
/// Non-conforming names (old entries included) are renamed to
/// `JavaSE-<version>` when a version resolves; otherwise the name is left
/// alone and a warning is recorded.
pub async fn reconcile_jdks(
    env: &dyn Environment,
    store: &InventoryStore,
    discovered: Vec<InstalledRuntime>,
) -> Result<ReconcileReport> {
    let existing = store.list(RuntimeKind::Jdk)?;
    let (mut merged, added) = merge_by_path(existing, discovered);

    let mut renamed = false;
    let mut warnings = Vec::new();
    for entry in &mut merged {
        if is_canonical_jdk_name(&entry.name) {
            continue;
        }
        match resolve_jdk_version(env.os(), Path::new(&entry.path)).await {
            Some(version) => {
                let canonical = format!("JavaSE-{version}");
                debug!(from = %entry.name, to = %canonical, "renaming JDK entry");
                entry.name = canonical;
                renamed = true;
            }
            None => warnings.push(format!(
                "JDK '{}' at {} does not follow the JavaSE-<version> naming convention \
                 and its version could not be resolved",
                entry.name, entry.path
            )),
        }
    }

    if added > 0 || renamed {
        store.replace(RuntimeKind::Jdk, merged)?;
        info!(added, "JDK inventory updated");
    }

    Ok(ReconcileReport { added, warnings })
}

/// Merge discovered Maven homes into the inventory.
///
/// New homes are named `Maven <version>` from the banner; homes whose
/// version cannot be resolved are skipped entirely.
pub async fn reconcile_mavens(
    store: &InventoryStore,
    discovered: Vec<String>,
) -> Result<ReconcileReport> {
    let existing = store.list(RuntimeKind::Maven)?;

    let mut candidates = Vec::new();
    for path in discovered {
        match resolve_maven_version(Path::new(&path)).await {
            Some(version) => {
                candidates.push(InstalledRuntime::new(format!("Maven {version}"), path));
            }
            None => debug!(%path, "skipping Maven home with unresolvable version"),
        }
    }

    let (merged, added) = merge_by_path(existing, candidates);
    if added > 0 {
        store.replace(RuntimeKind::Maven, merged)?;
        info!(added, "Maven inventory updated");
    }

    Ok(ReconcileReport {
        added,
        warnings: Vec::new(),
    })
}

/// Adopt a selection that designates a path not present in the inventory,
/// e.g. a hand-edited setting.
///
/// The path is validated and named on the fly; on success the new entry is
/// persisted and returned. `None` means the path did not validate and the
/// caller should warn the user and skip this kind for the current pass.
pub async fn adopt_selection(
    env: &dyn Environment,
    store: &InventoryStore,
    kind: RuntimeKind,
    path: &str,
) -> Result<Option<InstalledRuntime>> {
    let entry = match kind {
        RuntimeKind::Jdk => {
            if !is_valid_installation(env.os(), RuntimeKind::Jdk, Path::new(path)) {
                warn!(%path, "configured JDK path is not a valid installation");
                return Ok(None);
            }
            let name = match resolve_jdk_version(env.os(), Path::new(path)).await {
                Some(version) => format!("JavaSE-{version}"),
                None => format!("JDK at {path}"),
            };
            InstalledRuntime::new(name, path)
        }
        RuntimeKind::Maven => match resolve_maven_version(Path::new(path)).await {
            Some(version) => InstalledRuntime::new(format!("Maven {version}"), path),
            None => {
                warn!(%path, "configured Maven path is not a valid installation");
                return Ok(None);
            }
        },
    };

    let mut entries = store.list(kind)?;
    entries.push(entry.clone());
    store.replace(kind, entries)?;
    info!(name = %entry.name, %path, "adopted configured installation");
    Ok(Some(entry))
}

/// Append candidates whose path is not yet present. Returns the merged list
/// and the number of additions.
fn merge_by_path(
    existing: Vec<InstalledRuntime>,
    candidates: Vec<InstalledRuntime>,
) -> (Vec<InstalledRuntime>, usize) {
    let mut merged = existing;
    let mut seen: std::collections::HashSet<String> =
        merged.iter().map(|e| e.path.clone()).collect();

    let mut added = 0;
    for candidate in candidates {
        if seen.insert(candidate.path.clone()) {
            merged.push(candidate);
            added += 1;
        }
    }
    (merged, added)
}
