//! Probe trait and the concurrent fan-out engine.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use jswitch_core::{Environment, OsFamily, RuntimeKind};

use crate::validate::is_valid_installation;

/// One discovery convention: a named source producing validated
/// installation roots.
///
/// Probes swallow their own filesystem failures and return whatever they
/// could find; a probe on the wrong OS returns nothing.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Provenance tag recorded on candidates this probe finds.
    fn source(&self) -> &'static str;

    async fn run(&self, env: &dyn Environment) -> Vec<PathBuf>;
}

/// Run a fixed probe registry jointly, isolating failures.
///
/// Each probe runs as its own task; a panicking probe is logged and
/// dropped, so the joint wait always completes. Results come back in
/// registry order regardless of completion order.
pub(crate) async fn run_probes(
    env: Arc<dyn Environment>,
    probes: Vec<Arc<dyn Probe>>,
) -> Vec<(&'static str, PathBuf)> {
    let mut set = JoinSet::new();
    for (index, probe) in probes.into_iter().enumerate() {
        let env = Arc::clone(&env);
        set.spawn(async move {
            let source = probe.source();
            let roots = probe.run(env.as_ref()).await;
            debug!(source, found = roots.len(), "probe finished");
            (index, source, roots)
        });
    }

    let mut by_index: BTreeMap<usize, (&'static str, Vec<PathBuf>)> = BTreeMap::new();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, source, roots)) => {
                by_index.insert(index, (source, roots));
            }
            Err(e) => warn!(error = %e, "discovery probe failed"),
        }
    }

    by_index
        .into_values()
        .flat_map(|(source, roots)| roots.into_iter().map(move |root| (source, root)))
        .collect()
}

/// Scan a directory one level deep for subdirectories that validate as
/// installation roots of `kind`. Missing or unreadable directories yield
/// nothing.
pub(crate) async fn scan_dir(os: OsFamily, kind: RuntimeKind, dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return found;
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if path.is_dir() && is_valid_installation(os, kind, &path) {
            found.push(path);
        }
    }
    found
}
