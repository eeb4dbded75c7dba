//! Maven discovery probes.
//!
//! Unlike JDK discovery, Maven probes produce bare paths: the union is
//! deduplicated by path and carries no provenance, and naming happens later
//! from the `mvn -v` banner.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use jswitch_core::{Environment, RuntimeKind};

use crate::probe::{run_probes, Probe};
use crate::validate::is_valid_maven;

/// Discover Maven home directories across every probe, deduplicated by
/// path in probe order.
pub async fn discover_mavens(env: Arc<dyn Environment>) -> Vec<String> {
    let results = run_probes(env, maven_probes()).await;

    let mut found = Vec::new();
    let mut seen = HashSet::new();
    for (_source, root) in results {
        let path = root.to_string_lossy().into_owned();
        if seen.insert(path.clone()) {
            found.push(path);
        }
    }
    found
}

/// The fixed Maven probe registry.
pub fn maven_probes() -> Vec<Arc<dyn Probe>> {
    vec![
        Arc::new(MavenEnvVars),
        Arc::new(MavenPathScan),
        Arc::new(MavenCommonRoots),
    ]
}

/// `MAVEN_HOME` and `M2_HOME`, each checked for `bin/mvn` beneath it.
struct MavenEnvVars;

#[async_trait]
impl Probe for MavenEnvVars {
    fn source(&self) -> &'static str {
        "env"
    }

    async fn run(&self, env: &dyn Environment) -> Vec<PathBuf> {
        ["MAVEN_HOME", "M2_HOME"]
            .iter()
            .filter_map(|v| env.var(v))
            .map(PathBuf::from)
            .filter(|home| is_valid_maven(home))
            .collect()
    }
}

/// Every `PATH` entry containing an `mvn` executable; the Maven home is two
/// directories above it.
struct MavenPathScan;

#[async_trait]
impl Probe for MavenPathScan {
    fn source(&self) -> &'static str {
        "PATH"
    }

    async fn run(&self, env: &dyn Environment) -> Vec<PathBuf> {
        let Some(path_var) = env.var("PATH") else {
            return Vec::new();
        };
        let separator = env.os().path_separator();

        let mut homes = Vec::new();
        for entry in path_var.split(separator).filter(|e| !e.is_empty()) {
            let mvn = Path::new(entry).join("mvn");
            if mvn.exists() {
                if let Some(home) = mvn.parent().and_then(Path::parent) {
                    homes.push(home.to_path_buf());
                }
            }
        }
        homes
    }
}

/// Fixed OS-specific installation roots, each either a Maven home itself or
/// a directory of versioned Maven homes one level down.
struct MavenCommonRoots;

impl MavenCommonRoots {
    fn roots(env: &dyn Environment) -> Vec<PathBuf> {
        if env.os().is_windows() {
            let mut roots = vec![
                PathBuf::from(r"C:\Program Files\Apache\maven"),
                PathBuf::from(r"C:\Program Files (x86)\Apache\maven"),
            ];
            if let Some(profile) = env.var("USERPROFILE") {
                roots.push(Path::new(&profile).join(".sdkman/candidates/maven"));
            }
            roots
        } else {
            let mut roots = vec![
                PathBuf::from("/usr/local/apache-maven"),
                PathBuf::from("/opt/apache-maven"),
                PathBuf::from("/opt/maven"),
                PathBuf::from("/usr/share/maven"),
                PathBuf::from("/usr/local/Cellar/maven"),
            ];
            if let Some(home) = env.var("HOME") {
                roots.push(Path::new(&home).join("sdkman/candidates/maven"));
                roots.push(Path::new(&home).join("tools"));
            }
            roots
        }
    }
}

#[async_trait]
impl Probe for MavenCommonRoots {
    fn source(&self) -> &'static str {
        "common"
    }

    async fn run(&self, env: &dyn Environment) -> Vec<PathBuf> {
        let mut homes = Vec::new();
        for root in Self::roots(env) {
            if !root.exists() {
                continue;
            }
            if is_valid_maven(&root) {
                homes.push(root);
            } else {
                homes.extend(
                    crate::probe::scan_dir(env.os(), RuntimeKind::Maven, &root).await,
                );
            }
        }
        homes
    }
}
