//! JDK discovery probes.
//!
//! Each probe covers one installation convention. Candidates are validated
//! before acceptance and tagged with the probe's source, so an entry named
//! `jdk-17.0.2` found by Scoop is displayed as `jdk-17.0.2 (Scoop)`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use jswitch_core::{Environment, InstalledRuntime, OsFamily, RuntimeKind};

use crate::probe::{run_probes, scan_dir, Probe};
use crate::validate::is_valid_jdk;

/// Discover JDK installations across every probe.
///
/// Results are deduplicated by path, first probe wins; ordering follows the
/// probe registry, then directory enumeration within a probe.
pub async fn discover_jdks(env: Arc<dyn Environment>) -> Vec<InstalledRuntime> {
    let results = run_probes(env, jdk_probes()).await;

    let mut found = Vec::new();
    let mut seen = HashSet::new();
    for (source, root) in results {
        push_with_provenance(&mut found, &mut seen, source, &root);
    }
    found
}

/// The fixed JDK probe registry. OS-conditioning happens inside each probe.
pub fn jdk_probes() -> Vec<Arc<dyn Probe>> {
    vec![
        Arc::new(WindowsDistributors),
        Arc::new(Scoop),
        Arc::new(Mise),
        Arc::new(Vfox),
        Arc::new(MavenToolchains),
        Arc::new(IntelliJ),
        Arc::new(Pleiades),
        Arc::new(CommonDrives),
        Arc::new(JavaHomeVar),
    ]
}

/// Append a candidate with its provenance suffix, skipping paths already
/// accepted by an earlier probe.
fn push_with_provenance(
    acc: &mut Vec<InstalledRuntime>,
    seen: &mut HashSet<String>,
    source: &str,
    root: &Path,
) {
    let path = root.to_string_lossy().into_owned();
    if !seen.insert(path.clone()) {
        return;
    }
    let dirname = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.clone());
    acc.push(InstalledRuntime::new(format!("{dirname} ({source})"), path));
}

/// Subdirectories of `dir` whose name starts with `prefix`, matched
/// case-insensitively. Unreadable directories yield nothing.
async fn subdirs_with_prefix(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    let prefix = prefix.to_lowercase();
    let mut found = Vec::new();
    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return found;
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name().to_string_lossy().to_lowercase();
        let path = entry.path();
        if name.starts_with(&prefix) && path.is_dir() {
            found.push(path);
        }
    }
    found
}

/// Named distributor folders under the Windows program directories.
struct WindowsDistributors;

#[async_trait]
impl Probe for WindowsDistributors {
    fn source(&self) -> &'static str {
        "Windows"
    }

    async fn run(&self, env: &dyn Environment) -> Vec<PathBuf> {
        if !env.os().is_windows() {
            return Vec::new();
        }
        let mut roots = Vec::new();
        for program_dir in ["ProgramFiles", "LOCALAPPDATA"]
            .iter()
            .filter_map(|v| env.var(v))
        {
            for dist in ["BellSoft", "OpenJDK", "RedHat", "Semeru"] {
                let dir = Path::new(&program_dir).join(dist);
                roots.extend(scan_dir(env.os(), RuntimeKind::Jdk, &dir).await);
            }
        }
        roots
    }
}

/// Scoop apps directories, user and global.
struct Scoop;

#[async_trait]
impl Probe for Scoop {
    fn source(&self) -> &'static str {
        "Scoop"
    }

    async fn run(&self, env: &dyn Environment) -> Vec<PathBuf> {
        if !env.os().is_windows() {
            return Vec::new();
        }
        let user = env
            .var("SCOOP")
            .map(PathBuf::from)
            .or_else(|| env.home_dir().map(|h| h.join("scoop")));
        let global = env
            .var("SCOOP_GLOBAL")
            .map(PathBuf::from)
            .or_else(|| env.var("ProgramData").map(|p| Path::new(&p).join("scoop")));

        let mut roots = Vec::new();
        for dir in [user, global].into_iter().flatten() {
            roots.extend(scan_dir(env.os(), RuntimeKind::Jdk, &dir.join("apps")).await);
        }
        roots
    }
}

/// mise installs directory. On macOS each install nests the real root under
/// `Contents/`.
struct Mise;

#[async_trait]
impl Probe for Mise {
    fn source(&self) -> &'static str {
        "mise"
    }

    async fn run(&self, env: &dyn Environment) -> Vec<PathBuf> {
        if env.os().is_windows() {
            return Vec::new();
        }
        let Some(home) = env.home_dir() else {
            return Vec::new();
        };
        let installs = home.join(".local/share/mise/installs/java");

        if env.os() == OsFamily::Mac {
            let mut roots = Vec::new();
            for install in subdirs_with_prefix(&installs, "").await {
                roots
                    .extend(scan_dir(env.os(), RuntimeKind::Jdk, &install.join("Contents")).await);
            }
            roots
        } else {
            scan_dir(env.os(), RuntimeKind::Jdk, &installs).await
        }
    }
}

/// vfox cache directory, all platforms.
struct Vfox;

#[async_trait]
impl Probe for Vfox {
    fn source(&self) -> &'static str {
        "vfox"
    }

    async fn run(&self, env: &dyn Environment) -> Vec<PathBuf> {
        let Some(home) = env.home_dir() else {
            return Vec::new();
        };
        let cache = home.join(".version-fox").join("cache").join("java");
        scan_dir(env.os(), RuntimeKind::Jdk, &cache).await
    }
}

static JDK_HOME_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<jdkHome>([^<]+)</jdkHome>").expect("valid pattern"));

/// JDK homes declared in the user-level Maven toolchains file.
///
/// The file is mined with a regex rather than parsed as XML; only the
/// `<jdkHome>` element text matters.
struct MavenToolchains;

#[async_trait]
impl Probe for MavenToolchains {
    fn source(&self) -> &'static str {
        "Maven"
    }

    async fn run(&self, env: &dyn Environment) -> Vec<PathBuf> {
        let Some(home) = env.home_dir() else {
            return Vec::new();
        };
        let toolchains = home.join(".m2").join("toolchains.xml");
        let xml = tokio::fs::read_to_string(&toolchains).await.unwrap_or_default();

        JDK_HOME_ELEMENT
            .captures_iter(&xml)
            .map(|captures| PathBuf::from(captures[1].trim()))
            .filter(|path| is_valid_jdk(env.os(), path))
            .collect()
    }
}

/// IntelliJ-managed JDKs under `~/.jdks`. On macOS the IDE installs into
/// `/Library/Java/JavaVirtualMachines` instead, which the Windows/Linux
/// layout probe does not cover.
struct IntelliJ;

#[async_trait]
impl Probe for IntelliJ {
    fn source(&self) -> &'static str {
        "IntelliJ"
    }

    async fn run(&self, env: &dyn Environment) -> Vec<PathBuf> {
        if env.os() == OsFamily::Mac {
            return Vec::new();
        }
        let Some(home) = env.home_dir() else {
            return Vec::new();
        };
        scan_dir(env.os(), RuntimeKind::Jdk, &home.join(".jdks")).await
    }
}

/// Pleiades (Eclipse bundles) on Windows drive roots, e.g. `C:\pleiades\java\17`
/// and `C:\pleiades\2023-03\java\17`. The macOS app-bundle layout
/// (`/Applications/Eclipse_20xx-xx.app/Contents/java`) is a known gap.
struct Pleiades;

#[async_trait]
impl Probe for Pleiades {
    fn source(&self) -> &'static str {
        "Pleiades"
    }

    async fn run(&self, env: &dyn Environment) -> Vec<PathBuf> {
        if !env.os().is_windows() {
            return Vec::new();
        }
        let mut roots = Vec::new();
        for drive in ["c:/", "d:/"] {
            for install in subdirs_with_prefix(Path::new(drive), "pleiades").await {
                roots.extend(scan_dir(env.os(), RuntimeKind::Jdk, &install.join("java")).await);
                for release in subdirs_with_prefix(&install, "20").await {
                    roots
                        .extend(scan_dir(env.os(), RuntimeKind::Jdk, &release.join("java")).await);
                }
            }
        }
        roots
    }
}

/// Bare `C:\java`-style roots.
struct CommonDrives;

#[async_trait]
impl Probe for CommonDrives {
    fn source(&self) -> &'static str {
        "Common"
    }

    async fn run(&self, env: &dyn Environment) -> Vec<PathBuf> {
        if !env.os().is_windows() {
            return Vec::new();
        }
        let mut roots = Vec::new();
        for drive in ["c:/java", "d:/java"] {
            roots.extend(scan_dir(env.os(), RuntimeKind::Jdk, Path::new(drive)).await);
        }
        roots
    }
}

/// `JAVA_HOME`, accepted directly without a directory scan.
struct JavaHomeVar;

#[async_trait]
impl Probe for JavaHomeVar {
    fn source(&self) -> &'static str {
        "JAVA_HOME"
    }

    async fn run(&self, env: &dyn Environment) -> Vec<PathBuf> {
        let Some(java_home) = env.var("JAVA_HOME") else {
            return Vec::new();
        };
        let path = PathBuf::from(java_home);
        if is_valid_jdk(env.os(), &path) {
            vec![path]
        } else {
            Vec::new()
        }
    }
}
