//! Version resolution for discovered installations.
//!
//! A JDK's version comes from its `release` metadata file when possible and
//! from the `java -version` banner otherwise. Maven only has the banner.
//! Every failure mode — missing file, unparsable output, subprocess launch
//! failure, non-zero exit, timeout — degrades to `None`; resolution is
//! never fatal.

use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tokio::process::Command;
use tracing::debug;

use jswitch_core::OsFamily;

/// Banner queries must not hang discovery on a wedged runtime.
const BANNER_TIMEOUT: Duration = Duration::from_secs(10);

static RELEASE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^JAVA_VERSION="([^"]+)""#).expect("valid pattern"));

static BANNER_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"version\s+"([^"]+)""#).expect("valid pattern"));

static MAVEN_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Apache Maven ([\d.]+)").expect("valid pattern"));

/// Normalise a raw version token.
///
/// Legacy `1.x` versions collapse to major.minor (`1.8.0_321` -> `1.8`);
/// modern versions keep their leading dotted numeric run (`17.0.2` ->
/// `17.0.2`, `21+35` -> `21`).
fn normalize(raw: &str) -> Option<String> {
    let dotted: String = raw
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let dotted = dotted.trim_end_matches('.');
    if dotted.is_empty() || !dotted.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if let Some(rest) = dotted.strip_prefix("1.") {
        let minor: String = rest.chars().take_while(char::is_ascii_digit).collect();
        if minor.is_empty() {
            return Some("1".to_string());
        }
        return Some(format!("1.{minor}"));
    }
    Some(dotted.to_string())
}

/// Extract the version from `release` file content.
pub fn parse_release(content: &str) -> Option<String> {
    let captures = RELEASE_VERSION.captures(content)?;
    normalize(&captures[1])
}

/// Resolve a JDK's version from its installation root.
///
/// Tries the `release` metadata file first, then the `bin/java -version`
/// banner (printed on stderr by HotSpot, so stdout and stderr are combined).
pub async fn resolve_jdk_version(os: OsFamily, path: &Path) -> Option<String> {
    if let Ok(content) = tokio::fs::read_to_string(path.join("release")).await {
        if let Some(version) = parse_release(&content) {
            return Some(version);
        }
    }

    let java = path.join("bin").join(os.exe("java"));
    let output = run_banner(Command::new(&java).arg("-version")).await?;
    let captures = BANNER_VERSION.captures(&output)?;
    normalize(&captures[1])
}

/// Resolve a Maven installation's version from its `mvn -v` banner.
pub async fn resolve_maven_version(path: &Path) -> Option<String> {
    let mvn = path.join("bin").join("mvn");
    let output = run_banner(Command::new(&mvn).arg("-v")).await?;
    let captures = MAVEN_VERSION.captures(&output)?;
    Some(captures[1].trim_end_matches('.').to_string())
}

/// Run a version banner query, returning combined stdout and stderr.
///
/// Launch failure, non-zero exit and timeout all yield `None`.
async fn run_banner(command: &mut Command) -> Option<String> {
    let result = tokio::time::timeout(BANNER_TIMEOUT, command.output()).await;
    let output = match result {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            debug!(error = %e, "version banner query failed to launch");
            return None;
        }
        Err(_) => {
            debug!("version banner query timed out");
            return None;
        }
    };
    if !output.status.success() {
        debug!(status = %output.status, "version banner query exited non-zero");
        return None;
    }
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    Some(combined)
}
