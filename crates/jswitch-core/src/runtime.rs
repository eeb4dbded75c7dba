//! Runtime kinds, inventory records and the homes bundle.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Workspace settings key holding the active JDK home.
pub const JAVA_HOME_KEY: &str = "jswitch.java.home";

/// Workspace settings key holding the active Maven home.
pub const MAVEN_HOME_KEY: &str = "jswitch.maven.home";

/// The settings keys that trigger an update pass when changed.
pub const TRACKED_KEYS: [&str; 2] = [JAVA_HOME_KEY, MAVEN_HOME_KEY];

/// The two runtime kinds jswitch manages.
///
/// The kind drives which discovery probes run and which inventory list is
/// read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeKind {
    Jdk,
    Maven,
}

impl RuntimeKind {
    /// Key of this kind's list in the persisted inventory document.
    pub fn state_key(self) -> &'static str {
        match self {
            Self::Jdk => "jdks",
            Self::Maven => "mavens",
        }
    }

    /// Settings key holding this kind's active selection.
    pub fn home_setting(self) -> &'static str {
        match self {
            Self::Jdk => JAVA_HOME_KEY,
            Self::Maven => MAVEN_HOME_KEY,
        }
    }

    /// Human-readable label for messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Jdk => "JDK",
            Self::Maven => "Maven",
        }
    }
}

impl std::fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One discovered installation: a display name and the installation root.
///
/// The path is the uniqueness key within a kind's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledRuntime {
    pub name: String,
    pub path: String,
}

impl InstalledRuntime {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

static CANONICAL_JDK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(J2SE|JavaSE)-\d+(\.\d+)*$").expect("valid pattern"));

/// Whether a JDK display name follows the `JavaSE-<version>` convention.
///
/// The legacy `J2SE-<version>` form is accepted as well; matching is
/// case-insensitive. Non-conforming names are cosmetic and are corrected on
/// the next discovery pass rather than deleted.
pub fn is_canonical_jdk_name(name: &str) -> bool {
    CANONICAL_JDK_NAME.is_match(name)
}

/// The selected homes handed to one propagation pass. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomesBundle {
    pub java_home: Option<String>,
    pub maven_home: Option<String>,
}

impl HomesBundle {
    pub fn is_empty(&self) -> bool {
        self.java_home.is_none() && self.maven_home.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("JavaSE-17", true)]
    #[case("JavaSE-1.8", true)]
    #[case("javase-21", true)]
    #[case("J2SE-1.5", true)]
    #[case("j2se-1.4", true)]
    #[case("OpenJDK", false)]
    #[case("JavaSE-", false)]
    #[case("JavaSE-17 (Scoop)", false)]
    #[case("JDK at /opt/jdk17", false)]
    fn canonical_name_pattern(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_canonical_jdk_name(name), expected, "{name}");
    }

    #[test]
    fn kind_state_keys() {
        assert_eq!(RuntimeKind::Jdk.state_key(), "jdks");
        assert_eq!(RuntimeKind::Maven.state_key(), "mavens");
    }

    #[test]
    fn kind_home_settings() {
        assert_eq!(RuntimeKind::Jdk.home_setting(), "jswitch.java.home");
        assert_eq!(RuntimeKind::Maven.home_setting(), "jswitch.maven.home");
    }

    #[test]
    fn installed_runtime_roundtrip() {
        let rt = InstalledRuntime::new("JavaSE-17", "/opt/jdk17");
        let json = serde_json::to_string(&rt).unwrap();
        let back: InstalledRuntime = serde_json::from_str(&json).unwrap();
        assert_eq!(rt, back);
    }

    #[test]
    fn homes_bundle_empty() {
        assert!(HomesBundle::default().is_empty());
        let homes = HomesBundle {
            java_home: Some("/opt/jdk17".into()),
            maven_home: None,
        };
        assert!(!homes.is_empty());
    }
}
