//! The downstream consumer table.
//!
//! Each entry maps a configuration key to the component that owns it and
//! describes how the selected home path is shaped into the key's value.
//! The table is fixed; entries for absent components are skipped at
//! propagation time, never removed here.

use std::path::Path;

use serde_json::{json, Value};

/// Key under which the structured runtime list is registered.
pub const RUNTIMES_KEY: &str = "java.configuration.runtimes";

/// Key pointing directly at the `mvn` launcher.
pub const MAVEN_EXECUTABLE_KEY: &str = "maven.executable.path";

/// Component owning both [`RUNTIMES_KEY`] and [`MAVEN_EXECUTABLE_KEY`].
pub const JAVA_LANGUAGE_COMPONENT: &str = "redhat.java";

/// How a home path becomes the value written under a consumer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// The home path itself, as a string.
    HomePath,
    /// A list of environment-variable entries carrying `JAVA_HOME`.
    JavaHomeEnvList,
}

impl ValueShape {
    /// Render `home` into this shape.
    pub fn render(&self, home: &str) -> Value {
        match self {
            ValueShape::HomePath => Value::String(home.to_owned()),
            ValueShape::JavaHomeEnvList => json!([
                { "environmentVariable": "JAVA_HOME", "value": home }
            ]),
        }
    }
}

/// One consumer of the selected JDK home.
#[derive(Debug, Clone, Copy)]
pub struct ConsumerSetting {
    /// Configuration key to write.
    pub key: &'static str,
    /// Component that must be present for the write to happen.
    pub component: &'static str,
    /// Value shape for the key.
    pub shape: ValueShape,
}

/// All plain consumer keys fed from the selected JDK home.
///
/// The structured runtime list and the Maven launcher path have their own
/// shapes and live outside this table.
pub fn jdk_consumer_settings() -> &'static [ConsumerSetting] {
    &[
        ConsumerSetting {
            key: "java.jdt.ls.java.home",
            component: "redhat.java",
            shape: ValueShape::HomePath,
        },
        ConsumerSetting {
            key: "java.import.gradle.java.home",
            component: "redhat.java",
            shape: ValueShape::HomePath,
        },
        ConsumerSetting {
            key: "spring-boot.ls.java.home",
            component: "vmware.vscode-spring-boot",
            shape: ValueShape::HomePath,
        },
        ConsumerSetting {
            key: "rsp-ui.rsp.java.home",
            component: "redhat.rsp-ui",
            shape: ValueShape::HomePath,
        },
        ConsumerSetting {
            key: "zopeneditor.JAVA_HOME",
            component: "ibm.zopeneditor",
            shape: ValueShape::HomePath,
        },
        ConsumerSetting {
            key: "plantuml.java",
            component: "jebbs.plantuml",
            shape: ValueShape::HomePath,
        },
        ConsumerSetting {
            key: "salesforcedx-vscode-apex.java.home",
            component: "salesforce.salesforcedx-vscode-apex",
            shape: ValueShape::HomePath,
        },
        ConsumerSetting {
            key: "metals.javaHome",
            component: "scalameta.metals",
            shape: ValueShape::HomePath,
        },
        ConsumerSetting {
            key: "maven.terminal.customEnv",
            component: "redhat.java",
            shape: ValueShape::JavaHomeEnvList,
        },
    ]
}

/// The structured runtime list entry for the selected JDK.
pub fn runtime_list_value(name: &str, home: &str) -> Value {
    json!([{ "name": name, "path": home, "default": true }])
}

/// The `mvn` launcher path beneath a Maven home.
pub fn maven_executable_value(home: &str) -> Value {
    let launcher = Path::new(home).join("bin").join("mvn");
    Value::String(launcher.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn home_path_shape_is_the_raw_string() {
        assert_eq!(
            ValueShape::HomePath.render("/opt/jdk-17"),
            Value::String("/opt/jdk-17".into())
        );
    }

    #[test]
    fn env_list_shape_wraps_java_home() {
        assert_eq!(
            ValueShape::JavaHomeEnvList.render("/opt/jdk-17"),
            json!([{ "environmentVariable": "JAVA_HOME", "value": "/opt/jdk-17" }])
        );
    }

    #[test]
    fn runtime_list_marks_the_entry_default() {
        assert_eq!(
            runtime_list_value("JavaSE-17", "/opt/jdk-17"),
            json!([{ "name": "JavaSE-17", "path": "/opt/jdk-17", "default": true }])
        );
    }

    #[test]
    fn maven_executable_points_at_the_launcher() {
        let value = maven_executable_value("/opt/maven");
        let expected = Path::new("/opt/maven").join("bin").join("mvn");
        assert_eq!(value, Value::String(expected.to_string_lossy().into_owned()));
    }

    #[test]
    fn every_consumer_names_an_owning_component() {
        for setting in jdk_consumer_settings() {
            assert!(setting.component.contains('.'), "{}", setting.key);
        }
    }
}
