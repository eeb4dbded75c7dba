//! The "Java Switcher" terminal profile.
//!
//! The profile is rebuilt on every update pass: selected homes become
//! environment variables, their `bin` directories are prepended to `PATH`,
//! and the profile is made the default for the current platform. Two
//! terminal UX keys are forced on every pass regardless of selection so
//! stale persisted sessions never shadow the refreshed environment.

use serde_json::{json, Map, Value};
use tracing::warn;

use jswitch_core::{Environment, HomesBundle, OsFamily, SettingsScope, SettingsStore};

/// Name of the managed profile.
pub const PROFILE_NAME: &str = "Java Switcher";

const WRITE_SCOPES: [SettingsScope; 2] = [SettingsScope::Workspace, SettingsScope::Global];

/// Install or refresh the switcher profile for the current platform.
///
/// Other profiles under the platform key are preserved; only the managed
/// entry is replaced. Write failures are logged and swallowed.
pub fn configure_terminal(env: &dyn Environment, store: &dyn SettingsStore, homes: &HomesBundle) {
    let suffix = env.os().settings_suffix();
    let profiles_key = format!("terminal.integrated.profiles.{suffix}");
    let default_key = format!("terminal.integrated.defaultProfile.{suffix}");

    let mut profiles = match store.get(&profiles_key) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    profiles.insert(PROFILE_NAME.to_string(), build_profile(env, homes));

    write(store, &profiles_key, Value::Object(profiles));
    write(store, &default_key, Value::String(PROFILE_NAME.to_string()));

    // Persisted sessions would resurrect a terminal with the previous
    // JAVA_HOME baked in.
    write(
        store,
        "terminal.integrated.enablePersistentSessions",
        Value::Bool(false),
    );
    write(
        store,
        "terminal.integrated.tabs.hideCondition",
        Value::String("never".to_string()),
    );
}

fn build_profile(env: &dyn Environment, homes: &HomesBundle) -> Value {
    let os = env.os();
    let separator = os.path_separator();

    let mut vars = Map::new();
    let mut path_var = "${env:PATH}".to_string();
    if let Some(java) = &homes.java_home {
        vars.insert("JAVA_HOME".to_string(), Value::String(java.clone()));
        path_var = format!("{}{separator}{path_var}", bin_dir(os, java));
    }
    if let Some(maven) = &homes.maven_home {
        vars.insert("MAVEN_HOME".to_string(), Value::String(maven.clone()));
        vars.insert("M2_HOME".to_string(), Value::String(maven.clone()));
        path_var = format!("{}{separator}{path_var}", bin_dir(os, maven));
    }
    vars.insert("PATH".to_string(), Value::String(path_var));

    let mut profile = match os {
        OsFamily::Windows => json!({
            "path": "cmd.exe",
            "args": ["/K", "chcp 65001 > nul"],
            "icon": "terminal-cmd",
        }),
        OsFamily::Mac => json!({
            "path": "zsh",
            "icon": "terminal-bash",
        }),
        OsFamily::Linux => match env.home_dir() {
            Some(home) => json!({
                "path": "bash",
                "args": ["--rcfile", home.join(".jswitch/.bashrc").to_string_lossy()],
                "icon": "terminal-bash",
            }),
            None => json!({
                "path": "bash",
                "icon": "terminal-bash",
            }),
        },
    };
    if let Some(map) = profile.as_object_mut() {
        map.insert("env".to_string(), Value::Object(vars));
        map.insert("overrideName".to_string(), Value::Bool(true));
    }
    profile
}

/// `<home>/bin` with the separator of the profile's OS family, which need
/// not be the host's.
fn bin_dir(os: OsFamily, home: &str) -> String {
    let slash = if os.is_windows() { '\\' } else { '/' };
    format!("{}{slash}bin", home.trim_end_matches(['/', '\\']))
}

fn write(store: &dyn SettingsStore, key: &str, value: Value) {
    if let Err(e) = store.write_scoped(key, value, &WRITE_SCOPES) {
        warn!(key, error = %e, "terminal settings write failed");
    }
}
