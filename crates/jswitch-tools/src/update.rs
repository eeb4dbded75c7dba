//! The update pass: read selections, resolve them against the inventory,
//! and propagate.
//!
//! Each kind is handled independently. An invalid selection aborts only its
//! own kind with a warning; the other kind and the terminal profile still
//! run. The terminal profile is rebuilt on every pass, selection or not.

use serde_json::Value;
use tracing::info;

use jswitch_core::{
    ComponentCatalog, Environment, HomesBundle, InstalledRuntime, InventoryStore, RuntimeKind,
    SettingsStore, JAVA_HOME_KEY, MAVEN_HOME_KEY, TRACKED_KEYS,
};
use jswitch_discovery::adopt_selection;

use crate::propagate::PropagationEngine;
use crate::Result;

/// Severity of a user-facing notice from an update pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A user-facing message produced by an update pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// What an update pass did.
#[derive(Debug, Default)]
pub struct UpdateOutcome {
    /// Homes that were actually applied.
    pub homes: HomesBundle,
    /// Messages to surface to the user.
    pub notices: Vec<Notice>,
    /// True when the pass was skipped because no tracked key changed.
    pub skipped: bool,
}

/// Everything an update pass needs.
pub struct UpdateContext<'a> {
    pub env: &'a dyn Environment,
    pub catalog: &'a dyn ComponentCatalog,
    pub settings: &'a dyn SettingsStore,
    pub inventory: &'a InventoryStore,
}

/// Run one update pass.
///
/// With `changed_keys` set, the pass becomes a no-op unless at least one of
/// the keys is a tracked selection key. This keeps settings-change
/// notifications cheap: unrelated edits never trigger propagation.
pub async fn run_update(
    ctx: &UpdateContext<'_>,
    changed_keys: Option<&[String]>,
) -> Result<UpdateOutcome> {
    if let Some(keys) = changed_keys {
        if !keys.iter().any(|k| TRACKED_KEYS.contains(&k.as_str())) {
            return Ok(UpdateOutcome {
                skipped: true,
                ..UpdateOutcome::default()
            });
        }
    }

    let engine = PropagationEngine::new(ctx.env, ctx.catalog, ctx.settings);
    let mut outcome = UpdateOutcome::default();

    if let Some(path) = selected_path(ctx.settings, JAVA_HOME_KEY) {
        match resolve_entry(ctx, RuntimeKind::Jdk, &path, &mut outcome.notices).await? {
            Some(entry) => {
                engine.apply_jdk(&entry.name, &entry.path);
                outcome.homes.java_home = Some(entry.path);
            }
            None => outcome.notices.push(Notice::warning(format!(
                "The configured JDK path is not a valid installation: {path}"
            ))),
        }
    }

    if let Some(path) = selected_path(ctx.settings, MAVEN_HOME_KEY) {
        match resolve_entry(ctx, RuntimeKind::Maven, &path, &mut outcome.notices).await? {
            Some(entry) => {
                engine.apply_maven(&entry.path);
                outcome.homes.maven_home = Some(entry.path);
            }
            None => outcome.notices.push(Notice::warning(format!(
                "The configured Maven path is not a valid installation: {path}"
            ))),
        }
    }

    engine.apply_terminal(&outcome.homes);
    info!(
        java = outcome.homes.java_home.as_deref().unwrap_or("-"),
        maven = outcome.homes.maven_home.as_deref().unwrap_or("-"),
        "update pass complete"
    );
    Ok(outcome)
}

fn selected_path(settings: &dyn SettingsStore, key: &str) -> Option<String> {
    match settings.get(key) {
        Some(Value::String(path)) if !path.is_empty() => Some(path),
        _ => None,
    }
}

/// Find the selected path in the inventory, adopting it on the fly when it
/// is valid but unknown (a hand-edited setting, typically).
async fn resolve_entry(
    ctx: &UpdateContext<'_>,
    kind: RuntimeKind,
    path: &str,
    notices: &mut Vec<Notice>,
) -> Result<Option<InstalledRuntime>> {
    let known = ctx
        .inventory
        .list(kind)?
        .into_iter()
        .find(|e| e.path == path);
    if known.is_some() {
        return Ok(known);
    }

    let adopted = adopt_selection(ctx.env, ctx.inventory, kind, path).await?;
    if let Some(entry) = &adopted {
        notices.push(Notice::info(format!(
            "Added configured {} '{}' to the known installations.",
            kind.label(),
            entry.name
        )));
    }
    Ok(adopted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jswitch_core::{
        JsonSettingsStore, OsFamily, SettingsScope, StaticCatalog, StubEnvironment,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    struct Fixture {
        env: StubEnvironment,
        catalog: StaticCatalog,
        settings: JsonSettingsStore,
        inventory: InventoryStore,
        settings_path: std::path::PathBuf,
    }

    impl Fixture {
        fn new(dir: &TempDir) -> Self {
            let settings_path = dir.path().join("settings.json");
            Self {
                env: StubEnvironment::new(OsFamily::Linux).with_home(dir.path()),
                catalog: StaticCatalog::new(["redhat.java", "scalameta.metals"]),
                settings: JsonSettingsStore::new(None, &settings_path),
                inventory: InventoryStore::new(dir.path().join("inventory.json")),
                settings_path,
            }
        }

        fn ctx(&self) -> UpdateContext<'_> {
            UpdateContext {
                env: &self.env,
                catalog: &self.catalog,
                settings: &self.settings,
                inventory: &self.inventory,
            }
        }

        fn doc(&self) -> Value {
            serde_json::from_str(&fs::read_to_string(&self.settings_path).unwrap()).unwrap()
        }
    }

    fn plant_jdk(root: &Path, version: &str) {
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::write(root.join("bin/java"), "").unwrap();
        fs::write(root.join("release"), format!("JAVA_VERSION=\"{version}\"\n")).unwrap();
    }

    #[tokio::test]
    async fn untracked_key_change_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let fx = Fixture::new(&dir);

        let outcome = run_update(&fx.ctx(), Some(&["editor.fontSize".to_string()]))
            .await
            .unwrap();

        assert!(outcome.skipped);
        assert!(!fx.settings_path.exists());
    }

    #[tokio::test]
    async fn tracked_key_change_runs_the_pass() {
        let dir = TempDir::new().unwrap();
        let fx = Fixture::new(&dir);

        let outcome = run_update(&fx.ctx(), Some(&[JAVA_HOME_KEY.to_string()]))
            .await
            .unwrap();

        assert!(!outcome.skipped);
        // No selection, but the terminal UX keys are still forced.
        let doc = fx.doc();
        assert_eq!(doc["terminal.integrated.enablePersistentSessions"], false);
    }

    #[tokio::test]
    async fn known_selection_is_propagated() {
        let dir = TempDir::new().unwrap();
        let fx = Fixture::new(&dir);
        let jdk = dir.path().join("jdk17");
        plant_jdk(&jdk, "17.0.2");
        let path = jdk.to_string_lossy().into_owned();

        fx.inventory
            .replace(
                RuntimeKind::Jdk,
                vec![InstalledRuntime::new("JavaSE-17.0.2", &path)],
            )
            .unwrap();
        fx.settings
            .update(JAVA_HOME_KEY, json!(path.clone()), SettingsScope::Global)
            .unwrap();

        let outcome = run_update(&fx.ctx(), None).await.unwrap();

        assert_eq!(outcome.homes.java_home, Some(path.clone()));
        assert!(outcome.notices.is_empty());
        let doc = fx.doc();
        assert_eq!(doc["java.jdt.ls.java.home"], path);
        assert_eq!(
            doc["java.configuration.runtimes"][0]["name"],
            "JavaSE-17.0.2"
        );
        assert_eq!(
            doc["terminal.integrated.profiles.linux"]["Java Switcher"]["env"]["JAVA_HOME"],
            path
        );
    }

    #[tokio::test]
    async fn unknown_valid_selection_is_adopted() {
        let dir = TempDir::new().unwrap();
        let fx = Fixture::new(&dir);
        let jdk = dir.path().join("hand-edited");
        plant_jdk(&jdk, "21");
        let path = jdk.to_string_lossy().into_owned();

        fx.settings
            .update(JAVA_HOME_KEY, json!(path.clone()), SettingsScope::Global)
            .unwrap();

        let outcome = run_update(&fx.ctx(), None).await.unwrap();

        assert_eq!(outcome.homes.java_home, Some(path));
        assert_eq!(outcome.notices.len(), 1);
        assert_eq!(outcome.notices[0].level, NoticeLevel::Info);
        assert!(outcome.notices[0].message.contains("JavaSE-21"));
        assert_eq!(fx.inventory.list(RuntimeKind::Jdk).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_selection_warns_and_skips_its_kind() {
        let dir = TempDir::new().unwrap();
        let fx = Fixture::new(&dir);
        let missing = dir.path().join("nope");

        fx.settings
            .update(
                JAVA_HOME_KEY,
                json!(missing.to_string_lossy()),
                SettingsScope::Global,
            )
            .unwrap();

        let outcome = run_update(&fx.ctx(), None).await.unwrap();

        assert_eq!(outcome.homes.java_home, None);
        assert_eq!(outcome.notices.len(), 1);
        assert_eq!(outcome.notices[0].level, NoticeLevel::Warning);
        let doc = fx.doc();
        assert_eq!(doc.get("java.jdt.ls.java.home"), None);
        // The terminal pass still ran.
        assert_eq!(doc["terminal.integrated.tabs.hideCondition"], "never");
    }

    #[tokio::test]
    async fn empty_selection_string_is_ignored() {
        let dir = TempDir::new().unwrap();
        let fx = Fixture::new(&dir);

        fx.settings
            .update(MAVEN_HOME_KEY, json!(""), SettingsScope::Global)
            .unwrap();

        let outcome = run_update(&fx.ctx(), None).await.unwrap();
        assert_eq!(outcome.homes.maven_home, None);
        assert!(outcome.notices.is_empty());
    }
}
