//! End-to-end flow: discovery -> reconciliation -> selection -> propagation.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

use jswitch_core::{
    Environment, InventoryStore, JsonSettingsStore, OsFamily, RuntimeKind, SettingsScope,
    SettingsStore, StaticCatalog, StubEnvironment, JAVA_HOME_KEY, MAVEN_HOME_KEY,
};
use jswitch_discovery::{discover_jdks, discover_mavens, reconcile_jdks, reconcile_mavens};
use jswitch_tools::{run_update, UpdateContext};

struct Workbench {
    env: StubEnvironment,
    settings: JsonSettingsStore,
    inventory: InventoryStore,
    catalog: StaticCatalog,
    settings_path: std::path::PathBuf,
}

impl Workbench {
    fn new(home: &TempDir) -> Self {
        let settings_path = home.path().join("user/settings.json");
        Self {
            env: StubEnvironment::new(OsFamily::Linux)
                .with_home(home.path())
                .with_var("HOME", home.path().to_string_lossy()),
            settings: JsonSettingsStore::new(None, &settings_path),
            inventory: InventoryStore::new(home.path().join("state/inventory.json")),
            catalog: StaticCatalog::new(["redhat.java", "scalameta.metals"]),
            settings_path,
        }
    }

    fn update_ctx(&self) -> UpdateContext<'_> {
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

#[cfg(unix)]
fn plant_maven(root: &Path, version: &str) {
    use std::os::unix::fs::PermissionsExt;
    fs::create_dir_all(root.join("bin")).unwrap();
    let mvn = root.join("bin/mvn");
    fs::write(&mvn, format!("#!/bin/sh\necho 'Apache Maven {version}'\n")).unwrap();
    fs::set_permissions(&mvn, fs::Permissions::from_mode(0o755)).unwrap();
}

#[tokio::test]
async fn jdk_discovery_to_propagation() {
    let home = TempDir::new().unwrap();
    let bench = Workbench::new(&home);

    // Two installs visible through different probes.
    let intellij_jdk = home.path().join(".jdks/temurin-17.0.2");
    plant_jdk(&intellij_jdk, "17.0.2");
    let mise_jdk = home.path().join(".local/share/mise/installs/java/21-open");
    plant_jdk(&mise_jdk, "21");

    let env: Arc<dyn Environment> = Arc::new(bench.env.clone());
    let discovered = discover_jdks(env).await;
    assert_eq!(discovered.len(), 2);

    let report = reconcile_jdks(&bench.env, &bench.inventory, discovered)
        .await
        .unwrap();
    assert_eq!(report.added, 2);
    assert!(report.warnings.is_empty());

    // Provenance names were replaced by the naming convention.
    let entries = bench.inventory.list(RuntimeKind::Jdk).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"JavaSE-17.0.2"));
    assert!(names.contains(&"JavaSE-21"));

    // Select the 21 install and propagate.
    let selected = entries.iter().find(|e| e.name == "JavaSE-21").unwrap();
    bench
        .settings
        .update(JAVA_HOME_KEY, json!(selected.path), SettingsScope::Global)
        .unwrap();
    let outcome = run_update(&bench.update_ctx(), None).await.unwrap();
    assert_eq!(outcome.homes.java_home.as_deref(), Some(selected.path.as_str()));

    let doc = bench.doc();
    assert_eq!(doc["java.jdt.ls.java.home"], selected.path);
    assert_eq!(doc["metals.javaHome"], selected.path);
    assert_eq!(doc["java.configuration.runtimes"][0]["name"], "JavaSE-21");
    assert_eq!(doc["java.configuration.runtimes"][0]["default"], true);
    let profile = &doc["terminal.integrated.profiles.linux"]["Java Switcher"];
    assert_eq!(profile["env"]["JAVA_HOME"], selected.path);
    assert_eq!(doc["terminal.integrated.defaultProfile.linux"], "Java Switcher");
    assert_eq!(doc["terminal.integrated.enablePersistentSessions"], false);
    assert_eq!(doc["terminal.integrated.tabs.hideCondition"], "never");
}

#[tokio::test]
async fn second_pass_is_idempotent() {
    let home = TempDir::new().unwrap();
    let bench = Workbench::new(&home);

    let jdk = home.path().join(".jdks/temurin-17.0.2");
    plant_jdk(&jdk, "17.0.2");

    let env: Arc<dyn Environment> = Arc::new(bench.env.clone());
    let discovered = discover_jdks(env.clone()).await;
    reconcile_jdks(&bench.env, &bench.inventory, discovered)
        .await
        .unwrap();
    bench
        .settings
        .update(
            JAVA_HOME_KEY,
            json!(jdk.to_string_lossy()),
            SettingsScope::Global,
        )
        .unwrap();

    run_update(&bench.update_ctx(), None).await.unwrap();
    let first = bench.doc();

    // Rediscover and rerun: nothing changes.
    let discovered = discover_jdks(env).await;
    let report = reconcile_jdks(&bench.env, &bench.inventory, discovered)
        .await
        .unwrap();
    assert_eq!(report.added, 0);
    run_update(&bench.update_ctx(), None).await.unwrap();
    assert_eq!(bench.doc(), first);
}

#[cfg(unix)]
#[tokio::test]
async fn maven_discovery_to_propagation() {
    let home = TempDir::new().unwrap();
    let bench = Workbench::new(&home);

    let maven = home.path().join("sdkman/candidates/maven/3.9.6");
    plant_maven(&maven, "3.9.6");

    let env: Arc<dyn Environment> = Arc::new(bench.env.clone());
    let discovered = discover_mavens(env).await;
    assert_eq!(discovered, vec![maven.to_string_lossy().into_owned()]);

    let report = reconcile_mavens(&bench.inventory, discovered).await.unwrap();
    assert_eq!(report.added, 1);
    let entries = bench.inventory.list(RuntimeKind::Maven).unwrap();
    assert_eq!(entries[0].name, "Maven 3.9.6");

    bench
        .settings
        .update(MAVEN_HOME_KEY, json!(entries[0].path), SettingsScope::Global)
        .unwrap();
    let outcome = run_update(&bench.update_ctx(), None).await.unwrap();
    assert_eq!(outcome.homes.maven_home.as_deref(), Some(entries[0].path.as_str()));

    let doc = bench.doc();
    let launcher = maven.join("bin/mvn");
    assert_eq!(
        doc["maven.executable.path"],
        launcher.to_string_lossy().into_owned()
    );
    let profile = &doc["terminal.integrated.profiles.linux"]["Java Switcher"];
    assert_eq!(profile["env"]["MAVEN_HOME"], entries[0].path);
    assert_eq!(profile["env"]["M2_HOME"], entries[0].path);
}

#[tokio::test]
async fn untracked_change_leaves_settings_untouched() {
    let home = TempDir::new().unwrap();
    let bench = Workbench::new(&home);

    bench
        .settings
        .update("editor.fontSize", json!(14), SettingsScope::Global)
        .unwrap();
    let before = bench.doc();

    let outcome = run_update(
        &bench.update_ctx(),
        Some(&["editor.fontSize".to_string()]),
    )
    .await
    .unwrap();

    assert!(outcome.skipped);
    assert_eq!(bench.doc(), before);
}

#[tokio::test]
async fn hand_edited_selection_is_adopted_and_propagated() {
    let home = TempDir::new().unwrap();
    let bench = Workbench::new(&home);

    // A JDK no probe would find, pointed at directly in settings.
    let jdk = home.path().join("custom/my-jdk");
    plant_jdk(&jdk, "11.0.19");
    bench
        .settings
        .update(
            JAVA_HOME_KEY,
            json!(jdk.to_string_lossy()),
            SettingsScope::Global,
        )
        .unwrap();

    let outcome = run_update(&bench.update_ctx(), None).await.unwrap();

    assert_eq!(outcome.notices.len(), 1);
    let entries = bench.inventory.list(RuntimeKind::Jdk).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "JavaSE-11.0.19");
    assert_eq!(
        bench.doc()["java.jdt.ls.java.home"],
        jdk.to_string_lossy().as_ref()
    );
}
