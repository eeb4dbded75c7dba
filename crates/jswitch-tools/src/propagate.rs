//! Fan-out of a selected home path to downstream consumer keys.

use jswitch_core::{ComponentCatalog, Environment, HomesBundle, SettingsScope, SettingsStore};
use tracing::{debug, warn};

use crate::consumers::{
    jdk_consumer_settings, maven_executable_value, runtime_list_value, JAVA_LANGUAGE_COMPONENT,
    MAVEN_EXECUTABLE_KEY, RUNTIMES_KEY,
};
use crate::terminal;

/// Workspace first, global as the fallback.
const WRITE_SCOPES: [SettingsScope; 2] = [SettingsScope::Workspace, SettingsScope::Global];

/// Writes consumer keys for the selected homes.
///
/// Presence-gated per key: a consumer whose owning component is absent is
/// skipped silently. A failed write is logged and never stops the rest of
/// the fan-out.
pub struct PropagationEngine<'a> {
    env: &'a dyn Environment,
    catalog: &'a dyn ComponentCatalog,
    store: &'a dyn SettingsStore,
}

impl<'a> PropagationEngine<'a> {
    pub fn new(
        env: &'a dyn Environment,
        catalog: &'a dyn ComponentCatalog,
        store: &'a dyn SettingsStore,
    ) -> Self {
        Self {
            env,
            catalog,
            store,
        }
    }

    /// Write every JDK consumer key plus the structured runtime list.
    pub fn apply_jdk(&self, name: &str, home: &str) {
        for setting in jdk_consumer_settings() {
            if !self.catalog.is_present(setting.component) {
                debug!(key = setting.key, component = setting.component, "component absent, skipping");
                continue;
            }
            self.write(setting.key, setting.shape.render(home));
        }
        if self.catalog.is_present(JAVA_LANGUAGE_COMPONENT) {
            self.write(RUNTIMES_KEY, runtime_list_value(name, home));
        }
    }

    /// Point the Maven launcher key at `<home>/bin/mvn`.
    pub fn apply_maven(&self, home: &str) {
        if self.catalog.is_present(JAVA_LANGUAGE_COMPONENT) {
            self.write(MAVEN_EXECUTABLE_KEY, maven_executable_value(home));
        }
    }

    /// Rebuild the switcher terminal profile from the selected homes.
    pub fn apply_terminal(&self, homes: &HomesBundle) {
        terminal::configure_terminal(self.env, self.store, homes);
    }

    fn write(&self, key: &str, value: serde_json::Value) {
        if let Err(e) = self.store.write_scoped(key, value, &WRITE_SCOPES) {
            warn!(key, error = %e, "consumer write failed");
        }
    }
}
