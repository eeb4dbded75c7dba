//! Wiring of the real environment, settings store, component catalog and
//! inventory for CLI commands.

use std::path::PathBuf;
use std::sync::Arc;

use jswitch_core::{
    ComponentCatalog, Environment, ExtensionDirCatalog, InventoryStore, JsonSettingsStore,
    SettingsStore, StaticCatalog, SystemEnvironment,
};
use jswitch_tools::UpdateContext;

use crate::error::{CliError, Result};

/// Everything a command needs, behind trait objects so tests can swap in
/// stubs.
pub struct AppContext {
    pub env: Arc<dyn Environment>,
    pub settings: Box<dyn SettingsStore>,
    pub catalog: Box<dyn ComponentCatalog>,
    pub inventory: InventoryStore,
}

impl AppContext {
    /// Build a context from the real process environment.
    ///
    /// The workspace scope is the current directory's `.vscode/settings.json`
    /// and exists only when that directory is already present; otherwise
    /// writes fall back to the editor's user-level settings.
    pub fn from_process() -> Result<Self> {
        let env: Arc<dyn Environment> = Arc::new(SystemEnvironment);

        let workspace = std::env::current_dir()
            .ok()
            .map(|cwd| cwd.join(".vscode"))
            .filter(|dir| dir.is_dir())
            .map(|dir| dir.join("settings.json"));
        let global = global_settings_path()?;
        let settings = JsonSettingsStore::new(workspace, global);

        let catalog: Box<dyn ComponentCatalog> = match env.home_dir() {
            Some(home) => Box::new(ExtensionDirCatalog::new(home.join(".vscode/extensions"))),
            None => Box::new(StaticCatalog::default()),
        };

        ensure_terminal_rcfile(env.as_ref());

        let inventory_path = InventoryStore::default_path()
            .ok_or_else(|| CliError::user("Could not determine the user data directory"))?;

        Ok(Self {
            env,
            settings: Box::new(settings),
            catalog,
            inventory: InventoryStore::new(inventory_path),
        })
    }

    pub fn update_ctx(&self) -> UpdateContext<'_> {
        UpdateContext {
            env: self.env.as_ref(),
            catalog: self.catalog.as_ref(),
            settings: self.settings.as_ref(),
            inventory: &self.inventory,
        }
    }
}

fn global_settings_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("Code/User/settings.json"))
        .ok_or_else(|| CliError::user("Could not determine the user configuration directory"))
}

/// The Linux terminal profile starts bash with `--rcfile ~/.jswitch/.bashrc`;
/// make sure the file exists so the shell starts cleanly.
fn ensure_terminal_rcfile(env: &dyn Environment) {
    if env.os().is_windows() {
        return;
    }
    let Some(home) = env.home_dir() else {
        return;
    };
    let rcfile = home.join(".jswitch/.bashrc");
    if rcfile.exists() {
        return;
    }
    if let Some(parent) = rcfile.parent() {
        if std::fs::create_dir_all(parent).is_ok() {
            let _ = std::fs::write(&rcfile, "[ -f ~/.bashrc ] && . ~/.bashrc\n");
        }
    }
}
