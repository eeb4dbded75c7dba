//! Editor settings store and downstream component presence.
//!
//! Settings are flat dotted keys in a JSON object, edited in place so
//! unrelated keys survive every write. Two scopes exist: the workspace
//! `.vscode/settings.json` and the editor's user-level `settings.json`.
//! Writes can try scopes in order, falling back from workspace to global
//! when no workspace is open.

use std::collections::HashSet;
use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::debug;

use crate::io;
use crate::{Error, Result};

/// Where a settings write lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsScope {
    Workspace,
    Global,
}

impl SettingsScope {
    fn name(self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::Global => "global",
        }
    }
}

/// The settings surface jswitch reads selections from and propagates into.
pub trait SettingsStore {
    /// Effective value of a key: workspace scope wins over global.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a key into one scope.
    fn update(&self, key: &str, value: Value, scope: SettingsScope) -> Result<()>;

    /// Try each scope in order and return on the first success.
    ///
    /// This is the two-level fallback used by propagation: a workspace write
    /// fails when no workspace is open, in which case the value lands in the
    /// global scope instead.
    fn write_scoped(&self, key: &str, value: Value, scopes: &[SettingsScope]) -> Result<()> {
        for scope in scopes {
            match self.update(key, value.clone(), *scope) {
                Ok(()) => return Ok(()),
                Err(e) => debug!(key, scope = scope.name(), error = %e, "scoped write failed"),
            }
        }
        Err(Error::NoWritableScope {
            key: key.to_string(),
        })
    }
}

/// Settings stored as JSON documents on disk.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    workspace: Option<PathBuf>,
    global: PathBuf,
}

impl JsonSettingsStore {
    /// `workspace` is the workspace settings.json, absent when no workspace
    /// is open; `global` is the user-level settings.json.
    pub fn new(workspace: Option<PathBuf>, global: impl Into<PathBuf>) -> Self {
        Self {
            workspace,
            global: global.into(),
        }
    }

    fn scope_path(&self, scope: SettingsScope) -> Result<&PathBuf> {
        match scope {
            SettingsScope::Workspace => self.workspace.as_ref().ok_or(Error::ScopeUnavailable {
                scope: "workspace",
            }),
            SettingsScope::Global => Ok(&self.global),
        }
    }

    fn load(path: &PathBuf) -> Map<String, Value> {
        let Ok(content) = io::read_text(path) else {
            return Map::new();
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        if let Some(workspace) = &self.workspace {
            if let Some(value) = Self::load(workspace).get(key) {
                return Some(value.clone());
            }
        }
        Self::load(&self.global).get(key).cloned()
    }

    fn update(&self, key: &str, value: Value, scope: SettingsScope) -> Result<()> {
        let path = self.scope_path(scope)?.clone();
        let mut settings = Self::load(&path);
        settings.insert(key.to_string(), value);
        let content = serde_json::to_string_pretty(&Value::Object(settings))
            .map_err(|e| Error::json(&path, e))?;
        io::write_atomic(&path, content.as_bytes())
    }
}

/// Presence check for the component owning a downstream settings key.
///
/// Propagation writes a consumer's keys only when its owning component is
/// installed; absence is a silent skip, never an error.
pub trait ComponentCatalog {
    fn is_present(&self, id: &str) -> bool;
}

/// Catalog backed by the editor's extensions directory.
///
/// Installed extensions live in directories named `<id>-<version>`; the
/// check is a case-insensitive prefix match on `<id>-`.
#[derive(Debug, Clone)]
pub struct ExtensionDirCatalog {
    dir: PathBuf,
}

impl ExtensionDirCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ComponentCatalog for ExtensionDirCatalog {
    fn is_present(&self, id: &str) -> bool {
        let prefix = format!("{}-", id.to_lowercase());
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return false;
        };
        entries.filter_map(|e| e.ok()).any(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .to_lowercase()
                .starts_with(&prefix)
        })
    }
}

/// Catalog with a fixed set of present components.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    ids: HashSet<String>,
}

impl StaticCatalog {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl ComponentCatalog for StaticCatalog {
    fn is_present(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}
