//! Persisted installation inventory.
//!
//! One JSON document holds the per-kind lists of `{name, path}` records.
//! Entries persist until explicitly replaced; insertion order is discovery
//! order. All mutation is read-full / compute / write-full with an atomic
//! rename, so readers never observe a partially written document.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::io;
use crate::{Error, InstalledRuntime, Result, RuntimeKind};

#[derive(Debug, Default, Serialize, Deserialize)]
struct InventoryDoc {
    #[serde(default)]
    jdks: Vec<InstalledRuntime>,
    #[serde(default)]
    mavens: Vec<InstalledRuntime>,
}

impl InventoryDoc {
    fn list(&self, kind: RuntimeKind) -> &Vec<InstalledRuntime> {
        match kind {
            RuntimeKind::Jdk => &self.jdks,
            RuntimeKind::Maven => &self.mavens,
        }
    }

    fn list_mut(&mut self, kind: RuntimeKind) -> &mut Vec<InstalledRuntime> {
        match kind {
            RuntimeKind::Jdk => &mut self.jdks,
            RuntimeKind::Maven => &mut self.mavens,
        }
    }
}

/// The inventory store, scoped to the tool's own data directory rather than
/// any workspace.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    path: PathBuf,
}

impl InventoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("jswitch").join("inventory.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The persisted list for a kind. A missing document is an empty list.
    pub fn list(&self, kind: RuntimeKind) -> Result<Vec<InstalledRuntime>> {
        Ok(self.load()?.list(kind).clone())
    }

    /// Replace a kind's list, leaving the other kind untouched.
    pub fn replace(&self, kind: RuntimeKind, entries: Vec<InstalledRuntime>) -> Result<()> {
        let mut doc = self.load()?;
        *doc.list_mut(kind) = entries;
        self.save(&doc)
    }

    fn load(&self) -> Result<InventoryDoc> {
        if !self.path.exists() {
            return Ok(InventoryDoc::default());
        }
        let content = io::read_text(&self.path)?;
        serde_json::from_str(&content).map_err(|e| Error::json(&self.path, e))
    }

    fn save(&self, doc: &InventoryDoc) -> Result<()> {
        let content =
            serde_json::to_string_pretty(doc).map_err(|e| Error::json(&self.path, e))?;
        io::write_atomic(&self.path, content.as_bytes())
    }
}
