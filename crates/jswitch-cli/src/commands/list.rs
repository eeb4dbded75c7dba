//! List known installations.

use colored::Colorize;

use jswitch_core::RuntimeKind;

use crate::context::AppContext;
use crate::error::Result;

/// Print the inventory, one or both kinds, marking the active selection.
pub fn run_list(ctx: &AppContext, kind: Option<RuntimeKind>) -> Result<()> {
    let kinds = match kind {
        Some(kind) => vec![kind],
        None => vec![RuntimeKind::Jdk, RuntimeKind::Maven],
    };

    for kind in kinds {
        let entries = ctx.inventory.list(kind)?;
        println!("{}", format!("{} installations:", kind.label()).bold());
        if entries.is_empty() {
            println!("  (none known; run 'jswitch {}')", kind_command(kind));
            continue;
        }

        let active = ctx
            .settings
            .get(kind.home_setting())
            .and_then(|v| v.as_str().map(str::to_owned));
        for entry in entries {
            let marker = if active.as_deref() == Some(entry.path.as_str()) {
                "*".green().bold().to_string()
            } else {
                " ".to_string()
            };
            println!("{marker} {} {}", entry.name, entry.path.dimmed());
        }
    }
    Ok(())
}

fn kind_command(kind: RuntimeKind) -> &'static str {
    match kind {
        RuntimeKind::Jdk => "jdk",
        RuntimeKind::Maven => "maven",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jswitch_core::{
        InstalledRuntime, InventoryStore, JsonSettingsStore, OsFamily, StaticCatalog,
        StubEnvironment,
    };
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn listing_an_empty_inventory_succeeds() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext {
            env: Arc::new(StubEnvironment::new(OsFamily::Linux)),
            settings: Box::new(JsonSettingsStore::new(
                None,
                dir.path().join("settings.json"),
            )),
            catalog: Box::new(StaticCatalog::default()),
            inventory: InventoryStore::new(dir.path().join("inventory.json")),
        };

        assert!(run_list(&ctx, None).is_ok());
    }

    #[test]
    fn listing_a_populated_inventory_succeeds() {
        let dir = TempDir::new().unwrap();
        let inventory = InventoryStore::new(dir.path().join("inventory.json"));
        inventory
            .replace(
                RuntimeKind::Jdk,
                vec![InstalledRuntime::new("JavaSE-17", "/opt/jdk17")],
            )
            .unwrap();
        let ctx = AppContext {
            env: Arc::new(StubEnvironment::new(OsFamily::Linux)),
            settings: Box::new(JsonSettingsStore::new(
                None,
                dir.path().join("settings.json"),
            )),
            catalog: Box::new(StaticCatalog::default()),
            inventory,
        };

        assert!(run_list(&ctx, Some(RuntimeKind::Jdk)).is_ok());
    }
}
