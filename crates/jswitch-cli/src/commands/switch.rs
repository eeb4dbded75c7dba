//! Discover installations of one kind and switch the active selection.

use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use serde_json::json;

use jswitch_core::{InstalledRuntime, RuntimeKind, SettingsScope};
use jswitch_discovery::{discover_jdks, discover_mavens, reconcile_jdks, reconcile_mavens};
use jswitch_tools::run_update;

use crate::commands::print_notices;
use crate::context::AppContext;
use crate::error::{CliError, Result};

/// Run discovery for `kind`, prompt for a selection and propagate it.
pub async fn run_switch(ctx: &AppContext, kind: RuntimeKind) -> Result<()> {
    println!(
        "{} Scanning for {} installations...",
        "=>".blue().bold(),
        kind.label()
    );

    let report = match kind {
        RuntimeKind::Jdk => {
            let discovered = discover_jdks(ctx.env.clone()).await;
            reconcile_jdks(ctx.env.as_ref(), &ctx.inventory, discovered).await?
        }
        RuntimeKind::Maven => {
            let discovered = discover_mavens(ctx.env.clone()).await;
            reconcile_mavens(&ctx.inventory, discovered).await?
        }
    };

    if report.added > 0 {
        println!(
            "Found {} new {} installation(s).",
            report.added.to_string().green().bold(),
            kind.label()
        );
    }
    for warning in &report.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    let entries = ctx.inventory.list(kind)?;
    if entries.is_empty() {
        return Err(CliError::user(format!(
            "No {} installations found. Install one or set {} manually.",
            kind.label(),
            kind.home_setting()
        )));
    }

    let selected = prompt_selection(ctx, kind, &entries)?;
    ctx.settings.write_scoped(
        kind.home_setting(),
        json!(selected.path),
        &[SettingsScope::Workspace, SettingsScope::Global],
    )?;

    let outcome = run_update(&ctx.update_ctx(), None).await?;
    print_notices(&outcome.notices);

    println!(
        "{} Switched {} to {}",
        "=>".blue().bold(),
        kind.label(),
        selected.name.green().bold()
    );
    Ok(())
}

/// Pick an entry, defaulting to the current selection when it is known.
fn prompt_selection(
    ctx: &AppContext,
    kind: RuntimeKind,
    entries: &[InstalledRuntime],
) -> Result<InstalledRuntime> {
    let current = ctx
        .settings
        .get(kind.home_setting())
        .and_then(|v| v.as_str().map(str::to_owned));
    let default = current
        .as_deref()
        .and_then(|path| entries.iter().position(|e| e.path == path))
        .unwrap_or(0);

    let items: Vec<String> = entries
        .iter()
        .map(|e| format!("{} ({})", e.name, e.path.dimmed()))
        .collect();

    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Select the active {}", kind.label()))
        .items(&items)
        .default(default)
        .interact()?;

    Ok(entries[index].clone())
}
