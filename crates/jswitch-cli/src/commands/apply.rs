//! Re-run propagation for the current selections.

use colored::Colorize;

use jswitch_tools::run_update;

use crate::commands::print_notices;
use crate::context::AppContext;
use crate::error::Result;

/// Run one update pass. With `changed_keys` given, the pass only runs when
/// one of them is a tracked selection key.
pub async fn run_apply(ctx: &AppContext, changed_keys: &[String]) -> Result<()> {
    let gate = (!changed_keys.is_empty()).then_some(changed_keys);
    let outcome = run_update(&ctx.update_ctx(), gate).await?;

    if outcome.skipped {
        println!("No tracked key changed; nothing to do.");
        return Ok(());
    }

    print_notices(&outcome.notices);
    match (&outcome.homes.java_home, &outcome.homes.maven_home) {
        (None, None) => println!("No active selections; terminal defaults refreshed."),
        (java, maven) => {
            if let Some(home) = java {
                println!("JDK settings point at {}", home.green());
            }
            if let Some(home) = maven {
                println!("Maven settings point at {}", home.green());
            }
        }
    }
    Ok(())
}
