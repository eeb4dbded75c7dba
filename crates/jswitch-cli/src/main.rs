//! jswitch CLI
//!
//! The command-line interface for switching the active JDK and Maven.

mod cli;
mod commands;
mod context;
mod error;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use context::AppContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| error::CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Jdk) => {
            let ctx = AppContext::from_process()?;
            commands::run_switch(&ctx, jswitch_core::RuntimeKind::Jdk).await
        }
        Some(Commands::Maven) => {
            let ctx = AppContext::from_process()?;
            commands::run_switch(&ctx, jswitch_core::RuntimeKind::Maven).await
        }
        Some(Commands::Apply { changed_keys }) => {
            let ctx = AppContext::from_process()?;
            commands::run_apply(&ctx, &changed_keys).await
        }
        Some(Commands::List { kind }) => {
            let ctx = AppContext::from_process()?;
            commands::run_list(&ctx, kind.map(Into::into))
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "jswitch", &mut std::io::stdout());
            Ok(())
        }
        None => {
            println!("{} JDK and Maven switcher", "jswitch".green().bold());
            println!();
            println!("Run {} for available commands.", "jswitch --help".cyan());
            Ok(())
        }
    }
}
