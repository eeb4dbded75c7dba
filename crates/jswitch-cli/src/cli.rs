//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// jswitch - Switch the active JDK and Maven across your editor's tooling
#[derive(Parser, Debug)]
#[command(name = "jswitch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Discover JDK installations and pick the active one
    ///
    /// Runs every discovery probe, merges the results into the known
    /// installations, then prompts for a selection and propagates it to
    /// all installed consumers.
    Jdk,

    /// Discover Maven installations and pick the active one
    Maven,

    /// Re-propagate the current selections without changing them
    ///
    /// Examples:
    ///   jswitch apply                                  # Unconditional pass
    ///   jswitch apply --changed-key jswitch.java.home  # Gate on a key
    Apply {
        /// Only run when at least one given key is a tracked selection key
        #[arg(long = "changed-key")]
        changed_keys: Vec<String>,
    },

    /// List known installations
    List {
        /// Restrict the listing to one kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runtime kind as a CLI argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Jdk,
    Maven,
}

impl From<KindArg> for jswitch_core::RuntimeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Jdk => Self::Jdk,
            KindArg::Maven => Self::Maven,
        }
    }
}
