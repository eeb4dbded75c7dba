//! Error types for jswitch-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from jswitch-core
    #[error(transparent)]
    Core(#[from] jswitch_core::Error),

    /// Error from jswitch-discovery
    #[error(transparent)]
    Discovery(#[from] jswitch_discovery::Error),

    /// Error from jswitch-tools
    #[error(transparent)]
    Tools(#[from] jswitch_tools::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
