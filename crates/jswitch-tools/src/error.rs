//! Error types for jswitch-tools

/// Result type for propagation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during an update pass.
///
/// Individual consumer write failures are logged and swallowed; only
/// inventory persistence surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from jswitch-core
    #[error(transparent)]
    Core(#[from] jswitch_core::Error),

    /// Error from jswitch-discovery
    #[error(transparent)]
    Discovery(#[from] jswitch_discovery::Error),
}
