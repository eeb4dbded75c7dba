//! Error types for jswitch-discovery

/// Result type for discovery operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in discovery operations.
///
/// Probe and subprocess failures never surface here; they degrade to empty
/// results. Only inventory persistence can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from jswitch-core
    #[error(transparent)]
    Core(#[from] jswitch_core::Error),
}
