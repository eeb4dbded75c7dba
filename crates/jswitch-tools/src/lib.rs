//! Settings propagation for jswitch.
//!
//! Given a selected JDK and/or Maven home, this crate fans the path out to
//! every downstream consumer's configuration key, skipping consumers whose
//! owning component is not installed, and maintains the derived terminal
//! profile. Propagation is idempotent and short-lived; a failed write for
//! one consumer never blocks the rest.

pub mod consumers;
pub mod error;
pub mod propagate;
pub mod terminal;
pub mod update;

pub use consumers::{jdk_consumer_settings, ConsumerSetting, ValueShape};
pub use error::{Error, Result};
pub use propagate::PropagationEngine;
pub use terminal::PROFILE_NAME;
pub use update::{run_update, Notice, NoticeLevel, UpdateContext, UpdateOutcome};
