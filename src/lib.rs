//! # Error Triage Engine
//!
//! Classification and diagnostic extraction for failures caught at flow
//! runtime boundaries: given a captured failure, derive a stable fault
//! category, a symbolic subsystem target, a message that is safe (or not) to
//! display, and a locator pointing at the original raise site.
//!
//! ## Features
//!
//! - Closed structured-failure model with definition-time category/target/template
//! - Tolerant message rendering that never loses the original template
//! - Raise-site origin capture via the [`raise!`] macro
//! - One-level cause-chain resolution with a fixed five-field verdict
//! - Classification telemetry (metrics counters + severity-routed log events)
//! - Structured logging bootstrap with JSON and rolling-file output
//!
//! Classification is a pure, synchronous computation over immutable captured
//! state; it is safe to call concurrently and never fails on malformed input.

pub mod classify;
pub mod kinds;
pub mod logging;
pub mod message;
pub mod origin;
pub mod telemetry;
pub mod types;

// Re-export commonly used items
pub use classify::classify;
pub use logging::{init_logging, LoggingConfig};
pub use message::render;
pub use origin::{locate, Origin};
pub use telemetry::record_classification;
pub use types::{
    CapturedError, ErrorCategory, ErrorDef, ErrorInfo, ErrorTarget, ForeignError, Result,
    StructuredError, TriageError, GENERIC_FAILURE_NOTICE,
};

/// Initializes the triage engine's logging with default settings
pub fn init() -> Result<()> {
    logging::init_logging(None)
}

/// Initializes the triage engine's logging from a loaded configuration
pub fn init_with_config(config: config::Config) -> Result<()> {
    let log_config = LoggingConfig::try_from(config)?;
    logging::init_logging(Some(log_config))
}
