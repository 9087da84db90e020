//! # AnyEvent
//!
//! A minimal publish/subscribe emitter for UI code:
//! - Named events with listeners fired synchronously in registration order
//! - Optional per-listener target filters (an element or element collection)
//! - Configurable failure handling and emit reporting
//!
//! ## Architecture
//!
//! 1. **any-event-core** - Event bus, listeners, targets, config, errors
//! 2. **any-event** - Re-exports, logging setup, and a demo binary

pub use any_event_core::{config, error, event_bus};

pub use any_event_core::{
    ConfigError, ElementRef, EmitError, EmitReport, EventBus, EventBusConfig, FailurePolicy,
    Listener, ListenerError, ListenerFailure, ListenerResult, Payload, Registration, TargetRef,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the log filter from `RUST_LOG`, falling back to INFO when it is
/// unset or empty.
pub fn log_filter() -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::EnvFilter;

    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support (INFO when unset)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let env_filter = log_filter();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
