//! Error handling for AnyEvent
//!
//! Provides the error types surfaced by the emitter:
//! - Listener errors (returned by callbacks)
//! - Emit errors (listener failures reported to the caller of `emit`)
//! - Config errors (loading and saving `EventBusConfig`)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Error returned by a listener callback.
///
/// Listener bodies may use `?` on any `anyhow::Result`, or build a plain
/// message with [`ListenerError::msg`].
#[derive(Error, Debug)]
pub enum ListenerError {
    /// A plain failure message
    #[error("{0}")]
    Message(String),

    /// Any other error raised inside the listener
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ListenerError {
    /// Create a listener error from a message
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// A single listener failure collected during an isolated emit.
#[derive(Debug)]
pub struct ListenerFailure {
    /// Position of the failing listener in the event's registration list.
    pub index: usize,
    /// The error the listener returned.
    pub error: ListenerError,
}

/// Error returned by `EventBus::emit`.
#[derive(Error, Debug)]
pub enum EmitError {
    /// A listener failed and delivery stopped there
    #[error("Listener #{index} for '{event}' failed")]
    ListenerFailed {
        /// The event being emitted.
        event: String,
        /// Position of the failing listener in the registration list.
        index: usize,
        /// The error the listener returned.
        #[source]
        source: ListenerError,
    },

    /// One or more listeners failed while every matching listener still ran
    #[error("{} listener(s) for '{event}' failed", .failures.len())]
    ListenersFailed {
        /// The event being emitted.
        event: String,
        /// Every failure, in dispatch order.
        failures: Vec<ListenerFailure>,
    },
}

impl EmitError {
    /// Name of the event whose dispatch failed
    pub fn event(&self) -> &str {
        match self {
            Self::ListenerFailed { event, .. } | Self::ListenersFailed { event, .. } => event,
        }
    }

    /// Number of listeners that failed
    pub fn failure_count(&self) -> usize {
        match self {
            Self::ListenerFailed { .. } => 1,
            Self::ListenersFailed { failures, .. } => failures.len(),
        }
    }
}

/// Errors related to loading and saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error while reading or writing a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for `EventBusConfig`.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither `.toml` nor `.json`.
    #[error("Config file must be .json or .toml: {}", .0.display())]
    UnsupportedFormat(std::path::PathBuf),
}
