//! Configuration for the event bus
//!
//! `EventBusConfig` selects how `emit` reports its outcome and how listener
//! failures are handled. Configs can be stored as JSON or TOML files; the
//! format is picked from the file extension.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What happens when a listener returns an error during `emit`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing listener and return its error.
    #[default]
    FailFast,
    /// Keep delivering to the remaining listeners and report every failure
    /// once dispatch is complete.
    ///
    /// Opt-in only. Without it, listeners are not isolated from each other
    /// and the bus does no recovery or failure logging.
    Isolate,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FailFast => write!(f, "fail_fast"),
            Self::Isolate => write!(f, "isolate"),
        }
    }
}

/// Meaning of the boolean returned by a successful `emit`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitReport {
    /// `true` when the event had at least one registered listener, whether
    /// or not target filtering let any of them run.
    #[default]
    Registered,
    /// `true` only when at least one listener was actually invoked.
    Dispatched,
}

impl std::fmt::Display for EmitReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registered => write!(f, "registered"),
            Self::Dispatched => write!(f, "dispatched"),
        }
    }
}

/// Configuration for the event bus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// Listener failure handling.
    pub failure_policy: FailurePolicy,
    /// Meaning of `emit`'s return value.
    pub emit_report: EmitReport,
}

impl EventBusConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Render the config as TOML text
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load config from a `.toml` or `.json` file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;

        let config = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => Self::from_toml_str(&content)?,
        };

        tracing::debug!("Loaded event bus config from {}", path.display());
        Ok(config)
    }

    /// Save config to a `.toml` or `.json` file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => self.to_toml_string()?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}
