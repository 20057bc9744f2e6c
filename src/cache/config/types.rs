//! Core configuration types shared by every configuration section
//!
//! This module defines the configuration error type, the context handed to
//! child builders at build time, and the contract every child builder follows.

use std::fmt;

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Two or more settings contradict each other
    InvalidCombination {
        fields: Vec<&'static str>,
        reason: String,
    },
    InvalidFieldValue {
        field: String,
        value: String,
        reason: String,
    },

    // File-related errors
    FileNotFound(String),
    FileReadError(String),
    TomlParseError(String),
    JsonParseError(String),
    UnsupportedFormat(String),

    /// A transaction manager or synchronization registry could not be resolved
    LookupFailed(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCombination { fields, reason } => {
                write!(
                    f,
                    "Invalid combination of [{}]: {}",
                    fields.join(", "),
                    reason
                )
            }
            ConfigError::InvalidFieldValue {
                field,
                value,
                reason,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, reason
                )
            }
            ConfigError::FileNotFound(path) => write!(f, "Configuration file not found: {}", path),
            ConfigError::FileReadError(msg) => {
                write!(f, "Failed to read configuration file: {}", msg)
            }
            ConfigError::TomlParseError(msg) => write!(f, "TOML parsing error: {}", msg),
            ConfigError::JsonParseError(msg) => write!(f, "JSON parsing error: {}", msg),
            ConfigError::UnsupportedFormat(ext) => write!(f, "Unsupported file format: {}", ext),
            ConfigError::LookupFailed(msg) => write!(f, "Lookup failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        ConfigError::TomlParseError(error.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::JsonParseError(error.to_string())
    }
}

/// Values a child builder may read from its enclosing configuration at build time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildContext {
    /// Whether the sibling invocation-batching section is enabled
    pub invocation_batching_enabled: bool,
}

impl BuildContext {
    pub fn new(invocation_batching_enabled: bool) -> Self {
        Self {
            invocation_batching_enabled,
        }
    }
}

/// Contract shared by every section builder owned by a [`ConfigurationBuilder`]
///
/// [`ConfigurationBuilder`]: crate::cache::config::ConfigurationBuilder
pub trait ConfigurationChildBuilder {
    /// Immutable value produced by this builder
    type Output;

    /// Reject contradictory settings before anything is built
    fn validate(&self) -> Result<(), ConfigError>;

    /// Produce a fresh immutable value from the current state
    ///
    /// Defaults resolved here are stored back into the builder.
    fn create(&mut self, context: &BuildContext) -> Self::Output;

    /// Replace the whole builder state with the attributes of `template`
    fn read(&mut self, template: &Self::Output) -> &mut Self;
}
