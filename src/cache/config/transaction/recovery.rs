//! Transaction recovery configuration
//!
//! Recovery cleans up transactions left in an indeterminate state after a
//! partial failure. The builder lives inside the transaction builder for its
//! whole lifetime and starts out disabled.

use crate::cache::config::types::{BuildContext, ConfigError, ConfigurationChildBuilder};

/// Cache that stores in-doubt transaction records unless overridden
pub const DEFAULT_RECOVERY_INFO_CACHE_NAME: &str = "__recoveryInfoCacheName__";

/// Immutable recovery settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryConfiguration {
    enabled: bool,
    recovery_info_cache_name: String,
}

impl RecoveryConfiguration {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Name of the cache holding recovery records
    pub fn recovery_info_cache_name(&self) -> &str {
        &self.recovery_info_cache_name
    }
}

/// Mutable recovery settings owned by a transaction builder
#[derive(Debug, Clone)]
pub struct RecoveryConfigurationBuilder {
    enabled: bool,
    recovery_info_cache_name: String,
}

impl RecoveryConfigurationBuilder {
    pub(crate) fn new() -> Self {
        Self {
            enabled: false,
            recovery_info_cache_name: DEFAULT_RECOVERY_INFO_CACHE_NAME.to_string(),
        }
    }

    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn recovery_info_cache_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.recovery_info_cache_name = name.into();
        self
    }
}

impl ConfigurationChildBuilder for RecoveryConfigurationBuilder {
    type Output = RecoveryConfiguration;

    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.recovery_info_cache_name.trim().is_empty() {
            return Err(ConfigError::InvalidFieldValue {
                field: "recovery_info_cache_name".to_string(),
                value: self.recovery_info_cache_name.clone(),
                reason: "Recovery requires a cache name for its records".to_string(),
            });
        }
        Ok(())
    }

    fn create(&mut self, _context: &BuildContext) -> RecoveryConfiguration {
        RecoveryConfiguration {
            enabled: self.enabled,
            recovery_info_cache_name: self.recovery_info_cache_name.clone(),
        }
    }

    fn read(&mut self, template: &RecoveryConfiguration) -> &mut Self {
        self.enabled = template.enabled;
        self.recovery_info_cache_name = template.recovery_info_cache_name.clone();
        self
    }
}
