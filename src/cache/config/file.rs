//! Configuration file front end
//!
//! Reads TOML or JSON files and drives the builder setters with whatever the
//! file specifies. Absent fields leave the builder untouched.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::builder::ConfigurationBuilder;
use super::types::ConfigError;
use crate::cache::transaction::{LockingMode, TransactionMode, TransactionProtocol};

/// Configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub invocation_batching: InvocationBatchingFileConfig,
    #[serde(default)]
    pub transaction: TransactionFileConfig,
}

/// Invocation batching configuration in file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationBatchingFileConfig {
    pub enabled: Option<bool>,
}

/// Transaction configuration in file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFileConfig {
    pub auto_commit: Option<bool>,
    pub cache_stop_timeout_ms: Option<u64>,
    pub eager_locking_single_node: Option<bool>,
    pub locking_mode: Option<LockingMode>,
    pub sync_commit_phase: Option<bool>,
    pub sync_rollback_phase: Option<bool>,
    pub transaction_mode: Option<TransactionMode>,
    pub use_eager_locking: Option<bool>,
    pub use_synchronization: Option<bool>,
    pub use_1pc_for_auto_commit_transactions: Option<bool>,
    pub transaction_protocol: Option<TransactionProtocol>,
    #[serde(default)]
    pub recovery: RecoveryFileConfig,
}

/// Recovery configuration in file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryFileConfig {
    pub enabled: Option<bool>,
    pub recovery_info_cache_name: Option<String>,
}

impl ConfigFile {
    /// Load configuration from file, choosing the parser by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileReadError(format!("{}: {}", path.display(), e)))?;

        log::debug!("Loading cache configuration from {}", path.display());
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&content),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&content),
            None => Self::from_toml_str(&content),
            Some(other) => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Drive the builder setters with every field present in the file
    #[allow(deprecated)]
    pub fn apply(&self, builder: &mut ConfigurationBuilder) {
        if let Some(enabled) = self.invocation_batching.enabled {
            builder.invocation_batching().enabled(enabled);
        }

        let file = &self.transaction;
        let tx = builder.transaction();

        if let Some(auto_commit) = file.auto_commit {
            tx.auto_commit(auto_commit);
        }
        if let Some(millis) = file.cache_stop_timeout_ms {
            tx.cache_stop_timeout(Duration::from_millis(millis));
        }
        if let Some(enabled) = file.eager_locking_single_node {
            tx.eager_locking_single_node(enabled);
        }
        if let Some(mode) = file.locking_mode {
            tx.locking_mode(mode);
        }
        if let Some(sync) = file.sync_commit_phase {
            tx.sync_commit_phase(sync);
        }
        if let Some(sync) = file.sync_rollback_phase {
            tx.sync_rollback_phase(sync);
        }
        if let Some(mode) = file.transaction_mode {
            tx.transaction_mode(mode);
        }
        if let Some(enabled) = file.use_eager_locking {
            tx.use_eager_locking(enabled);
        }
        if let Some(enabled) = file.use_synchronization {
            tx.use_synchronization(enabled);
        }
        if let Some(enabled) = file.use_1pc_for_auto_commit_transactions {
            tx.use_1pc_for_auto_commit_transactions(enabled);
        }
        if let Some(protocol) = file.transaction_protocol {
            tx.transaction_protocol(protocol);
        }

        match file.recovery.enabled {
            Some(true) => {
                tx.recovery();
            }
            Some(false) => {
                tx.recovery_builder().disable();
            }
            None => {}
        }
        if let Some(name) = &file.recovery.recovery_info_cache_name {
            tx.recovery_builder().recovery_info_cache_name(name.clone());
        }
    }

    /// Build a fresh configuration builder from this file
    pub fn to_builder(&self) -> ConfigurationBuilder {
        let mut builder = ConfigurationBuilder::new();
        self.apply(&mut builder);
        builder
    }
}
