//! Cache configuration builder
//!
//! Owns one builder per configuration section. Building validates every section
//! first, so a contradictory configuration never produces a [`Configuration`].

use super::invocation_batching::{
    InvocationBatchingConfiguration, InvocationBatchingConfigurationBuilder,
};
use super::transaction::{TransactionConfiguration, TransactionConfigurationBuilder};
use super::types::{BuildContext, ConfigError, ConfigurationChildBuilder};

/// Immutable cache configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    invocation_batching: InvocationBatchingConfiguration,
    transaction: TransactionConfiguration,
}

impl Configuration {
    pub fn invocation_batching(&self) -> &InvocationBatchingConfiguration {
        &self.invocation_batching
    }

    pub fn transaction(&self) -> &TransactionConfiguration {
        &self.transaction
    }
}

/// Mutable cache configuration
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    invocation_batching: InvocationBatchingConfigurationBuilder,
    transaction: TransactionConfigurationBuilder,
}

impl ConfigurationBuilder {
    /// Create new builder with default configuration
    pub fn new() -> Self {
        Self {
            invocation_batching: InvocationBatchingConfigurationBuilder::default(),
            transaction: TransactionConfigurationBuilder::new(),
        }
    }

    pub fn invocation_batching(&mut self) -> &mut InvocationBatchingConfigurationBuilder {
        &mut self.invocation_batching
    }

    pub fn transaction(&mut self) -> &mut TransactionConfigurationBuilder {
        &mut self.transaction
    }

    fn context(&self) -> BuildContext {
        BuildContext::new(self.invocation_batching.is_enabled())
    }

    /// Validate every section without building anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.invocation_batching.validate()?;
        self.transaction.validate()?;
        Ok(())
    }

    /// Validate, then build every section
    ///
    /// Defaults resolved by a section are kept by its builder for later builds.
    pub fn build(&mut self) -> Result<Configuration, ConfigError> {
        if let Err(e) = self.validate() {
            log::error!("Cache configuration rejected: {}", e);
            return Err(e);
        }

        let context = self.context();
        Ok(Configuration {
            invocation_batching: self.invocation_batching.create(&context),
            transaction: self.transaction.create(&context),
        })
    }

    /// Replace every section with the values of `template`
    pub fn read(&mut self, template: &Configuration) -> &mut Self {
        self.invocation_batching.read(&template.invocation_batching);
        self.transaction.read(&template.transaction);
        self
    }
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
