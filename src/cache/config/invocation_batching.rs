//! Invocation batching section
//!
//! Only the enabled flag lives here. It matters to the transaction section,
//! which resolves an unset transaction mode from it.

use crate::cache::config::types::{BuildContext, ConfigError, ConfigurationChildBuilder};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvocationBatchingConfiguration {
    enabled: bool,
}

impl InvocationBatchingConfiguration {
    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

#[derive(Debug, Clone, Default)]
pub struct InvocationBatchingConfigurationBuilder {
    enabled: bool,
}

impl InvocationBatchingConfigurationBuilder {
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
}

impl ConfigurationChildBuilder for InvocationBatchingConfigurationBuilder {
    type Output = InvocationBatchingConfiguration;

    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    fn create(&mut self, _context: &BuildContext) -> InvocationBatchingConfiguration {
        InvocationBatchingConfiguration {
            enabled: self.enabled,
        }
    }

    fn read(&mut self, template: &InvocationBatchingConfiguration) -> &mut Self {
        self.enabled = template.enabled;
        self
    }
}
