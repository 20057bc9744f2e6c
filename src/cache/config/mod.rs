//! Cache configuration system
//!
//! Each configuration section has a mutable builder and an immutable value.
//! The [`ConfigurationBuilder`] owns every section builder and hands them the
//! cross-section values they need when a configuration is built.

pub mod builder;
pub mod file;
pub mod invocation_batching;
pub mod transaction;
pub mod types;

pub use builder::{Configuration, ConfigurationBuilder};
pub use file::ConfigFile;
pub use invocation_batching::{
    InvocationBatchingConfiguration, InvocationBatchingConfigurationBuilder,
};
pub use transaction::{
    RecoveryConfiguration, RecoveryConfigurationBuilder, TransactionConfiguration,
    TransactionConfigurationBuilder,
};
pub use types::{BuildContext, ConfigError, ConfigurationChildBuilder};
