//! txconfig prelude - convenient imports for users
//!
//! This module provides everything users need to configure how a cache takes
//! part in transactions.

// Builders and immutable values
pub use crate::cache::config::{
    Configuration, ConfigurationBuilder, InvocationBatchingConfiguration,
    InvocationBatchingConfigurationBuilder, RecoveryConfiguration, RecoveryConfigurationBuilder,
    TransactionConfiguration, TransactionConfigurationBuilder,
};

// Child builder contract, needed to call validate/create/read on section builders
pub use crate::cache::config::{BuildContext, ConfigError, ConfigurationChildBuilder};

// File front end
pub use crate::cache::config::ConfigFile;

// Transaction participation model
pub use crate::cache::transaction::{
    LockingMode, TransactionManagerLookup, TransactionMode, TransactionProtocol,
    TransactionSynchronizationRegistryLookup,
};
