//! Transaction section of the cache configuration

pub mod builder;
pub mod configuration;
pub mod recovery;

pub use builder::{DEFAULT_CACHE_STOP_TIMEOUT, TransactionConfigurationBuilder};
pub use configuration::TransactionConfiguration;
pub use recovery::{
    DEFAULT_RECOVERY_INFO_CACHE_NAME, RecoveryConfiguration, RecoveryConfigurationBuilder,
};
