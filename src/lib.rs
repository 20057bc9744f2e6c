//! txconfig - Transaction configuration for cache nodes
//!
//! Describes how a cache node participates in transactions. A mutable builder
//! accumulates settings through fluent setters, resolves a small set of derived
//! defaults, and produces an immutable configuration consumed by the cache
//! runtime.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use txconfig::prelude::*;
//!
//! let mut builder = ConfigurationBuilder::new();
//! builder
//!     .transaction()
//!     .cache_stop_timeout(Duration::from_millis(5000))
//!     .locking_mode(LockingMode::Pessimistic);
//!
//! let config = builder.build()?;
//! assert_eq!(config.transaction().locking_mode(), LockingMode::Pessimistic);
//! assert_eq!(
//!     config.transaction().transaction_mode(),
//!     TransactionMode::NonTransactional
//! );
//! # Ok::<(), ConfigError>(())
//! ```
//!
//! # Derived defaults
//!
//! - The deprecated eager-locking flag forces pessimistic locking.
//! - An unset transaction mode becomes transactional when invocation batching
//!   is enabled, non-transactional otherwise.

pub mod cache;
pub mod prelude;

pub use cache::config::{
    ConfigError, Configuration, ConfigurationBuilder, TransactionConfiguration,
    TransactionConfigurationBuilder,
};
pub use cache::transaction::{LockingMode, TransactionMode, TransactionProtocol};
