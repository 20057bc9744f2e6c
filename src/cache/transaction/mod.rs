//! Transaction participation model
//!
//! Enums and lookup capabilities referenced by the transaction configuration.

pub mod lookup;
pub mod types;

pub use lookup::{
    EmbeddedSynchronizationRegistryLookup, EmbeddedTransactionManagerLookup,
    GenericTransactionManagerLookup, SynchronizationRegistryHandle, TransactionManagerHandle,
    TransactionManagerLookup, TransactionSynchronizationRegistryLookup,
};
pub use types::{LockingMode, TransactionMode, TransactionProtocol};
