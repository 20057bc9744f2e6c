//! Immutable transaction configuration consumed by the cache runtime

use std::sync::Arc;
use std::time::Duration;

use super::recovery::RecoveryConfiguration;
use crate::cache::transaction::{
    LockingMode, TransactionManagerLookup, TransactionMode, TransactionProtocol,
    TransactionSynchronizationRegistryLookup,
};

/// Frozen transaction settings produced by [`TransactionConfigurationBuilder`]
///
/// Every derived default has already been resolved: [`transaction_mode`] is
/// always set and [`locking_mode`] already reflects the deprecated eager-locking
/// flag.
///
/// Equality compares the two lookups by `Arc` identity and every other
/// attribute by value. Each builder allocates its own default lookup, so two
/// independently built default configurations are not equal; a configuration
/// copied with `read` shares the lookups and compares equal.
///
/// [`TransactionConfigurationBuilder`]: super::TransactionConfigurationBuilder
/// [`transaction_mode`]: TransactionConfiguration::transaction_mode
/// [`locking_mode`]: TransactionConfiguration::locking_mode
#[derive(Debug, Clone)]
pub struct TransactionConfiguration {
    pub(super) auto_commit: bool,
    pub(super) cache_stop_timeout: Duration,
    pub(super) eager_locking_single_node: bool,
    pub(super) locking_mode: LockingMode,
    pub(super) sync_commit_phase: bool,
    pub(super) sync_rollback_phase: bool,
    pub(super) transaction_manager_lookup: Arc<dyn TransactionManagerLookup>,
    pub(super) transaction_synchronization_registry_lookup:
        Option<Arc<dyn TransactionSynchronizationRegistryLookup>>,
    pub(super) transaction_mode: TransactionMode,
    pub(super) use_eager_locking: bool,
    pub(super) use_synchronization: bool,
    pub(super) use_1pc_for_auto_commit_transactions: bool,
    pub(super) recovery: RecoveryConfiguration,
    pub(super) transaction_protocol: Option<TransactionProtocol>,
}

impl TransactionConfiguration {
    pub fn auto_commit(&self) -> bool {
        self.auto_commit
    }

    /// Time a stopping cache waits for in-flight transactions to finish
    pub fn cache_stop_timeout(&self) -> Duration {
        self.cache_stop_timeout
    }

    #[deprecated(note = "eager locking is expressed through LockingMode::Pessimistic")]
    pub fn eager_locking_single_node(&self) -> bool {
        self.eager_locking_single_node
    }

    pub fn locking_mode(&self) -> LockingMode {
        self.locking_mode
    }

    pub fn sync_commit_phase(&self) -> bool {
        self.sync_commit_phase
    }

    pub fn sync_rollback_phase(&self) -> bool {
        self.sync_rollback_phase
    }

    pub fn transaction_manager_lookup(&self) -> &Arc<dyn TransactionManagerLookup> {
        &self.transaction_manager_lookup
    }

    pub fn transaction_synchronization_registry_lookup(
        &self,
    ) -> Option<&Arc<dyn TransactionSynchronizationRegistryLookup>> {
        self.transaction_synchronization_registry_lookup.as_ref()
    }

    pub fn transaction_mode(&self) -> TransactionMode {
        self.transaction_mode
    }

    #[deprecated(note = "eager locking is expressed through LockingMode::Pessimistic")]
    pub fn use_eager_locking(&self) -> bool {
        self.use_eager_locking
    }

    pub fn use_synchronization(&self) -> bool {
        self.use_synchronization
    }

    pub fn use_1pc_for_auto_commit_transactions(&self) -> bool {
        self.use_1pc_for_auto_commit_transactions
    }

    pub fn recovery(&self) -> &RecoveryConfiguration {
        &self.recovery
    }

    pub fn transaction_protocol(&self) -> Option<TransactionProtocol> {
        self.transaction_protocol
    }
}

/// Lookups compare by identity, every other attribute by value
impl PartialEq for TransactionConfiguration {
    fn eq(&self, other: &Self) -> bool {
        let registry_eq = match (
            &self.transaction_synchronization_registry_lookup,
            &other.transaction_synchronization_registry_lookup,
        ) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };

        self.auto_commit == other.auto_commit
            && self.cache_stop_timeout == other.cache_stop_timeout
            && self.eager_locking_single_node == other.eager_locking_single_node
            && self.locking_mode == other.locking_mode
            && self.sync_commit_phase == other.sync_commit_phase
            && self.sync_rollback_phase == other.sync_rollback_phase
            && Arc::ptr_eq(
                &self.transaction_manager_lookup,
                &other.transaction_manager_lookup,
            )
            && registry_eq
            && self.transaction_mode == other.transaction_mode
            && self.use_eager_locking == other.use_eager_locking
            && self.use_synchronization == other.use_synchronization
            && self.use_1pc_for_auto_commit_transactions
                == other.use_1pc_for_auto_commit_transactions
            && self.recovery == other.recovery
            && self.transaction_protocol == other.transaction_protocol
    }
}
