//! Fluent builder for transaction configuration
//!
//! The builder stores whatever the setters are given and performs no checks of
//! its own. Derived defaults are resolved only when a configuration is created,
//! in this order:
//!
//! 1. the deprecated eager-locking flag forces [`LockingMode::Pessimistic`];
//! 2. an unset transaction mode becomes [`TransactionMode::Transactional`] when
//!    invocation batching is enabled, [`TransactionMode::NonTransactional`]
//!    otherwise.
//!
//! Both resolved values are written back into the builder, so a later build
//! starts from them rather than from the unresolved state.

use std::sync::Arc;
use std::time::Duration;

use super::configuration::TransactionConfiguration;
use super::recovery::RecoveryConfigurationBuilder;
use crate::cache::config::types::{BuildContext, ConfigError, ConfigurationChildBuilder};
use crate::cache::transaction::{
    GenericTransactionManagerLookup, LockingMode, TransactionManagerLookup, TransactionMode,
    TransactionProtocol, TransactionSynchronizationRegistryLookup,
};

/// Default time a stopping cache waits for in-flight transactions
pub const DEFAULT_CACHE_STOP_TIMEOUT: Duration = Duration::from_secs(30);

/// Mutable transaction settings, owned by a [`ConfigurationBuilder`]
///
/// [`ConfigurationBuilder`]: crate::cache::config::ConfigurationBuilder
#[derive(Debug, Clone)]
pub struct TransactionConfigurationBuilder {
    auto_commit: bool,
    cache_stop_timeout: Duration,
    eager_locking_single_node: bool,
    locking_mode: LockingMode,
    // Set only by the locking_mode setter; values restored by read() are not directives.
    locking_mode_explicit: bool,
    sync_commit_phase: bool,
    sync_rollback_phase: bool,
    transaction_manager_lookup: Arc<dyn TransactionManagerLookup>,
    transaction_synchronization_registry_lookup:
        Option<Arc<dyn TransactionSynchronizationRegistryLookup>>,
    transaction_mode: Option<TransactionMode>,
    use_eager_locking: bool,
    use_synchronization: bool,
    use_1pc_for_auto_commit_transactions: bool,
    transaction_protocol: Option<TransactionProtocol>,
    recovery: RecoveryConfigurationBuilder,
}

impl TransactionConfigurationBuilder {
    pub(crate) fn new() -> Self {
        Self {
            auto_commit: true,
            cache_stop_timeout: DEFAULT_CACHE_STOP_TIMEOUT,
            eager_locking_single_node: false,
            locking_mode: LockingMode::Optimistic,
            locking_mode_explicit: false,
            sync_commit_phase: true,
            sync_rollback_phase: false,
            transaction_manager_lookup: Arc::new(GenericTransactionManagerLookup::new()),
            transaction_synchronization_registry_lookup: None,
            transaction_mode: None,
            use_eager_locking: false,
            use_synchronization: false,
            use_1pc_for_auto_commit_transactions: false,
            transaction_protocol: None,
            recovery: RecoveryConfigurationBuilder::new(),
        }
    }

    /// Wrap single operations issued outside a transaction in their own transaction
    pub fn auto_commit(&mut self, auto_commit: bool) -> &mut Self {
        self.auto_commit = auto_commit;
        self
    }

    /// Time a stopping cache waits for in-flight transactions to finish
    pub fn cache_stop_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.cache_stop_timeout = timeout;
        self
    }

    /// Narrower-width form of [`cache_stop_timeout`](Self::cache_stop_timeout)
    #[deprecated(note = "use cache_stop_timeout(Duration)")]
    pub fn cache_stop_timeout_millis(&mut self, millis: u32) -> &mut Self {
        self.cache_stop_timeout(Duration::from_millis(u64::from(millis)))
    }

    #[deprecated(note = "eager locking is expressed through LockingMode::Pessimistic")]
    pub fn eager_locking_single_node(&mut self, enabled: bool) -> &mut Self {
        self.eager_locking_single_node = enabled;
        self
    }

    pub fn locking_mode(&mut self, locking_mode: LockingMode) -> &mut Self {
        self.locking_mode = locking_mode;
        self.locking_mode_explicit = true;
        self
    }

    /// Wait for the commit phase to complete on every node before returning
    pub fn sync_commit_phase(&mut self, sync: bool) -> &mut Self {
        self.sync_commit_phase = sync;
        self
    }

    /// Wait for the rollback phase to complete on every node before returning
    pub fn sync_rollback_phase(&mut self, sync: bool) -> &mut Self {
        self.sync_rollback_phase = sync;
        self
    }

    pub fn transaction_manager_lookup(
        &mut self,
        lookup: Arc<dyn TransactionManagerLookup>,
    ) -> &mut Self {
        self.transaction_manager_lookup = lookup;
        self
    }

    pub fn transaction_synchronization_registry_lookup(
        &mut self,
        lookup: Arc<dyn TransactionSynchronizationRegistryLookup>,
    ) -> &mut Self {
        self.transaction_synchronization_registry_lookup = Some(lookup);
        self
    }

    pub fn transaction_mode(&mut self, transaction_mode: TransactionMode) -> &mut Self {
        self.transaction_mode = Some(transaction_mode);
        self
    }

    /// Forces pessimistic locking when the configuration is created
    #[deprecated(note = "use locking_mode(LockingMode::Pessimistic)")]
    pub fn use_eager_locking(&mut self, enabled: bool) -> &mut Self {
        self.use_eager_locking = enabled;
        self
    }

    /// Enlist through synchronizations instead of as a full XA resource
    pub fn use_synchronization(&mut self, enabled: bool) -> &mut Self {
        self.use_synchronization = enabled;
        self
    }

    pub fn use_1pc_for_auto_commit_transactions(&mut self, enabled: bool) -> &mut Self {
        self.use_1pc_for_auto_commit_transactions = enabled;
        self
    }

    pub fn transaction_protocol(&mut self, protocol: TransactionProtocol) -> &mut Self {
        self.transaction_protocol = Some(protocol);
        self
    }

    /// Currently configured commit-coordination variant, if any
    pub fn current_transaction_protocol(&self) -> Option<TransactionProtocol> {
        self.transaction_protocol
    }

    /// Enable recovery and return its builder
    ///
    /// Calling this again returns the same, already enabled, builder.
    pub fn recovery(&mut self) -> &mut RecoveryConfigurationBuilder {
        self.recovery.enable();
        &mut self.recovery
    }

    /// Recovery builder, left enabled or disabled as it is
    pub fn recovery_builder(&mut self) -> &mut RecoveryConfigurationBuilder {
        &mut self.recovery
    }
}

impl ConfigurationChildBuilder for TransactionConfigurationBuilder {
    type Output = TransactionConfiguration;

    fn validate(&self) -> Result<(), ConfigError> {
        if self.use_eager_locking
            && self.locking_mode_explicit
            && self.locking_mode == LockingMode::Optimistic
        {
            return Err(ConfigError::InvalidCombination {
                fields: vec!["use_eager_locking", "locking_mode"],
                reason: "eager locking requires PESSIMISTIC locking but OPTIMISTIC was requested"
                    .to_string(),
            });
        }
        self.recovery.validate()
    }

    fn create(&mut self, context: &BuildContext) -> TransactionConfiguration {
        if self.use_eager_locking {
            if self.locking_mode != LockingMode::Pessimistic {
                log::warn!(
                    "use_eager_locking is deprecated; overriding locking mode {} with {}",
                    self.locking_mode,
                    LockingMode::Pessimistic
                );
            }
            self.locking_mode = LockingMode::Pessimistic;
        }

        let transaction_mode = *self.transaction_mode.get_or_insert_with(|| {
            let resolved = if context.invocation_batching_enabled {
                TransactionMode::Transactional
            } else {
                TransactionMode::NonTransactional
            };
            log::debug!(
                "Transaction mode not set, resolved to {} (invocation batching enabled: {})",
                resolved,
                context.invocation_batching_enabled
            );
            resolved
        });

        TransactionConfiguration {
            auto_commit: self.auto_commit,
            cache_stop_timeout: self.cache_stop_timeout,
            eager_locking_single_node: self.eager_locking_single_node,
            locking_mode: self.locking_mode,
            sync_commit_phase: self.sync_commit_phase,
            sync_rollback_phase: self.sync_rollback_phase,
            transaction_manager_lookup: Arc::clone(&self.transaction_manager_lookup),
            transaction_synchronization_registry_lookup: self
                .transaction_synchronization_registry_lookup
                .clone(),
            transaction_mode,
            use_eager_locking: self.use_eager_locking,
            use_synchronization: self.use_synchronization,
            use_1pc_for_auto_commit_transactions: self.use_1pc_for_auto_commit_transactions,
            recovery: self.recovery.create(context),
            transaction_protocol: self.transaction_protocol,
        }
    }

    fn read(&mut self, template: &TransactionConfiguration) -> &mut Self {
        log::trace!("Reading transaction configuration from template");
        self.auto_commit = template.auto_commit;
        self.cache_stop_timeout = template.cache_stop_timeout;
        self.eager_locking_single_node = template.eager_locking_single_node;
        self.locking_mode = template.locking_mode;
        self.locking_mode_explicit = false;
        self.sync_commit_phase = template.sync_commit_phase;
        self.sync_rollback_phase = template.sync_rollback_phase;
        self.transaction_manager_lookup = Arc::clone(&template.transaction_manager_lookup);
        self.transaction_mode = Some(template.transaction_mode);
        self.transaction_synchronization_registry_lookup = template
            .transaction_synchronization_registry_lookup
            .clone();
        self.use_eager_locking = template.use_eager_locking;
        self.use_synchronization = template.use_synchronization;
        self.use_1pc_for_auto_commit_transactions = template.use_1pc_for_auto_commit_transactions;
        self.recovery.read(&template.recovery);
        self.transaction_protocol = template.transaction_protocol;
        self
    }
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;
    use crate::cache::transaction::lookup::TRANSACTION_MANAGER_ENV;
    use crate::cache::transaction::{
        EmbeddedSynchronizationRegistryLookup, EmbeddedTransactionManagerLookup,
    };

    fn batching(enabled: bool) -> BuildContext {
        BuildContext::new(enabled)
    }

    #[test]
    fn test_defaults() {
        let config = TransactionConfigurationBuilder::new().create(&batching(false));

        assert!(config.auto_commit());
        assert_eq!(config.cache_stop_timeout(), Duration::from_millis(30_000));
        assert!(!config.eager_locking_single_node());
        assert_eq!(config.locking_mode(), LockingMode::Optimistic);
        assert!(config.sync_commit_phase());
        assert!(!config.sync_rollback_phase());
        assert!(config.transaction_synchronization_registry_lookup().is_none());
        assert_eq!(config.transaction_mode(), TransactionMode::NonTransactional);
        assert!(!config.use_eager_locking());
        assert!(!config.use_synchronization());
        assert!(!config.use_1pc_for_auto_commit_transactions());
        assert!(!config.recovery().enabled());
        assert_eq!(config.transaction_protocol(), None);
    }

    #[test]
    fn test_build_twice_yields_identical_values() {
        let mut builder = TransactionConfigurationBuilder::new();
        builder
            .sync_rollback_phase(true)
            .transaction_protocol(TransactionProtocol::TotalOrder)
            .transaction_synchronization_registry_lookup(Arc::new(
                EmbeddedSynchronizationRegistryLookup,
            ));

        assert_eq!(
            builder.create(&batching(false)),
            builder.create(&batching(false))
        );
    }

    #[test]
    fn test_eager_locking_forces_pessimistic_in_either_order() {
        let mut before = TransactionConfigurationBuilder::new();
        before
            .use_eager_locking(true)
            .locking_mode(LockingMode::Optimistic);
        assert_eq!(
            before.create(&batching(false)).locking_mode(),
            LockingMode::Pessimistic
        );

        let mut after = TransactionConfigurationBuilder::new();
        after
            .locking_mode(LockingMode::Optimistic)
            .use_eager_locking(true);
        assert_eq!(
            after.create(&batching(false)).locking_mode(),
            LockingMode::Pessimistic
        );
    }

    #[test]
    fn test_eager_locking_is_not_applied_at_setter_time() {
        let mut builder = TransactionConfigurationBuilder::new();
        builder.use_eager_locking(true);
        assert_eq!(builder.locking_mode, LockingMode::Optimistic);

        builder.use_eager_locking(false);
        assert_eq!(
            builder.create(&batching(false)).locking_mode(),
            LockingMode::Optimistic
        );
    }

    #[test]
    fn test_transaction_mode_follows_invocation_batching() {
        assert_eq!(
            TransactionConfigurationBuilder::new()
                .create(&batching(true))
                .transaction_mode(),
            TransactionMode::Transactional
        );
        assert_eq!(
            TransactionConfigurationBuilder::new()
                .create(&batching(false))
                .transaction_mode(),
            TransactionMode::NonTransactional
        );
    }

    #[test]
    fn test_resolved_transaction_mode_is_stored_in_builder() {
        let mut builder = TransactionConfigurationBuilder::new();
        assert_eq!(builder.transaction_mode, None);

        let first = builder.create(&batching(true));
        assert_eq!(builder.transaction_mode, Some(TransactionMode::Transactional));

        // Batching is only consulted while the mode is still unset.
        let second = builder.create(&batching(false));
        assert_eq!(first.transaction_mode(), TransactionMode::Transactional);
        assert_eq!(second.transaction_mode(), TransactionMode::Transactional);
    }

    #[test]
    fn test_eager_locking_override_is_stored_in_builder() {
        let mut builder = TransactionConfigurationBuilder::new();
        builder.use_eager_locking(true);
        let first = builder.create(&batching(false));
        assert_eq!(builder.locking_mode, LockingMode::Pessimistic);

        builder.use_eager_locking(false);
        let second = builder.create(&batching(false));
        assert_eq!(first.locking_mode(), LockingMode::Pessimistic);
        assert_eq!(second.locking_mode(), LockingMode::Pessimistic);
    }

    #[test]
    fn test_default_lookup_is_fresh_per_builder() {
        let a = TransactionConfigurationBuilder::new().create(&batching(false));
        let b = TransactionConfigurationBuilder::new().create(&batching(false));
        assert!(!Arc::ptr_eq(
            a.transaction_manager_lookup(),
            b.transaction_manager_lookup()
        ));
        assert_ne!(a, b);

        if std::env::var_os(TRANSACTION_MANAGER_ENV).is_none() {
            let handle = a
                .transaction_manager_lookup()
                .lookup_transaction_manager()
                .unwrap();
            assert!(handle.is_embedded());
        }
    }

    #[test]
    fn test_explicit_transaction_mode_ignores_invocation_batching() {
        let mut builder = TransactionConfigurationBuilder::new();
        builder.transaction_mode(TransactionMode::NonTransactional);
        assert_eq!(
            builder.create(&batching(true)).transaction_mode(),
            TransactionMode::NonTransactional
        );
    }

    #[test]
    fn test_timeout_and_pessimistic_scenario() {
        let mut builder = TransactionConfigurationBuilder::new();
        builder
            .cache_stop_timeout(Duration::from_millis(5000))
            .locking_mode(LockingMode::Pessimistic);
        let config = builder.create(&batching(false));

        assert_eq!(config.cache_stop_timeout(), Duration::from_millis(5000));
        assert_eq!(config.locking_mode(), LockingMode::Pessimistic);
        assert!(config.auto_commit());
        assert_eq!(config.transaction_mode(), TransactionMode::NonTransactional);
        assert!(!config.recovery().enabled());
    }

    #[test]
    fn test_legacy_timeout_setter_matches_primary() {
        let mut legacy = TransactionConfigurationBuilder::new();
        legacy.cache_stop_timeout_millis(5000);

        let mut primary = TransactionConfigurationBuilder::new();
        primary.cache_stop_timeout(Duration::from_millis(5000));

        assert_eq!(
            legacy.create(&batching(false)).cache_stop_timeout(),
            primary.create(&batching(false)).cache_stop_timeout()
        );
    }

    #[test]
    fn test_recovery_access_enables_and_is_idempotent() {
        let mut builder = TransactionConfigurationBuilder::new();
        builder.recovery().recovery_info_cache_name("records");
        builder.recovery();

        let recovery = builder.create(&batching(false)).recovery().clone();
        assert!(recovery.enabled());
        assert_eq!(recovery.recovery_info_cache_name(), "records");
    }

    #[test]
    fn test_other_setters_never_enable_recovery() {
        let mut builder = TransactionConfigurationBuilder::new();
        builder
            .auto_commit(false)
            .use_synchronization(true)
            .use_1pc_for_auto_commit_transactions(true)
            .transaction_mode(TransactionMode::Transactional)
            .transaction_protocol(TransactionProtocol::Default);
        assert!(!builder.create(&batching(false)).recovery().enabled());
    }

    #[test]
    fn test_read_then_build_reproduces_template() {
        let mut source = TransactionConfigurationBuilder::new();
        source
            .auto_commit(false)
            .cache_stop_timeout(Duration::from_secs(2))
            .eager_locking_single_node(true)
            .locking_mode(LockingMode::Pessimistic)
            .sync_commit_phase(false)
            .sync_rollback_phase(true)
            .transaction_manager_lookup(Arc::new(EmbeddedTransactionManagerLookup))
            .transaction_synchronization_registry_lookup(Arc::new(
                EmbeddedSynchronizationRegistryLookup,
            ))
            .use_synchronization(true)
            .use_1pc_for_auto_commit_transactions(true)
            .transaction_protocol(TransactionProtocol::TotalOrder)
            .recovery()
            .recovery_info_cache_name("records");
        let template = source.create(&batching(true));

        let mut target = TransactionConfigurationBuilder::new();
        target.read(&template);

        // Mode was resolved in the template, so batching no longer matters.
        assert_eq!(target.create(&batching(false)), template);
        assert_eq!(
            target.current_transaction_protocol(),
            Some(TransactionProtocol::TotalOrder)
        );
    }

    #[test]
    fn test_read_is_a_full_replace() {
        let template = TransactionConfigurationBuilder::new().create(&batching(false));

        let mut target = TransactionConfigurationBuilder::new();
        target
            .auto_commit(false)
            .transaction_protocol(TransactionProtocol::TotalOrder)
            .recovery();
        target.read(&template);

        let rebuilt = target.create(&batching(false));
        assert!(rebuilt.auto_commit());
        assert_eq!(rebuilt.transaction_protocol(), None);
        assert!(!rebuilt.recovery().enabled());
    }

    #[test]
    fn test_read_restores_resolved_locking_mode() {
        let mut source = TransactionConfigurationBuilder::new();
        source.use_eager_locking(true);
        let template = source.create(&batching(false));

        let mut target = TransactionConfigurationBuilder::new();
        target.read(&template);
        assert_eq!(target.locking_mode, LockingMode::Pessimistic);

        target.use_eager_locking(false);
        assert_eq!(
            target.create(&batching(false)).locking_mode(),
            LockingMode::Pessimistic
        );
    }

    #[test]
    fn test_validate_rejects_explicit_optimistic_with_eager_locking() {
        let mut builder = TransactionConfigurationBuilder::new();
        builder
            .use_eager_locking(true)
            .locking_mode(LockingMode::Optimistic);
        assert!(matches!(
            builder.validate(),
            Err(ConfigError::InvalidCombination { .. })
        ));

        builder.locking_mode(LockingMode::Pessimistic);
        assert!(builder.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_eager_locking_with_default_locking_mode() {
        let mut builder = TransactionConfigurationBuilder::new();
        builder.use_eager_locking(true);
        assert!(builder.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_eager_locking_after_read() {
        let template = TransactionConfigurationBuilder::new().create(&batching(false));
        let mut builder = TransactionConfigurationBuilder::new();
        builder.locking_mode(LockingMode::Optimistic);
        builder.read(&template).use_eager_locking(true);
        assert!(builder.validate().is_ok());
    }
}
