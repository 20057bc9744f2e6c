//! Transaction manager and synchronization registry lookup strategies
//!
//! A lookup is a capability supplied by the caller: the configuration only
//! stores it, and the cache runtime later asks it for a handle. The default
//! strategy is constructed fresh for every builder rather than shared globally.

use std::fmt::Debug;

use crate::cache::config::types::ConfigError;

/// Environment variable consulted by [`GenericTransactionManagerLookup`]
pub const TRANSACTION_MANAGER_ENV: &str = "TXCONFIG_TRANSACTION_MANAGER";

/// Provider name of the transaction manager bundled with the cache
pub const EMBEDDED_PROVIDER: &str = "embedded";

/// Resolved reference to a transaction manager
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionManagerHandle {
    provider: String,
}

impl TransactionManagerHandle {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
        }
    }

    pub fn embedded() -> Self {
        Self::new(EMBEDDED_PROVIDER)
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn is_embedded(&self) -> bool {
        self.provider == EMBEDDED_PROVIDER
    }
}

/// Resolved reference to a transaction synchronization registry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SynchronizationRegistryHandle {
    provider: String,
}

impl SynchronizationRegistryHandle {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }
}

/// Resolves the transaction manager a transactional cache enlists with
pub trait TransactionManagerLookup: Debug + Send + Sync {
    fn lookup_transaction_manager(&self) -> Result<TransactionManagerHandle, ConfigError>;
}

/// Resolves the synchronization registry used when synchronizations replace XA enlistment
pub trait TransactionSynchronizationRegistryLookup: Debug + Send + Sync {
    fn lookup_registry(&self) -> Result<SynchronizationRegistryHandle, ConfigError>;
}

/// Accepts the provider named in the environment and falls back to the embedded manager
#[derive(Debug, Clone)]
pub struct GenericTransactionManagerLookup {
    candidates: Vec<String>,
}

impl GenericTransactionManagerLookup {
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }

    /// Restrict the providers accepted from the environment, in priority order
    pub fn with_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    fn resolve(&self, requested: Option<&str>) -> TransactionManagerHandle {
        let requested = match requested.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return TransactionManagerHandle::embedded(),
        };

        if self.candidates.is_empty() || self.candidates.iter().any(|c| c == requested) {
            log::debug!("Using transaction manager provider '{}'", requested);
            return TransactionManagerHandle::new(requested);
        }

        log::warn!(
            "Transaction manager provider '{}' is not one of {:?}, falling back to {}",
            requested,
            self.candidates,
            EMBEDDED_PROVIDER
        );
        TransactionManagerHandle::embedded()
    }
}

impl Default for GenericTransactionManagerLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionManagerLookup for GenericTransactionManagerLookup {
    fn lookup_transaction_manager(&self) -> Result<TransactionManagerHandle, ConfigError> {
        let requested = std::env::var(TRANSACTION_MANAGER_ENV).ok();
        Ok(self.resolve(requested.as_deref()))
    }
}

/// Always resolves to the embedded transaction manager
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTransactionManagerLookup;

impl TransactionManagerLookup for EmbeddedTransactionManagerLookup {
    fn lookup_transaction_manager(&self) -> Result<TransactionManagerHandle, ConfigError> {
        Ok(TransactionManagerHandle::embedded())
    }
}

/// Always resolves to the embedded synchronization registry
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSynchronizationRegistryLookup;

impl TransactionSynchronizationRegistryLookup for EmbeddedSynchronizationRegistryLookup {
    fn lookup_registry(&self) -> Result<SynchronizationRegistryHandle, ConfigError> {
        Ok(SynchronizationRegistryHandle::new(EMBEDDED_PROVIDER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_lookup_falls_back_to_embedded() {
        let lookup = GenericTransactionManagerLookup::new();
        assert!(lookup.resolve(None).is_embedded());
        assert!(lookup.resolve(Some("   ")).is_embedded());
    }

    #[test]
    fn test_generic_lookup_accepts_any_provider_without_candidates() {
        let lookup = GenericTransactionManagerLookup::new();
        assert_eq!(lookup.resolve(Some("narayana")).provider(), "narayana");
    }

    #[test]
    fn test_generic_lookup_rejects_unknown_candidate() {
        let lookup = GenericTransactionManagerLookup::with_candidates(["narayana", "atomikos"]);
        assert_eq!(lookup.candidates(), ["narayana", "atomikos"]);
        assert!(GenericTransactionManagerLookup::new().candidates().is_empty());
        assert_eq!(lookup.resolve(Some("atomikos")).provider(), "atomikos");
        assert!(lookup.resolve(Some("bitronix")).is_embedded());
    }

    #[test]
    fn test_embedded_lookups() {
        let tm = EmbeddedTransactionManagerLookup
            .lookup_transaction_manager()
            .unwrap();
        assert!(tm.is_embedded());

        let registry = EmbeddedSynchronizationRegistryLookup.lookup_registry().unwrap();
        assert_eq!(registry.provider(), EMBEDDED_PROVIDER);
    }
}
