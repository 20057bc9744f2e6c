//! Transaction participation enums
//!
//! These enums describe how a cache node takes part in transactions: whether it
//! participates at all, how it acquires locks, and which commit-coordination
//! variant it uses across cooperating nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lock acquisition strategy for transactional operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockingMode {
    /// Conflicts are detected at commit time
    #[default]
    Optimistic,
    /// Locks are acquired eagerly during the operation
    Pessimistic,
}

/// Whether cache operations participate in a transaction boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionMode {
    Transactional,
    NonTransactional,
}

impl TransactionMode {
    /// True when operations run inside a transaction boundary
    #[inline]
    pub fn is_transactional(self) -> bool {
        matches!(self, TransactionMode::Transactional)
    }
}

/// Commit-coordination algorithm used across cooperating nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionProtocol {
    /// Two-phase commit coordinated by the originating node
    Default,
    /// Transactions are delivered to every node in a single total order
    TotalOrder,
}

impl TransactionProtocol {
    pub fn is_total_order(self) -> bool {
        matches!(self, TransactionProtocol::TotalOrder)
    }
}

impl fmt::Display for LockingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockingMode::Optimistic => write!(f, "OPTIMISTIC"),
            LockingMode::Pessimistic => write!(f, "PESSIMISTIC"),
        }
    }
}

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionMode::Transactional => write!(f, "TRANSACTIONAL"),
            TransactionMode::NonTransactional => write!(f, "NON_TRANSACTIONAL"),
        }
    }
}

impl fmt::Display for TransactionProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionProtocol::Default => write!(f, "DEFAULT"),
            TransactionProtocol::TotalOrder => write!(f, "TOTAL_ORDER"),
        }
    }
}
