//! Cache system module
//!
//! Configuration sections and the transaction participation model they refer to.

pub mod config;
pub mod transaction;
