//! # Integration Tests
//!
//! Whole invocations through `MarketplaceChaincode::invoke` against the
//! in-memory ledger, committing between transactions as the platform would.

pub mod mvcc_retry;
pub mod properties;
pub mod scenarios;
