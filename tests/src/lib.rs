//! # Market-Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Ledger and invocation helpers
//! └── integration/      # Cross-module scenarios
//!     ├── scenarios.rs  # Product and order lifecycle end to end
//!     ├── mvcc_retry.rs # Conflicting transactions and retry
//!     └── properties.rs # Property tests over invocation sequences
//!
//! tests/benches/
//! └── marketplace_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ml-tests
//!
//! # By category
//! cargo test -p ml-tests integration::mvcc_retry
//!
//! # Benchmarks
//! cargo bench -p ml-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
