//! # Market-Ledger Marketplace Chaincode
//!
//! Product catalogue and order book kept on a replicated, versioned
//! key-value ledger. Every operation runs inside one platform transaction;
//! the platform's MVCC validation is the only concurrency control.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Stock never negative | `domain/invariants.rs` - `check_non_negative_stock_invariant()` |
//! | Order quantity within stock | `domain/invariants.rs` - `check_inventory_invariant()` |
//! | Stock conserved on order | `domain/invariants.rs` - `check_order_creation_invariants()` |
//! | Order fields fixed after creation | `domain/invariants.rs` - `check_order_immutability_invariant()` |
//! | Counter advances by exactly one | `domain/invariants.rs` - `check_counter_advance_invariant()` |
//!
//! ## Persisted Layout
//!
//! | Key | Document |
//! |-----|----------|
//! | `Product<N>` | `{"Product_Id", "Product_Name", "Product_Description", "Product_Price", "Product_Quantity"}` |
//! | `Order<N>` | `{"Order_Id", "Order_Receiver", "Order_ProductId", "Order_Quantity", "Order_Status", "Order_CreationDate"}` |
//! | `ProductCounterNO` | `{"counter": N}` |
//! | `OrderCounterNO` | `{"counter": N}` |
//!
//! ## Operations
//!
//! | Function | Arguments | Writes |
//! |----------|-----------|--------|
//! | `createProduct` | name, description, price, quantity | product, counter |
//! | `updateProduct` | _, id, name, description, price, quantity | product |
//! | `createOrder` | receiver, productId, quantity | product, order, counter |
//! | `updateOrderStatus` | id, status | order |
//! | `queryAsset` | key | - |
//! | `queryAllAsset` | - | - |
//! | `getHistoryForRecord` | key | - |
//! | `query` | selector | - |
//!
//! ## Usage Example
//!
//! ```
//! use ml_marketplace::prelude::*;
//!
//! let ledger = InMemoryLedger::new();
//! let chaincode = MarketplaceChaincode::default();
//!
//! let mut tx = ledger.begin("tx1", TxTimestamp::new(1_700_000_000, 0));
//! let args: Vec<String> = ["Widget", "A widget", "100", "10"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let response = chaincode.invoke(&mut tx, "createProduct", &args);
//! assert!(response.is_ok());
//! ledger.commit(tx).unwrap();
//!
//! assert!(ledger.committed("Product1").is_some());
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod lifecycle;
pub mod metrics;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::entities::{CounterRecord, KeyModification, KeyValue, Order, Product};
    pub use crate::domain::invariants::{InvariantCheckResult, InvariantViolation};
    pub use crate::domain::value_objects::{AssetType, OrderStatus, TxTimestamp};

    // Ports
    pub use crate::ports::inbound::{Chaincode, Function, Response};
    pub use crate::ports::outbound::{ChaincodeStub, ResultsIterator};

    // Errors
    pub use crate::errors::{ChaincodeError, ErrorKind, StubError};

    // Configuration
    pub use crate::config::{ChaincodeConfig, StatusPolicy};

    // Adapters
    pub use crate::adapters::{InMemoryLedger, TxContext};

    // Service
    pub use crate::service::{create_test_chaincode, MarketplaceChaincode, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Component name used in log lines.
pub const COMPONENT_NAME: &str = "marketplace";

// =============================================================================
// TESTS
// =============================================================================
