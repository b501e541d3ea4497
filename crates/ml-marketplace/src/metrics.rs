//! # Marketplace Metrics
//!
//! Prometheus counters for chaincode invocations.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! ml-marketplace = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `marketplace_invocations_total` - Invocations by function and outcome
//! - `marketplace_products_created_total` - Products created
//! - `marketplace_orders_created_total` - Orders placed
//! - `marketplace_inventory_rejections_total` - Orders rejected for lack of stock

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Invocations, labeled by function and outcome
    pub static ref INVOCATIONS: IntCounterVec = register_int_counter_vec!(
        "marketplace_invocations_total",
        "Total number of chaincode invocations",
        &["function", "outcome"]
    )
    .expect("Failed to create INVOCATIONS metric");

    /// Products created
    pub static ref PRODUCTS_CREATED: IntCounter = register_int_counter!(
        "marketplace_products_created_total",
        "Total number of products created"
    )
    .expect("Failed to create PRODUCTS_CREATED metric");

    /// Orders placed
    pub static ref ORDERS_CREATED: IntCounter = register_int_counter!(
        "marketplace_orders_created_total",
        "Total number of orders placed"
    )
    .expect("Failed to create ORDERS_CREATED metric");

    /// Orders rejected for insufficient inventory
    pub static ref INVENTORY_REJECTIONS: IntCounter = register_int_counter!(
        "marketplace_inventory_rejections_total",
        "Total number of orders rejected for insufficient inventory"
    )
    .expect("Failed to create INVENTORY_REJECTIONS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record one invocation. `outcome` is `ok` or an error kind label.
#[cfg(feature = "metrics")]
pub fn record_invocation(function: &str, outcome: &str) {
    INVOCATIONS.with_label_values(&[function, outcome]).inc();
}

/// Record a product created
#[cfg(feature = "metrics")]
pub fn record_product_created() {
    PRODUCTS_CREATED.inc();
}

/// Record an order placed
#[cfg(feature = "metrics")]
pub fn record_order_created() {
    ORDERS_CREATED.inc();
}

/// Record an order rejected for insufficient inventory
#[cfg(feature = "metrics")]
pub fn record_inventory_rejection() {
    INVENTORY_REJECTIONS.inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

/// No-op without the `metrics` feature.
#[cfg(not(feature = "metrics"))]
pub fn record_invocation(_function: &str, _outcome: &str) {}

#[allow(missing_docs)]
#[cfg(not(feature = "metrics"))]
pub fn record_product_created() {}

#[allow(missing_docs)]
#[cfg(not(feature = "metrics"))]
pub fn record_order_created() {}

#[allow(missing_docs)]
#[cfg(not(feature = "metrics"))]
pub fn record_inventory_rejection() {}
