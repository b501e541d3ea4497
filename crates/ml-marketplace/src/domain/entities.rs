//! # Core Domain Entities
//!
//! Records persisted in the ledger. Field names follow the flat JSON layout
//! already present in stored data, so the serde renames are load-bearing.

use crate::domain::value_objects::{OrderStatus, TxTimestamp};
use serde::{Deserialize, Serialize};

// =============================================================================
// PRODUCT
// =============================================================================

/// A product offered on the marketplace, stored under `Product<N>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Immutable identifier, equal to the record key.
    #[serde(rename = "Product_Id")]
    pub id: String,
    /// Display name.
    #[serde(rename = "Product_Name")]
    pub name: String,
    /// Free-text description.
    #[serde(rename = "Product_Description")]
    pub description: String,
    /// Unit price in currency minor units.
    #[serde(rename = "Product_Price")]
    pub price: i64,
    /// Units in stock. Never negative.
    #[serde(rename = "Product_Quantity")]
    pub quantity: i64,
}

impl Product {
    /// Creates a product record.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: i64,
        quantity: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            quantity,
        }
    }

    /// Returns a copy with `requested` units removed from stock.
    ///
    /// Callers check availability first; the result may be negative
    /// otherwise, which the inventory invariant rejects.
    #[must_use]
    pub fn with_units_removed(&self, requested: i64) -> Self {
        Self {
            quantity: self.quantity.saturating_sub(requested),
            ..self.clone()
        }
    }
}

// =============================================================================
// ORDER
// =============================================================================

/// An order against a product, stored under `Order<N>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Immutable identifier, equal to the record key.
    #[serde(rename = "Order_Id")]
    pub id: String,
    /// Who receives the goods.
    #[serde(rename = "Order_Receiver")]
    pub receiver: String,
    /// Key of the ordered product.
    #[serde(rename = "Order_ProductId")]
    pub product_id: String,
    /// Ordered units. Always positive.
    #[serde(rename = "Order_Quantity")]
    pub quantity: i64,
    /// Current lifecycle status.
    #[serde(rename = "Order_Status")]
    pub status: OrderStatus,
    /// Rendered transaction timestamp of the creating transaction.
    #[serde(rename = "Order_CreationDate")]
    pub creation_date: String,
}

impl Order {
    /// Creates a freshly placed order.
    #[must_use]
    pub fn placed(
        id: impl Into<String>,
        receiver: impl Into<String>,
        product_id: impl Into<String>,
        quantity: i64,
        creation_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            receiver: receiver.into(),
            product_id: product_id.into(),
            quantity,
            status: OrderStatus::Placed,
            creation_date: creation_date.into(),
        }
    }

    /// Returns a copy carrying a new status; every other field is kept.
    #[must_use]
    pub fn with_status(&self, status: OrderStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

// =============================================================================
// COUNTER
// =============================================================================

/// Sequence counter stored under `ProductCounterNO` / `OrderCounterNO`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    /// Number of assets of this type created so far.
    pub counter: u64,
}

impl CounterRecord {
    /// Creates a counter with the given value.
    #[must_use]
    pub const fn new(counter: u64) -> Self {
        Self { counter }
    }

    /// Returns the counter advanced by one.
    #[must_use]
    pub const fn advanced(self) -> Self {
        Self {
            counter: self.counter.saturating_add(1),
        }
    }
}

// =============================================================================
// QUERY RESULT ENTRIES
// =============================================================================

/// One version of a key as reported by the platform history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyModification {
    /// Transaction that wrote this version.
    pub tx_id: String,
    /// Stored document, None for a delete.
    pub value: Option<Vec<u8>>,
    /// Commit time of the writing transaction.
    pub timestamp: TxTimestamp,
    /// Whether this version is a delete marker.
    pub is_delete: bool,
}

/// A key with its raw stored document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    /// Record key.
    pub key: String,
    /// Raw JSON document.
    pub value: Vec<u8>,
}

impl KeyValue {
    /// Creates a key/value pair.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
