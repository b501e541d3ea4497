//! # Domain Invariants
//!
//! Business invariants checked before any write leaves the chaincode.
//!
//! - Stock never goes negative
//! - An order never exceeds the stock observed at creation
//! - Identifiers and creation dates never change after creation
//! - Counters advance by exactly one per create

use crate::domain::entities::{CounterRecord, Order, Product};
use crate::errors::ChaincodeError;
use std::fmt;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Stock is never negative.
#[must_use]
pub fn check_non_negative_stock_invariant(product: &Product) -> bool {
    product.quantity >= 0
}

/// The requested quantity is positive and covered by current stock.
#[must_use]
pub fn check_inventory_invariant(product: &Product, requested: i64) -> bool {
    requested > 0 && requested <= product.quantity
}

/// An update keeps the product identity.
#[must_use]
pub fn check_product_identity_invariant(before: &Product, after: &Product) -> bool {
    before.id == after.id
}

/// A status update touches nothing but the status.
#[must_use]
pub fn check_order_immutability_invariant(before: &Order, after: &Order) -> bool {
    before.id == after.id
        && before.receiver == after.receiver
        && before.product_id == after.product_id
        && before.quantity == after.quantity
        && before.creation_date == after.creation_date
}

/// A counter moves forward by exactly one.
#[must_use]
pub fn check_counter_advance_invariant(before: CounterRecord, after: CounterRecord) -> bool {
    before.counter.checked_add(1) == Some(after.counter)
}

/// Checks everything an order creation must satisfy before its writes.
///
/// `before` is the product as read, `after` the product about to be written.
#[must_use]
pub fn check_order_creation_invariants(
    before: &Product,
    after: &Product,
    order: &Order,
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_inventory_invariant(before, order.quantity) {
        violations.push(InvariantViolation::InventoryExceeded {
            product_id: before.id.clone(),
            requested: order.quantity,
            available: before.quantity,
        });
    }

    if !check_non_negative_stock_invariant(after) {
        violations.push(InvariantViolation::NegativeStock {
            product_id: after.id.clone(),
            quantity: after.quantity,
        });
    }

    if !check_product_identity_invariant(before, after) || order.product_id != before.id {
        violations.push(InvariantViolation::IdentityChanged {
            key: before.id.clone(),
        });
    }

    if before.quantity.checked_sub(order.quantity) != Some(after.quantity) {
        violations.push(InvariantViolation::StockNotConserved {
            product_id: before.id.clone(),
        });
    }

    InvariantCheckResult::from_violations(violations)
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking a group of invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    fn from_violations(violations: Vec<InvariantViolation>) -> Self {
        if violations.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(violations)
        }
    }

    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Converts into the error for the first violation.
    pub fn into_result(self) -> Result<(), ChaincodeError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(violations) => match violations.into_iter().next() {
                Some(first) => Err(first.into()),
                None => Ok(()),
            },
        }
    }
}

/// Individual invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Order quantity exceeds available stock (or is not positive).
    InventoryExceeded {
        /// Product key.
        product_id: String,
        /// Units ordered.
        requested: i64,
        /// Units in stock.
        available: i64,
    },
    /// Stock would go negative.
    NegativeStock {
        /// Product key.
        product_id: String,
        /// Resulting stock.
        quantity: i64,
    },
    /// An immutable identifier changed.
    IdentityChanged {
        /// Key of the record.
        key: String,
    },
    /// Decrement does not match the ordered quantity.
    StockNotConserved {
        /// Product key.
        product_id: String,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InventoryExceeded {
                product_id,
                requested,
                available,
            } => write!(
                f,
                "inventory exceeded on {product_id}: requested {requested} > available {available}"
            ),
            Self::NegativeStock {
                product_id,
                quantity,
            } => write!(f, "negative stock on {product_id}: {quantity}"),
            Self::IdentityChanged { key } => write!(f, "identity changed for {key}"),
            Self::StockNotConserved { product_id } => {
                write!(f, "stock not conserved on {product_id}")
            }
        }
    }
}

impl From<InvariantViolation> for ChaincodeError {
    fn from(violation: InvariantViolation) -> Self {
        match violation {
            InvariantViolation::InventoryExceeded {
                product_id,
                requested,
                available,
            } => ChaincodeError::InsufficientInventory {
                product_id,
                requested,
                available,
            },
            InvariantViolation::NegativeStock {
                product_id,
                quantity,
            } => ChaincodeError::InsufficientInventory {
                product_id,
                requested: quantity.saturating_neg(),
                available: 0,
            },
            other => ChaincodeError::InvariantViolated(other.to_string()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
