//! # Value Objects
//!
//! Immutable domain primitives for the marketplace ledger.
//! These types are defined by their value, not identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ASSET TYPE
// =============================================================================

/// Kind of asset that receives counter-allocated identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetType {
    /// `Product<N>` records.
    Product,
    /// `Order<N>` records.
    Order,
}

impl AssetType {
    /// All counter-backed asset types, in bootstrap order.
    pub const ALL: [AssetType; 2] = [AssetType::Product, AssetType::Order];

    /// Reserved singleton key holding this type's counter.
    #[must_use]
    pub const fn counter_key(&self) -> &'static str {
        match self {
            Self::Product => "ProductCounterNO",
            Self::Order => "OrderCounterNO",
        }
    }

    /// Prefix of every identifier of this type.
    #[must_use]
    pub const fn id_prefix(&self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Order => "Order",
        }
    }

    /// Identifier for the given sequence number, e.g. `Product7`.
    #[must_use]
    pub fn asset_id(&self, sequence: u64) -> String {
        format!("{}{}", self.id_prefix(), sequence)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id_prefix())
    }
}

// =============================================================================
// ORDER STATUS
// =============================================================================

/// Lifecycle status of an order.
///
/// Serialized as the bare status string. Strings outside the known set
/// decode to `Other` so documents written under the permissive policy
/// remain readable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Initial status of every order.
    Placed,
    /// Handed to the carrier.
    Shipped,
    /// Received by the receiver.
    Delivered,
    /// Cancelled before shipping.
    Cancelled,
    /// Free-form status outside the transition table.
    Other(String),
}

impl OrderStatus {
    /// Wire name of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Placed => "PLACED",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::Other(s) => s.as_str(),
        }
    }

    /// Returns true if the status belongs to the transition table.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Returns true if no further transition is permitted.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Transition table:
    ///
    /// ```text
    /// PLACED -> SHIPPED -> DELIVERED
    /// PLACED -> CANCELLED
    /// ```
    #[must_use]
    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (Self::Placed, Self::Shipped)
                | (Self::Placed, Self::Cancelled)
                | (Self::Shipped, Self::Delivered)
        )
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PLACED" => Self::Placed,
            "SHIPPED" => Self::Shipped,
            "DELIVERED" => Self::Delivered,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TRANSACTION TIMESTAMP
// =============================================================================

/// Deterministic transaction time from the proposal header.
///
/// Identical on every peer executing the same proposal, so it is safe to
/// persist in asset records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TxTimestamp {
    /// Seconds since the Unix epoch.
    pub seconds: i64,
    /// Sub-second nanoseconds, `0..1_000_000_000`.
    pub nanos: i32,
}

impl TxTimestamp {
    /// Creates a timestamp from seconds and nanos.
    #[must_use]
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Converts to a UTC datetime. None if out of range.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;
        if nanos >= 1_000_000_000 {
            return None;
        }
        DateTime::from_timestamp(self.seconds, nanos)
    }

    /// Renders as `2006-01-02 15:04:05.123456789 +0000 UTC`.
    ///
    /// Always UTC so every peer renders the same string; trailing zeros of
    /// the fraction are trimmed and a zero fraction is omitted.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        let dt = self.to_datetime()?;
        let mut out = dt.format("%Y-%m-%d %H:%M:%S").to_string();
        if self.nanos > 0 {
            let fraction = format!("{:09}", self.nanos);
            out.push('.');
            out.push_str(fraction.trim_end_matches('0'));
        }
        out.push_str(" +0000 UTC");
        Some(out)
    }
}

impl fmt::Display for TxTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(s) => f.write_str(&s),
            None => write!(f, "{}s+{}ns", self.seconds, self.nanos),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
