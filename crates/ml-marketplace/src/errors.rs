//! # Error Types
//!
//! All error types for chaincode invocations and ledger access.

use thiserror::Error;

// =============================================================================
// ERROR KIND
// =============================================================================

/// Failure class of an invocation, as reported to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong argument count, empty argument, bad integer, illegal transition.
    Validation,
    /// Referenced key absent.
    NotFound,
    /// Requested order quantity exceeds available stock.
    InsufficientInventory,
    /// Document serialization failure.
    Encoding,
    /// Store write rejected.
    Persist,
    /// Platform clock unavailable.
    Timestamp,
    /// Unrecognized function name.
    UnknownOperation,
    /// Platform read or cursor failure.
    Ledger,
}

impl ErrorKind {
    /// Stable label used in logs and metrics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::InsufficientInventory => "insufficient_inventory",
            Self::Encoding => "encoding",
            Self::Persist => "persist",
            Self::Timestamp => "timestamp",
            Self::UnknownOperation => "unknown_operation",
            Self::Ledger => "ledger",
        }
    }
}

// =============================================================================
// CHAINCODE ERRORS
// =============================================================================

/// Errors that terminate a chaincode invocation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChaincodeError {
    /// Wrong number of arguments.
    #[error("incorrect number of arguments: required {expected}, got {actual}")]
    ArgumentCount {
        /// Arguments the function takes.
        expected: usize,
        /// Arguments supplied.
        actual: usize,
    },

    /// An argument that must be non-empty was empty (1-based position).
    #[error("argument {position} must be a non-empty string")]
    EmptyArgument {
        /// 1-based argument position.
        position: usize,
    },

    /// An integer field failed to parse.
    #[error("failed to convert {field}: {value:?} is not an integer")]
    InvalidInteger {
        /// Field being parsed.
        field: &'static str,
        /// Raw argument.
        value: String,
    },

    /// An integer field parsed but is outside its allowed range.
    #[error("{field} out of range: {value} (minimum {min})")]
    OutOfRange {
        /// Field being parsed.
        field: &'static str,
        /// Parsed value.
        value: i64,
        /// Smallest accepted value.
        min: i64,
    },

    /// Order status change not permitted by the status policy.
    #[error("invalid order status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// Stored status.
        from: String,
        /// Requested status.
        to: String,
    },

    /// A write would break a ledger invariant.
    #[error("invariant violated: {0}")]
    InvariantViolated(String),

    /// Referenced key is absent.
    #[error("cannot find asset: {key}")]
    NotFound {
        /// Missing key.
        key: String,
    },

    /// Requested quantity exceeds product stock.
    #[error(
        "quantity requested ({requested}) is more than the available quantity ({available}) of {product_id}"
    )]
    InsufficientInventory {
        /// Product key.
        product_id: String,
        /// Units ordered.
        requested: i64,
        /// Units in stock.
        available: i64,
    },

    /// Stored document failed to encode or decode.
    #[error("encoding error for {key}: {reason}")]
    Encoding {
        /// Key of the document.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// Store rejected a write.
    #[error("failed to persist {key}: {reason}")]
    Persist {
        /// Key being written.
        key: String,
        /// Store message.
        reason: String,
    },

    /// Transaction timestamp unavailable.
    #[error("transaction timestamp unavailable: {0}")]
    Timestamp(String),

    /// Dispatcher received an unknown function name.
    #[error("received unknown function: {0}")]
    UnknownFunction(String),

    /// Platform read or cursor failure.
    #[error("ledger error: {0}")]
    Ledger(#[from] StubError),
}

impl ChaincodeError {
    /// Failure class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArgumentCount { .. }
            | Self::EmptyArgument { .. }
            | Self::InvalidInteger { .. }
            | Self::OutOfRange { .. }
            | Self::InvalidStatusTransition { .. }
            | Self::InvariantViolated(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InsufficientInventory { .. } => ErrorKind::InsufficientInventory,
            Self::Encoding { .. } => ErrorKind::Encoding,
            Self::Persist { .. } => ErrorKind::Persist,
            Self::Timestamp(_) => ErrorKind::Timestamp,
            Self::UnknownFunction(_) => ErrorKind::UnknownOperation,
            Self::Ledger(_) => ErrorKind::Ledger,
        }
    }

    /// Returns true if the caller supplied bad input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Builds an encoding error from a `serde_json` failure.
    pub(crate) fn encoding(key: &str, err: &serde_json::Error) -> Self {
        Self::Encoding {
            key: key.to_string(),
            reason: err.to_string(),
        }
    }
}

// =============================================================================
// STUB ERRORS
// =============================================================================

/// Errors raised by the ledger platform behind `ChaincodeStub`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StubError {
    /// Write rejected by the store.
    #[error("write rejected for key {key}: {reason}")]
    WriteRejected {
        /// Key being written.
        key: String,
        /// Store message.
        reason: String,
    },

    /// Cursor failed while iterating.
    #[error("cursor error: {0}")]
    Cursor(String),

    /// Predicate query could not be evaluated.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Transaction timestamp missing from the proposal.
    #[error("transaction timestamp not set")]
    TimestampUnavailable,

    /// A key read by the transaction changed before commit.
    #[error("MVCC read conflict on key {key}: read version {read}, committed version {committed}")]
    MvccConflict {
        /// Conflicting key.
        key: String,
        /// Version observed by the transaction.
        read: u64,
        /// Version committed since.
        committed: u64,
    },

    /// Store lock poisoned.
    #[error("ledger lock poisoned")]
    LockPoisoned,

    /// Point read failed.
    #[error("read failed for key {key}: {reason}")]
    ReadFailed {
        /// Key being read.
        key: String,
        /// Store message.
        reason: String,
    },
}

// =============================================================================
// TESTS
// =============================================================================
