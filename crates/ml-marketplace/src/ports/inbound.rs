//! # Driving Ports (API - Inbound)
//!
//! The surface the platform's dispatcher routes to: a function name plus
//! ordered string arguments in, a `Response` out.

use crate::errors::{ChaincodeError, ErrorKind};
use crate::ports::outbound::ChaincodeStub;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// FUNCTION NAMES
// =============================================================================

/// Operations exposed to the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    /// `queryAsset(key)`
    QueryAsset,
    /// `queryAllAsset()`
    QueryAllAsset,
    /// `getHistoryForRecord(key)`
    GetHistoryForRecord,
    /// `createProduct(name, description, price, quantity)`
    CreateProduct,
    /// `updateProduct(_, id, name, description, price, quantity)`
    UpdateProduct,
    /// `createOrder(receiver, productId, quantity)`
    CreateOrder,
    /// `updateOrderStatus(id, status)`
    UpdateOrderStatus,
    /// `query(predicate)`
    Query,
}

impl Function {
    /// Every routable function.
    pub const ALL: [Function; 8] = [
        Function::QueryAsset,
        Function::QueryAllAsset,
        Function::GetHistoryForRecord,
        Function::CreateProduct,
        Function::UpdateProduct,
        Function::CreateOrder,
        Function::UpdateOrderStatus,
        Function::Query,
    ];

    /// Name used on the wire.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::QueryAsset => "queryAsset",
            Self::QueryAllAsset => "queryAllAsset",
            Self::GetHistoryForRecord => "getHistoryForRecord",
            Self::CreateProduct => "createProduct",
            Self::UpdateProduct => "updateProduct",
            Self::CreateOrder => "createOrder",
            Self::UpdateOrderStatus => "updateOrderStatus",
            Self::Query => "query",
        }
    }

    /// Returns true if the function only reads.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::QueryAsset | Self::QueryAllAsset | Self::GetHistoryForRecord | Self::Query
        )
    }
}

impl FromStr for Function {
    type Err = ChaincodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| ChaincodeError::UnknownFunction(s.to_string()))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Outcome of one invocation, shaped like the platform's peer response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// `200` on success, `500` on failure.
    pub status: u16,
    /// Failure message, empty on success.
    pub message: String,
    /// Success payload, possibly empty.
    pub payload: Vec<u8>,
    /// Failure class, None on success.
    pub error_kind: Option<ErrorKind>,
}

impl Response {
    /// Success status code.
    pub const OK: u16 = 200;
    /// Failure status code.
    pub const ERROR: u16 = 500;

    /// Successful response carrying `payload`.
    #[must_use]
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: Self::OK,
            message: String::new(),
            payload,
            error_kind: None,
        }
    }

    /// Failed response for `err`.
    #[must_use]
    pub fn error(err: &ChaincodeError) -> Self {
        Self {
            status: Self::ERROR,
            message: err.to_string(),
            payload: Vec::new(),
            error_kind: Some(err.kind()),
        }
    }

    /// Returns true on success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == Self::OK
    }
}

impl From<Result<Vec<u8>, ChaincodeError>> for Response {
    fn from(result: Result<Vec<u8>, ChaincodeError>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(err) => Self::error(&err),
        }
    }
}

// =============================================================================
// CHAINCODE (Primary Driving Port)
// =============================================================================

/// Entry points called by the platform for each transaction.
pub trait Chaincode<S: ChaincodeStub> {
    /// Instantiation / upgrade hook. Must be idempotent.
    fn init(&self, stub: &mut S) -> Response;

    /// Routes `function` with `args` to an operation.
    fn invoke(&self, stub: &mut S, function: &str, args: &[String]) -> Response;
}

// =============================================================================
// TESTS
// =============================================================================
