//! # Marketplace Chaincode Service
//!
//! Routes platform invocations to the lifecycle operations and turns their
//! results into `Response` envelopes.
//!
//! ## Invocation Flow
//!
//! 1. Resolve the function name (`UnknownOperation` otherwise)
//! 2. Run the operation against the transaction's stub
//! 3. Record metrics and statistics, log the outcome
//! 4. Convert to a `Response`; the platform commits the write set on 200

use crate::config::ChaincodeConfig;
use crate::domain::value_objects::AssetType;
use crate::errors::{ChaincodeError, ErrorKind};
use crate::lifecycle::{
    create_order, create_product, get_history_for_record, query, query_all_asset, query_asset,
    update_order_status, update_product, CounterAllocator,
};
use crate::metrics;
use crate::ports::inbound::{Chaincode, Function, Response};
use crate::ports::outbound::ChaincodeStub;
use crate::COMPONENT_NAME;

use ml_telemetry::log_invocation;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, instrument};

/// Invocation statistics since the service was created.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Total invocations routed, including unknown functions.
    pub invocations: u64,
    /// Invocations that returned 200.
    pub successful: u64,
    /// Invocations rejected for caller error (validation, not found, stock).
    pub rejected: u64,
    /// Invocations failed by the platform or encoding.
    pub failed: u64,
    /// Successful invocations of read-only functions.
    pub queries: u64,
}

/// The marketplace chaincode.
///
/// Holds no ledger state; every invocation works only through the stub it
/// is given.
pub struct MarketplaceChaincode {
    config: ChaincodeConfig,
    stats: RwLock<ServiceStats>,
}

impl MarketplaceChaincode {
    /// Creates the chaincode with `config`.
    pub fn new(config: ChaincodeConfig) -> Self {
        Self {
            config,
            stats: RwLock::new(ServiceStats::default()),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ChaincodeConfig {
        &self.config
    }

    /// Snapshot of invocation statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Runs a resolved function. Typed counterpart of [`Chaincode::invoke`].
    pub fn handle<S: ChaincodeStub>(
        &self,
        stub: &mut S,
        function: Function,
        args: &[String],
    ) -> Result<Vec<u8>, ChaincodeError> {
        match function {
            Function::QueryAsset => query_asset(&*stub, args),
            Function::QueryAllAsset => query_all_asset(&*stub, args),
            Function::GetHistoryForRecord => get_history_for_record(&*stub, args),
            Function::Query => query(&*stub, args),
            Function::CreateProduct => create_product(stub, args),
            Function::UpdateProduct => update_product(stub, args),
            Function::CreateOrder => create_order(stub, args),
            Function::UpdateOrderStatus => {
                update_order_status(stub, args, self.config.status_policy)
            }
        }
    }

    fn record(
        &self,
        function: &str,
        read_only: bool,
        result: &Result<Vec<u8>, ChaincodeError>,
    ) {
        let outcome = match result {
            Ok(_) => "ok",
            Err(e) => e.kind().as_str(),
        };
        metrics::record_invocation(function, outcome);

        match (function, result) {
            ("createProduct", Ok(_)) => metrics::record_product_created(),
            ("createOrder", Ok(_)) => metrics::record_order_created(),
            (_, Err(e)) if e.kind() == ErrorKind::InsufficientInventory => {
                metrics::record_inventory_rejection();
            }
            _ => {}
        }

        let mut stats = self.stats.write().unwrap_or_else(PoisonError::into_inner);
        stats.invocations += 1;
        match result {
            Ok(_) => {
                stats.successful += 1;
                if read_only {
                    stats.queries += 1;
                }
            }
            Err(e) if is_caller_error(e.kind()) => stats.rejected += 1,
            Err(_) => stats.failed += 1,
        }
    }
}

impl Default for MarketplaceChaincode {
    fn default() -> Self {
        Self::new(ChaincodeConfig::default())
    }
}

impl<S: ChaincodeStub> Chaincode<S> for MarketplaceChaincode {
    /// Creates both counters if absent. Safe to run on every upgrade.
    #[instrument(skip(self, stub), fields(chaincode = %self.config.chaincode_name, tx_id = %stub.tx_id()))]
    fn init(&self, stub: &mut S) -> Response {
        for asset in AssetType::ALL {
            match CounterAllocator::new(asset).bootstrap(stub) {
                Ok(true) => info!(key = asset.counter_key(), "Counter initialized"),
                Ok(false) => {}
                Err(e) => {
                    log_invocation!(error, COMPONENT_NAME, "Init failed", "init", stub.tx_id(), error = %e);
                    return Response::error(&e);
                }
            }
        }
        Response::success(Vec::new())
    }

    #[instrument(
        skip(self, stub, function, args),
        fields(chaincode = %self.config.chaincode_name, tx_id = %stub.tx_id(), function = %function)
    )]
    fn invoke(&self, stub: &mut S, function: &str, args: &[String]) -> Response {
        let resolved = Function::from_str(function);
        let read_only = resolved.as_ref().is_ok_and(Function::is_read_only);
        let result = resolved.and_then(|f| self.handle(stub, f, args));
        self.record(function, read_only, &result);

        match &result {
            Ok(payload) => {
                log_invocation!(
                    info,
                    COMPONENT_NAME,
                    "Invocation succeeded",
                    function,
                    stub.tx_id(),
                    payload_bytes = payload.len()
                );
                if self.config.log_payloads && read_only && !payload.is_empty() {
                    debug!(payload = %String::from_utf8_lossy(payload), "Invocation payload");
                }
            }
            Err(e) if is_caller_error(e.kind()) => {
                log_invocation!(
                    warn,
                    COMPONENT_NAME,
                    "Invocation rejected",
                    function,
                    stub.tx_id(),
                    kind = e.kind().as_str(),
                    error = %e
                );
            }
            Err(e) => {
                log_invocation!(
                    error,
                    COMPONENT_NAME,
                    "Invocation failed",
                    function,
                    stub.tx_id(),
                    kind = e.kind().as_str(),
                    error = %e
                );
            }
        }

        result.into()
    }
}

fn is_caller_error(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::Validation
            | ErrorKind::NotFound
            | ErrorKind::InsufficientInventory
            | ErrorKind::UnknownOperation
    )
}

/// Chaincode with default configuration, for tests.
pub fn create_test_chaincode() -> MarketplaceChaincode {
    MarketplaceChaincode::default()
}

// =============================================================================
// TESTS
// =============================================================================
