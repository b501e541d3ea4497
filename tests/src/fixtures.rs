//! Shared fixtures: a ledger, a chaincode, and an invocation helper that
//! commits on success.

use ml_marketplace::prelude::*;
use serde_json::Value;

/// Proposal time used by every fixture transaction.
pub const T0: TxTimestamp = TxTimestamp::new(1_700_000_000, 0);

/// Rendered form of [`T0`].
pub const T0_RENDERED: &str = "2023-11-14 22:13:20 +0000 UTC";

/// Ledger plus chaincode, with a running transaction counter.
pub struct Harness {
    pub ledger: InMemoryLedger,
    pub chaincode: MarketplaceChaincode,
    next_tx: u64,
}

impl Harness {
    /// Initialized harness with the default (strict) configuration.
    pub fn new() -> Self {
        Self::with_config(ChaincodeConfig::default())
    }

    /// Initialized harness with `config`.
    pub fn with_config(config: ChaincodeConfig) -> Self {
        ml_telemetry::init_test_subscriber();
        let mut harness = Self {
            ledger: InMemoryLedger::new(),
            chaincode: MarketplaceChaincode::new(config),
            next_tx: 0,
        };
        let tx_id = harness.tx_id();
        let mut ctx = harness.ledger.begin(tx_id, T0);
        let response = Chaincode::init(&harness.chaincode, &mut ctx);
        assert!(response.is_ok(), "init failed: {}", response.message);
        harness.ledger.commit(ctx).expect("init commit");
        harness
    }

    fn tx_id(&mut self) -> String {
        self.next_tx += 1;
        format!("tx{}", self.next_tx)
    }

    /// Invokes `function` in a fresh transaction; commits on success.
    pub fn invoke(&mut self, function: &str, args: &[&str]) -> Response {
        let tx_id = self.tx_id();
        let mut ctx = self.ledger.begin(tx_id, T0);
        let response = self.chaincode.invoke(&mut ctx, function, &strings(args));
        if response.is_ok() {
            self.ledger.commit(ctx).expect("commit");
        }
        response
    }

    /// Invokes and asserts success, returning the payload.
    pub fn ok(&mut self, function: &str, args: &[&str]) -> Vec<u8> {
        let response = self.invoke(function, args);
        assert!(
            response.is_ok(),
            "{function}{args:?} failed: {}",
            response.message
        );
        response.payload
    }

    /// Committed document under `key`, parsed.
    pub fn document(&self, key: &str) -> Value {
        let bytes = self
            .ledger
            .committed(key)
            .unwrap_or_else(|| panic!("{key} not committed"));
        serde_json::from_slice(&bytes).expect("stored document is JSON")
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned argument vector.
pub fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| (*s).to_string()).collect()
}

/// Parses a JSON payload.
pub fn parse(payload: &[u8]) -> Value {
    serde_json::from_slice(payload).expect("payload is JSON")
}
