//! # Timestamp Accessor
//!
//! The transaction time comes from the proposal header and is identical on
//! every endorsing peer. Wall-clock time is never consulted.

use crate::errors::ChaincodeError;
use crate::ports::outbound::ChaincodeStub;
use tracing::error;

/// Rendered transaction timestamp, e.g. `2023-11-14 22:13:20 +0000 UTC`.
pub fn transaction_time<S: ChaincodeStub>(stub: &S) -> Result<String, ChaincodeError> {
    let ts = stub.get_tx_timestamp().map_err(|e| {
        error!(tx_id = stub.tx_id(), error = %e, "Transaction timestamp unavailable");
        ChaincodeError::Timestamp(e.to_string())
    })?;

    ts.render().ok_or_else(|| {
        ChaincodeError::Timestamp(format!(
            "out of range: {}s {}ns",
            ts.seconds, ts.nanos
        ))
    })
}
