//! # Lifecycle Operations
//!
//! Each operation runs inside one transaction context: it re-reads every
//! record it touches from the stub, validates, and buffers its writes.
//! Nothing is cached between invocations, so a retry after an MVCC
//! rejection re-evaluates every check against fresh state.

pub mod counter;
pub mod order;
pub mod product;
pub mod query;
pub mod timestamp;

pub use counter::CounterAllocator;
pub use order::{create_order, update_order_status};
pub use product::{create_product, update_product};
pub use query::{get_history_for_record, query, query_all_asset, query_asset, ScopedCursor};
pub use timestamp::transaction_time;

use crate::errors::ChaincodeError;
use crate::ports::outbound::ChaincodeStub;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Loads and decodes a record. `Ok(None)` if the key is absent.
pub(crate) fn load_record<S, T>(stub: &S, key: &str) -> Result<Option<T>, ChaincodeError>
where
    S: ChaincodeStub,
    T: DeserializeOwned,
{
    match stub.get_state(key)? {
        Some(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| ChaincodeError::encoding(key, &e)),
        None => Ok(None),
    }
}

/// Loads a record that must exist.
pub(crate) fn require_record<S, T>(stub: &S, key: &str) -> Result<T, ChaincodeError>
where
    S: ChaincodeStub,
    T: DeserializeOwned,
{
    load_record(stub, key)?.ok_or_else(|| ChaincodeError::NotFound {
        key: key.to_string(),
    })
}

/// Encodes and buffers a record write.
pub(crate) fn store_record<S, T>(stub: &mut S, key: &str, record: &T) -> Result<(), ChaincodeError>
where
    S: ChaincodeStub,
    T: Serialize,
{
    let bytes = serde_json::to_vec(record).map_err(|e| ChaincodeError::encoding(key, &e))?;
    stub.put_state(key, bytes)
        .map_err(|e| ChaincodeError::Persist {
            key: key.to_string(),
            reason: e.to_string(),
        })
}
