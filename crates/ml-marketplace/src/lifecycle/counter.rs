//! # Counter Allocator
//!
//! Per-asset-type sequence numbers kept as ordinary ledger records under
//! `ProductCounterNO` / `OrderCounterNO`. Being records, they take part in
//! MVCC conflict detection: two concurrent creates of the same type read
//! the same counter version and only one of them commits.

use crate::domain::entities::CounterRecord;
use crate::domain::invariants::check_counter_advance_invariant;
use crate::domain::value_objects::AssetType;
use crate::errors::ChaincodeError;
use crate::lifecycle::store_record;
use crate::ports::outbound::ChaincodeStub;
use tracing::{debug, warn};

/// Sequence generator for one asset type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterAllocator {
    asset: AssetType,
}

impl CounterAllocator {
    /// Allocator for `asset`.
    #[must_use]
    pub const fn new(asset: AssetType) -> Self {
        Self { asset }
    }

    /// Current counter value.
    ///
    /// Absent or undecodable state reads as 0. A failed platform read is
    /// returned as `ChaincodeError::Ledger`.
    pub fn read<S: ChaincodeStub>(&self, stub: &S) -> Result<u64, ChaincodeError> {
        let key = self.asset.counter_key();
        let Some(bytes) = stub.get_state(key)? else {
            return Ok(0);
        };
        match serde_json::from_slice::<CounterRecord>(&bytes) {
            Ok(record) => {
                debug!(key, counter = record.counter, "Counter read");
                Ok(record.counter)
            }
            Err(e) => {
                warn!(key, error = %e, "Undecodable counter, treating as 0");
                Ok(0)
            }
        }
    }

    /// Identifier the next create of this type will receive.
    pub fn next_id<S: ChaincodeStub>(&self, stub: &S) -> Result<String, ChaincodeError> {
        Ok(self.asset.asset_id(self.read(stub)?.saturating_add(1)))
    }

    /// Increments the counter by one and writes it back.
    ///
    /// Call exactly once per successful create, after the asset record
    /// has been written.
    pub fn advance<S: ChaincodeStub>(&self, stub: &mut S) -> Result<u64, ChaincodeError> {
        let key = self.asset.counter_key();
        let before = CounterRecord::new(self.read(&*stub)?);
        let after = before.advanced();

        if !check_counter_advance_invariant(before, after) {
            return Err(ChaincodeError::InvariantViolated(format!(
                "counter {key} cannot advance past {}",
                before.counter
            )));
        }

        store_record(stub, key, &after)?;
        debug!(key, counter = after.counter, "Counter advanced");
        Ok(after.counter)
    }

    /// Creates the counter at 0 if absent. Returns true if it was created.
    ///
    /// An existing counter is never overwritten.
    pub fn bootstrap<S: ChaincodeStub>(&self, stub: &mut S) -> Result<bool, ChaincodeError> {
        let key = self.asset.counter_key();
        if stub.get_state(key)?.is_some() {
            debug!(key, "Counter already initialized");
            return Ok(false);
        }
        store_record(stub, key, &CounterRecord::default())?;
        Ok(true)
    }
}

// =============================================================================
// TESTS
// =============================================================================
