//! # Driven Ports (SPI - Outbound)
//!
//! The ledger platform as seen by the chaincode. An adapter implementing
//! `ChaincodeStub` is handed to every invocation and scoped to exactly one
//! transaction context.
//!
//! ## Platform Contract
//!
//! - Reads observe the committed snapshot; writes are buffered until commit
//! - Every key read is recorded for MVCC validation at commit time
//! - Cursors hold platform-side resources and must be closed

use crate::domain::entities::{KeyModification, KeyValue};
use crate::domain::value_objects::TxTimestamp;
use crate::errors::StubError;

// =============================================================================
// RESULTS ITERATOR
// =============================================================================

/// A closable, sequential result handle.
pub trait ResultsIterator {
    /// Entry type yielded by the cursor.
    type Item;

    /// Returns true if another entry is available.
    fn has_next(&self) -> bool;

    /// Fetches the next entry.
    fn next_entry(&mut self) -> Result<Self::Item, StubError>;

    /// Releases platform-side resources. Called once; later calls are no-ops.
    fn close(&mut self) -> Result<(), StubError>;
}

// =============================================================================
// CHAINCODE STUB
// =============================================================================

/// Interface to the ledger platform for one transaction.
pub trait ChaincodeStub {
    /// Cursor over range scan results.
    type RangeIterator: ResultsIterator<Item = KeyValue>;
    /// Cursor over predicate query results.
    type QueryIterator: ResultsIterator<Item = KeyValue>;
    /// Cursor over key history.
    type HistoryIterator: ResultsIterator<Item = KeyModification>;

    /// Identifier of the current transaction.
    fn tx_id(&self) -> &str;

    /// Reads a committed value.
    ///
    /// # Returns
    ///
    /// * `Some(bytes)` - If the key exists
    /// * `None` - If the key was never written
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StubError>;

    /// Buffers a write into the transaction's write set.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StubError>;

    /// Opens a cursor over `[start, end)`. Empty bounds are unbounded.
    fn get_state_by_range(&self, start: &str, end: &str)
        -> Result<Self::RangeIterator, StubError>;

    /// Opens a cursor over documents matching a predicate query.
    fn get_query_result(&self, query: &str) -> Result<Self::QueryIterator, StubError>;

    /// Opens a cursor over every committed version of `key`.
    fn get_history_for_key(&self, key: &str) -> Result<Self::HistoryIterator, StubError>;

    /// Deterministic timestamp from the proposal header.
    fn get_tx_timestamp(&self) -> Result<TxTimestamp, StubError>;
}

// =============================================================================
// TESTS
// =============================================================================
