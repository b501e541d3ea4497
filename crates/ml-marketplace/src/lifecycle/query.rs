//! # Query Surface
//!
//! Read-only operations. Multi-result reads go through [`ScopedCursor`],
//! which releases the platform cursor on every exit path, including an
//! early return on a failed entry.

use crate::domain::services::{require_arg_count, JsonArrayWriter};
use crate::errors::{ChaincodeError, StubError};
use crate::ports::outbound::{ChaincodeStub, ResultsIterator};
use tracing::{debug, warn};

// =============================================================================
// SCOPED CURSOR
// =============================================================================

/// Owns an open cursor and closes it when dropped.
///
/// Iterates as `Result<Item, StubError>`; iteration ends when the platform
/// reports no further entries.
pub struct ScopedCursor<I: ResultsIterator> {
    inner: I,
    closed: bool,
}

impl<I: ResultsIterator> ScopedCursor<I> {
    /// Takes ownership of an open cursor.
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            closed: false,
        }
    }

    /// Closes now, surfacing the close error instead of logging it.
    pub fn close(mut self) -> Result<(), StubError> {
        self.closed = true;
        self.inner.close()
    }
}

impl<I: ResultsIterator> Iterator for ScopedCursor<I> {
    type Item = Result<I::Item, StubError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed || !self.inner.has_next() {
            return None;
        }
        Some(self.inner.next_entry())
    }
}

impl<I: ResultsIterator> Drop for ScopedCursor<I> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        match self.inner.close() {
            Ok(()) => debug!("Cursor closed"),
            Err(e) => warn!(error = %e, "Failed to close cursor"),
        }
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// `queryAsset(key)`: the stored document, byte for byte.
pub fn query_asset<S: ChaincodeStub>(stub: &S, args: &[String]) -> Result<Vec<u8>, ChaincodeError> {
    require_arg_count(args, 1)?;
    let key = &args[0];
    stub.get_state(key)?
        .ok_or_else(|| ChaincodeError::NotFound { key: key.clone() })
}

/// `queryAllAsset()`: every record as `{"Key", "Record"}` in key order.
///
/// Arguments are ignored.
pub fn query_all_asset<S: ChaincodeStub>(
    stub: &S,
    _args: &[String],
) -> Result<Vec<u8>, ChaincodeError> {
    let cursor = ScopedCursor::new(stub.get_state_by_range("", "")?);
    let mut out = JsonArrayWriter::new();
    for entry in cursor {
        out.push_record(&entry?);
    }
    debug!(records = out.len(), "Range scan complete");
    Ok(out.finish())
}

/// `getHistoryForRecord(key)`: every version of `key`, most recent first.
pub fn get_history_for_record<S: ChaincodeStub>(
    stub: &S,
    args: &[String],
) -> Result<Vec<u8>, ChaincodeError> {
    require_arg_count(args, 1)?;
    let key = &args[0];

    let cursor = ScopedCursor::new(stub.get_history_for_key(key)?);
    let mut out = JsonArrayWriter::new();
    for entry in cursor {
        out.push_modification(&entry?);
    }
    debug!(key = %key, versions = out.len(), "History read");
    Ok(out.finish())
}

/// `query(predicate)`: matching documents as a JSON array, unwrapped.
///
/// The predicate is passed to the platform untouched.
pub fn query<S: ChaincodeStub>(stub: &S, args: &[String]) -> Result<Vec<u8>, ChaincodeError> {
    require_arg_count(args, 1)?;

    let cursor = ScopedCursor::new(stub.get_query_result(&args[0])?);
    let mut out = JsonArrayWriter::new();
    for entry in cursor {
        out.push_raw(&entry?.value);
    }
    debug!(matches = out.len(), "Predicate query complete");
    Ok(out.finish())
}

// =============================================================================
// TESTS
// =============================================================================
