//! # In-Memory Ledger
//!
//! Reference `ChaincodeStub` for tests and local simulation.
//!
//! - World state is a `BTreeMap`, so range scans come back in key order
//! - Each key carries a version bumped on every committed write
//! - A [`TxContext`] records the version of every key it reads and buffers
//!   its writes; reads never see the context's own pending writes
//! - [`InMemoryLedger::commit`] rejects the whole write set if any read
//!   version is stale

use crate::adapters::selector::Selector;
use crate::domain::entities::{KeyModification, KeyValue};
use crate::domain::value_objects::TxTimestamp;
use crate::errors::StubError;
use crate::ports::outbound::{ChaincodeStub, ResultsIterator};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Transaction id recorded for [`InMemoryLedger::seed`] writes.
pub const SEED_TX_ID: &str = "seed";

#[derive(Clone, Debug)]
struct VersionedValue {
    value: Vec<u8>,
    version: u64,
}

#[derive(Debug, Default)]
struct LedgerState {
    world: BTreeMap<String, VersionedValue>,
    /// Oldest first; cursors reverse it.
    history: HashMap<String, Vec<KeyModification>>,
    failing_reads: HashSet<String>,
    failing_writes: HashSet<String>,
    cursor_fail_after: Option<usize>,
}

impl LedgerState {
    fn version(&self, key: &str) -> u64 {
        self.world.get(key).map_or(0, |v| v.version)
    }

    fn apply(&mut self, key: String, value: Vec<u8>, tx_id: &str, timestamp: TxTimestamp) {
        let version = self.version(&key) + 1;
        self.history
            .entry(key.clone())
            .or_default()
            .push(KeyModification {
                tx_id: tx_id.to_string(),
                value: Some(value.clone()),
                timestamp,
                is_delete: false,
            });
        self.world.insert(key, VersionedValue { value, version });
    }
}

// =============================================================================
// LEDGER
// =============================================================================

/// Committed world state shared by every transaction context.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
    open_cursors: Arc<AtomicUsize>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, LedgerState>, StubError> {
        self.state.read().map_err(|_| StubError::LockPoisoned)
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, StubError> {
        self.state.write().map_err(|_| StubError::LockPoisoned)
    }

    /// Opens a transaction context stamped with `timestamp`.
    pub fn begin(&self, tx_id: impl Into<String>, timestamp: TxTimestamp) -> TxContext<'_> {
        TxContext::new(self, tx_id.into(), Some(timestamp))
    }

    /// Opens a transaction context whose proposal carries no timestamp.
    pub fn begin_without_timestamp(&self, tx_id: impl Into<String>) -> TxContext<'_> {
        TxContext::new(self, tx_id.into(), None)
    }

    /// Validates the context's read set and applies its write set.
    ///
    /// Returns the number of keys written. On conflict nothing is applied.
    pub fn commit(&self, ctx: TxContext<'_>) -> Result<usize, StubError> {
        let TxContext {
            tx_id,
            timestamp,
            read_set,
            write_set,
            ..
        } = ctx;

        let mut state = self.write_state()?;
        for (key, read) in read_set.into_inner() {
            let committed = state.version(&key);
            if committed != read {
                warn!(tx_id = %tx_id, key = %key, read, committed, "MVCC read conflict");
                return Err(StubError::MvccConflict {
                    key,
                    read,
                    committed,
                });
            }
        }

        let written = write_set.len();
        let timestamp = timestamp.unwrap_or_default();
        for (key, value) in write_set {
            state.apply(key, value, &tx_id, timestamp);
        }
        debug!(tx_id = %tx_id, written, "Transaction committed");
        Ok(written)
    }

    /// Writes a committed value directly, outside any transaction.
    pub fn seed(&self, key: impl Into<String>, value: Vec<u8>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.apply(key.into(), value, SEED_TX_ID, TxTimestamp::default());
    }

    /// Committed value of `key`.
    pub fn committed(&self, key: &str) -> Option<Vec<u8>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.world.get(key).map(|v| v.value.clone())
    }

    /// Committed version of `key`; 0 if never written.
    pub fn version(&self, key: &str) -> u64 {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.version(key)
    }

    /// Number of committed keys.
    pub fn len(&self) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.world.len()
    }

    /// Returns true if nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes every later `get_state` on `key` fail.
    pub fn fail_reads_of(&self, key: impl Into<String>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.failing_reads.insert(key.into());
    }

    /// Makes every later `put_state` on `key` fail.
    pub fn fail_writes_to(&self, key: impl Into<String>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.failing_writes.insert(key.into());
    }

    /// Makes cursors opened from now on fail after `entries` entries.
    pub fn fail_cursor_reads_after(&self, entries: usize) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.cursor_fail_after = Some(entries);
    }

    /// Cursors opened and not yet closed.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    fn open<T>(&self, entries: Vec<T>, fail_after: Option<usize>) -> VecCursor<T> {
        self.open_cursors.fetch_add(1, Ordering::SeqCst);
        VecCursor {
            entries: entries.into(),
            yielded: 0,
            fail_after,
            open: Some(Arc::clone(&self.open_cursors)),
        }
    }
}

// =============================================================================
// TRANSACTION CONTEXT
// =============================================================================

/// One transaction's view of the ledger.
///
/// Dropping a context without committing discards its writes.
#[derive(Debug)]
pub struct TxContext<'a> {
    ledger: &'a InMemoryLedger,
    tx_id: String,
    timestamp: Option<TxTimestamp>,
    read_set: RefCell<BTreeMap<String, u64>>,
    write_set: BTreeMap<String, Vec<u8>>,
}

impl<'a> TxContext<'a> {
    fn new(ledger: &'a InMemoryLedger, tx_id: String, timestamp: Option<TxTimestamp>) -> Self {
        Self {
            ledger,
            tx_id,
            timestamp,
            read_set: RefCell::new(BTreeMap::new()),
            write_set: BTreeMap::new(),
        }
    }

    /// Keys written so far, in key order.
    pub fn pending_writes(&self) -> Vec<String> {
        self.write_set.keys().cloned().collect()
    }

    /// Keys read so far with the version observed.
    pub fn read_versions(&self) -> BTreeMap<String, u64> {
        self.read_set.borrow().clone()
    }

    fn record_read(&self, key: &str, version: u64) {
        // First observation wins.
        self.read_set
            .borrow_mut()
            .entry(key.to_string())
            .or_insert(version);
    }
}

impl ChaincodeStub for TxContext<'_> {
    type RangeIterator = VecCursor<KeyValue>;
    type QueryIterator = VecCursor<KeyValue>;
    type HistoryIterator = VecCursor<KeyModification>;

    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StubError> {
        let state = self.ledger.read_state()?;
        if state.failing_reads.contains(key) {
            return Err(StubError::ReadFailed {
                key: key.to_string(),
                reason: "injected fault".to_string(),
            });
        }
        let entry = state.world.get(key);
        self.record_read(key, entry.map_or(0, |v| v.version));
        Ok(entry.map(|v| v.value.clone()))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StubError> {
        if key.is_empty() {
            return Err(StubError::WriteRejected {
                key: String::new(),
                reason: "empty key".to_string(),
            });
        }
        let state = self.ledger.read_state()?;
        if state.failing_writes.contains(key) {
            return Err(StubError::WriteRejected {
                key: key.to_string(),
                reason: "injected fault".to_string(),
            });
        }
        drop(state);
        self.write_set.insert(key.to_string(), value);
        Ok(())
    }

    fn get_state_by_range(&self, start: &str, end: &str) -> Result<Self::RangeIterator, StubError> {
        if !start.is_empty() && !end.is_empty() && start > end {
            return Err(StubError::InvalidQuery(format!(
                "range start {start} is after end {end}"
            )));
        }
        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start)
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end)
        };

        let state = self.ledger.read_state()?;
        let entries: Vec<KeyValue> = state
            .world
            .range::<str, _>((lower, upper))
            .map(|(key, v)| {
                self.record_read(key, v.version);
                KeyValue::new(key.as_str(), v.value.clone())
            })
            .collect();
        debug!(tx_id = %self.tx_id, entries = entries.len(), "Range cursor opened");
        Ok(self.ledger.open(entries, state.cursor_fail_after))
    }

    fn get_query_result(&self, query: &str) -> Result<Self::QueryIterator, StubError> {
        let selector = Selector::parse(query)?;
        let state = self.ledger.read_state()?;
        let entries: Vec<KeyValue> = state
            .world
            .iter()
            .filter(|(_, v)| selector.matches(&v.value))
            .map(|(key, v)| KeyValue::new(key.as_str(), v.value.clone()))
            .collect();
        debug!(tx_id = %self.tx_id, entries = entries.len(), "Query cursor opened");
        Ok(self.ledger.open(entries, state.cursor_fail_after))
    }

    fn get_history_for_key(&self, key: &str) -> Result<Self::HistoryIterator, StubError> {
        let state = self.ledger.read_state()?;
        let entries: Vec<KeyModification> = state
            .history
            .get(key)
            .map(|versions| versions.iter().rev().cloned().collect())
            .unwrap_or_default();
        Ok(self.ledger.open(entries, state.cursor_fail_after))
    }

    fn get_tx_timestamp(&self) -> Result<TxTimestamp, StubError> {
        self.timestamp.ok_or(StubError::TimestampUnavailable)
    }
}

// =============================================================================
// CURSOR
// =============================================================================

/// Cursor over a materialized result set.
#[derive(Debug)]
pub struct VecCursor<T> {
    entries: VecDeque<T>,
    yielded: usize,
    fail_after: Option<usize>,
    /// Ledger's open-cursor counter; None once closed.
    open: Option<Arc<AtomicUsize>>,
}

impl<T> ResultsIterator for VecCursor<T> {
    type Item = T;

    fn has_next(&self) -> bool {
        self.open.is_some() && !self.entries.is_empty()
    }

    fn next_entry(&mut self) -> Result<T, StubError> {
        if self.open.is_none() {
            return Err(StubError::Cursor("cursor is closed".to_string()));
        }
        if self.fail_after.is_some_and(|n| self.yielded >= n) {
            return Err(StubError::Cursor(format!(
                "read failed after {} entries",
                self.yielded
            )));
        }
        let entry = self
            .entries
            .pop_front()
            .ok_or_else(|| StubError::Cursor("no more entries".to_string()))?;
        self.yielded += 1;
        Ok(entry)
    }

    fn close(&mut self) -> Result<(), StubError> {
        if let Some(counter) = self.open.take() {
            counter.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
