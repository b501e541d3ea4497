//! # Adapters Layer (Outer Hexagon)
//!
//! - `InMemoryLedger`: reference ledger platform with MVCC validation

pub mod memory_ledger;
pub mod selector;

pub use memory_ledger::{InMemoryLedger, TxContext, VecCursor, SEED_TX_ID};
pub use selector::Selector;
