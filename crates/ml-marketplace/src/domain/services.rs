//! # Domain Services
//!
//! Pure helpers shared by the lifecycle operations: argument checks,
//! integer parsing and JSON array framing. No ledger access here.

use crate::domain::entities::{KeyModification, KeyValue};
use crate::errors::ChaincodeError;

// =============================================================================
// ARGUMENT VALIDATION
// =============================================================================

/// Fails unless exactly `expected` arguments were supplied.
pub fn require_arg_count(args: &[String], expected: usize) -> Result<(), ChaincodeError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ChaincodeError::ArgumentCount {
            expected,
            actual: args.len(),
        })
    }
}

/// Fails on the first empty argument among `positions` (0-based).
pub fn require_non_empty(args: &[String], positions: &[usize]) -> Result<(), ChaincodeError> {
    for &i in positions {
        if args.get(i).map_or(true, String::is_empty) {
            return Err(ChaincodeError::EmptyArgument { position: i + 1 });
        }
    }
    Ok(())
}

/// Count check followed by a non-empty check on every argument.
pub fn require_args(args: &[String], expected: usize) -> Result<(), ChaincodeError> {
    require_arg_count(args, expected)?;
    let all: Vec<usize> = (0..expected).collect();
    require_non_empty(args, &all)
}

// =============================================================================
// INTEGER PARSING
// =============================================================================

/// Parses a base-10 integer field. Surrounding whitespace is not accepted.
pub fn parse_integer(field: &'static str, raw: &str) -> Result<i64, ChaincodeError> {
    raw.parse::<i64>()
        .map_err(|_| ChaincodeError::InvalidInteger {
            field,
            value: raw.to_string(),
        })
}

/// Parses an integer that must be at least `min`.
pub fn parse_integer_at_least(
    field: &'static str,
    raw: &str,
    min: i64,
) -> Result<i64, ChaincodeError> {
    let value = parse_integer(field, raw)?;
    if value < min {
        return Err(ChaincodeError::OutOfRange { field, value, min });
    }
    Ok(value)
}

// =============================================================================
// JSON ARRAY FRAMING
// =============================================================================

/// Builds a JSON array from members that are already valid JSON.
///
/// Stored documents are written as-is; only brackets and commas are added.
#[derive(Debug)]
pub struct JsonArrayWriter {
    buffer: Vec<u8>,
    members: usize,
}

impl JsonArrayWriter {
    /// Starts an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: vec![b'['],
            members: 0,
        }
    }

    /// Number of members written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members
    }

    /// Returns true if no member has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members == 0
    }

    fn separator(&mut self) {
        if self.members > 0 {
            self.buffer.push(b',');
        }
        self.members += 1;
    }

    /// Appends a raw JSON value.
    pub fn push_raw(&mut self, raw: &[u8]) {
        self.separator();
        self.buffer.extend_from_slice(raw);
    }

    /// Appends `{"Key":<key>, "Record":<document>}`.
    pub fn push_record(&mut self, entry: &KeyValue) {
        self.separator();
        self.buffer.extend_from_slice(b"{\"Key\":");
        push_json_string(&mut self.buffer, &entry.key);
        self.buffer.extend_from_slice(b", \"Record\":");
        self.buffer.extend_from_slice(&entry.value);
        self.buffer.push(b'}');
    }

    /// Appends `{"TxId", "Value", "Timestamp", "IsDelete"}` for one version.
    pub fn push_modification(&mut self, entry: &KeyModification) {
        self.separator();
        self.buffer.extend_from_slice(b"{\"TxId\":");
        push_json_string(&mut self.buffer, &entry.tx_id);
        self.buffer.extend_from_slice(b", \"Value\":");
        match (&entry.value, entry.is_delete) {
            (Some(value), false) => self.buffer.extend_from_slice(value),
            _ => self.buffer.extend_from_slice(b"null"),
        }
        self.buffer.extend_from_slice(b", \"Timestamp\":");
        push_json_string(&mut self.buffer, &entry.timestamp.to_string());
        self.buffer.extend_from_slice(b", \"IsDelete\":");
        push_json_string(
            &mut self.buffer,
            if entry.is_delete { "true" } else { "false" },
        );
        self.buffer.push(b'}');
    }

    /// Closes the array and returns its bytes.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        self.buffer.push(b']');
        self.buffer
    }
}

impl Default for JsonArrayWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `s` as a quoted, escaped JSON string.
fn push_json_string(buffer: &mut Vec<u8>, s: &str) {
    // Serializing a str into a Vec cannot fail.
    let _ = serde_json::to_writer(&mut *buffer, s);
}

// =============================================================================
// TESTS
// =============================================================================
