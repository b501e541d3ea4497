//! CouchDB-style selector matching for the in-memory ledger.
//!
//! Supports `{"selector": {"Field": value, ...}}` with top-level equality
//! only. Operators (`$gt`, `$in`, ...) and nested paths are rejected.

use crate::errors::StubError;
use serde_json::{Map, Value};

/// A parsed equality selector.
#[derive(Clone, Debug, PartialEq)]
pub struct Selector {
    fields: Map<String, Value>,
}

impl Selector {
    /// Parses a query string.
    pub fn parse(query: &str) -> Result<Self, StubError> {
        let root: Value = serde_json::from_str(query)
            .map_err(|e| StubError::InvalidQuery(format!("malformed query: {e}")))?;

        let fields = match root.get("selector") {
            Some(Value::Object(fields)) => fields.clone(),
            Some(_) => {
                return Err(StubError::InvalidQuery(
                    "selector must be an object".to_string(),
                ))
            }
            None => return Err(StubError::InvalidQuery("missing selector".to_string())),
        };

        if let Some(field) = fields.keys().find(|k| k.starts_with('$') || k.contains('.')) {
            return Err(StubError::InvalidQuery(format!(
                "unsupported selector field: {field}"
            )));
        }
        if let Some((field, _)) = fields.iter().find(|(_, v)| is_operator(v)) {
            return Err(StubError::InvalidQuery(format!(
                "operators are not supported on {field}"
            )));
        }

        Ok(Self { fields })
    }

    /// Returns true if `document` is a JSON object carrying every field.
    ///
    /// Non-JSON documents never match.
    pub fn matches(&self, document: &[u8]) -> bool {
        let Ok(Value::Object(doc)) = serde_json::from_slice::<Value>(document) else {
            return false;
        };
        self.fields
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}

fn is_operator(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.keys().any(|k| k.starts_with('$')))
}
