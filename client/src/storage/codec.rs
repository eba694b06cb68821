//! JSON encoding between Rust store calls and the IndexedDB shim.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use editor::store::{Collection, StorageError, WriteOp};
use serde_json::{Value, json};

/// DOMException name IndexedDB raises for key and unique-index conflicts.
const CONSTRAINT_ERROR: &str = "ConstraintError";

/// Encode a batch as the op list the shim applies in one transaction.
pub fn encode_batch(batch: &[WriteOp]) -> String {
    let ops: Vec<Value> = batch
        .iter()
        .map(|op| match op {
            WriteOp::Put { collection, record } => json!({"op": "put", "store": collection.name(), "record": record}),
            WriteOp::Delete { collection, id } => json!({"op": "delete", "store": collection.name(), "id": id}),
        })
        .collect();
    Value::Array(ops).to_string()
}

/// Decode the shim's answer to a single-record read.
///
/// # Errors
///
/// Returns a serialization error for malformed JSON.
pub fn decode_record(raw: Option<String>) -> Result<Option<Value>, StorageError> {
    match raw {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

/// Decode the shim's answer to a multi-record read.
///
/// # Errors
///
/// Returns a serialization error for malformed JSON or a non-array document.
pub fn decode_records(raw: &str) -> Result<Vec<Value>, StorageError> {
    Ok(serde_json::from_str(raw)?)
}

/// Translate a failed write into a [`StorageError`].
///
/// A constraint failure on a collection with unique names is reported as a
/// name clash; elsewhere it can only be a repeated id.
pub fn classify_write_error(
    collection: Collection,
    record: Option<&Value>,
    error_name: Option<&str>,
    message: String,
) -> StorageError {
    if error_name != Some(CONSTRAINT_ERROR) {
        return StorageError::Backend(message);
    }
    let field = |key: &str| record.and_then(|r| r.get(key)).and_then(Value::as_str).map(str::to_owned);
    if collection.unique_names() {
        if let Some(name) = field("name") {
            return StorageError::UniqueName { collection, name };
        }
    }
    match field("id") {
        Some(id) => StorageError::Duplicate { collection, id },
        None => StorageError::Backend(message),
    }
}
