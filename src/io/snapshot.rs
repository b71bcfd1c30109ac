//! Reading persisted snapshots and deciding whether content changed.
//!
//! Snapshots are compared as `serde_json::Value` trees: object equality there
//! does not depend on key order, so a file written by an older run with a
//! different key order still compares equal when its content is the same.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::AppError;

/// Top-level field describing when the source reported, not what it reported.
pub const UPDATED_AT_KEY: &str = "updatedAt";

/// Load the snapshot at `path`.
///
/// - missing file: `Ok(None)`
/// - unreadable as JSON object: warning + `Ok(None)`, so the caller rewrites it
/// - any other I/O failure: error (exit code 2)
pub fn read_snapshot(path: &Path) -> Result<Option<Value>, AppError> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(AppError::io(format!("Failed to read snapshot '{}': {e}", path.display())));
        }
    };

    match serde_json::from_slice::<Value>(&raw) {
        Ok(value @ Value::Object(_)) => Ok(Some(value)),
        Ok(_) => {
            warn!(path = %path.display(), "existing snapshot is not a JSON object; will replace it");
            Ok(None)
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "existing snapshot is unreadable; will replace it");
            Ok(None)
        }
    }
}

/// True when `new` and `prior` differ in anything but `updatedAt`.
pub fn content_changed(new: &Value, prior: &Value) -> bool {
    match (new, prior) {
        (Value::Object(new), Value::Object(prior)) => !same_content(new, prior),
        _ => new != prior,
    }
}

fn same_content(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    let content_len = |m: &Map<String, Value>| m.keys().filter(|k| *k != UPDATED_AT_KEY).count();
    content_len(a) == content_len(b)
        && a
            .iter()
            .filter(|(k, _)| *k != UPDATED_AT_KEY)
            .all(|(k, v)| b.get(k) == Some(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn timestamp_only_difference_is_unchanged() {
        let new = json!({"updatedAt": "2025-06-30", "branches": {"101170": {"name": "札幌", "code": "101170", "data": {}}}});
        let prior = json!({"updatedAt": "2025-05-30", "branches": {"101170": {"name": "札幌", "code": "101170", "data": {}}}});
        assert!(!content_changed(&new, &prior));
    }

    #[test]
    fn key_order_does_not_matter() {
        let new: Value = serde_json::from_str(
            r#"{"updatedAt": "x", "data": {"2025-04": {"timeName": "t", "categories": {"100000": {"value": "1", "unit": "人", "name": "a"}, "300000": {"value": "2", "unit": "人", "name": "b"}}}}}"#,
        )
        .unwrap();
        let prior: Value = serde_json::from_str(
            r#"{"data": {"2025-04": {"categories": {"300000": {"name": "b", "unit": "人", "value": "2"}, "100000": {"name": "a", "value": "1", "unit": "人"}}, "timeName": "t"}}, "updatedAt": "y"}"#,
        )
        .unwrap();
        assert!(!content_changed(&new, &prior));
    }

    #[test]
    fn value_difference_is_a_change() {
        let new = json!({"updatedAt": "x", "data": {"2025-04": {"timeName": "t", "categories": {"100000": {"value": "2"}}}}});
        let prior = json!({"updatedAt": "x", "data": {"2025-04": {"timeName": "t", "categories": {"100000": {"value": "1"}}}}});
        assert!(content_changed(&new, &prior));
    }

    #[test]
    fn extra_or_missing_fields_are_a_change() {
        let new = json!({"updatedAt": "x", "branchCode": "101170", "branchName": "札幌", "data": {}});
        let prior = json!({"updatedAt": "x", "data": {}});
        assert!(content_changed(&new, &prior));
        assert!(content_changed(&prior, &new));
        assert!(!content_changed(&json!({"data": {}}), &json!({"updatedAt": "x", "data": {}})));
    }

    #[test]
    fn read_snapshot_handles_missing_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("whole-jp.json");
        assert!(read_snapshot(&path).unwrap().is_none());

        fs::write(&path, "{ not json").unwrap();
        assert!(read_snapshot(&path).unwrap().is_none());

        fs::write(&path, "[1, 2]").unwrap();
        assert!(read_snapshot(&path).unwrap().is_none());

        fs::write(&path, r#"{"updatedAt": "x", "data": {}}"#).unwrap();
        assert_eq!(read_snapshot(&path).unwrap(), Some(json!({"updatedAt": "x", "data": {}})));
    }

    #[test]
    fn read_snapshot_treats_invalid_utf8_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("whole-jp.json");
        fs::write(&path, b"{\"updatedAt\": \"\xe5\x9b").unwrap();
        assert!(read_snapshot(&path).unwrap().is_none());
    }

    #[test]
    fn read_snapshot_fails_on_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_snapshot(dir.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
