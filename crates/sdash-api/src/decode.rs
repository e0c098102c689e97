//! Response body decoding

use serde::de::DeserializeOwned;
use serde_json::Value;

use sdash_core::prelude::*;

/// Decode a JSON array, skipping items that fail to decode.
///
/// Anything other than an array is a malformed response.
pub(crate) fn decode_list<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<Vec<T>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(Error::malformed(
                endpoint,
                format!("expected array, got {}", kind(&other)),
            ))
        }
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Skipping item {} from {}: {}", i, endpoint, e);
                None
            }
        })
        .collect();

    if decoded.len() < total {
        debug!("{}: decoded {}/{} items", endpoint, decoded.len(), total);
    }
    Ok(decoded)
}

/// Decode a JSON object into `T`.
pub(crate) fn decode_object<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T> {
    if !value.is_object() {
        return Err(Error::malformed(
            endpoint,
            format!("expected object, got {}", kind(&value)),
        ));
    }
    serde_json::from_value(value).map_err(|e| Error::malformed(endpoint, e.to_string()))
}

/// Server-provided error text from a JSON error body (`error`, then `message`).
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdash_core::{FileRecord, NodeRecord};
    use serde_json::json;

    #[test]
    fn test_decode_list_rejects_object() {
        let err = decode_list::<FileRecord>("/simple/files", json!({"error": "Invalid mode"}))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
        assert!(err.to_string().contains("expected array, got object"));
    }

    #[test]
    fn test_decode_list_skips_bad_items() {
        let nodes: Vec<NodeRecord> = decode_list(
            "/simple/nodes",
            json!([
                {"node_id": "local", "status": "active", "files_count": 2},
                "garbage",
                {"node_id": "node-02", "status": "failed"}
            ]),
        )
        .unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].node_id, "node-02");
    }

    #[test]
    fn test_decode_list_empty() {
        let files: Vec<FileRecord> = decode_list("/simple/files", json!([])).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_error_message_prefers_error_field() {
        assert_eq!(
            error_message(r#"{"error": "No file provided"}"#).as_deref(),
            Some("No file provided")
        );
        assert_eq!(
            error_message(r#"{"message": "Username taken"}"#).as_deref(),
            Some("Username taken")
        );
        assert_eq!(error_message("<html>502</html>"), None);
    }
}
