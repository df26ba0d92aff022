//! Normalization of create responses.
//!
//! Dolibarr answers a POST either with the bare id of the new record
//! (`42`) or, for some resources, with an object (`{"id": "42", "ref": ...}`).
//! Callers always get one of the two variants below.

use super::Record;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Result of a create call.
#[derive(Debug, Clone, PartialEq)]
pub enum CreationResult {
    /// The remote returned a scalar; holds its string form.
    ScalarId(String),
    /// The remote returned an object; passed through unchanged.
    Record(Record),
}

impl CreationResult {
    /// Identifier of the created record, if the response carries one.
    pub fn id(&self) -> Option<String> {
        match self {
            CreationResult::ScalarId(id) => Some(id.clone()),
            CreationResult::Record(record) => record.get("id").map(scalar_to_string),
        }
    }

    /// A string-valued field of an object response (e.g. `ref`, `track_id`).
    pub fn field(&self, name: &str) -> Option<String> {
        match self {
            CreationResult::ScalarId(_) => None,
            CreationResult::Record(record) => record.get(name).map(scalar_to_string),
        }
    }

    /// JSON shape returned to callers: `{"id": .., "status": "created"}` or the record.
    pub fn to_value(&self) -> Value {
        match self {
            CreationResult::ScalarId(id) => serde_json::json!({
                "id": id,
                "status": "created",
            }),
            CreationResult::Record(record) => Value::Object(record.clone()),
        }
    }
}

impl From<Value> for CreationResult {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(record) => CreationResult::Record(record),
            other => CreationResult::ScalarId(scalar_to_string(&other)),
        }
    }
}

impl Serialize for CreationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

/// String form of a JSON value without the quotes around strings.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_integer_is_wrapped() {
        let result = CreationResult::from(json!(42));
        assert_eq!(result, CreationResult::ScalarId("42".to_string()));
        assert_eq!(result.to_value(), json!({"id": "42", "status": "created"}));
        assert_eq!(result.id().as_deref(), Some("42"));
    }

    #[test]
    fn test_object_passes_through() {
        let body = json!({"id": "42", "ref": "TK001"});
        let result = CreationResult::from(body.clone());
        assert_eq!(result.to_value(), body);
        assert_eq!(result.id().as_deref(), Some("42"));
        assert_eq!(result.field("ref").as_deref(), Some("TK001"));
        assert_eq!(result.field("track_id"), None);
    }

    #[test]
    fn test_other_shapes_are_stringified() {
        assert_eq!(
            CreationResult::from(json!("17")).to_value(),
            json!({"id": "17", "status": "created"})
        );
        assert_eq!(
            CreationResult::from(json!(true)).to_value(),
            json!({"id": "true", "status": "created"})
        );
        assert_eq!(
            CreationResult::from(json!([1, 2])).to_value(),
            json!({"id": "[1,2]", "status": "created"})
        );
    }

    #[test]
    fn test_numeric_id_inside_record() {
        let result = CreationResult::from(json!({"id": 7}));
        assert_eq!(result.id().as_deref(), Some("7"));
    }

    #[test]
    fn test_serialize_matches_to_value() {
        let result = CreationResult::from(json!(5));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"id": "5", "status": "created"})
        );
    }
}
