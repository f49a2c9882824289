use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A field whose JSON type varies between records.
///
/// Pipedrive returns several reference fields (`org_id`, `person_id`,
/// `next_activity_id`, ...) as a bare number on some endpoints, as an
/// expanded object with a `value` key on others, and as `null` when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<Value>),
    Object(Map<String, Value>),
}

impl LooseValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric id carried by the field: the number itself, or the `value`
    /// key of an expanded reference object.
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Object(map) => map.get("value").and_then(Value::as_i64),
            other => other.as_i64(),
        }
    }

    /// Display name of an expanded reference object.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Object(map) => map.get("name").and_then(Value::as_str),
            _ => None,
        }
    }
}

impl LooseValue {
    /// Decodes an expanded reference object into `T`. Bare numbers, null
    /// and mismatching objects yield `None`.
    pub fn expanded<T: DeserializeOwned>(&self) -> Option<T> {
        match self {
            Self::Object(map) => serde_json::from_value(Value::Object(map.clone())).ok(),
            _ => None,
        }
    }
}

impl From<Value> for LooseValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            Value::Array(a) => Self::List(a),
            Value::Object(o) => Self::Object(o),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_each_shape() {
        let null: LooseValue = serde_json::from_value(json!(null)).unwrap();
        assert!(null.is_null());

        let number: LooseValue = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(number.id(), Some(42));

        let object: LooseValue =
            serde_json::from_value(json!({"name": "Acme", "value": 7})).unwrap();
        assert_eq!(object.id(), Some(7));
        assert_eq!(object.name(), Some("Acme"));
        assert_eq!(number.expanded::<Map<String, Value>>(), None);
        assert_eq!(
            object
                .expanded::<Map<String, Value>>()
                .and_then(|m| m.get("name").cloned()),
            Some(json!("Acme"))
        );

        let text: LooseValue = serde_json::from_value(json!("15")).unwrap();
        assert_eq!(text.as_i64(), Some(15));
        assert_eq!(text.as_str(), Some("15"));
    }

    #[test]
    fn test_missing_field_defaults_to_null() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default)]
            org_id: LooseValue,
        }

        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(holder.org_id.is_null());
        assert_eq!(holder.org_id.id(), None);
    }
}
