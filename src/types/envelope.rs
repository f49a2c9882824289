//! Response envelope shared by every Pipedrive endpoint
//!
//! ```rust
//! use pipedrive_sdk::types::Envelope;
//!
//! let json = r#"{"success": true, "data": null}"#;
//! let envelope: Envelope<Vec<u32>> = serde_json::from_str(json).unwrap();
//! assert!(envelope.success);
//! assert!(envelope.data.is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// `{ success, data, additional_data }` wrapper around every response.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    /// `null` and absent `data` both decode to `T::default()`.
    #[serde(default, deserialize_with = "crate::utils::null_as_default")]
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<AdditionalData>,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            additional_data: None,
        }
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.additional_data
            .as_ref()
            .and_then(|a| a.pagination.as_ref())
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

/// Collection metadata returned next to list payloads.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalData {
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub since_timestamp: Option<String>,
    #[serde(default)]
    pub last_timestamp_on_page: Option<String>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl AdditionalData {
    /// Offset of the next page, or `None` once the collection is exhausted.
    pub fn next_start(&self) -> Option<u64> {
        self.pagination
            .as_ref()
            .filter(|p| p.more_items_in_collection)
            .map(|p| p.next_start.unwrap_or(p.start + p.limit))
    }
}

/// Offset pagination. Callers loop on `start`/`limit` themselves.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub more_items_in_collection: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_start: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_list_envelope_with_pagination() {
        let envelope: Envelope<Vec<Item>> = serde_json::from_value(json!({
            "success": true,
            "data": [{"id": 1}, {"id": 2}],
            "additional_data": {
                "pagination": {"start": 0, "limit": 2, "more_items_in_collection": true}
            }
        }))
        .unwrap();

        assert_eq!(envelope.data.len(), 2);
        let additional = envelope.additional_data.as_ref().unwrap();
        assert_eq!(additional.next_start(), Some(2));
        assert_eq!(envelope.pagination().map(|p| p.limit), Some(2));
    }

    #[test]
    fn test_server_supplied_next_start_wins() {
        let additional: AdditionalData = serde_json::from_value(json!({
            "pagination": {"start": 0, "limit": 100, "more_items_in_collection": true, "next_start": 50}
        }))
        .unwrap();
        assert_eq!(additional.next_start(), Some(50));
    }

    #[test]
    fn test_last_page_has_no_next_start() {
        let additional: AdditionalData = serde_json::from_value(json!({
            "pagination": {"start": 100, "limit": 100, "more_items_in_collection": false}
        }))
        .unwrap();
        assert_eq!(additional.next_start(), None);
    }

    #[test]
    fn test_null_data_decodes_to_default() {
        let envelope: Envelope<Item> =
            serde_json::from_value(json!({"success": true, "data": null})).unwrap();
        assert_eq!(envelope.data, Item::default());
        assert!(envelope.additional_data.is_none());
    }

    #[test]
    fn test_success_false_is_preserved() {
        let envelope: Envelope<Vec<Item>> =
            serde_json::from_value(json!({"success": false, "error": "oops"})).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_empty());
    }
}
