use serde::{Deserialize, Deserializer, Serializer};

use crate::types::{LooseValue, Timestamp, VisibleTo};

/// `[1, 2, 3]` -> `"1,2,3"`, the form bulk endpoints take in `ids`.
pub(crate) fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Pipedrive flags take `0`/`1` rather than `true`/`false`.
pub(crate) fn bool_as_int<S: Serializer>(
    value: &Option<bool>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(flag) => serializer.serialize_u8(u8::from(*flag)),
        None => serializer.serialize_none(),
    }
}

/// Sends a timestamp as `YYYY-MM-DD` where the endpoint takes a date.
pub(crate) fn date_only<S: Serializer>(
    value: &Option<Timestamp>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(ts) => serializer.serialize_str(&ts.to_date_string()),
        None => serializer.serialize_none(),
    }
}

/// Decodes `null` the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads `visible_to` off a record. Codes outside 1/3/5/7 (or `""`) become
/// `None` so one odd record does not fail a whole page.
pub(crate) fn lenient_visible_to<'de, D>(deserializer: D) -> Result<Option<VisibleTo>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = LooseValue::deserialize(deserializer)?;
    Ok(raw.as_i64().and_then(VisibleTo::from_code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&[1, 22, 333]), "1,22,333");
        assert_eq!(join_ids(&[7]), "7");
        assert_eq!(join_ids(&[]), "");
    }

    #[test]
    fn test_bool_as_int_in_query() {
        #[derive(Serialize)]
        struct Flags {
            #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
            everyone: Option<bool>,
            #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
            exact_match: Option<bool>,
        }

        let encoded = serde_json::to_value(Flags {
            everyone: Some(true),
            exact_match: None,
        })
        .unwrap();
        assert_eq!(encoded, serde_json::json!({"everyone": 1}));
    }

    #[derive(Debug, Default, Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "null_as_default")]
        id: u64,
        #[serde(default, deserialize_with = "null_as_default")]
        active_flag: bool,
        #[serde(default, deserialize_with = "lenient_visible_to")]
        visible_to: Option<VisibleTo>,
    }

    #[test]
    fn test_null_as_default_for_scalars() {
        let record: Record = serde_json::from_value(serde_json::json!({
            "id": null,
            "active_flag": null,
            "visible_to": null
        }))
        .unwrap();
        assert_eq!(record.id, 0);
        assert!(!record.active_flag);
        assert_eq!(record.visible_to, None);
    }

    #[test]
    fn test_lenient_visible_to() {
        let decode = |value: serde_json::Value| {
            serde_json::from_value::<Record>(serde_json::json!({ "visible_to": value }))
                .unwrap()
                .visible_to
        };
        assert_eq!(decode(serde_json::json!("3")), Some(VisibleTo::WholeCompany));
        assert_eq!(decode(serde_json::json!(7)), Some(VisibleTo::AllVisibilityGroups));
        assert_eq!(decode(serde_json::json!("")), None);
        assert_eq!(decode(serde_json::json!("2")), None);
        assert_eq!(decode(serde_json::json!(9)), None);
    }
}
