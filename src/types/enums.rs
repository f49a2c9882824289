use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::LooseValue;

/// Visibility of an owned record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibleTo {
    OwnersAndFollowers,
    WholeCompany,
    /// Owner's visibility group and its sub-groups.
    OwnersVisibilityGroup,
    /// Every visibility group in the company.
    AllVisibilityGroups,
}

impl VisibleTo {
    pub fn code(self) -> u8 {
        match self {
            Self::OwnersAndFollowers => 1,
            Self::WholeCompany => 3,
            Self::OwnersVisibilityGroup => 5,
            Self::AllVisibilityGroups => 7,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::OwnersAndFollowers),
            3 => Some(Self::WholeCompany),
            5 => Some(Self::OwnersVisibilityGroup),
            7 => Some(Self::AllVisibilityGroups),
            _ => None,
        }
    }
}

impl Serialize for VisibleTo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

// The API sends the code as a string ("3") on records and accepts a number on input.
impl<'de> Deserialize<'de> for VisibleTo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = LooseValue::deserialize(deserializer)?;
        raw.as_i64()
            .and_then(Self::from_code)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid visible_to: {raw:?}")))
    }
}

/// Deal state filter and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    Open,
    Won,
    Lost,
    Deleted,
    AllNotDeleted,
}

/// Custom field data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Varchar,
    VarcharAuto,
    Text,
    Double,
    Monetary,
    Date,
    Set,
    Enum,
    User,
    Org,
    People,
    Phone,
    Time,
    Timerange,
    Daterange,
    Address,
    /// Built-in types the API reports but does not accept on create
    /// (`status`, `stage`, `visible_to`, ...).
    #[serde(other)]
    Other,
}

/// Event that triggers a webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventAction {
    #[serde(rename = "added")]
    Added,
    #[serde(rename = "updated")]
    Updated,
    #[serde(rename = "merged")]
    Merged,
    #[serde(rename = "deleted")]
    Deleted,
    #[serde(rename = "*")]
    All,
}

/// Object type a webhook listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventObject {
    #[serde(rename = "activity")]
    Activity,
    #[serde(rename = "activityType")]
    ActivityType,
    #[serde(rename = "deal")]
    Deal,
    #[serde(rename = "note")]
    Note,
    #[serde(rename = "organization")]
    Organization,
    #[serde(rename = "person")]
    Person,
    #[serde(rename = "pipeline")]
    Pipeline,
    #[serde(rename = "product")]
    Product,
    #[serde(rename = "stage")]
    Stage,
    #[serde(rename = "user")]
    User,
    #[serde(rename = "*")]
    All,
}

/// Record type an uploaded or linked file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Deal,
    Organization,
    Person,
}

/// Object type a saved filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    Deals,
    Org,
    People,
    Products,
    Activity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visible_to_wire_forms() {
        assert_eq!(serde_json::to_value(VisibleTo::WholeCompany).unwrap(), json!(3));
        let from_string: VisibleTo = serde_json::from_value(json!("1")).unwrap();
        assert_eq!(from_string, VisibleTo::OwnersAndFollowers);
        let from_number: VisibleTo = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(from_number, VisibleTo::WholeCompany);
        assert!(serde_json::from_value::<VisibleTo>(json!(2)).is_err());
    }

    #[test]
    fn test_webhook_enums_wire_forms() {
        assert_eq!(serde_json::to_value(EventAction::All).unwrap(), json!("*"));
        assert_eq!(
            serde_json::to_value(EventObject::ActivityType).unwrap(),
            json!("activityType")
        );
    }

    #[test]
    fn test_snake_case_enums() {
        assert_eq!(
            serde_json::to_value(DealStatus::AllNotDeleted).unwrap(),
            json!("all_not_deleted")
        );
        assert_eq!(
            serde_json::to_value(FieldType::VarcharAuto).unwrap(),
            json!("varchar_auto")
        );
        let built_in: FieldType = serde_json::from_value(json!("visible_to")).unwrap();
        assert_eq!(built_in, FieldType::Other);
    }
}
