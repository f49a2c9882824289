//! Custom field definitions
//!
//! Deals, persons, organizations, products, activities and notes each expose
//! the same field endpoints under their own prefix. [`FieldsApi`] is bound to
//! one [`FieldKind`] and serves all of them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{DeleteMultipleOptions, IdResult, IdsResult};
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, FieldType, LooseValue};
use crate::utils::null_as_default;

/// Which record type the field endpoints address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Deal,
    Person,
    Organization,
    Product,
    Activity,
    Note,
}

impl FieldKind {
    pub fn path(self) -> &'static str {
        match self {
            Self::Deal => "/dealFields",
            Self::Person => "/personFields",
            Self::Organization => "/organizationFields",
            Self::Product => "/productFields",
            Self::Activity => "/activityFields",
            Self::Note => "/noteFields",
        }
    }
}

/// Selectable option of an `enum` or `set` field.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Numeric on most record types, string on a few built-in fields.
    #[serde(default)]
    pub id: LooseValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    /// 40-character hash for custom fields, plain name for built-ins.
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_nr: i64,
    #[serde(default)]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub edit_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub index_visible_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details_visible_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub add_visible_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub important_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bulk_edit_allowed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub searchable_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filtering_allowed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sortable_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mandatory_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_subfield: bool,
    #[serde(default)]
    pub use_field: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub picklist_data: LooseValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<FieldOption>,
}

/// Body of [`FieldsApi::create`].
#[derive(Debug, Clone, Serialize)]
pub struct FieldCreateOptions {
    pub name: String,
    pub field_type: FieldType,
    /// Choices for `enum` and `set` fields, e.g. `[{"label": "Red"}]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl FieldCreateOptions {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            options: None,
        }
    }
}

/// Body of [`FieldsApi::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

/// Field definitions API for one [`FieldKind`]
pub struct FieldsApi {
    client: Arc<PipedriveClient>,
    kind: FieldKind,
}

impl FieldsApi {
    pub fn new(client: Arc<PipedriveClient>, kind: FieldKind) -> Self {
        Self { client, kind }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub async fn list(&self) -> Result<Envelope<Vec<Field>>, PipedriveError> {
        self.client.get(self.kind.path()).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Envelope<Field>, PipedriveError> {
        self.client
            .get(&format!("{}/{id}", self.kind.path()))
            .await
    }

    pub async fn create(
        &self,
        options: &FieldCreateOptions,
    ) -> Result<Envelope<Field>, PipedriveError> {
        self.client.post(self.kind.path(), options).await
    }

    pub async fn update(
        &self,
        id: u64,
        options: &FieldUpdateOptions,
    ) -> Result<Envelope<Field>, PipedriveError> {
        self.client
            .put(&format!("{}/{id}", self.kind.path()), options)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client
            .delete(&format!("{}/{id}", self.kind.path()))
            .await
    }

    pub async fn delete_multiple(
        &self,
        ids: &[u64],
    ) -> Result<Envelope<IdsResult>, PipedriveError> {
        self.client
            .delete_with_query(self.kind.path(), &DeleteMultipleOptions::new(ids))
            .await
    }
}

impl PipedriveApi for FieldsApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        match self.kind {
            FieldKind::Deal => "deal_fields",
            FieldKind::Person => "person_fields",
            FieldKind::Organization => "organization_fields",
            FieldKind::Product => "product_fields",
            FieldKind::Activity => "activity_fields",
            FieldKind::Note => "note_fields",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_kind_paths() {
        assert_eq!(FieldKind::Deal.path(), "/dealFields");
        assert_eq!(FieldKind::Organization.path(), "/organizationFields");
        assert_eq!(FieldKind::Note.path(), "/noteFields");
    }

    #[test]
    fn test_field_with_options() {
        let built_in: Field = serde_json::from_value(json!({
            "id": 12,
            "key": "status",
            "name": "Status",
            "field_type": "status",
            "options": [{"id": "open", "label": "Open"}, {"id": "won", "label": "Won"}]
        }))
        .unwrap();
        assert_eq!(built_in.field_type, Some(FieldType::Other));
        assert_eq!(built_in.options[0].id.as_str(), Some("open"));

        let field: Field = serde_json::from_value(json!({
            "id": 13,
            "key": "abc123",
            "name": "Colour",
            "field_type": "enum",
            "options": [{"id": 1, "label": "Red"}, {"id": 2, "label": "Blue"}],
            "link": null
        }))
        .unwrap();
        assert_eq!(field.field_type, Some(FieldType::Enum));
        assert_eq!(field.options[1].label, "Blue");
        assert_eq!(field.options[1].id.as_i64(), Some(2));
    }

    #[test]
    fn test_create_options_serialization() {
        let mut options = FieldCreateOptions::new("Colour", FieldType::Enum);
        options.options = Some(json!([{"label": "Red"}]));
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"name": "Colour", "field_type": "enum", "options": [{"label": "Red"}]})
        );
    }
}
