use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::IdResult;
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, Timestamp};
use crate::utils::{bool_as_int, null_as_default};

/// A note attached to a deal, person or organization.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: u64,
    #[serde(default)]
    pub deal_id: Option<u64>,
    #[serde(default)]
    pub person_id: Option<u64>,
    #[serde(default)]
    pub org_id: Option<u64>,
    /// HTML content.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub add_time: Option<Timestamp>,
    #[serde(default)]
    pub update_time: Option<Timestamp>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pinned_to_deal_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pinned_to_person_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pinned_to_organization_flag: bool,
    #[serde(default)]
    pub last_update_user_id: Option<u64>,
}

/// Filters for [`NotesApi::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoteListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// Body of [`NotesApi::create`] and [`NotesApi::update`]. A note needs
/// `content` and at least one of the three record ids.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoteOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<u64>,
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub pinned_to_deal_flag: Option<bool>,
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub pinned_to_organization_flag: Option<bool>,
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub pinned_to_person_flag: Option<bool>,
}

impl NoteOptions {
    pub fn on_deal(deal_id: u64, content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            deal_id: Some(deal_id),
            ..Self::default()
        }
    }
}

/// Notes API
pub struct NotesApi {
    client: Arc<PipedriveClient>,
}

impl NotesApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        options: &NoteListOptions,
    ) -> Result<Envelope<Vec<Note>>, PipedriveError> {
        self.client.get_with_query("/notes", options).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Envelope<Note>, PipedriveError> {
        self.client.get(&format!("/notes/{id}")).await
    }

    pub async fn create(&self, options: &NoteOptions) -> Result<Envelope<Note>, PipedriveError> {
        self.client.post("/notes", options).await
    }

    pub async fn update(
        &self,
        id: u64,
        options: &NoteOptions,
    ) -> Result<Envelope<Note>, PipedriveError> {
        self.client.put(&format!("/notes/{id}"), options).await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/notes/{id}")).await
    }
}

impl PipedriveApi for NotesApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "notes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_timestamps() {
        let note: Note = serde_json::from_value(json!({
            "id": 1,
            "content": "<p>hello</p>",
            "deal_id": 4,
            "person_id": null,
            "add_time": "2019-01-02 03:04:05"
        }))
        .unwrap();
        assert_eq!(note.deal_id, Some(4));
        assert_eq!(note.person_id, None);
        assert_eq!(
            note.add_time.map(|t| t.to_date_time_string()),
            Some("2019-01-02 03:04:05".to_owned())
        );
    }

    #[test]
    fn test_note_options_pin_flag() {
        let mut options = NoteOptions::on_deal(4, "call back");
        options.pinned_to_deal_flag = Some(true);
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"content": "call back", "deal_id": 4, "pinned_to_deal_flag": 1})
        );
    }
}
