use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{DeleteMultipleOptions, IdResult, IdsResult};
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, LooseValue, Timestamp};
use crate::utils::{bool_as_int, date_only, null_as_default};

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default, deserialize_with = "null_as_default")]
    pub person_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary_flag: bool,
}

/// A scheduled or completed activity (call, meeting, task, ...).
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub done: bool,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub activity_type: String,
    #[serde(default)]
    pub reference_type: Option<String>,
    #[serde(default)]
    pub reference_id: LooseValue,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub due_time: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default)]
    pub marked_as_done_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default)]
    pub org_id: LooseValue,
    #[serde(default)]
    pub person_id: LooseValue,
    #[serde(default)]
    pub deal_id: LooseValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_by_user_id: LooseValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub person_name: Option<String>,
    #[serde(default)]
    pub deal_title: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub assigned_to_user_id: LooseValue,
}

/// Filters for [`ActivitiesApi::list`]. Dates are sent as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_id: Option<u64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(serialize_with = "date_only", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Timestamp>,
    #[serde(serialize_with = "date_only", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Timestamp>,
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

/// Body of [`ActivitiesApi::create`] and [`ActivitiesApi::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(serialize_with = "date_only", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    /// `HH:MM`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_time: Option<String>,
    /// `HH:MM`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Activities API
pub struct ActivitiesApi {
    client: Arc<PipedriveClient>,
}

impl ActivitiesApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        options: &ActivityListOptions,
    ) -> Result<Envelope<Vec<Activity>>, PipedriveError> {
        self.client.get_with_query("/activities", options).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Envelope<Activity>, PipedriveError> {
        self.client.get(&format!("/activities/{id}")).await
    }

    pub async fn create(
        &self,
        options: &ActivityOptions,
    ) -> Result<Envelope<Activity>, PipedriveError> {
        self.client.post("/activities", options).await
    }

    pub async fn update(
        &self,
        id: u64,
        options: &ActivityOptions,
    ) -> Result<Envelope<Activity>, PipedriveError> {
        self.client.put(&format!("/activities/{id}"), options).await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/activities/{id}")).await
    }

    pub async fn delete_multiple(
        &self,
        ids: &[u64],
    ) -> Result<Envelope<IdsResult>, PipedriveError> {
        self.client
            .delete_with_query("/activities", &DeleteMultipleOptions::new(ids))
            .await
    }
}

impl PipedriveApi for ActivitiesApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "activities"
    }
}
