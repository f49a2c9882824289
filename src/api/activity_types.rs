use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{DeleteMultipleOptions, IdResult, IdsResult};
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::Envelope;
use crate::utils::null_as_default;

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityType {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_nr: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_string: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_flag: bool,
    /// Hex color without `#`, e.g. `FFFFFF`.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_custom_flag: bool,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

/// Body of [`ActivityTypesApi::create`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityTypeCreateOptions {
    pub name: String,
    pub icon_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Body of [`ActivityTypesApi::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityTypeUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_nr: Option<u32>,
}

/// Activity types API (`/activityTypes`)
pub struct ActivityTypesApi {
    client: Arc<PipedriveClient>,
}

impl ActivityTypesApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Envelope<Vec<ActivityType>>, PipedriveError> {
        self.client.get("/activityTypes").await
    }

    pub async fn create(
        &self,
        options: &ActivityTypeCreateOptions,
    ) -> Result<Envelope<ActivityType>, PipedriveError> {
        self.client.post("/activityTypes", options).await
    }

    pub async fn update(
        &self,
        id: u64,
        options: &ActivityTypeUpdateOptions,
    ) -> Result<Envelope<ActivityType>, PipedriveError> {
        self.client
            .put(&format!("/activityTypes/{id}"), options)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/activityTypes/{id}")).await
    }

    pub async fn delete_multiple(
        &self,
        ids: &[u64],
    ) -> Result<Envelope<IdsResult>, PipedriveError> {
        self.client
            .delete_with_query("/activityTypes", &DeleteMultipleOptions::new(ids))
            .await
    }
}

impl PipedriveApi for ActivityTypesApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "activity_types"
    }
}
