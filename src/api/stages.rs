use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{DeleteMultipleOptions, IdResult, IdsResult};
use crate::api::deals::Deal;
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, LooseValue};
use crate::utils::{bool_as_int, null_as_default};

/// A stage within a pipeline.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_nr: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deal_probability: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pipeline_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rotten_flag: bool,
    /// Number of days, or null when rotting is off.
    #[serde(default)]
    pub rotten_days: LooseValue,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default)]
    pub pipeline_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct StageListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pipeline_id: Option<u64>,
}

/// Filters for [`StagesApi::get_deals`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageDealsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    /// Deals of all users rather than `user_id` only.
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub everyone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// Body of [`StagesApi::create`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageCreateOptions {
    pub name: String,
    pub pipeline_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_probability: Option<u32>,
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub rotten_flag: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotten_days: Option<u32>,
}

impl StageCreateOptions {
    pub fn new(name: impl Into<String>, pipeline_id: u64) -> Self {
        Self {
            name: name.into(),
            pipeline_id,
            ..Self::default()
        }
    }
}

/// Body of [`StagesApi::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_nr: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_probability: Option<u32>,
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub rotten_flag: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotten_days: Option<u32>,
}

/// Stages API
pub struct StagesApi {
    client: Arc<PipedriveClient>,
}

impl StagesApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    /// Stages of one pipeline, or of every pipeline when `pipeline_id` is `None`.
    pub async fn list(
        &self,
        pipeline_id: Option<u64>,
    ) -> Result<Envelope<Vec<Stage>>, PipedriveError> {
        self.client
            .get_with_query("/stages", &StageListQuery { pipeline_id })
            .await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Envelope<Stage>, PipedriveError> {
        self.client.get(&format!("/stages/{id}")).await
    }

    pub async fn get_deals(
        &self,
        id: u64,
        options: &StageDealsOptions,
    ) -> Result<Envelope<Vec<Deal>>, PipedriveError> {
        self.client
            .get_with_query(&format!("/stages/{id}/deals"), options)
            .await
    }

    pub async fn create(
        &self,
        options: &StageCreateOptions,
    ) -> Result<Envelope<Stage>, PipedriveError> {
        self.client.post("/stages", options).await
    }

    pub async fn update(
        &self,
        id: u64,
        options: &StageUpdateOptions,
    ) -> Result<Envelope<Stage>, PipedriveError> {
        self.client.put(&format!("/stages/{id}"), options).await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/stages/{id}")).await
    }

    pub async fn delete_multiple(
        &self,
        ids: &[u64],
    ) -> Result<Envelope<IdsResult>, PipedriveError> {
        self.client
            .delete_with_query("/stages", &DeleteMultipleOptions::new(ids))
            .await
    }
}

impl PipedriveApi for StagesApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "stages"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stage_rotten_days_may_be_null() {
        let stage: Stage = serde_json::from_value(json!({
            "id": 1,
            "name": "Qualified",
            "pipeline_id": 1,
            "rotten_flag": false,
            "rotten_days": null
        }))
        .unwrap();
        assert!(stage.rotten_days.is_null());
        assert_eq!(stage.name, "Qualified");
    }

    #[test]
    fn test_create_options_serialization() {
        let mut options = StageCreateOptions::new("Demo", 2);
        options.rotten_flag = Some(true);
        options.rotten_days = Some(14);
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"name": "Demo", "pipeline_id": 2, "rotten_flag": 1, "rotten_days": 14})
        );
    }
}
