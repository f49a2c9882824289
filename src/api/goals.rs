use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::IdResult;
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, LooseValue, Timestamp};
use crate::utils::{bool_as_int, date_only, null_as_default};

/// A sales goal and, on the results endpoint, its progress.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: u64,
    #[serde(default)]
    pub stage_id: LooseValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_goal_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub period: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expected: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goal_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expected_sum: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expected_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_by_user_id: u64,
    #[serde(default)]
    pub pipeline_id: LooseValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub master_expected: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub delivered: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub delivered_sum: f64,
    #[serde(default)]
    pub period_start: Option<String>,
    #[serde(default)]
    pub period_end: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub percentage: f64,
}

/// Filters for [`GoalsApi::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoalListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    /// Goals of the whole company rather than one user.
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub everyone: Option<bool>,
}

/// Body of [`GoalsApi::create`] and [`GoalsApi::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoalOptions {
    /// `deals_won`, `deals_progressed`, `activities_completed`,
    /// `activities_added` or `deals_started`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<String>,
    /// `sum` or `count`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<u64>,
    /// `monthly`, `weekly`, `quarterly` or `yearly`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<u64>,
}

/// Reporting window of [`GoalsApi::get_results`], sent as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GoalResultsOptions {
    #[serde(serialize_with = "date_only", skip_serializing_if = "Option::is_none")]
    pub period_start: Option<Timestamp>,
    #[serde(serialize_with = "date_only", skip_serializing_if = "Option::is_none")]
    pub period_end: Option<Timestamp>,
}

impl GoalResultsOptions {
    pub fn between(period_start: Timestamp, period_end: Timestamp) -> Self {
        Self {
            period_start: Some(period_start),
            period_end: Some(period_end),
        }
    }
}

/// Goals API
pub struct GoalsApi {
    client: Arc<PipedriveClient>,
}

impl GoalsApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        options: &GoalListOptions,
    ) -> Result<Envelope<Vec<Goal>>, PipedriveError> {
        self.client.get_with_query("/goals", options).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Envelope<Goal>, PipedriveError> {
        self.client.get(&format!("/goals/{id}")).await
    }

    pub async fn create(&self, options: &GoalOptions) -> Result<Envelope<Goal>, PipedriveError> {
        self.client.post("/goals", options).await
    }

    pub async fn update(
        &self,
        id: u64,
        options: &GoalOptions,
    ) -> Result<Envelope<Goal>, PipedriveError> {
        self.client.put(&format!("/goals/{id}"), options).await
    }

    pub async fn get_results(
        &self,
        id: u64,
        options: &GoalResultsOptions,
    ) -> Result<Envelope<Vec<Goal>>, PipedriveError> {
        self.client
            .get_with_query(&format!("/goals/{id}/results"), options)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/goals/{id}")).await
    }
}

impl PipedriveApi for GoalsApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "goals"
    }
}
