use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{IdResult, ListOptions};
use crate::api::deals::Deal;
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, Timestamp};
use crate::utils::{bool_as_int, date_only, null_as_default};

/// A sales pipeline.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_nr: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deal_probability: bool,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub selected: bool,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageConversion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub from_stage_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to_stage_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conversion_rate: f64,
}

/// `data` of [`PipelinesApi::get_conversion_statistics`].
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionStatistics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage_conversions: Vec<StageConversion>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub won_conversion: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lost_conversion: f64,
}

/// Deals counted in one movement bucket, with totals keyed by currency code.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealMovement {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deal_ids: Vec<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: HashMap<String, f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub formatted_values: HashMap<String, String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementCount {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageAge {
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: f64,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageAge {
    #[serde(default, deserialize_with = "null_as_default")]
    pub across_all_stages: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub by_stages: Vec<StageAge>,
}

/// `data` of [`PipelinesApi::get_movement_statistics`].
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementStatistics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub movements_between_stages: MovementCount,
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_deals: DealMovement,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deals_left_open: DealMovement,
    #[serde(default, deserialize_with = "null_as_default")]
    pub won_deals: DealMovement,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lost_deals: DealMovement,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_age_in_days: AverageAge,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct StatisticsPeriod {
    #[serde(serialize_with = "date_only")]
    start_date: Option<Timestamp>,
    #[serde(serialize_with = "date_only")]
    end_date: Option<Timestamp>,
}

/// Body of [`PipelinesApi::create`] and [`PipelinesApi::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub deal_probability: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_nr: Option<u32>,
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl PipelineOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Pipelines API
pub struct PipelinesApi {
    client: Arc<PipedriveClient>,
}

impl PipelinesApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Envelope<Vec<Pipeline>>, PipedriveError> {
        self.client.get("/pipelines").await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Envelope<Pipeline>, PipedriveError> {
        self.client.get(&format!("/pipelines/{id}")).await
    }

    pub async fn get_deals(
        &self,
        id: u64,
        options: &ListOptions,
    ) -> Result<Envelope<Vec<Deal>>, PipedriveError> {
        self.client
            .get_with_query(&format!("/pipelines/{id}/deals"), options)
            .await
    }

    /// Stage-to-stage conversion rates for deals in the period.
    pub async fn get_conversion_statistics(
        &self,
        id: u64,
        start_date: Timestamp,
        end_date: Timestamp,
    ) -> Result<Envelope<ConversionStatistics>, PipedriveError> {
        let period = StatisticsPeriod {
            start_date: Some(start_date),
            end_date: Some(end_date),
        };
        self.client
            .get_with_query(&format!("/pipelines/{id}/conversion_statistics"), &period)
            .await
    }

    pub async fn get_movement_statistics(
        &self,
        id: u64,
        start_date: Timestamp,
        end_date: Timestamp,
    ) -> Result<Envelope<MovementStatistics>, PipedriveError> {
        let period = StatisticsPeriod {
            start_date: Some(start_date),
            end_date: Some(end_date),
        };
        self.client
            .get_with_query(&format!("/pipelines/{id}/movement_statistics"), &period)
            .await
    }

    pub async fn create(
        &self,
        options: &PipelineOptions,
    ) -> Result<Envelope<Pipeline>, PipedriveError> {
        self.client.post("/pipelines", options).await
    }

    pub async fn update(
        &self,
        id: u64,
        options: &PipelineOptions,
    ) -> Result<Envelope<Pipeline>, PipedriveError> {
        self.client.put(&format!("/pipelines/{id}"), options).await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/pipelines/{id}")).await
    }
}

impl PipedriveApi for PipelinesApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "pipelines"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movement_statistics_any_currency() {
        let stats: MovementStatistics = serde_json::from_value(json!({
            "movements_between_stages": {"count": 4},
            "new_deals": {
                "count": 2,
                "deal_ids": [1, 2],
                "values": {"EUR": 150.5, "USD": 10},
                "formatted_values": {"EUR": "€150.50", "USD": "$10"}
            },
            "won_deals": {"count": 0, "deal_ids": null, "values": null},
            "average_age_in_days": {"across_all_stages": 3.5, "by_stages": [{"stage_id": 1, "value": 2}]}
        }))
        .unwrap();

        assert_eq!(stats.movements_between_stages.count, 4);
        assert_eq!(stats.new_deals.values.get("USD"), Some(&10.0));
        assert!(stats.won_deals.deal_ids.is_empty());
        assert_eq!(stats.average_age_in_days.by_stages[0].value, 2.0);
    }

    #[test]
    fn test_options_flags_are_numeric() {
        let mut options = PipelineOptions::named("Enterprise");
        options.active = Some(true);
        options.deal_probability = Some(false);
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"name": "Enterprise", "deal_probability": 0, "active": 1})
        );
    }

    #[test]
    fn test_statistics_period_serializes_dates() {
        let period = StatisticsPeriod {
            start_date: Some(Timestamp::from_unix(1_700_000_000)),
            end_date: Some(Timestamp::from_unix(1_700_000_000 + 86_400)),
        };
        assert_eq!(
            serde_json::to_value(period).unwrap(),
            json!({"start_date": "2023-11-14", "end_date": "2023-11-15"})
        );
    }
}
