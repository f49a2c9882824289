use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{DeleteMultipleOptions, IdResult, IdsResult};
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, FilterType, LooseValue, VisibleTo};
use crate::utils::{lenient_visible_to, null_as_default};

/// A saved filter.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(default, rename = "type")]
    pub filter_type: Option<FilterType>,
    #[serde(default)]
    pub temporary_flag: LooseValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: u64,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_visible_to")]
    pub visible_to: Option<VisibleTo>,
    #[serde(default)]
    pub custom_view_id: Option<u64>,
    /// Condition tree; only present on [`FiltersApi::get_by_id`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<FilterConditions>,
}

/// Nested `glue` (`and` / `or`) groups of conditions.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConditions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub glue: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: Vec<FilterConditionGroup>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConditionGroup {
    #[serde(default, deserialize_with = "null_as_default")]
    pub glue: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: Vec<FilterCondition>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub object: String,
    #[serde(default)]
    pub field_id: LooseValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operator: String,
    #[serde(default)]
    pub value: LooseValue,
    #[serde(default)]
    pub extra_value: LooseValue,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct FilterListQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    filter_type: Option<FilterType>,
}

/// Filters API
pub struct FiltersApi {
    client: Arc<PipedriveClient>,
}

impl FiltersApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    /// Saved filters, optionally only those of one object type.
    pub async fn list(
        &self,
        filter_type: Option<FilterType>,
    ) -> Result<Envelope<Vec<Filter>>, PipedriveError> {
        self.client
            .get_with_query("/filters", &FilterListQuery { filter_type })
            .await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Envelope<Filter>, PipedriveError> {
        self.client.get(&format!("/filters/{id}")).await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/filters/{id}")).await
    }

    pub async fn delete_multiple(
        &self,
        ids: &[u64],
    ) -> Result<Envelope<IdsResult>, PipedriveError> {
        self.client
            .delete_with_query("/filters", &DeleteMultipleOptions::new(ids))
            .await
    }
}

impl PipedriveApi for FiltersApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "filters"
    }
}
