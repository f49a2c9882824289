use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, LooseValue, Timestamp};
use crate::utils::null_as_default;

/// One changed record. `data` holds the record in the shape of its `item`
/// type (`deal`, `person`, `user`, ...).
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub item: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default)]
    pub data: LooseValue,
}

impl RecentRecord {
    /// Decodes `data` as `T`, e.g. [`Deal`](crate::api::Deal) when `item` is `deal`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Option<T> {
        let value = serde_json::to_value(&self.data).ok()?;
        serde_json::from_value(value).ok()
    }
}

/// Query of [`RecentsApi::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecentsListOptions {
    /// Changes after this moment, sent as `YYYY-MM-DD HH:MM:SS` (UTC).
    pub since_timestamp: Timestamp,
    /// Comma-separated item types, e.g. `deal,person`. All types when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl RecentsListOptions {
    pub fn since(since_timestamp: Timestamp) -> Self {
        Self {
            since_timestamp,
            ..Self::default()
        }
    }
}

/// Recents API
pub struct RecentsApi {
    client: Arc<PipedriveClient>,
}

impl RecentsApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        options: &RecentsListOptions,
    ) -> Result<Envelope<Vec<RecentRecord>>, PipedriveError> {
        self.client.get_with_query("/recents", options).await
    }
}

impl PipedriveApi for RecentsApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "recents"
    }
}
