use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, LooseValue};
use crate::utils::{bool_as_int, null_as_default};

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultNotes {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<LooseValue>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub names: Vec<LooseValue>,
}

/// Type-specific extras; which keys are set depends on the result type.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultDetails {
    #[serde(default)]
    pub phone: LooseValue,
    #[serde(default)]
    pub email: LooseValue,
    #[serde(default)]
    pub org_id: LooseValue,
    #[serde(default)]
    pub org_name: LooseValue,
    #[serde(default)]
    pub org_address: Option<String>,
    #[serde(default)]
    pub picture: LooseValue,
}

/// One hit of [`SearchApi::search`].
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// `deal`, `person`, `organization`, `product` or `file`.
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub result_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub result_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: SearchResultNotes,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: SearchResultFields,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: SearchResultDetails,
}

/// Query of [`SearchApi::search`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResultsOptions {
    /// At least 2 characters.
    pub term: String,
    /// Restrict results to one type, e.g. `deal`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub exact_match: Option<bool>,
}

impl SearchResultsOptions {
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }
}

/// Cross-object search API (`/searchResults`)
pub struct SearchApi {
    client: Arc<PipedriveClient>,
}

impl SearchApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn search(
        &self,
        options: &SearchResultsOptions,
    ) -> Result<Envelope<Vec<SearchResult>>, PipedriveError> {
        self.client.get_with_query("/searchResults", options).await
    }
}

impl PipedriveApi for SearchApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "search"
    }
}
