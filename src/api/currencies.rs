use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::Envelope;
use crate::utils::null_as_default;

/// A currency enabled on the account.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    /// ISO 4217 code for non-custom currencies.
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub decimal_points: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub symbol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_custom_flag: bool,
}

#[derive(Debug, Clone, Serialize)]
struct CurrencyQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    term: Option<&'a str>,
}

/// Currencies API
pub struct CurrenciesApi {
    client: Arc<PipedriveClient>,
}

impl CurrenciesApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    /// Currencies whose code or name matches `term`, or all of them.
    pub async fn list(
        &self,
        term: Option<&str>,
    ) -> Result<Envelope<Vec<Currency>>, PipedriveError> {
        self.client
            .get_with_query("/currencies", &CurrencyQuery { term })
            .await
    }
}

impl PipedriveApi for CurrenciesApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "currencies"
    }
}
