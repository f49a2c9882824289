use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, LooseValue};
use crate::utils::null_as_default;

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub creator_company_id: LooseValue,
    #[serde(default)]
    pub plan_id: Option<u64>,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub billing_currency: Option<String>,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub trial_ends: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cancelled_flag: bool,
    #[serde(default)]
    pub cancel_time: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_is_open: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_is_not_paying: bool,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationCompany {
    #[serde(default, deserialize_with = "null_as_default")]
    pub info: CompanyInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: Map<String, Value>,
}

/// API token of a user in one company.
#[non_exhaustive]
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authorization {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_token: String,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: AuthorizationCompany,
}

impl std::fmt::Debug for Authorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorization")
            .field("user_id", &self.user_id)
            .field("company_id", &self.company_id)
            .field("api_token", &"[REDACTED]")
            .field("add_time", &self.add_time)
            .field("company", &self.company)
            .finish()
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Authorizations API
pub struct AuthorizationsApi {
    client: Arc<PipedriveClient>,
}

impl AuthorizationsApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    /// Lists the API tokens `email` holds across companies.
    ///
    /// The credentials travel in the JSON body, never in the URL.
    pub async fn create(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Envelope<Vec<Authorization>>, PipedriveError> {
        self.client
            .post("/authorizations", &Credentials { email, password })
            .await
    }
}

impl PipedriveApi for AuthorizationsApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "authorizations"
    }
}
