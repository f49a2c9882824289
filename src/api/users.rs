use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, LooseValue};
use crate::utils::{bool_as_int, null_as_default};

/// A user of the company account.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub default_currency: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lang: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activated: bool,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub signup_flow_variation: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_created_company: bool,
    /// `1` for admins. Some accounts send a boolean.
    #[serde(default)]
    pub is_admin: LooseValue,
    #[serde(default)]
    pub timezone_name: Option<String>,
    #[serde(default)]
    pub timezone_offset: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role_id: u64,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_you: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        match &self.is_admin {
            LooseValue::Bool(flag) => *flag,
            other => other.as_i64() == Some(1),
        }
    }
}

/// Query of [`UsersApi::find`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserFindOptions {
    pub term: String,
    /// Match `term` against email addresses instead of names.
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub search_by_email: Option<bool>,
}

impl UserFindOptions {
    pub fn by_name(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            search_by_email: None,
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            term: email.into(),
            search_by_email: Some(true),
        }
    }
}

/// Users API
pub struct UsersApi {
    client: Arc<PipedriveClient>,
}

impl UsersApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Envelope<Vec<User>>, PipedriveError> {
        self.client.get("/users").await
    }

    pub async fn find(
        &self,
        options: &UserFindOptions,
    ) -> Result<Envelope<Vec<User>>, PipedriveError> {
        self.client.get_with_query("/users/find", options).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Envelope<User>, PipedriveError> {
        self.client.get(&format!("/users/{id}")).await
    }

    /// The user owning the API token.
    pub async fn me(&self) -> Result<Envelope<User>, PipedriveError> {
        self.client.get("/users/me").await
    }
}

impl PipedriveApi for UsersApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "users"
    }
}
