use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::Envelope;

/// Settings of the current user.
///
/// The API returns several dozen keys whose set changes over time. The
/// commonly used ones are typed, everything else lands in `other`.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub list_limit: Option<u64>,
    #[serde(default)]
    pub default_currency: Option<String>,
    #[serde(default)]
    pub file_upload_destination: Option<String>,
    #[serde(default)]
    pub callto_link_syntax: Option<String>,
    #[serde(default)]
    pub autofill_deal_expected_close_date: Option<bool>,
    #[serde(default)]
    pub person_duplicate_condition: Option<String>,
    #[serde(default)]
    pub organization_duplicate_condition: Option<String>,
    #[serde(default)]
    pub activity_email_reminders: Option<bool>,
    #[serde(default)]
    pub send_email_notifications: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl UserSettings {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.other.get(key)
    }
}

/// User settings API
pub struct UserSettingsApi {
    client: Arc<PipedriveClient>,
}

impl UserSettingsApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<Envelope<UserSettings>, PipedriveError> {
        self.client.get("/userSettings").await
    }
}

impl PipedriveApi for UserSettingsApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "user_settings"
    }
}
