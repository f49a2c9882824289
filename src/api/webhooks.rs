use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::IdResult;
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, EventAction, EventObject, LooseValue};
use crate::utils::null_as_default;

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: u64,
    #[serde(default)]
    pub event_action: Option<EventAction>,
    #[serde(default)]
    pub event_object: Option<EventObject>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subscription_url: String,
    #[serde(default)]
    pub is_active: LooseValue,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default)]
    pub remove_time: Option<String>,
    #[serde(default, rename = "type")]
    pub webhook_type: Option<String>,
    #[serde(default)]
    pub http_auth_user: Option<String>,
    #[serde(default)]
    pub last_delivery_time: Option<String>,
    #[serde(default)]
    pub last_http_status: Option<u16>,
    #[serde(default)]
    pub admin_id: Option<u64>,
}

/// Body of [`WebhooksApi::create`].
#[derive(Clone, Serialize)]
pub struct WebhookCreateOptions {
    pub subscription_url: String,
    pub event_action: EventAction,
    pub event_object: EventObject,
    /// Permissions of this user apply to the delivered payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_auth_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_auth_password: Option<String>,
}

impl WebhookCreateOptions {
    pub fn new(
        subscription_url: impl Into<String>,
        event_action: EventAction,
        event_object: EventObject,
    ) -> Self {
        Self {
            subscription_url: subscription_url.into(),
            event_action,
            event_object,
            user_id: None,
            http_auth_user: None,
            http_auth_password: None,
        }
    }
}

impl std::fmt::Debug for WebhookCreateOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookCreateOptions")
            .field("subscription_url", &self.subscription_url)
            .field("event_action", &self.event_action)
            .field("event_object", &self.event_object)
            .field("user_id", &self.user_id)
            .field("http_auth_user", &self.http_auth_user)
            .field(
                "http_auth_password",
                &self.http_auth_password.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Webhooks API
pub struct WebhooksApi {
    client: Arc<PipedriveClient>,
}

impl WebhooksApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Envelope<Vec<Webhook>>, PipedriveError> {
        self.client.get("/webhooks").await
    }

    pub async fn create(
        &self,
        options: &WebhookCreateOptions,
    ) -> Result<Envelope<Webhook>, PipedriveError> {
        self.client.post("/webhooks", options).await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/webhooks/{id}")).await
    }
}

impl PipedriveApi for WebhooksApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "webhooks"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_options_wire_form() {
        let mut options = WebhookCreateOptions::new(
            "https://hooks.example.com/pd",
            EventAction::All,
            EventObject::Deal,
        );
        options.http_auth_password = Some("hunter2".to_string());

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "subscription_url": "https://hooks.example.com/pd",
                "event_action": "*",
                "event_object": "deal",
                "http_auth_password": "hunter2"
            })
        );
        assert!(!format!("{options:?}").contains("hunter2"));
    }

    #[test]
    fn test_webhook_decoding() {
        let hook: Webhook = serde_json::from_value(json!({
            "id": 7,
            "event_action": "updated",
            "event_object": "person",
            "subscription_url": "https://x",
            "is_active": 1,
            "type": "general",
            "remove_time": null
        }))
        .unwrap();
        assert_eq!(hook.event_action, Some(EventAction::Updated));
        assert_eq!(hook.event_object, Some(EventObject::Person));
        assert_eq!(hook.webhook_type.as_deref(), Some("general"));
    }
}
