use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::Envelope;

/// Third-party accounts connected to the current user, keyed by provider.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConnections {
    /// Google account id, when connected.
    #[serde(default)]
    pub google: Option<String>,
}

/// User connections API
pub struct UserConnectionsApi {
    client: Arc<PipedriveClient>,
}

impl UserConnectionsApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Envelope<UserConnections>, PipedriveError> {
        self.client.get("/userConnections").await
    }
}

impl PipedriveApi for UserConnectionsApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "user_connections"
    }
}
