use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{
    DeleteMultipleOptions, IdResult, IdsResult, ListOptions, MergeOptions, UserRef,
};
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, LooseValue, Timestamp, VisibleTo};
use crate::utils::{lenient_visible_to, null_as_default};

/// A Pipedrive organization.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_id: u64,
    /// Number or expanded [`UserRef`].
    #[serde(default)]
    pub owner_id: LooseValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub open_deals_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub closed_deals_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub won_deals_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lost_deals_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub people_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub done_activities_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub undone_activities_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email_messages_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub files_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(default)]
    pub category_id: LooseValue,
    #[serde(default)]
    pub picture_id: LooseValue,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub first_char: Option<String>,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_visible_to")]
    pub visible_to: Option<VisibleTo>,
    #[serde(default)]
    pub next_activity_date: Option<String>,
    #[serde(default)]
    pub next_activity_id: LooseValue,
    #[serde(default)]
    pub last_activity_id: LooseValue,
    #[serde(default)]
    pub last_activity_date: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub address_street_number: Option<String>,
    #[serde(default)]
    pub address_route: Option<String>,
    #[serde(default)]
    pub address_locality: Option<String>,
    #[serde(default)]
    pub address_country: Option<String>,
    #[serde(default)]
    pub address_postal_code: Option<String>,
    #[serde(default)]
    pub address_formatted_address: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub cc_email: Option<String>,
    #[serde(default)]
    pub label: Option<u64>,
}

impl Organization {
    pub fn owner(&self) -> Option<UserRef> {
        self.owner_id.expanded()
    }
}

/// Body of [`OrganizationsApi::create`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizationCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<VisibleTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<u64>,
}

impl OrganizationCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Body of [`OrganizationsApi::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizationUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<VisibleTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<u64>,
}

/// Organizations API
pub struct OrganizationsApi {
    client: Arc<PipedriveClient>,
}

impl OrganizationsApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        options: &ListOptions,
    ) -> Result<Envelope<Vec<Organization>>, PipedriveError> {
        self.client.get_with_query("/organizations", options).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Envelope<Organization>, PipedriveError> {
        self.client.get(&format!("/organizations/{id}")).await
    }

    pub async fn create(
        &self,
        options: &OrganizationCreateOptions,
    ) -> Result<Envelope<Organization>, PipedriveError> {
        self.client.post("/organizations", options).await
    }

    pub async fn update(
        &self,
        id: u64,
        options: &OrganizationUpdateOptions,
    ) -> Result<Envelope<Organization>, PipedriveError> {
        self.client
            .put(&format!("/organizations/{id}"), options)
            .await
    }

    pub async fn merge(
        &self,
        id: u64,
        merge_with_id: u64,
    ) -> Result<Envelope<Organization>, PipedriveError> {
        self.client
            .put(
                &format!("/organizations/{id}/merge"),
                &MergeOptions { merge_with_id },
            )
            .await
    }

    pub async fn delete_follower(
        &self,
        id: u64,
        follower_id: u64,
    ) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client
            .delete(&format!("/organizations/{id}/followers/{follower_id}"))
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/organizations/{id}")).await
    }

    pub async fn delete_multiple(
        &self,
        ids: &[u64],
    ) -> Result<Envelope<IdsResult>, PipedriveError> {
        self.client
            .delete_with_query("/organizations", &DeleteMultipleOptions::new(ids))
            .await
    }
}

impl PipedriveApi for OrganizationsApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "organizations"
    }
}
