use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{
    ContactValue, DeleteMultipleOptions, IdResult, IdsResult, ListOptions, MergeOptions, UserRef,
};
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, LooseValue, Timestamp, VisibleTo};
use crate::utils::{lenient_visible_to, null_as_default};

/// A Pipedrive person (contact).
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_id: u64,
    /// Number or expanded [`UserRef`].
    #[serde(default)]
    pub owner_id: LooseValue,
    /// Number, expanded organization reference or null.
    #[serde(default)]
    pub org_id: LooseValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: Vec<ContactValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: Vec<ContactValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub open_deals_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub closed_deals_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub won_deals_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lost_deals_count: u64,
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
    pub first_char: Option<String>,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_visible_to")]
    pub visible_to: Option<VisibleTo>,
    #[serde(default)]
    pub picture_id: LooseValue,
    #[serde(default)]
    pub next_activity_date: Option<String>,
    #[serde(default)]
    pub next_activity_id: LooseValue,
    #[serde(default)]
    pub last_activity_id: LooseValue,
    #[serde(default)]
    pub last_activity_date: Option<String>,
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub cc_email: Option<String>,
    #[serde(default)]
    pub label: Option<u64>,
}

impl Person {
    pub fn owner(&self) -> Option<UserRef> {
        self.owner_id.expanded()
    }

    /// The address flagged primary, or the first one.
    pub fn primary_email(&self) -> Option<&str> {
        self.email
            .iter()
            .find(|e| e.primary)
            .or_else(|| self.email.first())
            .map(|e| e.value.as_str())
    }
}

/// Follower link returned by [`PersonsApi::add_follower`].
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonFollower {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub person_id: u64,
    #[serde(default)]
    pub add_time: Option<String>,
}

#[derive(Debug, Serialize)]
struct AddFollowerRequest {
    user_id: u64,
}

/// Body of [`PersonsApi::create`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<ContactValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phone: Vec<ContactValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<VisibleTo>,
    /// Sent as `YYYY-MM-DD HH:MM:SS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<u64>,
}

impl PersonCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Body of [`PersonsApi::update`]. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Vec<ContactValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Vec<ContactValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<VisibleTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<u64>,
}

/// Persons API
pub struct PersonsApi {
    client: Arc<PipedriveClient>,
}

impl PersonsApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        options: &ListOptions,
    ) -> Result<Envelope<Vec<Person>>, PipedriveError> {
        self.client.get_with_query("/persons", options).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Envelope<Person>, PipedriveError> {
        self.client.get(&format!("/persons/{id}")).await
    }

    pub async fn create(
        &self,
        options: &PersonCreateOptions,
    ) -> Result<Envelope<Person>, PipedriveError> {
        self.client.post("/persons", options).await
    }

    pub async fn update(
        &self,
        id: u64,
        options: &PersonUpdateOptions,
    ) -> Result<Envelope<Person>, PipedriveError> {
        self.client.put(&format!("/persons/{id}"), options).await
    }

    /// Merge person `id` into `merge_with_id`.
    pub async fn merge(
        &self,
        id: u64,
        merge_with_id: u64,
    ) -> Result<Envelope<Person>, PipedriveError> {
        self.client
            .put(
                &format!("/persons/{id}/merge"),
                &MergeOptions { merge_with_id },
            )
            .await
    }

    pub async fn add_follower(
        &self,
        id: u64,
        user_id: u64,
    ) -> Result<Envelope<PersonFollower>, PipedriveError> {
        self.client
            .post(
                &format!("/persons/{id}/followers"),
                &AddFollowerRequest { user_id },
            )
            .await
    }

    pub async fn delete_follower(
        &self,
        id: u64,
        follower_id: u64,
    ) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client
            .delete(&format!("/persons/{id}/followers/{follower_id}"))
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/persons/{id}")).await
    }

    pub async fn delete_picture(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/persons/{id}/picture")).await
    }

    pub async fn delete_multiple(
        &self,
        ids: &[u64],
    ) -> Result<Envelope<IdsResult>, PipedriveError> {
        self.client
            .delete_with_query("/persons", &DeleteMultipleOptions::new(ids))
            .await
    }
}

impl PipedriveApi for PersonsApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "persons"
    }
}
