//! Deals API
//!
//! Endpoints under `/deals`: listing and lookup, create/update, merge and
//! duplicate, and the delete family (single, bulk, follower, participant,
//! attached product).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{
    DeleteMultipleOptions, IdResult, IdsResult, MergeOptions, OrgRef, PersonRef, SearchOptions,
    UserRef,
};
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{DealStatus, Envelope, LooseValue, Timestamp, VisibleTo};
use crate::utils::{bool_as_int, lenient_visible_to, null_as_default};

/// A Pipedrive deal.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    /// Number or expanded [`UserRef`].
    #[serde(default)]
    pub creator_user_id: LooseValue,
    /// Number or expanded [`UserRef`].
    #[serde(default)]
    pub user_id: LooseValue,
    /// Number, expanded [`PersonRef`] or null.
    #[serde(default)]
    pub person_id: LooseValue,
    /// Number, expanded [`OrgRef`] or null.
    #[serde(default)]
    pub org_id: LooseValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pipeline_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default)]
    pub stage_change_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deleted: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub probability: LooseValue,
    #[serde(default)]
    pub next_activity_date: Option<String>,
    #[serde(default)]
    pub next_activity_time: Option<String>,
    #[serde(default)]
    pub next_activity_id: LooseValue,
    #[serde(default)]
    pub next_activity_subject: Option<String>,
    #[serde(default)]
    pub last_activity_id: LooseValue,
    #[serde(default)]
    pub last_activity_date: Option<String>,
    #[serde(default)]
    pub lost_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient_visible_to")]
    pub visible_to: Option<VisibleTo>,
    #[serde(default)]
    pub close_time: Option<String>,
    #[serde(default)]
    pub won_time: Option<String>,
    #[serde(default)]
    pub first_won_time: Option<String>,
    #[serde(default)]
    pub lost_time: Option<String>,
    #[serde(default)]
    pub expected_close_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub files_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email_messages_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub done_activities_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub undone_activities_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub participants_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage_order_nr: i64,
    #[serde(default)]
    pub person_name: Option<String>,
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub formatted_value: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weighted_value: f64,
    #[serde(default)]
    pub formatted_weighted_value: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub cc_email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub org_hidden: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub person_hidden: bool,
}

impl Deal {
    pub fn owner(&self) -> Option<UserRef> {
        self.user_id.expanded()
    }

    pub fn person(&self) -> Option<PersonRef> {
        self.person_id.expanded()
    }

    pub fn organization(&self) -> Option<OrgRef> {
        self.org_id.expanded()
    }
}

/// One entry of a deal's change log (`/deals/{id}/flow`).
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealUpdate {
    #[serde(default, deserialize_with = "null_as_default")]
    pub object: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub data: LooseValue,
}

/// Filters for [`DealsApi::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct DealListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DealStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(
        serialize_with = "bool_as_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub owned_by_you: Option<bool>,
}

/// Body of [`DealsApi::create`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct DealCreateOptions {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DealStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lost_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<VisibleTo>,
}

impl DealCreateOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Body of [`DealsApi::update`]. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DealUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DealStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lost_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<VisibleTo>,
}

/// Deals API
pub struct DealsApi {
    client: Arc<PipedriveClient>,
}

impl DealsApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    /// List deals, optionally filtered and paginated.
    pub async fn list(
        &self,
        options: &DealListOptions,
    ) -> Result<Envelope<Vec<Deal>>, PipedriveError> {
        self.client.get_with_query("/deals", options).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Envelope<Deal>, PipedriveError> {
        self.client.get(&format!("/deals/{id}")).await
    }

    /// Find deals by title.
    pub async fn find(&self, term: &str) -> Result<Envelope<Vec<Deal>>, PipedriveError> {
        let options = SearchOptions {
            term: term.to_string(),
        };
        self.client.get_with_query("/deals/find", &options).await
    }

    /// Change log of a deal.
    pub async fn list_updates(&self, id: u64) -> Result<Envelope<Vec<DealUpdate>>, PipedriveError> {
        self.client.get(&format!("/deals/{id}/flow")).await
    }

    pub async fn create(
        &self,
        options: &DealCreateOptions,
    ) -> Result<Envelope<Deal>, PipedriveError> {
        self.client.post("/deals", options).await
    }

    pub async fn update(
        &self,
        id: u64,
        options: &DealUpdateOptions,
    ) -> Result<Envelope<Deal>, PipedriveError> {
        self.client.put(&format!("/deals/{id}"), options).await
    }

    pub async fn duplicate(&self, id: u64) -> Result<Envelope<Deal>, PipedriveError> {
        self.client
            .post_empty(&format!("/deals/{id}/duplicate"))
            .await
    }

    /// Merge deal `id` into `merge_with_id`.
    pub async fn merge(
        &self,
        id: u64,
        merge_with_id: u64,
    ) -> Result<Envelope<Deal>, PipedriveError> {
        self.client
            .put(
                &format!("/deals/{id}/merge"),
                &MergeOptions { merge_with_id },
            )
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/deals/{id}")).await
    }

    /// Delete several deals in one call.
    pub async fn delete_multiple(&self, ids: &[u64]) -> Result<Envelope<IdsResult>, PipedriveError> {
        self.client
            .delete_with_query("/deals", &DeleteMultipleOptions::new(ids))
            .await
    }

    pub async fn delete_follower(
        &self,
        id: u64,
        follower_id: u64,
    ) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client
            .delete(&format!("/deals/{id}/followers/{follower_id}"))
            .await
    }

    pub async fn delete_participant(
        &self,
        id: u64,
        participant_id: u64,
    ) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client
            .delete(&format!("/deals/{id}/participants/{participant_id}"))
            .await
    }

    /// Detach a product from a deal. `attachment_id` is the deal-product
    /// link id, not the product id.
    pub async fn delete_attached_product(
        &self,
        id: u64,
        attachment_id: u64,
    ) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client
            .delete(&format!("/deals/{id}/products/{attachment_id}"))
            .await
    }
}

impl PipedriveApi for DealsApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "deals"
    }
}
