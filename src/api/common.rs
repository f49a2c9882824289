//! Request and response shapes shared across resource groups
//!
//! - [`ListOptions`] for offset pagination
//! - [`DeleteMultipleOptions`] for the bulk `DELETE ?ids=1,2,3` endpoints
//! - [`IdResult`] / [`IdsResult`] for the `{"id": ..}` payloads of deletes
//! - [`UserRef`], [`PersonRef`], [`OrgRef`] for expanded reference fields

use serde::{Deserialize, Serialize};

use crate::types::LooseValue;
use crate::utils::{join_ids, null_as_default};

/// Offset pagination parameters accepted by most list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl ListOptions {
    pub fn new(start: u64, limit: u64) -> Self {
        Self {
            start: Some(start),
            limit: Some(limit),
        }
    }
}

/// `?term=` lookup used by the `find` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    pub term: String,
}

/// `ids` as one comma-joined value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteMultipleOptions {
    pub ids: String,
}

impl DeleteMultipleOptions {
    pub fn new(ids: &[u64]) -> Self {
        Self { ids: join_ids(ids) }
    }
}

/// Body of the merge endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeOptions {
    pub merge_with_id: u64,
}

/// `data` of single-record deletes: `{"id": 5}`.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
}

/// `data` of bulk deletes: `{"id": [1, 2]}`.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdsResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: Vec<u64>,
}

/// Expanded user reference (`owner_id`, `creator_user_id`, `user_id`).
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub has_pic: LooseValue,
    #[serde(default)]
    pub pic_hash: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: u64,
}

/// Labelled contact value (email address or phone number).
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactValue {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary: bool,
}

impl ContactValue {
    pub fn new(value: impl Into<String>, primary: bool) -> Self {
        Self {
            label: None,
            value: value.into(),
            primary,
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Expanded person reference on deals and activities.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: Vec<ContactValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: Vec<ContactValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: u64,
}

/// Expanded organization reference.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrgRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub people_count: u64,
    #[serde(default)]
    pub owner_id: Option<u64>,
    #[serde(default)]
    pub address: LooseValue,
    #[serde(default)]
    pub cc_email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: u64,
}
