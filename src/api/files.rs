//! Files API
//!
//! Uploads (multipart), downloads and remote (Google Drive) links for files
//! attached to deals, persons, organizations, products, activities and notes.

use std::sync::Arc;

use http::Method;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::api::common::{IdResult, ListOptions};
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, ItemType, LooseValue};
use crate::utils::null_as_default;

/// File metadata. The content itself is fetched with [`FilesApi::download`].
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct File {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: u64,
    #[serde(default)]
    pub deal_id: Option<u64>,
    #[serde(default)]
    pub person_id: Option<u64>,
    #[serde(default)]
    pub org_id: Option<u64>,
    #[serde(default)]
    pub product_id: Option<u64>,
    #[serde(default)]
    pub activity_id: Option<u64>,
    #[serde(default)]
    pub note_id: Option<u64>,
    #[serde(default)]
    pub email_message_id: LooseValue,
    #[serde(default)]
    pub log_id: LooseValue,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_size: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inline_flag: bool,
    #[serde(default)]
    pub remote_location: Option<String>,
    #[serde(default)]
    pub remote_id: Option<String>,
    #[serde(default)]
    pub cid: Option<String>,
    #[serde(default)]
    pub s3_bucket: Option<String>,
    #[serde(default)]
    pub mail_message_id: LooseValue,
    #[serde(default)]
    pub deal_name: Option<String>,
    #[serde(default)]
    pub person_name: Option<String>,
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Records an uploaded file is attached to. At least one id must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileUploadOptions {
    pub deal_id: Option<u64>,
    pub person_id: Option<u64>,
    pub org_id: Option<u64>,
    pub product_id: Option<u64>,
    pub activity_id: Option<u64>,
    pub note_id: Option<u64>,
}

impl FileUploadOptions {
    fn fields(&self) -> [(&'static str, Option<u64>); 6] {
        [
            ("deal_id", self.deal_id),
            ("person_id", self.person_id),
            ("org_id", self.org_id),
            ("product_id", self.product_id),
            ("activity_id", self.activity_id),
            ("note_id", self.note_id),
        ]
    }
}

/// Body of [`FilesApi::create_remote`].
#[derive(Debug, Clone, Serialize)]
pub struct RemoteFileOptions {
    /// `gdoc`, `gslides`, `gsheet`, `gform` or `gdraw`.
    pub file_type: String,
    pub title: String,
    pub item_type: ItemType,
    pub item_id: u64,
    /// Only `googledrive` is supported by the API.
    pub remote_location: String,
}

/// Body of [`FilesApi::link_remote`].
#[derive(Debug, Clone, Serialize)]
pub struct RemoteLinkOptions {
    pub item_type: ItemType,
    pub item_id: u64,
    pub remote_id: String,
    pub remote_location: String,
}

/// Body of [`FilesApi::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Files API
pub struct FilesApi {
    client: Arc<PipedriveClient>,
}

impl FilesApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        options: &ListOptions,
    ) -> Result<Envelope<Vec<File>>, PipedriveError> {
        self.client.get_with_query("/files", options).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Envelope<File>, PipedriveError> {
        self.client.get(&format!("/files/{id}")).await
    }

    /// Authenticated URL of the file content.
    ///
    /// The URL embeds the API token, so treat it as a credential.
    pub fn download_url(&self, id: u64) -> Result<Url, PipedriveError> {
        self.client.authenticated_url(&format!("/files/{id}/download"))
    }

    /// Downloads the raw file content.
    ///
    /// # Errors
    /// Same as any other call: a 404 for an unknown id is
    /// [`PipedriveError::Api`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let bytes = pipedrive.files().download(42).await?;
    /// std::fs::write("contract.pdf", &bytes)?;
    /// ```
    pub async fn download(&self, id: u64) -> Result<Vec<u8>, PipedriveError> {
        let request = self.client.build_request::<(), ()>(
            Method::GET,
            &format!("/files/{id}/download"),
            None,
            None,
        )?;
        Ok(self.client.execute_bytes(request).await?.data)
    }

    /// Uploads `data` as `file_name` and attaches it to the records in
    /// `options`.
    ///
    /// # Arguments
    /// * `file_name` - Name shown in Pipedrive
    /// * `data` - File content
    /// * `options` - Record ids to attach the file to
    ///
    /// # Example
    ///
    /// ```ignore
    /// let options = FileUploadOptions { deal_id: Some(7), ..Default::default() };
    /// let file = pipedrive.files().upload("quote.pdf", &bytes, &options).await?;
    /// ```
    pub async fn upload(
        &self,
        file_name: &str,
        data: &[u8],
        options: &FileUploadOptions,
    ) -> Result<Envelope<File>, PipedriveError> {
        let part = Part::bytes(data.to_vec()).file_name(file_name.to_string());
        let mut form = Form::new().part("file", part);
        for (name, value) in options.fields() {
            if let Some(id) = value {
                form = form.text(name, id.to_string());
            }
        }

        let request = self.client.build_multipart_request("/files", form)?;
        Ok(self.client.execute(request).await?.data)
    }

    /// Creates an empty remote file and links it to an item.
    pub async fn create_remote(
        &self,
        options: &RemoteFileOptions,
    ) -> Result<Envelope<File>, PipedriveError> {
        self.client.post("/files/remote", options).await
    }

    /// Links an existing remote file to an item.
    pub async fn link_remote(
        &self,
        options: &RemoteLinkOptions,
    ) -> Result<Envelope<File>, PipedriveError> {
        self.client.post("/files/remoteLink", options).await
    }

    pub async fn update(
        &self,
        id: u64,
        options: &FileUpdateOptions,
    ) -> Result<Envelope<File>, PipedriveError> {
        self.client.put(&format!("/files/{id}"), options).await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/files/{id}")).await
    }
}

impl PipedriveApi for FilesApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "files"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upload_fields_keep_order() {
        let options = FileUploadOptions {
            deal_id: Some(1),
            note_id: Some(9),
            ..Default::default()
        };
        let set: Vec<_> = options
            .fields()
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect();
        assert_eq!(set, vec![("deal_id", 1), ("note_id", 9)]);
    }

    #[test]
    fn test_remote_options_serialization() {
        let options = RemoteLinkOptions {
            item_type: ItemType::Deal,
            item_id: 4,
            remote_id: "1AbC".to_string(),
            remote_location: "googledrive".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "item_type": "deal",
                "item_id": 4,
                "remote_id": "1AbC",
                "remote_location": "googledrive"
            })
        );
    }
}
