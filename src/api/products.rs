use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{IdResult, ListOptions, SearchOptions, UserRef};
use crate::api::deals::Deal;
use crate::api::r#trait::PipedriveApi;
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::types::{Envelope, LooseValue, VisibleTo};
use crate::utils::{bool_as_int, lenient_visible_to, null_as_default};

/// Price of a product in one currency.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPrice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cost: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overhead_cost: f64,
}

impl ProductPrice {
    pub fn new(price: f64, currency: impl Into<String>) -> Self {
        Self {
            price,
            currency: currency.into(),
            ..Self::default()
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub code: LooseValue,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tax: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub selectable: bool,
    #[serde(default)]
    pub first_char: Option<String>,
    #[serde(default, deserialize_with = "lenient_visible_to")]
    pub visible_to: Option<VisibleTo>,
    /// Number or expanded [`UserRef`].
    #[serde(default)]
    pub owner_id: LooseValue,
    #[serde(default)]
    pub files_count: LooseValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers_count: u64,
    #[serde(default)]
    pub add_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prices: Vec<ProductPrice>,
}

impl Product {
    pub fn owner(&self) -> Option<UserRef> {
        self.owner_id.expanded()
    }

    pub fn price_in(&self, currency: &str) -> Option<&ProductPrice> {
        self.prices.iter().find(|p| p.currency == currency)
    }
}

/// Body of [`ProductsApi::create`] and [`ProductsApi::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(serialize_with = "bool_as_int", skip_serializing_if = "Option::is_none")]
    pub active_flag: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<VisibleTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prices: Vec<ProductPrice>,
}

impl ProductOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Products API
pub struct ProductsApi {
    client: Arc<PipedriveClient>,
}

impl ProductsApi {
    pub fn new(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        options: &ListOptions,
    ) -> Result<Envelope<Vec<Product>>, PipedriveError> {
        self.client.get_with_query("/products", options).await
    }

    /// Products whose name contains `term`.
    pub async fn find(&self, term: &str) -> Result<Envelope<Vec<Product>>, PipedriveError> {
        let query = SearchOptions {
            term: term.to_owned(),
        };
        self.client.get_with_query("/products/find", &query).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Envelope<Product>, PipedriveError> {
        self.client.get(&format!("/products/{id}")).await
    }

    pub async fn get_deals(
        &self,
        id: u64,
        options: &ListOptions,
    ) -> Result<Envelope<Vec<Deal>>, PipedriveError> {
        self.client
            .get_with_query(&format!("/products/{id}/deals"), options)
            .await
    }

    pub async fn create(
        &self,
        options: &ProductOptions,
    ) -> Result<Envelope<Product>, PipedriveError> {
        self.client.post("/products", options).await
    }

    pub async fn update(
        &self,
        id: u64,
        options: &ProductOptions,
    ) -> Result<Envelope<Product>, PipedriveError> {
        self.client.put(&format!("/products/{id}"), options).await
    }

    pub async fn delete(&self, id: u64) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client.delete(&format!("/products/{id}")).await
    }

    pub async fn delete_follower(
        &self,
        id: u64,
        follower_id: u64,
    ) -> Result<Envelope<IdResult>, PipedriveError> {
        self.client
            .delete(&format!("/products/{id}/followers/{follower_id}"))
            .await
    }
}

impl PipedriveApi for ProductsApi {
    fn client(&self) -> &PipedriveClient {
        &self.client
    }

    fn api_name(&self) -> &'static str {
        "products"
    }
}
