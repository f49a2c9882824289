//! Unified Pipedrive client

use std::sync::Arc;

use crate::api::{
    ActivitiesApi, ActivityTypesApi, AuthorizationsApi, CurrenciesApi, DealsApi, FieldKind,
    FieldsApi, FilesApi, FiltersApi, GoalsApi, NotesApi, OrganizationsApi, PersonsApi,
    PipelinesApi, ProductsApi, RecentsApi, SearchApi, StagesApi, UserConnectionsApi,
    UserSettingsApi, UsersApi, WebhooksApi,
};
use crate::error::PipedriveError;
use crate::rate::Rate;

use super::builder::PipedriveBuilder;
use super::PipedriveClient;

/// Unified Pipedrive client
///
/// This is the main entry point for the SDK. Every resource group it hands
/// out shares one transport, so they also share one rate-limit view.
///
/// # Example
///
/// ```rust,ignore
/// use pipedrive_sdk::Pipedrive;
/// use pipedrive_sdk::api::DealListOptions;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pipedrive = Pipedrive::from_env()?.build()?;
///
///     let deals = pipedrive.deals().list(&DealListOptions::default()).await?;
///     for deal in &deals.data {
///         println!("{}: {}", deal.id, deal.title);
///     }
///     println!("quota left: {}", pipedrive.rate().remaining);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Pipedrive {
    client: Arc<PipedriveClient>,
}

impl Pipedrive {
    pub fn builder() -> PipedriveBuilder {
        PipedriveBuilder::default()
    }

    /// Builder seeded from `PIPEDRIVE_API_TOKEN` and `PIPEDRIVE_COMPANY_DOMAIN`.
    pub fn from_env() -> Result<PipedriveBuilder, PipedriveError> {
        PipedriveBuilder::from_env()
    }

    /// The shared transport, for requests no resource group covers.
    pub fn client(&self) -> &PipedriveClient {
        &self.client
    }

    /// Quota as of the most recent response.
    pub fn rate(&self) -> Rate {
        self.client.rate()
    }

    pub fn activities(&self) -> ActivitiesApi {
        ActivitiesApi::new(Arc::clone(&self.client))
    }

    pub fn activity_types(&self) -> ActivityTypesApi {
        ActivityTypesApi::new(Arc::clone(&self.client))
    }

    pub fn authorizations(&self) -> AuthorizationsApi {
        AuthorizationsApi::new(Arc::clone(&self.client))
    }

    pub fn currencies(&self) -> CurrenciesApi {
        CurrenciesApi::new(Arc::clone(&self.client))
    }

    pub fn deals(&self) -> DealsApi {
        DealsApi::new(Arc::clone(&self.client))
    }

    /// Field definitions of one record type.
    pub fn fields(&self, kind: FieldKind) -> FieldsApi {
        FieldsApi::new(Arc::clone(&self.client), kind)
    }

    pub fn deal_fields(&self) -> FieldsApi {
        self.fields(FieldKind::Deal)
    }

    pub fn person_fields(&self) -> FieldsApi {
        self.fields(FieldKind::Person)
    }

    pub fn organization_fields(&self) -> FieldsApi {
        self.fields(FieldKind::Organization)
    }

    pub fn product_fields(&self) -> FieldsApi {
        self.fields(FieldKind::Product)
    }

    pub fn activity_fields(&self) -> FieldsApi {
        self.fields(FieldKind::Activity)
    }

    pub fn note_fields(&self) -> FieldsApi {
        self.fields(FieldKind::Note)
    }

    pub fn files(&self) -> FilesApi {
        FilesApi::new(Arc::clone(&self.client))
    }

    pub fn filters(&self) -> FiltersApi {
        FiltersApi::new(Arc::clone(&self.client))
    }

    pub fn goals(&self) -> GoalsApi {
        GoalsApi::new(Arc::clone(&self.client))
    }

    pub fn notes(&self) -> NotesApi {
        NotesApi::new(Arc::clone(&self.client))
    }

    pub fn organizations(&self) -> OrganizationsApi {
        OrganizationsApi::new(Arc::clone(&self.client))
    }

    pub fn persons(&self) -> PersonsApi {
        PersonsApi::new(Arc::clone(&self.client))
    }

    pub fn pipelines(&self) -> PipelinesApi {
        PipelinesApi::new(Arc::clone(&self.client))
    }

    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(Arc::clone(&self.client))
    }

    pub fn recents(&self) -> RecentsApi {
        RecentsApi::new(Arc::clone(&self.client))
    }

    pub fn search(&self) -> SearchApi {
        SearchApi::new(Arc::clone(&self.client))
    }

    pub fn stages(&self) -> StagesApi {
        StagesApi::new(Arc::clone(&self.client))
    }

    pub fn user_connections(&self) -> UserConnectionsApi {
        UserConnectionsApi::new(Arc::clone(&self.client))
    }

    pub fn user_settings(&self) -> UserSettingsApi {
        UserSettingsApi::new(Arc::clone(&self.client))
    }

    pub fn users(&self) -> UsersApi {
        UsersApi::new(Arc::clone(&self.client))
    }

    pub fn webhooks(&self) -> WebhooksApi {
        WebhooksApi::new(Arc::clone(&self.client))
    }
}

impl From<Arc<PipedriveClient>> for Pipedrive {
    fn from(client: Arc<PipedriveClient>) -> Self {
        Self { client }
    }
}

impl From<PipedriveClient> for Pipedrive {
    fn from(client: PipedriveClient) -> Self {
        Self::from(Arc::new(client))
    }
}
