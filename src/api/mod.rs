//! Pipedrive API resource groups
//!
//! One module per REST resource:
//!
//! - [`common`] - Pagination, bulk-delete ids and expanded references
//! - [`deals`] - Deals, their flow, followers, participants and products
//! - [`persons`] - Persons (contacts)
//! - [`organizations`] - Organizations
//! - [`activities`] - Activities
//! - [`activity_types`] - Activity types
//! - [`fields`] - Custom field definitions for every record type
//! - [`pipelines`] - Pipelines and their statistics
//! - [`stages`] - Pipeline stages
//! - [`products`] - Products
//! - [`notes`] - Notes
//! - [`files`] - File upload, download and remote links
//! - [`users`] - Users
//! - [`webhooks`] - Webhook subscriptions
//! - [`filters`] - Saved filters
//! - [`goals`] - Goals and their results
//! - [`currencies`] - Enabled currencies
//! - [`recents`] - Changes since a point in time
//! - [`search_results`] - Cross-object search
//! - [`user_connections`] - Connected third-party accounts
//! - [`user_settings`] - Settings of the current user
//! - [`authorizations`] - API tokens by email and password
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pipedrive_sdk::{Pipedrive, api::ListOptions};
//!
//! let pipedrive = Pipedrive::from_env()?.build()?;
//! let persons = pipedrive.persons().list(&ListOptions::new(0, 50)).await?;
//! ```

pub mod activities;
pub mod activity_types;
pub mod authorizations;
pub mod common;
pub mod currencies;
pub mod deals;
pub mod fields;
pub mod files;
pub mod filters;
pub mod goals;
pub mod notes;
pub mod organizations;
pub mod persons;
pub mod pipelines;
pub mod products;
pub mod recents;
pub mod search_results;
pub mod stages;
pub mod r#trait;
pub mod user_connections;
pub mod user_settings;
pub mod users;
pub mod webhooks;

pub use activities::{ActivitiesApi, Activity, ActivityListOptions, ActivityOptions, Participant};
pub use activity_types::{
    ActivityType, ActivityTypeCreateOptions, ActivityTypeUpdateOptions, ActivityTypesApi,
};
pub use authorizations::{Authorization, AuthorizationCompany, AuthorizationsApi, CompanyInfo};
pub use common::{
    ContactValue, DeleteMultipleOptions, IdResult, IdsResult, ListOptions, MergeOptions, OrgRef,
    PersonRef, SearchOptions, UserRef,
};
pub use currencies::{CurrenciesApi, Currency};
pub use deals::{
    Deal, DealCreateOptions, DealListOptions, DealUpdate, DealUpdateOptions, DealsApi,
};
pub use fields::{Field, FieldCreateOptions, FieldKind, FieldOption, FieldUpdateOptions, FieldsApi};
pub use files::{
    File, FileUpdateOptions, FileUploadOptions, FilesApi, RemoteFileOptions, RemoteLinkOptions,
};
pub use filters::{Filter, FilterCondition, FilterConditionGroup, FilterConditions, FiltersApi};
pub use goals::{Goal, GoalListOptions, GoalOptions, GoalResultsOptions, GoalsApi};
pub use notes::{Note, NoteListOptions, NoteOptions, NotesApi};
pub use organizations::{
    Organization, OrganizationCreateOptions, OrganizationUpdateOptions, OrganizationsApi,
};
pub use persons::{Person, PersonCreateOptions, PersonFollower, PersonUpdateOptions, PersonsApi};
pub use pipelines::{
    AverageAge, ConversionStatistics, DealMovement, MovementCount, MovementStatistics, Pipeline,
    PipelineOptions, PipelinesApi, StageAge, StageConversion,
};
pub use products::{Product, ProductOptions, ProductPrice, ProductsApi};
pub use r#trait::PipedriveApi;
pub use recents::{RecentRecord, RecentsApi, RecentsListOptions};
pub use search_results::{
    SearchApi, SearchResult, SearchResultDetails, SearchResultFields, SearchResultNotes,
    SearchResultsOptions,
};
pub use stages::{Stage, StageCreateOptions, StageDealsOptions, StageUpdateOptions, StagesApi};
pub use user_connections::{UserConnections, UserConnectionsApi};
pub use user_settings::{UserSettings, UserSettingsApi};
pub use users::{User, UserFindOptions, UsersApi};
pub use webhooks::{Webhook, WebhookCreateOptions, WebhooksApi};
