//! Pipedrive CRM SDK for Rust
//!
//! An async client for the Pipedrive REST API (v1): deals, persons,
//! organizations, activities, pipelines and the rest of the CRM resources.
//!
//! ## API Coverage
//!
//! | Group | Operations |
//! |-------|------------|
//! | Deals | list, get, find, updates, create, update, duplicate, merge, delete, followers, participants, products |
//! | Persons / Organizations | list, get, create, update, merge, followers, delete |
//! | Activities / Activity types | list, get, create, update, delete |
//! | Pipelines / Stages | list, get, deals, conversion and movement statistics, create, update, delete |
//! | Products | list, find, get, deals, create, update, delete |
//! | Notes / Files | list, get, create, update, delete, upload, download, remote files |
//! | Fields | deal, person, organization, product, activity and note field definitions |
//! | Filters / Goals / Webhooks | list, get, create, update, results, delete |
//! | Users / Settings / Connections | list, find, me, settings, connections |
//! | Currencies / Recents / Search | list, changes since, full-text search |
//! | Authorizations | token lookup by credentials |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pipedrive_sdk::{api::DealListOptions, types::ApiToken, Pipedrive};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipedrive = Pipedrive::builder()
//!         .api_token(ApiToken::new("your_api_token")?)
//!         .company_domain("acme")
//!         .build()?;
//!
//!     let deals = pipedrive.deals().list(&DealListOptions::default()).await?;
//!     for deal in &deals.data {
//!         println!("{}: {}", deal.id, deal.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Resource groups and their record and option types
//! - [`client`] - HTTP transport and the [`Pipedrive`] facade
//! - [`error`] - Error types
//! - [`middleware`] - `tower` layers for the request pipeline
//! - [`rate`] - Rate-limit bookkeeping
//! - [`types`] - Shared wire types (envelope, timestamps, enums)
//!
//! ## Rate Limits
//!
//! Each response updates the client's [`Rate`]. While the last observed
//! quota is spent and its reset time lies ahead, requests fail locally with
//! [`PipedriveError::RateLimitExceeded`] without touching the network.
//!
//! ## Error Handling
//!
//! The SDK uses the [`PipedriveError`] enum for error handling:
//!
//! ```rust,ignore
//! use pipedrive_sdk::PipedriveError;
//!
//! match pipedrive.deals().get_by_id(42).await {
//!     Ok(deal) => println!("{}", deal.data.title),
//!     Err(PipedriveError::RateLimitExceeded { rate, .. }) => {
//!         eprintln!("slow down until {}", rate.reset);
//!     }
//!     Err(PipedriveError::Api { status, error, .. }) => {
//!         eprintln!("API error: {} - {}", status, error);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod middleware;
pub mod rate;
pub mod types;
mod utils;

pub use client::{ApiResponse, Pipedrive, PipedriveBuilder, PipedriveClient, PipedriveClientBuilder};
pub use error::{PipedriveError, Result};
pub use rate::Rate;
