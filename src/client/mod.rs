//! Pipedrive HTTP client module
//!
//! This module contains the PipedriveClient transport and the Pipedrive facade.

mod pipedrive_client;
pub use pipedrive_client::{ApiResponse, PipedriveClient, PipedriveClientBuilder};

mod pipedrive;
pub use pipedrive::Pipedrive;

mod builder;
pub use builder::PipedriveBuilder;
