//! Pipedrive API trait
//!
//! Every resource group holds a shared handle to one [`PipedriveClient`]
//! and implements [`PipedriveApi`].

use crate::client::PipedriveClient;

/// Trait for Pipedrive resource groups.
pub trait PipedriveApi: Send + Sync {
    /// The transport this group sends through.
    fn client(&self) -> &PipedriveClient;

    /// Name of this API for logging and error context.
    ///
    /// Implementors should override this (e.g. "deals", "persons").
    fn api_name(&self) -> &'static str {
        "unknown"
    }
}
