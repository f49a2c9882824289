//! Middleware components for the Pipedrive SDK.
//!
//! [`PipedriveClient`](crate::client::PipedriveClient) is a
//! `tower::Service<reqwest::Request>`, so any `tower::Layer` over it can be
//! installed with
//! [`PipedriveBuilder::with_middleware`](crate::client::PipedriveBuilder::with_middleware).
//! Every call then flows through the layered service.
//!
//! ## Middleware Types
//!
//! - [`LoggingMiddleware`] - Logs request line, status, latency and quota
//!
//! ## Usage
//!
//! ```ignore
//! use pipedrive_sdk::{middleware::LoggingMiddleware, Pipedrive};
//!
//! let pipedrive = Pipedrive::from_env()?
//!     .with_middleware(LoggingMiddleware::new().verbose())
//!     .build()?;
//! ```

// Re-export tower types for convenience
pub use tower::{Layer, Service, ServiceBuilder};

mod logging;

pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
