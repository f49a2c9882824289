use std::sync::Arc;
use std::time::Duration;

use reqwest::{Request as ReqwestRequest, Response as ReqwestResponse};
use tower::{Layer, Service};

use crate::error::PipedriveError;
use crate::types::ApiToken;

use super::pipedrive_client::{MiddlewareExecutor, PipedriveClient, PipedriveClientBuilder};
use super::Pipedrive;

/// Builder for [`Pipedrive`]
///
/// Takes the same options as [`PipedriveClientBuilder`] plus an optional
/// `tower` layer that every request is routed through.
#[must_use]
#[derive(Default)]
pub struct PipedriveBuilder<M = ()> {
    client: PipedriveClientBuilder,
    middleware: Option<M>,
}

impl<M> std::fmt::Debug for PipedriveBuilder<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipedriveBuilder")
            .field("client", &self.client)
            .field("middleware", &self.middleware.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

impl PipedriveBuilder {
    /// Reads `PIPEDRIVE_API_TOKEN` (required) and `PIPEDRIVE_COMPANY_DOMAIN`.
    pub fn from_env() -> Result<Self, PipedriveError> {
        Ok(Self {
            client: PipedriveClientBuilder::from_env()?,
            middleware: None,
        })
    }
}

impl<M> PipedriveBuilder<M> {
    pub fn api_token(mut self, token: ApiToken) -> Self {
        self.client = self.client.api_token(token);
        self
    }

    pub fn company_domain(mut self, domain: impl Into<String>) -> Self {
        self.client = self.client.company_domain(domain);
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.client = self.client.host(host);
        self
    }

    pub fn api_version(mut self, version: u32) -> Self {
        self.client = self.client.api_version(version);
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.base_url(url);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.timeout(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.connect_timeout(timeout);
        self
    }

    pub fn with_middleware<M2>(self, middleware: M2) -> PipedriveBuilder<M2>
    where
        M2: Layer<PipedriveClient> + Clone + Send + Sync + 'static,
    {
        PipedriveBuilder {
            client: self.client,
            middleware: Some(middleware),
        }
    }

    pub fn build(self) -> Result<Pipedrive, PipedriveError>
    where
        M: Layer<PipedriveClient> + Clone + Send + Sync + 'static,
        M::Service: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <M::Service as Service<ReqwestRequest>>::Future: Send + 'static,
    {
        let mut client = self.client.build()?;

        if let Some(middleware) = self.middleware {
            let service = middleware.layer(client.clone());
            let executor = make_middleware_executor(service);
            client = client.with_middleware_executor(executor);
        }

        Ok(Pipedrive::from(Arc::new(client)))
    }
}

fn make_middleware_executor<S>(service: S) -> MiddlewareExecutor
where
    S: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    let service = Arc::new(service);

    Arc::new(move |request: ReqwestRequest| {
        let mut service = (*service).clone();
        Box::pin(async move { service.call(request).await })
    })
}
