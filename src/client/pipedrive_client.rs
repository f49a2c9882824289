//! Pipedrive HTTP transport
//!
//! Builds authenticated requests, gates them on the last observed quota,
//! sends them (through the middleware pipeline when one is configured),
//! and classifies and decodes the responses.

use std::env;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method, StatusCode};
use log::{debug, warn};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tower::Service;

use crate::error::{PipedriveError, Result};
use crate::rate::{header_i64, Rate, RateState, HEADER_RATE_REMAINING};
use crate::types::ApiToken;

pub(crate) const DEFAULT_HOST: &str = "api.pipedrive.com";
pub(crate) const DEFAULT_API_VERSION: u32 = 1;
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub(crate) const ENV_API_TOKEN: &str = "PIPEDRIVE_API_TOKEN";
pub(crate) const ENV_COMPANY_DOMAIN: &str = "PIPEDRIVE_COMPANY_DOMAIN";

const API_TOKEN_PARAM: &str = "api_token";

pub(crate) type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
pub(crate) type MiddlewareExecutor =
    Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// Decoded response plus the transport metadata it arrived with.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    /// Quota reported on this response.
    pub rate: Rate,
    pub data: T,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorFields {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_info: Option<String>,
}

/// Pipedrive API client
///
/// Cheap to clone: clones share the connection pool and the rate state.
/// Independent instances never share rate state.
#[derive(Clone)]
pub struct PipedriveClient {
    http: Client,
    api_token: ApiToken,
    base_url: Url,
    rate: RateState,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for PipedriveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipedriveClient")
            .field("base_url", &self.base_url.as_str())
            .field("rate", &self.rate.current())
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl PipedriveClient {
    pub fn builder() -> PipedriveClientBuilder {
        PipedriveClientBuilder::default()
    }

    /// Base URL every path is resolved against, always ending in `/`.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub(crate) fn api_token(&self) -> &str {
        self.api_token.as_str()
    }

    /// Quota observed on the most recent response. Zero before any request.
    pub fn rate(&self) -> Rate {
        self.rate.current()
    }

    /// Returns the underlying [`reqwest::Client`].
    ///
    /// Requests sent directly through it bypass the middleware pipeline and
    /// the rate gate.
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn with_middleware_executor(mut self, executor: MiddlewareExecutor) -> Self {
        self.middleware_executor = Some(executor);
        self
    }

    /// Resolves `path` (leading `/` optional) against the base URL.
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| PipedriveError::Config(format!("invalid path {path:?}: {e}")))
    }

    /// Same as [`endpoint_url`](Self::endpoint_url) with the token attached.
    pub fn authenticated_url(&self, path: &str) -> Result<Url> {
        let mut url = self.endpoint_url(path)?;
        url.query_pairs_mut()
            .append_pair(API_TOKEN_PARAM, self.api_token());
        Ok(url)
    }

    /// Builds an authenticated request.
    ///
    /// Every populated field of `query` becomes one query parameter and
    /// `api_token` is always appended. A `body` is sent as JSON with
    /// `Content-Type: application/json`; without one the request has neither.
    pub fn build_request<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<reqwest::Request>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(path)?;
        let mut builder = self.http.request(method, url);

        if let Some(query) = query {
            builder = builder.query(query);
        }
        builder = builder.query(&[(API_TOKEN_PARAM, self.api_token())]);

        if let Some(body) = body {
            let payload = serde_json::to_vec(body)?;
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(payload);
        }

        Ok(builder.build()?)
    }

    /// Builds an authenticated `multipart/form-data` POST.
    pub fn build_multipart_request(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<reqwest::Request> {
        let url = self.endpoint_url(path)?;
        Ok(self
            .http
            .post(url)
            .query(&[(API_TOKEN_PARAM, self.api_token())])
            .multipart(form)
            .build()?)
    }

    pub(crate) async fn send_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(executor) = &self.middleware_executor {
            (executor)(request).await
        } else {
            self.http.execute(request).await
        }
    }

    /// Sends `request` and decodes a 2xx body into `T`.
    ///
    /// An empty body yields `T::default()`. See
    /// [`execute_with_cancel`](Self::execute_with_cancel) for the error rules.
    pub async fn execute<T>(&self, request: reqwest::Request) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned + Default,
    {
        self.execute_with_cancel(request, std::future::pending::<()>())
            .await
    }

    /// Like [`execute`](Self::execute), abandoning the call with
    /// [`PipedriveError::Cancelled`] once `cancel` completes.
    ///
    /// # Errors
    /// - `RateLimitExceeded` when the last observed quota is spent and has not
    ///   reset yet (nothing is sent), or on a 403 with zero remaining
    /// - `Api` for any other non-2xx status
    /// - `Transport` for network failures, `Cancelled` if `cancel` has fired
    /// - `Decode` when a non-empty body does not match `T`
    pub async fn execute_with_cancel<T, F>(
        &self,
        request: reqwest::Request,
        cancel: F,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned + Default,
        F: Future<Output = ()>,
    {
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let raw = self.exchange(request, cancel).await?;
        let data = decode_body(&method, &path, &raw.data)?;

        Ok(ApiResponse {
            status: raw.status,
            rate: raw.rate,
            data,
        })
    }

    /// Sends `request` and returns the undecoded 2xx body, for downloads.
    /// Gating and error classification are the same as for
    /// [`execute`](Self::execute).
    pub async fn execute_bytes(&self, request: reqwest::Request) -> Result<ApiResponse<Vec<u8>>> {
        self.exchange(request, std::future::pending::<()>()).await
    }

    async fn exchange<F>(
        &self,
        request: reqwest::Request,
        cancel: F,
    ) -> Result<ApiResponse<Vec<u8>>>
    where
        F: Future<Output = ()>,
    {
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let current = self.rate.current();
        if current.is_exhausted() {
            warn!(
                "[Pipedrive] {} {} blocked locally: quota exhausted until {}",
                method, path, current.reset
            );
            return Err(PipedriveError::RateLimitExceeded {
                rate: current,
                message: format!("quota exhausted until {}", current.reset),
            });
        }

        tokio::pin!(cancel);

        let exchange = async {
            let response = self.send_request(request).await?;
            let status = response.status();
            let headers = response.headers().clone();
            let rate = self.rate.observe(&headers);
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, headers, rate, body))
        };

        let outcome = tokio::select! {
            biased;
            _ = &mut cancel => return Err(PipedriveError::Cancelled),
            outcome = exchange => outcome,
        };

        let (status, headers, rate, body) = match outcome {
            Ok(parts) => parts,
            Err(e) => {
                return Err(tokio::select! {
                    biased;
                    _ = &mut cancel => PipedriveError::Cancelled,
                    _ = std::future::ready(()) => PipedriveError::Transport(e),
                });
            }
        };

        debug!(
            "[Pipedrive] {} {} -> {} (remaining={})",
            method,
            path,
            status.as_u16(),
            rate.remaining
        );

        if !status.is_success() {
            return Err(classify_error(status, &headers, rate, &body));
        }

        Ok(ApiResponse {
            status,
            rate,
            data: body.to_vec(),
        })
    }

    async fn call<T, Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned + Default,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, query, body)?;
        Ok(self.execute(request).await?.data)
    }

    /// GET `path` with only the token as query.
    pub async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.call(Method::GET, path, None::<&()>, None::<&()>).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned + Default,
        Q: Serialize + ?Sized,
    {
        self.call(Method::GET, path, Some(query), None::<&()>).await
    }

    /// POST `body` as JSON.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.call(Method::POST, path, None::<&()>, Some(body)).await
    }

    /// POST without a body.
    pub async fn post_empty<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.call(Method::POST, path, None::<&()>, None::<&()>).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.call(Method::PUT, path, None::<&()>, Some(body)).await
    }

    pub async fn delete<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.call(Method::DELETE, path, None::<&()>, None::<&()>).await
    }

    pub async fn delete_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned + Default,
        Q: Serialize + ?Sized,
    {
        self.call(Method::DELETE, path, Some(query), None::<&()>).await
    }
}

fn classify_error(
    status: StatusCode,
    headers: &HeaderMap,
    rate: Rate,
    body: &[u8],
) -> PipedriveError {
    let fields: ErrorFields = serde_json::from_slice(body).unwrap_or_default();
    let error = fields.error.unwrap_or_default();
    let error_info = fields.error_info.unwrap_or_default();

    if status == StatusCode::FORBIDDEN && header_i64(headers, HEADER_RATE_REMAINING) == Some(0) {
        let message = if error.is_empty() {
            "API rate limit exceeded".to_string()
        } else {
            error
        };
        return PipedriveError::RateLimitExceeded { rate, message };
    }

    PipedriveError::Api {
        status: status.as_u16(),
        error,
        error_info,
    }
}

fn decode_body<T>(method: &Method, path: &str, body: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: serde_json::Value = serde_json::from_slice(body).map_err(PipedriveError::Decode)?;

    if value.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
        warn!(
            "[Pipedrive] {} {} returned a 2xx status with success=false: {}",
            method,
            path,
            value
                .get("error")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("no error message")
        );
    }

    serde_json::from_value(value).map_err(PipedriveError::Decode)
}

impl Service<reqwest::Request> for PipedriveClient {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = MiddlewareFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        let client = self.http.clone();
        Box::pin(async move { client.execute(req).await })
    }
}

/// Builder for PipedriveClient
///
/// # Example
///
/// ```rust
/// use pipedrive_sdk::client::PipedriveClient;
/// use pipedrive_sdk::types::ApiToken;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PipedriveClient::builder()
///     .api_token(ApiToken::new("abc")?)
///     .company_domain("acme")
///     .build()?;
///
/// assert_eq!(client.base_url(), "https://acme.pipedrive.com/v1/");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct PipedriveClientBuilder {
    api_token: Option<ApiToken>,
    host: Option<String>,
    company_domain: Option<String>,
    api_version: Option<u32>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl PipedriveClientBuilder {
    /// Builder seeded from `PIPEDRIVE_API_TOKEN` and, when set,
    /// `PIPEDRIVE_COMPANY_DOMAIN`.
    pub fn from_env() -> Result<Self> {
        let token = env::var(ENV_API_TOKEN).map_err(|_| {
            PipedriveError::Config(format!("{ENV_API_TOKEN} environment variable not set"))
        })?;
        let token = ApiToken::new(token).map_err(PipedriveError::Config)?;

        let mut builder = Self::default().api_token(token);
        if let Ok(domain) = env::var(ENV_COMPANY_DOMAIN) {
            if !domain.trim().is_empty() {
                builder = builder.company_domain(domain.trim());
            }
        }
        Ok(builder)
    }

    pub fn api_token(mut self, token: ApiToken) -> Self {
        self.api_token = Some(token);
        self
    }

    /// API host, default `api.pipedrive.com`.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Company subdomain, selects `<domain>.pipedrive.com`. Wins over `host`.
    pub fn company_domain(mut self, domain: impl Into<String>) -> Self {
        self.company_domain = Some(domain.into());
        self
    }

    /// API version, default `1`.
    pub fn api_version(mut self, version: u32) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Full base URL override, e.g. a mock server. Must end with `/`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Default: 10 seconds
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    fn resolve_base_url(&self) -> Result<Url> {
        let raw = match &self.base_url {
            Some(url) => url.clone(),
            None => {
                let host = match (&self.company_domain, &self.host) {
                    (Some(domain), _) => format!("{domain}.pipedrive.com"),
                    (None, Some(host)) => host.clone(),
                    (None, None) => DEFAULT_HOST.to_string(),
                };
                if host.is_empty() || host.contains('/') {
                    return Err(PipedriveError::Config(format!("invalid host: {host:?}")));
                }
                let version = self.api_version.unwrap_or(DEFAULT_API_VERSION);
                format!("https://{host}/v{version}/")
            }
        };

        if !raw.starts_with("http://") && !raw.starts_with("https://") {
            return Err(PipedriveError::Config(format!(
                "base_url must start with http:// or https://, got: {raw}"
            )));
        }
        if !raw.ends_with('/') {
            return Err(PipedriveError::Config(format!(
                "base_url must have a trailing slash, but {raw:?} does not"
            )));
        }

        Url::parse(&raw)
            .map_err(|e| PipedriveError::Config(format!("invalid base_url {raw:?}: {e}")))
    }

    /// # Errors
    /// Returns `Config` if the token is missing or the base URL is malformed.
    pub fn build(self) -> Result<PipedriveClient> {
        let base_url = self.resolve_base_url()?;
        let api_token = self
            .api_token
            .ok_or_else(|| PipedriveError::Config("api_token is required".to_string()))?;

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(PipedriveClient {
            http,
            api_token,
            base_url,
            rate: RateState::new(),
            middleware_executor: None,
        })
    }
}
