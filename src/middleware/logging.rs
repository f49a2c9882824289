use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use http::StatusCode;
use log::{debug, info};
use reqwest::{Request, Response};
use tower::{Layer, Service};

use crate::rate::{header_i64, HEADER_RATE_REMAINING};

/// Logs every request line, status, latency and remaining quota.
///
/// Credential-like query parameters (`api_token`, ...) are replaced by
/// `[REDACTED]` before anything is written.
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    verbose: bool,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Log at `debug` with status text instead of at `info`.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for LoggingMiddleware
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Service = LoggingMiddlewareService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddlewareService {
            inner,
            verbose: self.verbose,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingMiddlewareService<S> {
    inner: S,
    verbose: bool,
}

const SENSITIVE_FIELDS: &[&str] = &[
    "api_token",
    "token",
    "password",
    "http_auth_password",
    "authorization",
];

impl<S> LoggingMiddlewareService<S> {
    fn redact_url(url: &str) -> String {
        let Some((base, query)) = url.split_once('?') else {
            return url.to_string();
        };

        let redacted_query = query
            .split('&')
            .map(|param| match param.split_once('=') {
                Some((key, _)) if SENSITIVE_FIELDS.iter().any(|s| key.eq_ignore_ascii_case(s)) => {
                    format!("{key}=[REDACTED]")
                }
                _ => param.to_string(),
            })
            .collect::<Vec<_>>()
            .join("&");

        format!("{base}?{redacted_query}")
    }

    fn log_request(method: &str, url: &str, verbose: bool) {
        let safe_url = Self::redact_url(url);
        if verbose {
            debug!("[Pipedrive] >>> {} {}", method, safe_url);
        } else {
            info!("[Pipedrive] {} {}", method, safe_url);
        }
    }

    fn log_response(status: u16, remaining: Option<i64>, duration: Duration, verbose: bool) {
        let remaining = remaining.map_or_else(|| "?".to_string(), |r| r.to_string());
        if verbose {
            debug!(
                "[Pipedrive] <<< {} - {} ({:?}, remaining={})",
                status,
                Self::status_text(status),
                duration,
                remaining
            );
        } else {
            info!(
                "[Pipedrive] {} ({:?}, remaining={})",
                status, duration, remaining
            );
        }
    }

    fn status_text(status: u16) -> &'static str {
        StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("")
    }
}

impl<S, Error> Service<Request> for LoggingMiddlewareService<S>
where
    S: Service<Request, Response = Response, Error = Error> + Send + Clone + 'static,
    S::Future: Send,
    Error: Send + 'static,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let method = req.method().as_str().to_string();
        let url = req.url().to_string();
        let verbose = self.verbose;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            Self::log_request(&method, &url, verbose);

            let start = Instant::now();
            let response = inner.call(req).await?;
            let duration = start.elapsed();

            let remaining = header_i64(response.headers(), HEADER_RATE_REMAINING);
            Self::log_response(response.status().as_u16(), remaining, duration, verbose);

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    type Plain = LoggingMiddlewareService<()>;

    #[test]
    fn test_redact_url_no_sensitive_params() {
        let url = "https://api.pipedrive.com/v1/deals?start=0&limit=50";
        assert_eq!(Plain::redact_url(url), url);
    }

    #[test]
    fn test_redact_url_without_query() {
        let url = "https://api.pipedrive.com/v1/deals";
        assert_eq!(Plain::redact_url(url), url);
    }

    #[test]
    fn test_redact_url_with_api_token() {
        let url = "https://api.pipedrive.com/v1/deals?start=0&api_token=abc123";
        let redacted = Plain::redact_url(url);
        assert_eq!(
            redacted,
            "https://api.pipedrive.com/v1/deals?start=0&api_token=[REDACTED]"
        );
        assert!(!redacted.contains("abc123"));
    }

    #[test]
    fn test_redact_url_is_case_insensitive() {
        let url = "https://api.pipedrive.com/v1/authorizations?Password=hunter2&flag";
        let redacted = Plain::redact_url(url);
        assert!(redacted.contains("Password=[REDACTED]"));
        assert!(redacted.ends_with("&flag"));
    }

    #[test]
    fn test_status_text() {
        assert_eq!(Plain::status_text(200), "OK");
        assert_eq!(Plain::status_text(403), "Forbidden");
        assert_eq!(Plain::status_text(429), "Too Many Requests");
        assert_eq!(Plain::status_text(299), "");
        assert_eq!(Plain::status_text(1000), "");
    }

    #[tokio::test]
    async fn test_logging_middleware_passes_response_through() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/deals"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-RateLimit-Remaining", "79")
                    .set_body_string("{\"success\":true,\"data\":[]}"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = Client::builder().build().unwrap();
        let mut service = LoggingMiddleware::new().verbose().layer(client.clone());

        let url = format!("{}/v1/deals?api_token=secret123", mock_server.uri());
        let req = client.get(&url).build().unwrap();

        let response = service.call(req).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(
            header_i64(response.headers(), HEADER_RATE_REMAINING),
            Some(79)
        );
    }
}
