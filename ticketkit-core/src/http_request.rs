//! HTTP transport used by API clients.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Method, StatusCode};

use crate::error::{ErrorResponse, TicketKitResult};
use crate::Environment;

/// HTTP method of an [`Endpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
        }
    }
}

/// Description of a single API call, resolved against the transport's base URL.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Request method.
    pub method: HttpMethod,
    /// Path relative to the base URL, starting with `/`.
    pub path: String,
    /// Session token sent as `Authorization: Bearer …`.
    pub bearer_token: Option<String>,
}

impl Endpoint {
    /// A `GET` request to `path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            bearer_token: None,
        }
    }

    /// Attaches a bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Transport that executes an [`Endpoint`] and returns the raw response body.
///
/// Non-success responses and connection failures are reported as an
/// [`ErrorResponse`]; callers pass those through unchanged.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes the request.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorResponse`] on connection failure or a non-2xx status.
    async fn request(&self, endpoint: Endpoint) -> TicketKitResult<Vec<u8>>;
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`HttpClient`] backed by `reqwest`. Sets a timeout, user-agent and JSON `Accept`
/// header on every request. No retries.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestHttpClient {
    /// Creates a client for the API of the given environment.
    #[must_use]
    pub fn new(environment: Environment, timeout: Option<Duration>) -> Self {
        let base_url = match environment {
            Environment::Staging => "https://api.stage.ticketkit.app",
            Environment::Production => "https://api.ticketkit.app",
        };
        Self::with_base_url(base_url, timeout)
    }

    /// Creates a client for an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn request(&self, endpoint: Endpoint) -> TicketKitResult<Vec<u8>> {
        let url = self.url(&endpoint.path);

        let mut request_builder = self
            .client
            .request(endpoint.method.into(), &url)
            .timeout(self.timeout)
            .header(
                USER_AGENT,
                format!("ticketkit-core/{}", env!("CARGO_PKG_VERSION")),
            )
            .header(ACCEPT, "application/json");
        if let Some(token) = &endpoint.bearer_token {
            request_builder = request_builder.bearer_auth(token);
        }

        log::debug!("{:?} {url}", endpoint.method);
        let response = request_builder
            .send()
            .await
            .map_err(|err| network_error(&url, &err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| network_error(&url, &err))?;

        if !status.is_success() {
            log::warn!("{url} responded with status {status}");
            return Err(error_from_status(status, &body));
        }

        Ok(body.to_vec())
    }
}

fn network_error(url: &str, err: &reqwest::Error) -> ErrorResponse {
    let error = if err.is_timeout() {
        format!("network error: request to {url} timed out")
    } else if err.is_connect() {
        format!("network error: could not connect to {url}")
    } else {
        format!("network error: request to {url} failed")
    };
    ErrorResponse::new(error).with_details(err.to_string())
}

/// Builds the error for a non-2xx response.
///
/// The body is used as-is when the server sent an [`ErrorResponse`]; otherwise the
/// status is reported with the body text as details.
fn error_from_status(status: StatusCode, body: &[u8]) -> ErrorResponse {
    let status_code = status.as_u16();
    if let Ok(mut server_error) = serde_json::from_slice::<ErrorResponse>(body) {
        if !server_error.error.trim().is_empty() {
            server_error.status_code.get_or_insert(status_code);
            return server_error;
        }
    }

    let error = ErrorResponse::new(format!("request failed with status {status_code}"))
        .with_status(status_code);
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        error
    } else {
        error.with_details(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use mockito::{Matcher, Server};

    #[test]
    fn test_environment_urls() {
        let staging = ReqwestHttpClient::new(Environment::Staging, None);
        assert_eq!(staging.base_url(), "https://api.stage.ticketkit.app");
        let production = ReqwestHttpClient::new(Environment::Production, None);
        assert_eq!(production.base_url(), "https://api.ticketkit.app");
    }

    #[test]
    fn test_url_joining() {
        let client = ReqwestHttpClient::with_base_url("https://example.com/api/", None);
        assert_eq!(client.url("/merchants"), "https://example.com/api/merchants");
        assert_eq!(client.url("merchants"), "https://example.com/api/merchants");
    }

    #[test]
    fn test_endpoint_debug_redacts_token() {
        let endpoint = Endpoint::get("/merchants").with_bearer_token("abc123");
        let rendered = format!("{endpoint:?}");
        assert!(!rendered.contains("abc123"));
        assert!(rendered.contains("/merchants"));
    }

    #[tokio::test]
    async fn test_request_sends_bearer_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/merchants")
            .match_header("authorization", "Bearer token-1")
            .match_header("accept", "application/json")
            .match_header(
                "user-agent",
                Matcher::Regex("^ticketkit-core/.*".to_string()),
            )
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = ReqwestHttpClient::with_base_url(server.url(), None);
        let body = client
            .request(Endpoint::get("/merchants").with_bearer_token("token-1"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body, b"[]");
    }

    #[tokio::test]
    async fn test_server_error_body_is_decoded() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/merchants")
            .with_status(403)
            .with_body(r#"{"error":"Forbidden","errorCode":"AUTH_FAILED"}"#)
            .create_async()
            .await;

        let client = ReqwestHttpClient::with_base_url(server.url(), None);
        let err = client.request(Endpoint::get("/merchants")).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.error, "Forbidden");
        assert_eq!(err.status_code, Some(403));
        assert!(err.has_code(ErrorCode::AuthFailed));
    }

    #[tokio::test]
    async fn test_plain_error_body_is_wrapped() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/merchants")
            .with_status(502)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let client = ReqwestHttpClient::with_base_url(server.url(), None);
        let err = client.request(Endpoint::get("/merchants")).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.error, "request failed with status 502");
        assert_eq!(err.status_code, Some(502));
        assert_eq!(err.details.as_deref(), Some("upstream unavailable"));
        assert_eq!(err.error_code, None);
    }

    #[tokio::test]
    async fn test_connection_failure() {
        // Nothing listens on port 9 (discard) in the test environment.
        let client = ReqwestHttpClient::with_base_url(
            "http://127.0.0.1:9",
            Some(Duration::from_secs(2)),
        );
        let err = client.request(Endpoint::get("/merchants")).await.unwrap_err();

        assert!(err.error.starts_with("network error"));
        assert!(err.details.is_some());
        assert_eq!(err.status_code, None);
    }
}
