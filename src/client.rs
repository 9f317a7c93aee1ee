use std::env;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{ProxyRequest, ProxyResponse};

/// Base URL used when neither an explicit URL nor `BAYARD_PROXY_URL` is set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/";

/// Path of the proxy route, relative to the base URL.
pub const PROXY_PATH: &str = "api/bayard-proxy";

/// Anything that can answer a chat input with generated text and documents.
///
/// The controller is generic over this so that sessions can be driven
/// without a network. Implementations return the body of a successful
/// reply unparsed; the controller decodes it with [`ProxyResponse::from_slice`]
/// once the answer is due.
#[async_trait::async_trait]
pub trait Proxy: Send + Sync {
    /// Send the user's raw input and return the status-checked reply body.
    async fn query(&self, request: &ProxyRequest) -> Result<Bytes>;
}

/// HTTP client for the Bayard proxy route.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: ReqwestClient,
    endpoint: Url,
    timeout: Option<Duration>,
}

impl ProxyClient {
    /// Create a client for the given base URL.
    ///
    /// Without a base URL the `BAYARD_PROXY_URL` environment variable is
    /// consulted, then [`DEFAULT_BASE_URL`]. No timeout is applied.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a client with an optional request timeout.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => url,
            None => env::var("BAYARD_PROXY_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };
        let endpoint = endpoint_for(&base_url)?;

        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    /// The full URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// The proxy gives no structured error detail, so only the status and
    /// body text are kept.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();
        match response.text().await {
            Ok(body) if body.trim().is_empty() => {
                Error::api(status_code, "Failed to send message")
            }
            Ok(body) => Error::api(status_code, body),
            Err(e) => Error::http_client(
                format!("Failed to read error response: {}", e),
                Some(Box::new(e)),
            ),
        }
    }

    /// Post the input to the proxy and parse the answer.
    pub async fn send(&self, request: &ProxyRequest) -> Result<ProxyResponse> {
        let body = self.send_raw(request).await?;
        ProxyResponse::from_slice(&body)
    }

    /// Post the input to the proxy and return the body of a 2xx reply.
    pub async fn send_raw(&self, request: &ProxyRequest) -> Result<Bytes> {
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.send_inner(request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if result.is_err() {
            CLIENT_REQUEST_ERRORS.click();
        }
        result
    }

    async fn send_inner(&self, request: &ProxyRequest) -> Result<Bytes> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(Self::default_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        self.timeout.map(|t| t.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.bytes().await.map_err(|e| {
            Error::http_client(
                format!("Failed to read response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait::async_trait]
impl Proxy for ProxyClient {
    async fn query(&self, request: &ProxyRequest) -> Result<Bytes> {
        self.send_raw(request).await
    }
}

/// Join the proxy path onto a base URL, tolerating a missing trailing slash.
fn endpoint_for(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(PROXY_PATH)?)
}
