//! HTTP client for the storefront backend API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::AuthProvider;

/// Default HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Business error returned by the backend, with the raw payload attached.
#[derive(Debug, Error)]
#[error("backend error {status}: {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub payload: Value,
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// 401/403; the auth provider has already been notified.
    #[error("unauthorized ({status})")]
    Unauthorized { status: u16 },

    /// 404/405/501 on an optional endpoint; the feature is simply not
    /// available on this backend.
    #[error("endpoint not supported ({status})")]
    Unsupported { status: u16 },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ApiClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiClientError::Unauthorized { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, ApiClientError::Unsupported { .. })
    }

    /// HTTP status, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiClientError::Unauthorized { status } | ApiClientError::Unsupported { status } => {
                Some(*status)
            }
            ApiClientError::Api(err) => Some(err.status),
            ApiClientError::Request(err) => err.status().map(|s| s.as_u16()),
            ApiClientError::Json(_) => None,
        }
    }
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;

/// Configuration for creating a new ApiClient.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiClientConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// HTTP client for the storefront backend.
/// Attaches bearer auth and converts error responses into typed errors.
pub struct ApiClient {
    config: ApiClientConfig,
    http_client: HttpClient,
    auth: Arc<dyn AuthProvider>,
}

impl ApiClient {
    /// Creates a new backend client.
    pub fn new(config: ApiClientConfig, auth: Arc<dyn AuthProvider>) -> Self {
        let http_client = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build http client");

        Self {
            config,
            http_client,
            auth,
        }
    }

    /// Sends a JSON request to the backend and parses the response body.
    /// Empty bodies parse as `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url, path);

        let mut request = self.http_client.request(method.clone(), &url);

        let mut headers = HeaderMap::new();
        if let Some(token) = self.auth.token() {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert("Authorization", value);
            }
        }
        request = request.headers(headers);

        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(method = %method, path = %path, "sending request");

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), path = %path, "unauthorized");
            self.auth.on_unauthorized();
            return Err(ApiClientError::Unauthorized {
                status: status.as_u16(),
            });
        }

        if matches!(
            status,
            StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
        ) {
            return Err(ApiClientError::Unsupported {
                status: status.as_u16(),
            });
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(parse_error_response(
                status,
                &bytes,
                &format!("request to {} failed", path),
            ));
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::DELETE, path, None).await
    }
}

/// Builds a typed error from an error response body, falling back to the
/// caller-supplied message when the body carries no usable text.
fn parse_error_response(status: StatusCode, body: &[u8], fallback: &str) -> ApiClientError {
    #[derive(Deserialize)]
    struct ErrorResponse {
        message: Option<String>,
        error: Option<String>,
    }

    let payload: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

    let message = match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(resp) => resp
            .message
            .or(resp.error)
            .unwrap_or_else(|| fallback.to_string()),
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                fallback.to_string()
            } else {
                text
            }
        }
    };

    let api_err = ApiError {
        status: status.as_u16(),
        message,
        payload,
    };

    warn!(status = api_err.status, message = %api_err.message, "api error");

    ApiClientError::Api(api_err)
}
