//! HTTP request gateway: uniform JSON request/response handling.
//!
//! Every call resolves to `Result<Value, ApiError>`; transport failures,
//! non-success statuses and parse failures are all folded into [`ApiError`]
//! so callers branch on data instead of catching exceptions. A 401 emits
//! the process-wide token-expired signal before the failure is returned,
//! so the lifecycle controller reacts without callers interpreting status
//! codes.

use std::fmt;
use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::session::events::SessionEvents;

/// Error categories for API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Non-success HTTP status other than 401.
    Status,
    /// HTTP 401; the token-expired signal has already been emitted.
    Unauthorized,
    /// Network-level failure (connect, timeout, body read).
    Transport,
    /// Response body did not have the expected shape.
    Parse,
    /// Admin-only call attempted without an admin identity. No request
    /// was made.
    NotAuthorized,
    /// No credential present. No request was made.
    NotAuthenticated,
    /// The session was torn down after expiry; the call failed fast.
    SessionExpired,
}

/// Failure half of the API result envelope.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn status(status: u16, body: &Value) -> Self {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .map_or_else(|| format!("HTTP error! status: {status}"), str::to_string);
        let kind = if status == 401 {
            ApiErrorKind::Unauthorized
        } else {
            ApiErrorKind::Status
        };
        Self { kind, message }
    }

    pub(crate) fn transport(err: &reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: message.into(),
        }
    }

    pub(crate) fn not_authorized() -> Self {
        Self {
            kind: ApiErrorKind::NotAuthorized,
            message: "Not authorized: admin access required".to_string(),
        }
    }

    pub(crate) fn not_authenticated() -> Self {
        Self {
            kind: ApiErrorKind::NotAuthenticated,
            message: "Not authenticated".to_string(),
        }
    }

    pub(crate) fn session_expired() -> Self {
        Self {
            kind: ApiErrorKind::SessionExpired,
            message: "Session expired. Please log in again.".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result envelope for all API-layer calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wraps outbound calls with JSON encoding/decoding and the uniform
/// result envelope.
#[derive(Clone)]
pub struct Gateway {
    base_url: String,
    http: reqwest::Client,
    events: Arc<SessionEvents>,
}

impl Gateway {
    pub fn new(base_url: impl Into<String>, events: Arc<SessionEvents>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            events,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues an unauthenticated request.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ApiResult<Value> {
        self.send(method, path, None, body).await
    }

    /// Same as [`Gateway::request`] with `Authorization: Bearer <credential>`
    /// merged into the headers.
    pub async fn request_with_auth(
        &self,
        method: Method,
        path: &str,
        credential: &str,
        body: Option<&Value>,
    ) -> ApiResult<Value> {
        self.send(method, path, Some(credential), body).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        credential: Option<&str>,
        body: Option<&Value>,
    ) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "api request");

        let mut builder = self.http.request(method, &url);
        if let Some(token) = credential {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            // .json() serializes and sets the JSON content-type header
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| ApiError::transport(&e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::transport(&e))?;
        let parsed: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                warn!(%url, "unauthenticated response, signalling token expiry");
                self.events.emit_token_expired();
            }
            return Err(ApiError::status(status.as_u16(), &parsed));
        }

        if parsed.is_null() && !text.trim().is_empty() && text.trim() != "null" {
            return Err(ApiError::parse(format!("invalid JSON response from {url}")));
        }
        Ok(parsed)
    }
}

/// Decodes a gateway payload into a typed value.
pub fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::parse(e.to_string()))
}
