//! # API Client Core
//!
//! This module contains the main ApiClient structure and the shared request
//! pipeline used by every API operation: base URL and timeout handling,
//! bearer-token injection from the session store, response unwrapping, and
//! error normalization.

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::notify::{Notifier, TerminalNotifier};
use crate::router::{self, Navigator, TerminalNavigator};
use crate::session::SessionStore;

/// Error types for API operations.
///
/// This enum distinguishes between different error conditions that can occur
/// during API calls, allowing callers to handle them appropriately.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication error (401 Unauthorized)
    ///
    /// Outside the admin endpoints this means the session token is invalid
    /// or expired; on the admin endpoints it means the supplied admin
    /// password was wrong.
    #[error("Authentication failed: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Authorization error (403 Forbidden)
    #[error("Access denied: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// Any other HTTP error status (4xx/5xx)
    #[error("Request error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
    },

    /// Network error (connection failed, DNS error, timeout, etc.)
    #[error("Network error: {message}")]
    Network {
        /// Human-readable error message
        message: String,
    },

    /// Response parsing error
    #[error("Failed to parse response: {message}")]
    Parse {
        /// Human-readable error message
        message: String,
    },
}

impl ApiError {
    /// HTTP status carried by this error, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Network { .. } | ApiError::Parse { .. } => None,
        }
    }

    /// Check if this is an authentication error (401 or 403).
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { .. } | ApiError::Forbidden { .. }
        )
    }

    /// Check if this is a network error.
    pub fn is_network_error(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    /// Check if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Api { status, .. } if *status >= 500)
    }
}

/// Fixed timeout applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Endpoints where a 401 response means "wrong admin password supplied in
/// the body" rather than "session expired". A 401 from these paths must not
/// evict the stored token or trigger the login redirect. Matched as exact
/// paths, never substrings.
const AUTH_EXEMPT_PATHS: &[&str] = &["/api/usage/limits/update", "/api/usage/reset"];

/// Whether a request path is exempt from the unauthorized-session handling.
fn is_auth_exempt(path: &str) -> bool {
    AUTH_EXEMPT_PATHS.contains(&path)
}

/// Version of the CLI, used in the User-Agent header
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for the RAG document Q&A backend.
///
/// One instance is shared by all API operations. It encapsulates the base
/// URL, the 60-second request timeout, bearer-token injection from the
/// injected [`SessionStore`], and response normalization. Failed requests
/// are surfaced through the injected [`Notifier`] and, for session-expiry
/// 401s, through the injected [`Navigator`] before the error is re-raised
/// to the caller.
///
/// # Example
///
/// ```rust,no_run
/// use ragdoc::api::ApiClient;
/// use ragdoc::session::SessionStore;
///
/// let session = SessionStore::open_default().unwrap();
/// let client = ApiClient::new("http://localhost:8000".to_string(), session);
/// ```
pub struct ApiClient {
    /// Base URL for the API (e.g., <http://localhost:8000>)
    base_url: String,
    /// Underlying HTTP client
    http: Client,
    /// Session token source, read on every outgoing request
    session: SessionStore,
    /// Toast collaborator for error messages
    notifier: Arc<dyn Notifier>,
    /// Navigation collaborator for the login redirect
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a new API client with terminal collaborators.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL for the API endpoint
    /// * `session` - Store the session token is read from and evicted to
    pub fn new(base_url: String, session: SessionStore) -> Self {
        Self::with_collaborators(
            base_url,
            session,
            Arc::new(TerminalNotifier),
            Arc::new(TerminalNavigator),
        )
    }

    /// Create a new API client with explicit notification and navigation
    /// collaborators.
    pub fn with_collaborators(
        base_url: String,
        session: SessionStore,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("ragdoc/{VERSION}"))
                .unwrap_or_else(|_| HeaderValue::from_static("ragdoc/0.1.0")),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url,
            http,
            session,
            notifier,
            navigator,
        }
    }

    /// Base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET request with optional query parameters.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.dispatch(path, request).await
    }

    /// Issue a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        self.dispatch(path, self.http.post(&url).json(body)).await
    }

    /// Issue a POST request with an empty JSON object body.
    ///
    /// The empty body ensures a Content-Length header is always present on
    /// the request.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        self.dispatch(path, self.http.post(&url).json(&serde_json::json!({})))
            .await
    }

    /// Issue a POST request with a multipart form body.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        self.dispatch(path, self.http.post(&url).multipart(form))
            .await
    }

    /// Issue a DELETE request with optional query parameters.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.delete(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.dispatch(path, request).await
    }

    /// Issue a DELETE request with a JSON body.
    pub(crate) async fn delete_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        self.dispatch(path, self.http.delete(&url).json(body)).await
    }

    /// Shared request pipeline.
    ///
    /// Request phase: attach `Authorization: Bearer <token>` when a token is
    /// stored; no other mutation. Response phase: unwrap the body on
    /// success; on failure normalize the error message, run the
    /// unauthorized-session side effects when they apply, notify, and
    /// re-raise.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(to_network_error)?;

        let status = response.status();
        debug!(
            "[API] {} -> {} ({})",
            path,
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        );

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            debug!("[API] Error response body: {}", error_text);
            return Err(self.handle_failure(path, status, &error_text));
        }

        response.json().await.map_err(|e| ApiError::Parse {
            message: format!("Failed to parse response from {}: {}", path, e),
        })
    }

    /// Normalize a failed response and run its side effects.
    ///
    /// A 401 outside [`AUTH_EXEMPT_PATHS`] means the session is gone: the
    /// stored token is evicted and the navigator is sent to the login route.
    /// Every failure is surfaced through the notifier and then re-raised so
    /// business logic can still branch on the status.
    fn handle_failure(&self, path: &str, status: StatusCode, body: &str) -> ApiError {
        let message = error_message(status, body);

        if status == StatusCode::UNAUTHORIZED && !is_auth_exempt(path) {
            if let Err(e) = self.session.clear_token() {
                debug!("[API] Failed to clear stored token: {}", e);
            }
            self.navigator.redirect(router::LOGIN_PATH);
        }

        self.notifier.error(&message);
        to_http_error(status, message)
    }
}

/// Convert a reqwest error to an ApiError.
fn to_network_error(err: reqwest::Error) -> ApiError {
    ApiError::Network {
        message: err.to_string(),
    }
}

/// Derive the user-visible message for a failed response.
///
/// Prefers a top-level `detail` string in the JSON error body; otherwise a
/// generic "request failed" line carrying the status.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail")?.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()))
}

/// Convert an HTTP error status and normalized message to an ApiError.
fn to_http_error(status: StatusCode, message: String) -> ApiError {
    match status.as_u16() {
        401 => ApiError::Unauthorized { message },
        403 => ApiError::Forbidden { message },
        status => ApiError::Api { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scratch_client(dir: &TempDir) -> ApiClient {
        let session = SessionStore::with_path(dir.path().join("config.json"));
        ApiClient::new("https://api.example.com".to_string(), session)
    }

    #[test]
    fn test_api_client_new() {
        let dir = TempDir::new().unwrap();
        let client = scratch_client(&dir);
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_auth_exempt_paths_are_exact() {
        assert!(is_auth_exempt("/api/usage/limits/update"));
        assert!(is_auth_exempt("/api/usage/reset"));

        // Substring lookalikes are not exempt.
        assert!(!is_auth_exempt("/api/usage/reset/all"));
        assert!(!is_auth_exempt("/v2/api/usage/reset"));
        assert!(!is_auth_exempt("/api/chat/query"));
    }

    #[test]
    fn test_error_message_prefers_detail_field() {
        let message = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"chunk_size out of range"}"#,
        );
        assert_eq!(message, "chunk_size out of range");
    }

    #[test]
    fn test_error_message_falls_back_on_non_json_body() {
        let message = error_message(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(message, "Request failed (500)");
    }

    #[test]
    fn test_error_message_falls_back_on_non_string_detail() {
        let message = error_message(StatusCode::UNPROCESSABLE_ENTITY, r#"{"detail":[1,2]}"#);
        assert_eq!(message, "Request failed (422)");
    }

    #[test]
    fn test_to_http_error_mapping() {
        assert!(matches!(
            to_http_error(StatusCode::UNAUTHORIZED, "bad".into()),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            to_http_error(StatusCode::FORBIDDEN, "no".into()),
            ApiError::Forbidden { .. }
        ));
        assert!(matches!(
            to_http_error(StatusCode::SERVICE_UNAVAILABLE, "down".into()),
            ApiError::Api { status: 503, .. }
        ));
    }

    #[test]
    fn test_api_error_helpers() {
        let unauthorized = ApiError::Unauthorized {
            message: "expired".into(),
        };
        assert!(unauthorized.is_auth_error());
        assert_eq!(unauthorized.status(), Some(401));

        let network = ApiError::Network {
            message: "refused".into(),
        };
        assert!(network.is_network_error());
        assert_eq!(network.status(), None);

        let server = ApiError::Api {
            status: 502,
            message: "bad gateway".into(),
        };
        assert!(server.is_server_error());
        assert!(!server.is_auth_error());
    }
}
