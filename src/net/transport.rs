//! Single point of egress for all remote calls.
//!
//! ARCHITECTURE
//! ============
//! Every request goes through [`Transport::execute`]: attach the bearer
//! credential when one is in durable storage, dispatch with the fixed
//! timeout, then normalize the response. A 401 from *any* call tears down
//! the persisted session and fires the injected session-expired hook; the
//! navigation layer subscribes to that hook, keeping the transport free of
//! any view concerns. Everything else passes through to the caller.
//!
//! No retries, no swallowing: network failures and non-2xx statuses
//! propagate with the server's error payload attached when present.

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::storage::SessionStorage;

/// Hook invoked after a 401 has torn down the persisted session.
pub type SessionExpiredHook = Box<dyn Fn() + Send + Sync>;

// =============================================================================
// ERRORS
// =============================================================================

/// Failure of one remote call, as seen by the stores.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network-level failure, including the fixed request timeout.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server rejected the credential; the local session has already
    /// been torn down by the time this is returned.
    #[error("session expired")]
    Unauthorized,
    /// Non-2xx status with the server's `{"error": ...}` payload, if any.
    #[error("server returned {status}: {}", message.as_deref().unwrap_or("(no error message)"))]
    Api { status: u16, message: Option<String> },
    /// The response body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-supplied error message, when the failure carried one.
    /// Stores fall back to a fixed per-operation message otherwise.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Pull the `error` field out of a failure body, tolerating anything that
/// is not the expected JSON shape.
fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|msg| !msg.is_empty())
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Configured HTTP client shared by every store.
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn SessionStorage>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl Transport {
    /// Build the shared client with the fixed timeout and JSON content type.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying client cannot be built.
    pub fn new(config: &ClientConfig, storage: Arc<dyn SessionStorage>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            storage,
            on_session_expired: None,
        })
    }

    /// Install the session-expired hook fired after 401 teardown.
    #[must_use]
    pub fn with_session_expired(mut self, hook: SessionExpiredHook) -> Self {
        self.on_session_expired = Some(hook);
        self
    }

    /// GET `path`, decoding a JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.get(self.url(path))).await
    }

    /// POST `path` with a JSON body, decoding a JSON response.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.http.post(self.url(path)).json(body)).await
    }

    /// POST `path` with no body, decoding a JSON response.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.post(self.url(path))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        // Absence of a credential never blocks the call; anonymous requests
        // are part of the contract (login, register).
        let request = match self.storage.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // Global, call-site-independent teardown. Clearing is idempotent,
            // so overlapping 401s are harmless.
            tracing::warn!("session rejected by server, clearing credentials");
            self.storage.clear_session();
            if let Some(hook) = &self.on_session_expired {
                hook();
            }
            return Err(ApiError::Unauthorized);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}
