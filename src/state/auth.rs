//! Authentication session store.
//!
//! STATE MACHINE
//! =============
//! {anonymous} --login success--> {authenticated, user pending}
//! --fetch_user success--> {authenticated, user known};
//! {authenticated} --logout or forced 401 teardown--> {anonymous}.
//! A `fetch_user` failure never transitions state backward.
//!
//! Identity enrichment (`fetch_user`, `init_user`) is best-effort by
//! contract: failures are logged, never surfaced, never fatal.
//!
//! Credential reads delegate to the shared durable storage rather than a
//! local mirror, so the transport's forced 401 teardown is immediately
//! visible here and to the route guard alike.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::net::auth as auth_api;
use crate::net::transport::{ApiError, Transport};
use crate::net::types::User;
use crate::storage::SessionStorage;

#[derive(Debug, Default)]
struct AuthState {
    user: Option<User>,
}

/// Process-wide session state: current credential plus cached identity.
/// The credential itself lives in durable storage; this store only adds
/// the in-memory identity on top.
pub struct AuthStore {
    transport: Arc<Transport>,
    storage: Arc<dyn SessionStorage>,
    inner: RwLock<AuthState>,
}

impl AuthStore {
    #[must_use]
    pub fn new(transport: Arc<Transport>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            transport,
            storage,
            inner: RwLock::new(AuthState::default()),
        }
    }

    /// Exchange credentials for a token, persist it, then enrich with the
    /// user's profile. On failure nothing is mutated (no partial login).
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let response = auth_api::login(&self.transport, username, password).await?;

        self.storage.set_token(&response.token);

        self.fetch_user().await;
        Ok(())
    }

    /// Create an account. Does not mutate session state or auto-login.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError> {
        auth_api::register(&self.transport, username, email, password).await
    }

    /// Refresh the cached identity from the server. Best-effort: on any
    /// failure (including a revoked credential) the existing `user` stays
    /// in place and the problem is only logged.
    pub async fn fetch_user(&self) {
        match auth_api::me(&self.transport).await {
            Ok(user) => {
                match serde_json::to_string(&user) {
                    Ok(json) => self.storage.set_user_json(&json),
                    Err(err) => tracing::warn!(%err, "failed to serialize cached user"),
                }
                self.inner.write().user = Some(user);
            }
            Err(err) => tracing::warn!(%err, "failed to fetch user"),
        }
    }

    /// Clear the session locally. Does not call the remote service.
    pub fn logout(&self) {
        self.inner.write().user = None;
        self.storage.clear_session();
    }

    /// Hydrate `user` from the durable cached copy at startup. Malformed
    /// cache data is discarded silently; startup never fails here.
    pub fn init_user(&self) {
        let Some(raw) = self.storage.user_json() else {
            return;
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => self.inner.write().user = Some(user),
            Err(err) => tracing::warn!(%err, "discarding malformed cached user"),
        }
    }

    /// Cached identity, if known.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.inner.read().user.clone()
    }

    /// Current credential, if any. Reads the durable storage directly so
    /// a forced teardown is reflected without any store-side bookkeeping.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage.token()
    }

    /// Credential presence is the sole gate for "authenticated".
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.storage.token().is_some()
    }
}
