//! Durable session storage: the bearer credential and a denormalized copy
//! of the authenticated identity.
//!
//! DESIGN
//! ======
//! The credential is process-wide state consulted by the transport layer,
//! the auth store, and the route guard, so it lives behind an explicitly
//! injected `Arc<dyn SessionStorage>` rather than ambient global state.
//! Only two writers exist: the auth store and the transport's forced-logout
//! path. Clearing is idempotent by contract.
//!
//! Persistence is best-effort: a write failure degrades restore-on-restart
//! but must never fail the operation that triggered it.

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Process-wide durable session state.
///
/// The identity copy is stored as raw JSON; parsing (and discarding of
/// malformed data) is the auth store's concern, mirroring how the cache is
/// only ever used for display.
pub trait SessionStorage: Send + Sync {
    /// Current bearer credential, if any. Absence means unauthenticated.
    fn token(&self) -> Option<String>;
    /// Persist a new bearer credential.
    fn set_token(&self, token: &str);
    /// Cached identity JSON, if any.
    fn user_json(&self) -> Option<String>;
    /// Persist a denormalized identity copy.
    fn set_user_json(&self, json: &str);
    /// Remove both credential and cached identity. Clearing an already
    /// absent session is a no-op, not an error.
    fn clear_session(&self);
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

// =============================================================================
// MEMORY STORAGE
// =============================================================================

/// In-process session storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: Mutex<SessionData>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with a credential, for tests exercising authenticated paths.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let storage = Self::new();
        storage.set_token(token);
        storage
    }
}

impl SessionStorage for MemoryStorage {
    fn token(&self) -> Option<String> {
        self.inner.lock().token.clone()
    }

    fn set_token(&self, token: &str) {
        self.inner.lock().token = Some(token.to_owned());
    }

    fn user_json(&self) -> Option<String> {
        self.inner.lock().user.clone()
    }

    fn set_user_json(&self, json: &str) {
        self.inner.lock().user = Some(json.to_owned());
    }

    fn clear_session(&self) {
        let mut data = self.inner.lock();
        data.token = None;
        data.user = None;
    }
}

// =============================================================================
// FILE STORAGE
// =============================================================================

/// Session storage backed by a single JSON file, surviving process restarts.
///
/// The file is read once at open; every mutation writes through. Malformed
/// content on disk is discarded with a warning so a corrupt session file can
/// never break startup.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    inner: Mutex<SessionData>,
}

impl FileStorage {
    /// Open (or start fresh at) the given session file path.
    #[must_use]
    pub fn open(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<SessionData>(&raw) {
                Ok(data) => data,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "discarding malformed session file");
                    SessionData::default()
                }
            },
            Err(_) => SessionData::default(),
        };
        Self { path: path.to_owned(), inner: Mutex::new(data) }
    }

    fn flush(&self, data: &SessionData) {
        let body = match serde_json::to_string_pretty(data) {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(%err, "failed to serialize session file");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = std::fs::create_dir_all(parent) {
                    tracing::warn!(path = %parent.display(), %err, "failed to create session dir");
                    return;
                }
            }
        }
        if let Err(err) = std::fs::write(&self.path, body) {
            tracing::warn!(path = %self.path.display(), %err, "failed to write session file");
        }
    }
}

impl SessionStorage for FileStorage {
    fn token(&self) -> Option<String> {
        self.inner.lock().token.clone()
    }

    fn set_token(&self, token: &str) {
        let mut data = self.inner.lock();
        data.token = Some(token.to_owned());
        self.flush(&data);
    }

    fn user_json(&self) -> Option<String> {
        self.inner.lock().user.clone()
    }

    fn set_user_json(&self, json: &str) {
        let mut data = self.inner.lock();
        data.user = Some(json.to_owned());
        self.flush(&data);
    }

    fn clear_session(&self) {
        let mut data = self.inner.lock();
        data.token = None;
        data.user = None;
        self.flush(&data);
    }
}
