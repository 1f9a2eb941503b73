//! Game session store: the currently-viewed game's snapshot, a busy flag,
//! and the last error message.
//!
//! PROTOCOL
//! ========
//! Interactive operations all follow one protocol: mark busy and clear the
//! error, call the server, on success replace the snapshot wholesale, on
//! failure record the server's message (or a fixed per-operation fallback)
//! and re-raise. The busy flag is cleared on every exit path via an RAII
//! guard, so an operation dropped mid-flight still resets it.
//!
//! The silent variant exists for background polling: it updates the
//! snapshot on success but never touches busy/error and never re-raises,
//! so a transient network blip cannot flash a spinner or surface an error.
//!
//! Operations are not serialized against each other; when two calls race,
//! the last response to arrive overwrites the snapshot.

#[cfg(test)]
#[path = "game_test.rs"]
mod tests;

use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::net::games as games_api;
use crate::net::transport::{ApiError, Transport};
use crate::net::types::{Game, Point};

const CREATE_GAME_FAILED: &str = "Failed to create game";
const FETCH_GAME_FAILED: &str = "Failed to fetch game";
const JOIN_GAME_FAILED: &str = "Failed to join game";
const PLAY_MOVE_FAILED: &str = "Failed to play move";
const PASS_FAILED: &str = "Failed to pass";
const AI_MOVE_FAILED: &str = "AI move failed";

#[derive(Debug, Default)]
struct GameState {
    current_game: Option<Game>,
    loading: bool,
    error: Option<String>,
}

/// Clears the busy flag when an interactive operation exits, on success,
/// failure, or drop mid-flight.
struct BusyGuard<'a> {
    state: &'a RwLock<GameState>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.write().loading = false;
    }
}

/// Store for the single currently-viewed game.
pub struct GameStore {
    transport: Arc<Transport>,
    inner: RwLock<GameState>,
}

impl GameStore {
    #[must_use]
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport, inner: RwLock::new(GameState::default()) }
    }

    /// Request a new game; returns its id without touching the snapshot.
    pub async fn create_game(&self, is_ai_game: bool) -> Result<String, ApiError> {
        let _busy = self.begin();
        match games_api::create_game(&self.transport, is_ai_game).await {
            Ok(response) => Ok(response.game_id),
            Err(err) => Err(self.record_error(err, CREATE_GAME_FAILED)),
        }
    }

    /// Interactive snapshot refresh.
    pub async fn fetch_game(&self, game_id: &str) -> Result<(), ApiError> {
        self.refresh_with(FETCH_GAME_FAILED, games_api::get_game(&self.transport, game_id))
            .await
    }

    /// Background snapshot refresh for polling. Replaces the snapshot on
    /// success; failures are logged and otherwise ignored.
    pub async fn silent_fetch_game(&self, game_id: &str) {
        match games_api::get_game(&self.transport, game_id).await {
            Ok(game) => self.inner.write().current_game = Some(game),
            Err(err) => tracing::warn!(game_id, %err, "background game refresh failed"),
        }
    }

    /// Seat the caller as the second participant.
    pub async fn join_game(&self, game_id: &str) -> Result<(), ApiError> {
        self.refresh_with(JOIN_GAME_FAILED, games_api::join_game(&self.transport, game_id))
            .await
    }

    /// Submit a move. The server is the sole authority on legality; any
    /// rejection surfaces purely as the propagated error.
    pub async fn play_move(&self, game_id: &str, point: Point) -> Result<(), ApiError> {
        self.refresh_with(PLAY_MOVE_FAILED, games_api::play_move(&self.transport, game_id, point))
            .await
    }

    /// Submit a pass.
    pub async fn pass_turn(&self, game_id: &str) -> Result<(), ApiError> {
        self.refresh_with(PASS_FAILED, games_api::pass_turn(&self.transport, game_id))
            .await
    }

    /// Ask the automated opponent to play.
    pub async fn ai_move(&self, game_id: &str) -> Result<(), ApiError> {
        self.refresh_with(AI_MOVE_FAILED, games_api::ai_move(&self.transport, game_id))
            .await
    }

    /// Reset the last error message. Local only.
    pub fn clear_error(&self) {
        self.inner.write().error = None;
    }

    /// Snapshot of the currently-viewed game, if any.
    #[must_use]
    pub fn current_game(&self) -> Option<Game> {
        self.inner.read().current_game.clone()
    }

    /// True only while one interactive operation is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.inner.read().loading
    }

    /// Last interactive failure message, until cleared or the next success.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.inner.read().error.clone()
    }

    // =========================================================================
    // INTERACTIVE PROTOCOL
    // =========================================================================

    fn begin(&self) -> BusyGuard<'_> {
        let mut state = self.inner.write();
        state.loading = true;
        state.error = None;
        drop(state);
        BusyGuard { state: &self.inner }
    }

    fn record_error(&self, err: ApiError, fallback: &str) -> ApiError {
        let message = err.server_message().unwrap_or(fallback).to_owned();
        self.inner.write().error = Some(message);
        err
    }

    /// One interactive snapshot operation: busy guard, call, replace the
    /// snapshot wholesale on success, record + re-raise on failure.
    async fn refresh_with<F>(&self, fallback: &str, call: F) -> Result<(), ApiError>
    where
        F: Future<Output = Result<Game, ApiError>>,
    {
        let _busy = self.begin();
        match call.await {
            Ok(game) => {
                self.inner.write().current_game = Some(game);
                Ok(())
            }
            Err(err) => Err(self.record_error(err, fallback)),
        }
    }
}
