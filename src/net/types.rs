//! Wire types for the weiqi service's JSON contract.
//!
//! Field names and shapes match the server exactly; every successful game
//! operation returns a full [`Game`] snapshot that replaces local state
//! wholesale. There is no incremental patching.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTITY
// =============================================================================

/// Authenticated user profile as reported by `/v1/auth/me`.
///
/// Cached copies may go stale relative to the server; they are only used
/// for display, never for authorization decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// RFC 3339 creation timestamp.
    #[serde(default)]
    pub created_at: String,
}

// =============================================================================
// GAME SNAPSHOT
// =============================================================================

/// A board intersection. Used only as a move request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

/// Game lifecycle: `waiting` -> `playing` -> `finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    Playing,
    Finished,
}

/// Square grid of cell occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default = "default_board_size")]
    pub size: usize,
    /// Row-major occupancy, values [`Board::EMPTY`] / [`Board::BLACK`] /
    /// [`Board::WHITE`].
    pub grid: Vec<Vec<i8>>,
}

fn default_board_size() -> usize {
    19
}

impl Board {
    pub const EMPTY: i8 = 0;
    pub const BLACK: i8 = 1;
    pub const WHITE: i8 = 2;

    /// Occupancy at (x, y), or `None` when out of bounds.
    #[must_use]
    pub fn stone_at(&self, x: usize, y: usize) -> Option<i8> {
        self.grid.get(y).and_then(|row| row.get(x)).copied()
    }
}

/// Full observable state of one game, as last reported by the server.
///
/// Seat fields may be absent or empty while waiting for an opponent; the
/// automated opponent occupies a seat under the literal id `"AI"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub board: Board,
    pub next_player: Player,
    /// Consecutive passes; two in a row ends the game server-side.
    pub passes: u32,
    pub game_over: bool,
    pub captures_by_b: u32,
    pub captures_by_w: u32,
    #[serde(default)]
    pub player_black_id: Option<String>,
    #[serde(default)]
    pub player_white_id: Option<String>,
    pub status: GameStatus,
    pub is_ai_game: bool,
    /// Remaining clock time per side, in seconds.
    pub black_time_left: i64,
    pub white_time_left: i64,
    /// Unix timestamp of the last move.
    pub last_move_time: i64,
    /// Configured per-player time budget, in seconds.
    pub time_per_player: i64,
    #[serde(default)]
    pub created_at: String,
}

impl Game {
    /// Whether the white seat is still open (unassigned or empty id).
    #[must_use]
    pub fn waiting_for_opponent(&self) -> bool {
        self.player_white_id.as_deref().is_none_or(str::is_empty)
    }
}

// =============================================================================
// REQUEST / RESPONSE BODIES
// =============================================================================

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct CreateGameRequest {
    pub is_ai_game: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateGameResponse {
    pub game_id: String,
}

/// List responses carry `{"games": [...]}`; an absent array means empty.
#[derive(Debug, Deserialize)]
pub struct GameListResponse {
    #[serde(default)]
    pub games: Vec<Game>,
}
