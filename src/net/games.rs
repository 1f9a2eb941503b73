//! Game endpoints. Every mutating call returns the full authoritative
//! snapshot; the server is the sole authority on move legality.

use super::transport::{ApiError, Transport};
use super::types::{CreateGameRequest, CreateGameResponse, Game, GameListResponse, Point};

/// Create a new game against a human or the automated opponent.
pub async fn create_game(transport: &Transport, is_ai_game: bool) -> Result<CreateGameResponse, ApiError> {
    transport.post("/v1/games", &CreateGameRequest { is_ai_game }).await
}

/// Fetch one game's current snapshot.
pub async fn get_game(transport: &Transport, game_id: &str) -> Result<Game, ApiError> {
    transport.get(&format!("/v1/games/{game_id}")).await
}

/// Submit a move at the given intersection. No local validation of
/// legality, bounds, or turn order; rejections come back as errors.
pub async fn play_move(transport: &Transport, game_id: &str, point: Point) -> Result<Game, ApiError> {
    transport.post(&format!("/v1/games/{game_id}/move"), &point).await
}

/// Submit a pass.
pub async fn pass_turn(transport: &Transport, game_id: &str) -> Result<Game, ApiError> {
    transport.post_empty(&format!("/v1/games/{game_id}/pass")).await
}

/// Ask the automated opponent to play its move.
pub async fn ai_move(transport: &Transport, game_id: &str) -> Result<Game, ApiError> {
    transport.post_empty(&format!("/v1/games/{game_id}/ai-move")).await
}

/// Seat the caller as the second participant.
pub async fn join_game(transport: &Transport, game_id: &str) -> Result<Game, ApiError> {
    transport.post_empty(&format!("/v1/games/{game_id}/join")).await
}

/// Games the caller participates in. An absent list decodes as empty.
pub async fn my_games(transport: &Transport) -> Result<Vec<Game>, ApiError> {
    let list: GameListResponse = transport.get("/v1/games/my").await?;
    Ok(list.games)
}

/// Open games waiting for a second player.
pub async fn waiting_games(transport: &Transport) -> Result<Vec<Game>, ApiError> {
    let list: GameListResponse = transport.get("/v1/games/waiting").await?;
    Ok(list.games)
}
