use axum::{extract::State, Json};

use crate::{
    error::Result,
    models::{GameRequest, GameSnapshot},
    services::game_snapshot::to_snapshot,
};

use super::{require_identity, AppState};

/// POST /game
pub async fn get_game(
    State(state): State<AppState>,
    Json(req): Json<GameRequest>,
) -> Result<Json<GameSnapshot>> {
    let player = require_identity("player1", &req.player1)?;
    let client = state.registry.resolve(player).await;

    let game = client.fetch_game(req.game_id).await?;
    tracing::debug!("Fetched game {} as {}", game.id, client.identity());

    Ok(Json(to_snapshot(&game)?))
}
