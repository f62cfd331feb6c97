use serde::{Deserialize, Serialize};

use crate::services::board::Board;

#[derive(Debug, Deserialize)]
pub struct InvitationRequest {
    pub inviter: String,
    pub invitee: String,
}

/// Success body of `/invite`. A timeout answers `{"error": "..."}` instead,
/// see `AppError::InvitationTimeout`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationResponse {
    pub game_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    pub game_id: i64,
    pub player1: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMove {
    pub player: String,
    pub move_type: String,
    pub word: String,
    pub points: i32,
    pub placements: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub game_id: i64,
    pub player1: String,
    pub player2: String,
    pub own_score: i32,
    pub opponent_score: i32,
    pub is_running: bool,
    pub board: Board,
    pub last_move: Option<LastMove>,
}
