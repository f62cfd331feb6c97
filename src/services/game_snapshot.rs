use crate::{
    error::Result,
    integrations::{RemoteGame, RemoteLastMove},
    models::{Coordinate, GameSnapshot, LastMove},
};

use super::board::{reconstruct_board, BoardTemplate};

/// Translates a fetched game into the caller-facing snapshot.
pub fn to_snapshot(game: &RemoteGame) -> Result<GameSnapshot> {
    let board = reconstruct_board(&BoardTemplate, &game.tiles)?;

    Ok(GameSnapshot {
        game_id: game.id,
        player1: game.me.username.clone(),
        player2: game.opponent.username.clone(),
        own_score: game.me.score,
        opponent_score: game.opponent.score,
        is_running: game.is_running,
        board,
        last_move: game.last_move.as_ref().map(|mv| to_last_move(game, mv)),
    })
}

// The platform names the mover only by user id.
fn to_last_move(game: &RemoteGame, mv: &RemoteLastMove) -> LastMove {
    let player = if mv.user_id == game.me.id {
        &game.me.username
    } else {
        &game.opponent.username
    };

    LastMove {
        player: player.clone(),
        move_type: mv.move_type.clone(),
        word: mv.main_word.clone().unwrap_or_default(),
        points: mv.points,
        placements: mv
            .placements
            .iter()
            .map(|t| Coordinate { x: t.x, y: t.y })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::test_support::{sample_game, tile};

    #[test]
    fn snapshot_carries_scores_and_players() {
        let snapshot = to_snapshot(&sample_game(7)).expect("snapshot");

        assert_eq!(snapshot.game_id, 7);
        assert_eq!(snapshot.player1, "bot1");
        assert_eq!(snapshot.player2, "alice");
        assert_eq!(snapshot.own_score, 0);
        assert_eq!(snapshot.opponent_score, 12);
        assert!(snapshot.is_running);
        assert_eq!(snapshot.board.cell(7, 7), Some('H'));
        assert_eq!(snapshot.board.cell(7, 9), Some('i'));
    }

    #[test]
    fn last_move_by_opponent_is_named_after_opponent() {
        let snapshot = to_snapshot(&sample_game(7)).expect("snapshot");
        let last_move = snapshot.last_move.expect("last move");

        assert_eq!(last_move.player, "alice");
        assert_eq!(last_move.word, "HEI");
        assert_eq!(last_move.points, 12);
        assert_eq!(
            last_move.placements,
            vec![
                Coordinate { x: 7, y: 7 },
                Coordinate { x: 8, y: 7 },
                Coordinate { x: 9, y: 7 }
            ]
        );
    }

    #[test]
    fn last_move_by_own_id_is_named_after_own_player() {
        let mut game = sample_game(7);
        if let Some(mv) = game.last_move.as_mut() {
            mv.user_id = game.me.id;
        }

        let last_move = to_snapshot(&game).expect("snapshot").last_move.expect("last move");
        assert_eq!(last_move.player, "bot1");
    }

    #[test]
    fn game_without_moves_has_no_last_move() {
        let mut game = sample_game(7);
        game.tiles.clear();
        game.last_move = None;

        let snapshot = to_snapshot(&game).expect("snapshot");
        assert!(snapshot.last_move.is_none());
        assert_eq!(snapshot.board.cell(0, 0), Some('2'));
    }

    #[test]
    fn missing_main_word_renders_empty() {
        let mut game = sample_game(7);
        if let Some(mv) = game.last_move.as_mut() {
            mv.move_type = "pass".to_string();
            mv.main_word = None;
            mv.placements.clear();
        }

        let last_move = to_snapshot(&game).expect("snapshot").last_move.expect("last move");
        assert_eq!(last_move.word, "");
        assert!(last_move.placements.is_empty());
    }

    #[test]
    fn malformed_tiles_fail_the_snapshot() {
        let mut game = sample_game(7);
        game.tiles.push(tile(20, 1, 'Z', false));

        assert!(matches!(
            to_snapshot(&game),
            Err(AppError::InvalidTileCoordinate { x: 20, y: 1 })
        ));
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let json = serde_json::to_value(to_snapshot(&sample_game(7)).expect("snapshot"))
            .expect("serialize");

        assert_eq!(json["gameId"], 7);
        assert_eq!(json["ownScore"], 0);
        assert_eq!(json["opponentScore"], 12);
        assert_eq!(json["isRunning"], true);
        assert_eq!(json["lastMove"]["moveType"], "move");
        assert_eq!(json["lastMove"]["placements"][0]["x"], 7);
        assert_eq!(json["board"][7][8], "E");
    }
}
