//! Turns raw archive records into self-contained analysis tasks.

use chess_core::outcome::GameOutcome;
use chess_core::pgn;
use serde::Deserialize;
use serde_json::Value;
use shakmaty::Color;
use tracing::debug;

/// One side of a raw Chess.com game record.
#[derive(Debug, Deserialize)]
struct RawPlayer {
    username: String,
    result: String,
}

/// The slice of a raw archive record the pipeline cares about.
#[derive(Debug, Deserialize)]
struct RawGame {
    white: RawPlayer,
    black: RawPlayer,
    #[serde(default)]
    pgn: Option<String>,
    #[serde(default)]
    url: String,
}

/// One game ready for analysis. Immutable; consumed exactly once by a worker.
#[derive(Debug, Clone)]
pub struct GameTask {
    pub opponent: String,
    pub outcome: GameOutcome,
    pub color: Color,
    pub moves: Vec<String>,
    pub url: String,
}

/// Build a task from a raw archive record for the given handle
/// (case-insensitive). Returns `None` when the record does not involve the
/// handle, does not deserialize, or carries no movetext; such games are
/// skipped, never fatal to the batch.
pub fn normalize_game(raw: &Value, target: &str) -> Option<GameTask> {
    let game: RawGame = serde_json::from_value(raw.clone()).ok()?;

    let target_lower = target.to_lowercase();
    let color = if game.white.username.to_lowercase() == target_lower {
        Color::White
    } else if game.black.username.to_lowercase() == target_lower {
        Color::Black
    } else {
        return None;
    };

    let (own, opponent) = match color {
        Color::White => (&game.white, &game.black),
        Color::Black => (&game.black, &game.white),
    };

    let moves = pgn::extract_moves(game.pgn.as_deref()?);
    if moves.is_empty() {
        debug!(url = %game.url, "Skipping game without movetext");
        return None;
    }

    Some(GameTask {
        opponent: opponent.username.clone(),
        outcome: GameOutcome::from_result_code(&own.result),
        color,
        moves,
        url: game.url,
    })
}
