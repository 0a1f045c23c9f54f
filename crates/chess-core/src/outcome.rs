//! Game outcome taxonomy for Chess.com per-side result codes.

use serde::{Deserialize, Serialize};

/// Outcome of a game from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Loss,
    Draw,
}

impl GameOutcome {
    /// Map a Chess.com per-side result code ("win", "checkmated", "agreed", ...)
    /// to an outcome for that side. Unknown codes count as losses.
    pub fn from_result_code(code: &str) -> Self {
        match code {
            "win" => GameOutcome::Win,
            "agreed" | "repetition" | "stalemate" | "insufficient" | "50move"
            | "timevsinsufficient" => GameOutcome::Draw,
            _ => GameOutcome::Loss,
        }
    }

    pub fn is_win(self) -> bool {
        self == GameOutcome::Win
    }
}
