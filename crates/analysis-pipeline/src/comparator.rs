//! Move-by-move comparison of one game against an engine session.

use serde::Serialize;
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position};

use chess_core::outcome::GameOutcome;

use crate::error::AnalysisError;
use crate::normalize::GameTask;
use crate::stockfish::EngineSession;

/// Analysis outcome for one game. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub opponent: String,
    pub outcome: GameOutcome,
    /// Share of the target player's moves that matched the engine's top
    /// choice, in percent with two decimals. 0 when the player had no moves.
    pub accuracy: f64,
    pub url: String,
}

/// Replay `task` from the starting position. At every position where the
/// target player is to move, ask the engine for its best move *before*
/// applying the player's move, and count an exact UCI match
/// (origin/destination/promotion). Opponent moves are applied without a
/// query.
pub async fn compare_moves<E: EngineSession>(
    task: &GameTask,
    engine: &mut E,
) -> Result<GameReport, AnalysisError> {
    let mut pos = Chess::default();
    let mut considered = 0u32;
    let mut matched = 0u32;

    for san_text in &task.moves {
        let san: SanPlus = san_text
            .parse()
            .map_err(|e| AnalysisError::Analysis(format!("Bad SAN '{san_text}': {e}")))?;
        let mv = san
            .san
            .to_move(&pos)
            .map_err(|e| AnalysisError::Analysis(format!("Illegal move '{san_text}': {e}")))?;

        if pos.turn() == task.color {
            let fen = Fen::from_position(&pos, EnPassantMode::Legal).to_string();
            let best = engine.best_move(&fen).await?;
            considered += 1;
            if best == mv.to_uci(CastlingMode::Standard).to_string() {
                matched += 1;
            }
        }

        pos.play_unchecked(mv);
    }

    let accuracy = if considered > 0 {
        round2(f64::from(matched) / f64::from(considered) * 100.0)
    } else {
        0.0
    };

    Ok(GameReport {
        opponent: task.opponent.clone(),
        outcome: task.outcome,
        accuracy,
        url: task.url.clone(),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ScriptedEngine;
    use shakmaty::Color;

    fn task(color: Color, moves: &[&str]) -> GameTask {
        GameTask {
            opponent: "opponent".into(),
            outcome: GameOutcome::Win,
            color,
            moves: moves.iter().map(|s| s.to_string()).collect(),
            url: "https://www.chess.com/game/live/1".into(),
        }
    }

    #[tokio::test]
    async fn test_full_match_is_100() {
        let task = task(Color::White, &["e4", "e5", "Nf3", "Nc6"]);
        let mut engine = ScriptedEngine::new(&["e2e4", "g1f3"]);

        let report = compare_moves(&task, &mut engine).await.unwrap();
        assert_eq!(report.accuracy, 100.0);
        // Only the two White positions were queried
        assert_eq!(engine.queries, 2);
    }

    #[tokio::test]
    async fn test_partial_match() {
        let task = task(Color::White, &["e4", "e5", "Nf3", "Nc6"]);
        let mut engine = ScriptedEngine::new(&["e2e4", "b1c3"]);

        let report = compare_moves(&task, &mut engine).await.unwrap();
        assert_eq!(report.accuracy, 50.0);
    }

    #[tokio::test]
    async fn test_black_positions_only() {
        let task = task(Color::Black, &["e4", "e5", "Nf3", "Nc6"]);
        let mut engine = ScriptedEngine::new(&["e7e5", "g8f6"]);

        let report = compare_moves(&task, &mut engine).await.unwrap();
        // e5 matched, Nc6 (b8c6) did not
        assert_eq!(report.accuracy, 50.0);
        assert_eq!(engine.queries, 2);
    }

    #[tokio::test]
    async fn test_no_target_moves_is_zero_without_query() {
        // Black never moved; no division by zero, no engine traffic
        let task = task(Color::Black, &["e4"]);
        let mut engine = ScriptedEngine::new(&[]);

        let report = compare_moves(&task, &mut engine).await.unwrap();
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(engine.queries, 0);
    }

    #[tokio::test]
    async fn test_two_decimal_rounding() {
        // 1 match out of 3 considered = 33.333... -> 33.33
        let task = task(Color::White, &["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]);
        let mut engine = ScriptedEngine::new(&["e2e4", "b1c3", "c3d5"]);

        let report = compare_moves(&task, &mut engine).await.unwrap();
        assert_eq!(report.accuracy, 33.33);
        assert!(report.accuracy >= 0.0 && report.accuracy <= 100.0);
    }

    #[tokio::test]
    async fn test_illegal_move_fails_only_this_task() {
        let task = task(Color::White, &["e4", "e5", "Ke3"]);
        let mut engine = ScriptedEngine::new(&["e2e4", "g1f3"]);

        let err = compare_moves(&task, &mut engine).await.unwrap_err();
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn test_engine_failure_is_fatal() {
        let task = task(Color::White, &["e4", "e5"]);
        let mut engine = ScriptedEngine::new(&[]);

        let err = compare_moves(&task, &mut engine).await.unwrap_err();
        assert!(err.is_fatal());
    }
}
