//! Scripted engine session for tests.

use std::collections::VecDeque;

use crate::error::AnalysisError;
use crate::stockfish::EngineSession;

/// Replays a fixed list of best-move replies. Once the script runs out,
/// every further query fails like a dead engine process.
pub(crate) struct ScriptedEngine {
    replies: VecDeque<String>,
    pub queries: usize,
}

impl ScriptedEngine {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|s| s.to_string()).collect(),
            queries: 0,
        }
    }
}

impl EngineSession for ScriptedEngine {
    async fn best_move(&mut self, _fen: &str) -> Result<String, AnalysisError> {
        self.queries += 1;
        self.replies
            .pop_front()
            .ok_or_else(|| AnalysisError::Stockfish("scripted engine exhausted".into()))
    }
}
