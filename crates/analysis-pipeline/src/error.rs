//! Pipeline error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The engine process is unusable: failed to spawn, or a pipe died.
    /// The owning worker stops; sibling workers are unaffected.
    #[error("Stockfish error: {0}")]
    Stockfish(String),

    /// One game could not be analyzed (bad movetext, illegal move).
    /// The task is dropped; the batch continues.
    #[error("Analysis error: {0}")]
    Analysis(String),
}

impl AnalysisError {
    /// True when the bound engine session can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AnalysisError::Stockfish(_))
    }
}
