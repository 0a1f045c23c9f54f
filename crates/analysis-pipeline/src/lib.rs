//! Concurrent game-analysis pipeline.
//!
//! Turns raw Chess.com archive records into analysis tasks, replays each
//! game against a pool of Stockfish sessions (one session per worker), and
//! folds the per-game engine-match rates into a suspicion verdict.

pub mod comparator;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod scorer;
pub mod stockfish;

#[cfg(test)]
mod testutil;
