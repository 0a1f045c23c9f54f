pub mod outcome;
pub mod pgn;
