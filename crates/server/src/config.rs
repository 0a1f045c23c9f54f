use std::env;

use analysis_pipeline::scorer::ScoringConfig;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path to the Stockfish binary; one process is spawned per worker.
    pub stockfish_path: String,
    /// Cap on games analyzed per request, scanning archives newest-first.
    pub max_games: usize,
    /// Parallel analysis workers, each owning one engine session.
    pub workers: usize,
    /// Fixed search budget per engine query.
    pub nodes_per_position: u32,
    pub scoring: ScoringConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let mut scoring = ScoringConfig::default();
        if let Some(threshold) = env::var("SUSPICION_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            scoring.suspicion_threshold = threshold;
        }

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            stockfish_path: env::var("STOCKFISH_PATH")
                .unwrap_or_else(|_| "./bin/stockfish".to_string()),
            max_games: env::var("MAX_GAMES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            workers: env::var("ANALYSIS_WORKERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(num_cpus::get),
            nodes_per_position: env::var("NODES_PER_POSITION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100_000),
            scoring,
        }
    }
}
