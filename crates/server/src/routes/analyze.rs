use axum::{extract::Path, Extension, Json};
use serde_json::{json, Value as JsonValue};

use analysis_pipeline::normalize::{normalize_game, GameTask};
use analysis_pipeline::pipeline::EnginePool;
use analysis_pipeline::scorer;

use crate::clients::chess_com::{ArchiveClient, ChessComClient};
use crate::config::Config;
use crate::error::AppError;

/// GET /api/players/{username}/analysis
pub async fn analyze_player(
    Path(username): Path<String>,
    Extension(config): Extension<Config>,
    Extension(client): Extension<ChessComClient>,
) -> Result<Json<JsonValue>, AppError> {
    run_analysis(&client, &config, &username).await.map(Json)
}

/// Scan the player's archives newest-first for up to `max_games` analyzable
/// games, replay them against the engine pool, and build the suspicion
/// verdict with per-game details.
async fn run_analysis<C: ArchiveClient>(
    client: &C,
    config: &Config,
    username: &str,
) -> Result<JsonValue, AppError> {
    let archives = match client.fetch_archives(username).await {
        Ok(archives) => archives,
        Err(e) => {
            tracing::warn!(player = %username, error = %e, "Archive listing failed");
            Vec::new()
        }
    };
    tracing::info!(player = %username, archives = archives.len(), "Archive listing fetched");

    if archives.is_empty() {
        return Err(AppError::NotFound(
            "Player not found or has no games".into(),
        ));
    }

    let tasks = collect_tasks(client, &archives, username, config.max_games).await;
    if tasks.is_empty() {
        return Err(AppError::NotFound(
            "No games could be analyzed for this player".into(),
        ));
    }

    let pool = EnginePool::new(
        config.stockfish_path.clone(),
        config.workers,
        config.nodes_per_position,
    );
    let reports = pool.analyze(tasks).await;

    if reports.is_empty() {
        return Err(AppError::NotFound(
            "No games could be analyzed for this player".into(),
        ));
    }

    let verdict = scorer::evaluate(&reports, &config.scoring);
    tracing::info!(
        player = %username,
        games = reports.len(),
        score = verdict.score,
        suspicious = verdict.suspicious,
        "Analysis complete"
    );

    Ok(json!({
        "player": username,
        "games_analyzed": reports.len(),
        "details": reports,
        "suspicious": verdict.suspicious,
    }))
}

/// Walk archives newest-first and normalize records until the cap is hit.
/// A failed monthly fetch is logged and skipped; it never aborts the scan.
async fn collect_tasks<C: ArchiveClient>(
    client: &C,
    archives: &[String],
    username: &str,
    max_games: usize,
) -> Vec<GameTask> {
    let mut tasks = Vec::new();

    'archives: for archive in archives {
        let games = match client.fetch_archive_games(archive).await {
            Ok(games) => games,
            Err(e) => {
                tracing::warn!(archive = %archive, error = %e, "Archive fetch failed");
                continue;
            }
        };

        for raw in &games {
            if tasks.len() >= max_games {
                break 'archives;
            }
            if let Some(task) = normalize_game(raw, username) {
                tasks.push(task);
            }
        }
    }

    tasks
}
