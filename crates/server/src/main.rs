use server::clients::chess_com::ChessComClient;
use server::config::Config;
use server::routes;

use axum::{routing::get, Extension, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    tracing::info!(
        stockfish_path = %config.stockfish_path,
        workers = config.workers,
        max_games = config.max_games,
        "Config loaded"
    );

    // One explicitly constructed upstream client shared by all requests
    let chess_com = ChessComClient::new();

    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Health
        .route("/health", get(routes::health::health_check))
        // Analysis
        .route(
            "/api/players/{username}/analysis",
            get(routes::analyze::analyze_player),
        )
        // Shared state
        .layer(Extension(config.clone()))
        .layer(Extension(chess_com))
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
