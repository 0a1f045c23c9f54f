use reqwest::Client;
use serde_json::Value;

/// Read side of the game archive service. The analysis route is generic
/// over this so it can be driven with canned archive data in tests.
#[allow(async_fn_in_trait)]
pub trait ArchiveClient {
    /// Monthly archive locators for a player, newest-first. An empty list
    /// means an unknown handle or no history, not an error.
    async fn fetch_archives(&self, username: &str) -> Result<Vec<String>, String>;

    /// Raw game records in one monthly archive.
    async fn fetch_archive_games(&self, archive_url: &str) -> Result<Vec<Value>, String>;
}

#[derive(Clone)]
pub struct ChessComClient {
    client: Client,
}

impl ChessComClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("FairplayScan/1.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();
        Self { client }
    }
}

impl ArchiveClient for ChessComClient {
    async fn fetch_archives(&self, username: &str) -> Result<Vec<String>, String> {
        let url = format!(
            "https://api.chess.com/pub/player/{}/games/archives",
            username.to_lowercase()
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Archives request error: {e}"))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(vec![]);
        }

        if !resp.status().is_success() {
            return Err(format!("Archives HTTP {}", resp.status()));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| format!("Archives JSON parse error: {e}"))?;

        let mut archives: Vec<String> = data["archives"]
            .as_array()
            .cloned()
            .unwrap_or_default()
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect();

        // The API lists oldest-first; scan newest-first so the game cap
        // lands on recent play
        archives.reverse();
        Ok(archives)
    }

    async fn fetch_archive_games(&self, archive_url: &str) -> Result<Vec<Value>, String> {
        let resp = self
            .client
            .get(archive_url)
            .send()
            .await
            .map_err(|e| format!("Archive request error: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("Archive HTTP {}", resp.status()));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| format!("Archive JSON parse error: {e}"))?;

        let games = data["games"]
            .as_array()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|game| {
                // Skip unrated games
                if !game.get("rated").and_then(|v| v.as_bool()).unwrap_or(true) {
                    return false;
                }
                // Skip variant games
                game.get("rules").and_then(|v| v.as_str()).unwrap_or("chess") == "chess"
            })
            .collect();

        Ok(games)
    }
}
