//! Stockfish engine wrapper using UCI protocol (async I/O)

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use tracing::debug;

use crate::error::AnalysisError;

/// One engine session bound to a single worker for the worker's lifetime.
/// Implementations are stateful per call sequence and must never be shared
/// between concurrent callers.
#[allow(async_fn_in_trait)]
pub trait EngineSession {
    /// Best move for the given FEN, in UCI notation ("e2e4", "e7e8q").
    async fn best_move(&mut self, fen: &str) -> Result<String, AnalysisError>;

    /// Release the session. Default is a no-op.
    async fn shutdown(&mut self) {}
}

/// Stockfish engine instance
pub struct StockfishEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    nodes: u32,
}

impl StockfishEngine {
    /// Spawn a new Stockfish process, initialize UCI, and fix the search
    /// budget for every subsequent query.
    pub async fn new(path: &str, nodes: u32) -> Result<Self, AnalysisError> {
        let mut process = Command::new(path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| AnalysisError::Stockfish(format!("Failed to spawn Stockfish: {e}")))?;

        let stdin = process.stdin.take().unwrap();
        let stdout = BufReader::new(process.stdout.take().unwrap());

        let mut engine = Self {
            process,
            stdin,
            stdout,
            nodes,
        };

        // Initialize UCI
        engine.send("uci").await?;
        engine.wait_for("uciok").await?;

        // One search thread per session; the pool provides the parallelism
        engine.send("setoption name Threads value 1").await?;
        engine.send("setoption name Hash value 128").await?;
        engine.send("isready").await?;
        engine.wait_for("readyok").await?;

        Ok(engine)
    }

    /// Send a command to Stockfish
    async fn send(&mut self, cmd: &str) -> Result<(), AnalysisError> {
        debug!(cmd, "SF <");
        self.stdin
            .write_all(format!("{cmd}\n").as_bytes())
            .await
            .map_err(|e| AnalysisError::Stockfish(format!("Failed to write to Stockfish: {e}")))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| AnalysisError::Stockfish(format!("Failed to flush stdin: {e}")))?;
        Ok(())
    }

    /// Wait for a specific response line
    async fn wait_for(&mut self, expected: &str) -> Result<(), AnalysisError> {
        let mut line = String::new();
        loop {
            line.clear();
            let n = self
                .stdout
                .read_line(&mut line)
                .await
                .map_err(|e| AnalysisError::Stockfish(format!("Failed to read from Stockfish: {e}")))?;
            if n == 0 {
                return Err(AnalysisError::Stockfish("Stockfish closed stdout".into()));
            }
            let trimmed = line.trim();
            debug!(line = trimmed, "SF >");
            if trimmed == expected {
                return Ok(());
            }
        }
    }

    /// Send quit command and wait for process to exit
    pub async fn quit(&mut self) {
        let _ = self.send("quit").await;
        let _ = self.process.wait().await;
    }
}

impl EngineSession for StockfishEngine {
    async fn best_move(&mut self, fen: &str) -> Result<String, AnalysisError> {
        self.send(&format!("position fen {fen}")).await?;
        self.send(&format!("go nodes {}", self.nodes)).await?;

        let mut line = String::new();
        loop {
            line.clear();
            let n = self
                .stdout
                .read_line(&mut line)
                .await
                .map_err(|e| AnalysisError::Stockfish(format!("Failed to read from Stockfish: {e}")))?;
            if n == 0 {
                return Err(AnalysisError::Stockfish("Stockfish closed stdout".into()));
            }
            let trimmed = line.trim();
            debug!(line = trimmed, "SF >");

            if let Some(best) = parse_bestmove(trimmed) {
                return Ok(best);
            }
        }
    }

    async fn shutdown(&mut self) {
        self.quit().await;
    }
}

impl Drop for StockfishEngine {
    fn drop(&mut self) {
        // Best-effort synchronous kill in drop
        let _ = self.process.start_kill();
    }
}

/// Parse the move out of a "bestmove e2e4 ponder e7e5" line
fn parse_bestmove(line: &str) -> Option<String> {
    let mut parts = line.split_whitespace();
    if parts.next()? != "bestmove" {
        return None;
    }
    parts.next().map(|s| s.to_string())
}
