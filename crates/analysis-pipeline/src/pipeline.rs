//! Worker pool that fans analysis tasks out across engine sessions.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::comparator::{compare_moves, GameReport};
use crate::normalize::GameTask;
use crate::stockfish::{EngineSession, StockfishEngine};

/// Bounded pool of analysis workers. Each worker spawns one Stockfish
/// session at startup and keeps it for the whole batch; sessions are never
/// shared between workers.
pub struct EnginePool {
    stockfish_path: String,
    workers: usize,
    nodes_per_position: u32,
}

impl EnginePool {
    pub fn new(stockfish_path: impl Into<String>, workers: usize, nodes_per_position: u32) -> Self {
        Self {
            stockfish_path: stockfish_path.into(),
            workers: workers.max(1),
            nodes_per_position,
        }
    }

    /// Run every task to completion or failure and collect the successes.
    /// Blocks until all workers have finished; reports arrive in completion
    /// order, which the scorer does not depend on.
    pub async fn analyze(&self, tasks: Vec<GameTask>) -> Vec<GameReport> {
        if tasks.is_empty() {
            return Vec::new();
        }

        let workers = self.workers.min(tasks.len());
        info!(tasks = tasks.len(), workers, "Starting analysis batch");

        let queue = Arc::new(Mutex::new(VecDeque::from(tasks)));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let path = self.stockfish_path.clone();
            let nodes = self.nodes_per_position;
            let queue = queue.clone();
            let tx = tx.clone();

            handles.push(tokio::spawn(async move {
                // Engine startup is paid once per worker, not once per game
                match StockfishEngine::new(&path, nodes).await {
                    Ok(engine) => drain_queue(worker_id, engine, queue, tx).await,
                    Err(e) => error!(worker_id, error = %e, "Engine failed to start"),
                }
            }));
        }
        drop(tx);

        let mut reports = Vec::new();
        while let Some(report) = rx.recv().await {
            reports.push(report);
        }

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Analysis worker panicked");
            }
        }

        reports
    }
}

/// Pull tasks until the queue is empty. A failed task is logged and dropped
/// from the batch; a fatal engine error stops this worker only, leaving the
/// rest of the queue to its siblings.
async fn drain_queue<E: EngineSession>(
    worker_id: usize,
    mut engine: E,
    queue: Arc<Mutex<VecDeque<GameTask>>>,
    tx: UnboundedSender<GameReport>,
) {
    loop {
        let task = queue.lock().await.pop_front();
        let Some(task) = task else { break };

        match compare_moves(&task, &mut engine).await {
            Ok(report) => {
                let _ = tx.send(report);
            }
            Err(e) if e.is_fatal() => {
                error!(worker_id, url = %task.url, error = %e, "Engine session lost, stopping worker");
                break;
            }
            Err(e) => {
                warn!(worker_id, url = %task.url, error = %e, "Skipping game");
            }
        }
    }

    engine.shutdown().await;
}
