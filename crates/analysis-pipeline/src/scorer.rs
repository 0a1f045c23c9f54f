//! Weighted suspicion heuristic over a completed analysis batch.

use serde::Serialize;
use tracing::debug;

use crate::comparator::GameReport;

/// Tunable weights and thresholds for the suspicion heuristic.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub mean_accuracy_weight: f64,
    pub win_rate_weight: f64,
    pub high_accuracy_weight: f64,
    /// Accuracy a game must exceed to count as "very precise".
    pub high_accuracy_cutoff: f64,
    /// Score at or above which the verdict flips to suspicious.
    pub suspicion_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mean_accuracy_weight: 0.5,
            win_rate_weight: 0.3,
            high_accuracy_weight: 0.2,
            high_accuracy_cutoff: 90.0,
            suspicion_threshold: 75.0,
        }
    }
}

/// Aggregate verdict for one batch. Derived, stateless, recomputed per request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SuspicionVerdict {
    /// 0 to 100.
    pub score: f64,
    pub suspicious: bool,
}

/// Fold a batch of reports into a single score. The aggregates are sums and
/// counts, so the result does not depend on the order reports arrived in.
/// Empty batches are rejected upstream; here they score 0 and are not
/// flagged.
pub fn evaluate(reports: &[GameReport], config: &ScoringConfig) -> SuspicionVerdict {
    let total = reports.len();
    if total == 0 {
        return SuspicionVerdict {
            score: 0.0,
            suspicious: false,
        };
    }

    let wins = reports.iter().filter(|r| r.outcome.is_win()).count();
    let mean_accuracy = reports.iter().map(|r| r.accuracy).sum::<f64>() / total as f64;
    let high_accuracy = reports
        .iter()
        .filter(|r| r.accuracy > config.high_accuracy_cutoff)
        .count();

    let win_rate = wins as f64 / total as f64;
    let high_accuracy_rate = high_accuracy as f64 / total as f64;

    let score = 100.0
        * (config.mean_accuracy_weight * mean_accuracy / 100.0
            + config.win_rate_weight * win_rate
            + config.high_accuracy_weight * high_accuracy_rate);

    debug!(score, win_rate, mean_accuracy, high_accuracy_rate, "Suspicion score");

    SuspicionVerdict {
        score,
        suspicious: score >= config.suspicion_threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::outcome::GameOutcome;

    fn report(outcome: GameOutcome, accuracy: f64) -> GameReport {
        GameReport {
            opponent: "opponent".into(),
            outcome,
            accuracy,
            url: "https://www.chess.com/game/live/1".into(),
        }
    }

    #[test]
    fn test_all_perfect_wins_score_exactly_100() {
        let batch = vec![
            report(GameOutcome::Win, 100.0),
            report(GameOutcome::Win, 100.0),
            report(GameOutcome::Win, 100.0),
        ];
        let verdict = evaluate(&batch, &ScoringConfig::default());
        assert_eq!(verdict.score, 100.0);
        assert!(verdict.suspicious);
    }

    #[test]
    fn test_all_zero_losses_score_exactly_0() {
        let batch = vec![
            report(GameOutcome::Loss, 0.0),
            report(GameOutcome::Loss, 0.0),
        ];
        let verdict = evaluate(&batch, &ScoringConfig::default());
        assert_eq!(verdict.score, 0.0);
        assert!(!verdict.suspicious);
    }

    #[test]
    fn test_order_independence() {
        let mut batch = vec![
            report(GameOutcome::Win, 95.5),
            report(GameOutcome::Loss, 40.0),
            report(GameOutcome::Draw, 88.25),
            report(GameOutcome::Win, 91.0),
        ];
        let config = ScoringConfig::default();
        let forward = evaluate(&batch, &config);

        batch.reverse();
        let backward = evaluate(&batch, &config);

        assert_eq!(forward.score, backward.score);
        assert_eq!(forward.suspicious, backward.suspicious);
    }

    #[test]
    fn test_high_accuracy_cutoff_is_strict() {
        // Exactly 90 does not count as a high-accuracy game:
        // 0.5 * 90 = 45, no win term, no high-accuracy term
        let at_cutoff = vec![report(GameOutcome::Loss, 90.0)];
        // Just above picks up the 20-point high-accuracy term:
        // 0.5 * 90.01 + 0.2 * 100 = 65.005
        let above_cutoff = vec![report(GameOutcome::Loss, 90.01)];
        let config = ScoringConfig::default();

        let low = evaluate(&at_cutoff, &config);
        assert_eq!(low.score, 45.0);

        let high = evaluate(&above_cutoff, &config);
        assert!((high.score - 65.005).abs() < 1e-9);
    }

    #[test]
    fn test_empty_batch_is_not_suspicious() {
        let verdict = evaluate(&[], &ScoringConfig::default());
        assert_eq!(verdict.score, 0.0);
        assert!(!verdict.suspicious);
    }

    #[test]
    fn test_threshold_boundary() {
        // Perfect accuracy without a single win stays below the threshold:
        // 0.5 * 100 + 0.2 * 100 = 70
        let batch = vec![report(GameOutcome::Loss, 100.0)];
        let config = ScoringConfig::default();
        let verdict = evaluate(&batch, &config);
        assert_eq!(verdict.score, 70.0);
        assert!(!verdict.suspicious);

        // One win pushes it over: 70 + 30 = 100
        let batch = vec![report(GameOutcome::Win, 100.0)];
        let verdict = evaluate(&batch, &config);
        assert!(verdict.suspicious);
    }
}
