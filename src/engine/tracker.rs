use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::op_stats::OperationStat;
use crate::engine::retry::{RetryEntry, RetryQueue, SLOW_QUEUE_CAP, WRONG_QUEUE_CAP};
use crate::generator::question::{CanonicalForm, Operation, Question};

/// Answers recorded before slow detection arms. Early samples are too noisy
/// to compare against the running average.
const SLOW_DETECTION_WARMUP: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueKind {
    Wrong,
    Slow,
}

/// Per-operation lifetime statistics plus the two bounded retry queues.
/// Mutated on every answered question; persisted as part of the profile.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PerformanceTracker {
    pub stats: HashMap<Operation, OperationStat>,
    pub wrong_queue: RetryQueue,
    pub slow_queue: RetryQueue,
}

impl PerformanceTracker {
    /// Fold one answered question into the stats and, where warranted, the
    /// retry queues. Slow detection compares against the average *before*
    /// this sample is folded in, and the warm-up floor is checked against
    /// the pre-update count — a question should not be judged against a
    /// baseline it just moved.
    pub fn record_answer(&mut self, question: &Question, is_correct: bool, elapsed_secs: f64) {
        let stat = self.stats.entry(question.operation).or_default();
        let prior_avg = stat.avg_time;
        let prior_count = stat.sample_count;

        if is_correct {
            stat.correct += 1;
            if prior_count > SLOW_DETECTION_WARMUP && is_significantly_slow(elapsed_secs, prior_avg)
            {
                let mut entry = RetryEntry::from_question(question);
                entry.original_time = Some(round2(elapsed_secs));
                entry.avg_at_detection = Some(round2(prior_avg));
                self.slow_queue.insert(entry, SLOW_QUEUE_CAP);
            }
        } else {
            stat.incorrect += 1;
            self.wrong_queue
                .insert(RetryEntry::from_question(question), WRONG_QUEUE_CAP);
        }

        self.stats
            .entry(question.operation)
            .or_default()
            .record_time(elapsed_secs);
    }

    /// Drop a practiced question from the given queue. Called when a
    /// retry-list question is answered correctly in a review session.
    pub fn remove_if_present(
        &mut self,
        queue: QueueKind,
        canonical: &CanonicalForm,
        operation: Operation,
    ) -> bool {
        match queue {
            QueueKind::Wrong => self.wrong_queue.remove_if_present(canonical, operation),
            QueueKind::Slow => self.slow_queue.remove_if_present(canonical, operation),
        }
    }

    pub fn stat(&self, operation: Operation) -> OperationStat {
        self.stats.get(&operation).cloned().unwrap_or_default()
    }

    /// Operations ranked weakest first: accuracy ascending, then average
    /// time descending. Operations with fewer than three answers sort last;
    /// there is not enough signal to call them weak yet.
    pub fn weaknesses(&self, enabled: &[Operation]) -> Vec<(Operation, OperationStat)> {
        let mut ranked: Vec<(Operation, OperationStat)> = enabled
            .iter()
            .filter_map(|op| {
                let stat = self.stats.get(op)?;
                (stat.total_answered() > 0).then(|| (*op, stat.clone()))
            })
            .collect();
        ranked.sort_by(|(_, a), (_, b)| {
            let key = |s: &OperationStat| {
                if s.total_answered() >= 3 {
                    (s.accuracy(), -s.avg_time)
                } else {
                    (101.0, -s.avg_time)
                }
            };
            key(a).partial_cmp(&key(b)).unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}

/// A correct answer is flagged slow when it blows past the personal average
/// for that operation: 1.75x the mean, or 4 seconds over a mean that is
/// already above 2 seconds.
fn is_significantly_slow(elapsed_secs: f64, avg_time: f64) -> bool {
    elapsed_secs > avg_time * 1.75 || (elapsed_secs > avg_time + 4.0 && avg_time > 2.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
