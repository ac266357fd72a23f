use std::collections::HashMap;

use chrono::Utc;

use crate::generator::question::Operation;
use crate::session::record::{OperationBreakdown, SessionRecord};

/// Running tallies for one game or practice run. Folded into a
/// `SessionRecord` at session end; the per-operation latency vectors exist
/// only for the session-level averages and are discarded with the session.
#[derive(Clone, Debug, Default)]
pub struct SessionTally {
    pub answered: u32,
    pub correct: u32,
    pub xp_gained: u64,
    op_times: HashMap<Operation, Vec<f64>>,
    op_correct: HashMap<Operation, u32>,
}

impl SessionTally {
    pub fn record(&mut self, operation: Operation, is_correct: bool, elapsed_secs: f64, xp: u64) {
        self.answered += 1;
        self.xp_gained += xp;
        self.op_times.entry(operation).or_default().push(elapsed_secs);
        if is_correct {
            self.correct += 1;
            *self.op_correct.entry(operation).or_default() += 1;
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.answered == 0 {
            return 0.0;
        }
        self.correct as f64 / self.answered as f64 * 100.0
    }

    /// Mean latency across every sample in the session, regardless of
    /// operation.
    pub fn avg_time(&self) -> f64 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for times in self.op_times.values() {
            sum += times.iter().sum::<f64>();
            count += times.len();
        }
        if count == 0 { 0.0 } else { sum / count as f64 }
    }

    /// Fold the tallies into an immutable history record. A session with no
    /// answered questions yields None — empty runs are not worth a history
    /// row.
    pub fn finalize(&self, level_at_end: u32, duration_secs: u32) -> Option<SessionRecord> {
        if self.answered == 0 {
            return None;
        }
        let operations = self
            .op_times
            .iter()
            .map(|(&op, times)| {
                let breakdown = OperationBreakdown {
                    correct: self.op_correct.get(&op).copied().unwrap_or(0),
                    total: times.len() as u32,
                    avg_time: if times.is_empty() {
                        0.0
                    } else {
                        times.iter().sum::<f64>() / times.len() as f64
                    },
                };
                (op, breakdown)
            })
            .collect();

        Some(SessionRecord {
            timestamp: Utc::now(),
            duration_secs,
            total: self.answered,
            correct: self.correct,
            accuracy: self.accuracy(),
            avg_time: self.avg_time(),
            xp_gained: self.xp_gained,
            level_at_end,
            operations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_accuracy() {
        let mut tally = SessionTally::default();
        for i in 0..10 {
            tally.record(Operation::Addition, i < 7, 2.0, 0);
        }
        assert_eq!(tally.accuracy(), 70.0);
    }

    #[test]
    fn test_avg_time_spans_operations() {
        let mut tally = SessionTally::default();
        tally.record(Operation::Addition, true, 2.0, 0);
        tally.record(Operation::Division, true, 4.0, 0);
        tally.record(Operation::Division, false, 6.0, 0);
        assert_eq!(tally.avg_time(), 4.0);
    }

    #[test]
    fn test_finalize_breakdown() {
        let mut tally = SessionTally::default();
        tally.record(Operation::Addition, true, 2.0, 15);
        tally.record(Operation::Addition, false, 4.0, 0);
        tally.record(Operation::Roots, true, 9.0, 10);

        let record = tally.finalize(7, 60).unwrap();
        assert_eq!(record.total, 3);
        assert_eq!(record.correct, 2);
        assert_eq!(record.level_at_end, 7);
        assert_eq!(record.xp_gained, 25);

        let add = &record.operations[&Operation::Addition];
        assert_eq!(add.correct, 1);
        assert_eq!(add.total, 2);
        assert_eq!(add.avg_time, 3.0);
        let roots = &record.operations[&Operation::Roots];
        assert_eq!(roots.correct, 1);
        assert_eq!(roots.total, 1);
    }

    #[test]
    fn test_zero_question_session_not_recorded() {
        let tally = SessionTally::default();
        assert_eq!(tally.accuracy(), 0.0);
        assert_eq!(tally.avg_time(), 0.0);
        assert!(tally.finalize(1, 60).is_none());
    }
}
