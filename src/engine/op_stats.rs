use serde::{Deserialize, Serialize};

/// Lifetime aggregate for one operation. The running average is updated
/// incrementally; raw samples are not retained at this layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationStat {
    pub correct: u32,
    pub incorrect: u32,
    pub avg_time: f64,
    pub sample_count: u32,
}

impl OperationStat {
    /// Fold one latency sample into the running mean.
    pub fn record_time(&mut self, elapsed_secs: f64) {
        let prev_count = self.sample_count as f64;
        self.avg_time = (self.avg_time * prev_count + elapsed_secs) / (prev_count + 1.0);
        self.sample_count += 1;
    }

    pub fn total_answered(&self) -> u32 {
        self.correct + self.incorrect
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total_answered();
        if total == 0 {
            return 0.0;
        }
        self.correct as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_average_matches_arithmetic_mean() {
        let mut stat = OperationStat::default();
        for t in [2.0, 4.0, 6.0] {
            stat.record_time(t);
        }
        assert_eq!(stat.avg_time, 4.0);
        assert_eq!(stat.sample_count, 3);
    }

    #[test]
    fn test_first_sample_sets_average() {
        let mut stat = OperationStat::default();
        stat.record_time(7.5);
        assert_eq!(stat.avg_time, 7.5);
        assert_eq!(stat.sample_count, 1);
    }

    #[test]
    fn test_accuracy_zero_when_unanswered() {
        let stat = OperationStat::default();
        assert_eq!(stat.accuracy(), 0.0);
    }

    #[test]
    fn test_accuracy_percent() {
        let stat = OperationStat {
            correct: 7,
            incorrect: 3,
            ..Default::default()
        };
        assert_eq!(stat.accuracy(), 70.0);
    }
}
