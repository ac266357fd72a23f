use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::difficulty::AssessmentTier;
use crate::engine::level_curve::ProgressionState;
use crate::engine::tracker::PerformanceTracker;
use crate::generator::question::Operation;
use crate::session::record::SessionRecord;

pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// The four basic operations start enabled; the rest wait for their unlock
/// level and an explicit toggle.
pub fn default_enabled_operations() -> HashMap<Operation, bool> {
    Operation::ALL
        .iter()
        .map(|&op| (op, op.unlock_level() == 1))
        .collect()
}

/// Everything the trainer persists, in one record. Every field carries a
/// serde default so a partial or hand-edited file still loads; an
/// unparseable file is handled one level up in the store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub progression: ProgressionState,
    #[serde(default = "default_enabled_operations")]
    pub operations: HashMap<Operation, bool>,
    #[serde(default)]
    pub tracker: PerformanceTracker,
    #[serde(default)]
    pub session_history: Vec<SessionRecord>,
    #[serde(default)]
    pub self_assessment_tier: AssessmentTier,
    #[serde(default)]
    pub assessment_done: bool,
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            progression: ProgressionState::default(),
            operations: default_enabled_operations(),
            tracker: PerformanceTracker::default(),
            session_history: Vec::new(),
            self_assessment_tier: AssessmentTier::default(),
            assessment_done: false,
        }
    }
}

impl ProfileData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    /// Operations that are both toggled on and past their unlock level,
    /// in canonical order.
    pub fn active_operations(&self) -> Vec<Operation> {
        Operation::ALL
            .iter()
            .filter(|op| {
                self.operations.get(op).copied().unwrap_or(false)
                    && self.progression.level >= op.unlock_level()
            })
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_basic_four() {
        let profile = ProfileData::default();
        assert_eq!(
            profile.active_operations(),
            vec![
                Operation::Addition,
                Operation::Subtraction,
                Operation::Multiplication,
                Operation::Division,
            ]
        );
    }

    #[test]
    fn test_locked_operation_stays_inactive_until_level() {
        let mut profile = ProfileData::default();
        profile.operations.insert(Operation::Powers, true);
        assert!(!profile.active_operations().contains(&Operation::Powers));

        profile.progression.level = 10;
        assert!(profile.active_operations().contains(&Operation::Powers));
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        // A bare object deserializes into a full default profile.
        let profile: ProfileData = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.schema_version, SCHEMA_VERSION);
        assert_eq!(profile.progression.level, 1);
        assert!(!profile.assessment_done);
        assert!(profile.tracker.wrong_queue.is_empty());
    }

    #[test]
    fn test_unknown_schema_version_flags_reset() {
        let profile: ProfileData = serde_json::from_str(r#"{"schema_version": 99}"#).unwrap();
        assert!(profile.needs_reset());
    }
}
