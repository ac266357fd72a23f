use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::generator::question::Operation;

/// Per-operation slice of one session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationBreakdown {
    pub correct: u32,
    pub total: u32,
    pub avg_time: f64,
}

/// Immutable summary of one finished game or practice run. Created once at
/// session end, appended to history, never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionRecord {
    pub timestamp: DateTime<Utc>,
    pub duration_secs: u32,
    pub total: u32,
    pub correct: u32,
    pub accuracy: f64,
    pub avg_time: f64,
    pub xp_gained: u64,
    pub level_at_end: u32,
    pub operations: HashMap<Operation, OperationBreakdown>,
}
