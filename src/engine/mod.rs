pub mod difficulty;
pub mod level_curve;
pub mod op_stats;
pub mod retry;
pub mod scoring;
pub mod tracker;
