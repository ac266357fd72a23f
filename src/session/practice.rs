use rand::prelude::SliceRandom;
use rand::rngs::SmallRng;

use crate::engine::retry::RetryEntry;
use crate::generator::question::Operation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PracticeKind {
    /// Freshly generated questions for one operation.
    TargetedOp(Operation),
    /// Review of the wrong-answer queue.
    WrongOnes,
    /// Review of the slow-answer queue.
    SlowOnes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PracticePhase {
    NotStarted,
    InProgress(usize),
    Complete,
}

/// One practice run. Review sessions snapshot and shuffle their retry list
/// once at start and iterate it in that fixed order — questions that fail
/// *during* the session are not interleaved back in. Stopping mid-session
/// discards the remaining plan; statistics already recorded stay committed.
#[derive(Clone, Debug)]
pub struct PracticeSession {
    pub kind: PracticeKind,
    pub phase: PracticePhase,
    plan: Vec<RetryEntry>,
    target_count: usize,
}

impl PracticeSession {
    pub fn targeted(operation: Operation, question_count: usize) -> Self {
        Self {
            kind: PracticeKind::TargetedOp(operation),
            phase: PracticePhase::NotStarted,
            plan: Vec::new(),
            target_count: question_count.max(1),
        }
    }

    /// Build a review session over a retry queue snapshot. None when there
    /// is nothing to review.
    pub fn review(kind: PracticeKind, entries: &[RetryEntry], rng: &mut SmallRng) -> Option<Self> {
        debug_assert!(matches!(
            kind,
            PracticeKind::WrongOnes | PracticeKind::SlowOnes
        ));
        if entries.is_empty() {
            return None;
        }
        let mut plan = entries.to_vec();
        plan.shuffle(rng);
        let target_count = plan.len();
        Some(Self {
            kind,
            phase: PracticePhase::NotStarted,
            plan,
            target_count,
        })
    }

    pub fn begin(&mut self) {
        if self.phase == PracticePhase::NotStarted {
            self.phase = PracticePhase::InProgress(0);
        }
    }

    /// Entry under the cursor, for review sessions. Targeted sessions
    /// generate fresh questions instead and always return None here.
    pub fn current_entry(&self) -> Option<&RetryEntry> {
        match self.phase {
            PracticePhase::InProgress(index) => self.plan.get(index),
            _ => None,
        }
    }

    /// Move past the answered question. One call per answer.
    pub fn advance(&mut self) {
        if let PracticePhase::InProgress(index) = self.phase {
            let next = index + 1;
            if next >= self.target_count {
                self.phase = PracticePhase::Complete;
            } else {
                self.phase = PracticePhase::InProgress(next);
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == PracticePhase::Complete
    }

    pub fn total(&self) -> usize {
        self.target_count
    }

    pub fn answered_so_far(&self) -> usize {
        match self.phase {
            PracticePhase::NotStarted => 0,
            PracticePhase::InProgress(index) => index,
            PracticePhase::Complete => self.target_count,
        }
    }
}
