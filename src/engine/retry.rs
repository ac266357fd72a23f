use serde::{Deserialize, Serialize};

use crate::generator::question::{CanonicalForm, Operation, Question};

pub const WRONG_QUEUE_CAP: usize = 30;
pub const SLOW_QUEUE_CAP: usize = 20;

/// One previously wrong or slow question, held until the user re-answers it
/// correctly in a review session. Detection metadata is only present on
/// slow entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetryEntry {
    pub canonical: CanonicalForm,
    pub answer: f64,
    pub operation: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_at_detection: Option<f64>,
}

impl RetryEntry {
    pub fn from_question(question: &Question) -> Self {
        Self {
            canonical: question.canonical,
            answer: question.answer,
            operation: question.operation,
            original_time: None,
            avg_at_detection: None,
        }
    }

    /// Rebuild the question exactly as it was originally shown.
    pub fn to_question(&self) -> Question {
        Question {
            text: self.canonical.display(self.operation),
            answer: self.answer,
            operation: self.operation,
            operand_a: self.canonical.a,
            operand_b: self.canonical.b,
            canonical: self.canonical,
        }
    }

    fn matches(&self, canonical: &CanonicalForm, operation: Operation) -> bool {
        self.canonical == *canonical && self.operation == operation
    }
}

/// Bounded FIFO of retry entries. No two entries share
/// `(canonical, operation)`; once the cap is reached new entries are
/// dropped until the queue is practiced down.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetryQueue {
    entries: Vec<RetryEntry>,
}

impl RetryQueue {
    /// Append unless a duplicate exists or the queue is full. Returns
    /// whether the entry was actually stored.
    pub fn insert(&mut self, entry: RetryEntry, cap: usize) -> bool {
        if self.entries.len() >= cap {
            return false;
        }
        if self
            .entries
            .iter()
            .any(|e| e.matches(&entry.canonical, entry.operation))
        {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove at most one entry matching the key. Returns whether anything
    /// was removed. The dedup invariant means one is all there can be.
    pub fn remove_if_present(&mut self, canonical: &CanonicalForm, operation: Operation) -> bool {
        if let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.matches(canonical, operation))
        {
            self.entries.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn entries(&self) -> &[RetryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
