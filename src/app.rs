use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::engine::difficulty::AssessmentTier;
use crate::engine::scoring;
use crate::engine::tracker::QueueKind;
use crate::generator;
use crate::generator::distractors;
use crate::generator::hints;
use crate::generator::question::{Operation, Question};
use crate::session::game::SessionTally;
use crate::session::practice::{PracticeKind, PracticeSession};
use crate::session::record::SessionRecord;
use crate::store::json_store::JsonStore;
use crate::store::schema::ProfileData;

const SESSION_HISTORY_CAP: usize = 500;

/// What one submitted answer did to the profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: f64,
    pub xp_awarded: u64,
    pub levels_gained: u32,
}

/// Central state: config, persisted profile, and the session in flight.
/// The front-end in main.rs owns timing and I/O; everything that mutates
/// the profile goes through here.
pub struct App {
    pub config: Config,
    pub profile: ProfileData,
    pub tally: SessionTally,
    pub practice: Option<PracticeSession>,
    store: Option<JsonStore>,
    rng: SmallRng,
}

impl App {
    pub fn new(seed: Option<u64>) -> Self {
        let mut config = Config::load().unwrap_or_default();
        config.normalize();

        let store = JsonStore::new().ok();
        let profile = match store.as_ref().and_then(|s| s.load_profile()) {
            // Schema mismatch or parse failure: start over rather than
            // guess at the old data's meaning.
            Some(profile) if !profile.needs_reset() => profile,
            _ => ProfileData::default(),
        };

        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        Self {
            config,
            profile,
            tally: SessionTally::default(),
            practice: None,
            store,
            rng,
        }
    }

    #[cfg(test)]
    fn for_test(seed: u64) -> Self {
        Self {
            config: Config::default(),
            profile: ProfileData::default(),
            tally: SessionTally::default(),
            practice: None,
            store: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn set_assessment(&mut self, tier: AssessmentTier) {
        self.profile.self_assessment_tier = tier;
        self.profile.assessment_done = true;
        self.save_data();
    }

    pub fn toggle_operation(&mut self, operation: Operation, enabled: bool) {
        self.profile.operations.insert(operation, enabled);
        self.save_data();
    }

    // --- game mode ---

    pub fn start_game(&mut self) {
        self.tally = SessionTally::default();
        self.practice = None;
    }

    pub fn next_game_question(&mut self) -> Question {
        let enabled = self.profile.active_operations();
        generator::generate(
            self.profile.progression.level,
            &enabled,
            self.profile.self_assessment_tier,
            None,
            &mut self.rng,
        )
    }

    /// Score one game answer: stats, queues, tally, and XP (game mode is
    /// the only XP source).
    pub fn submit_game_answer(
        &mut self,
        question: &Question,
        user_answer: f64,
        elapsed_secs: f64,
    ) -> AnswerOutcome {
        let correct = scoring::answers_match(user_answer, question.answer);
        self.profile
            .tracker
            .record_answer(question, correct, elapsed_secs);

        let (xp_awarded, levels_gained) = if correct {
            let xp = scoring::answer_xp(
                elapsed_secs,
                self.profile.progression.level,
                self.config.multiple_choice(),
            );
            (xp, self.profile.progression.award(xp))
        } else {
            (0, 0)
        };
        self.tally
            .record(question.operation, correct, elapsed_secs, xp_awarded);

        AnswerOutcome {
            correct,
            correct_answer: question.answer,
            xp_awarded,
            levels_gained,
        }
    }

    /// Close the game session: summarize, append to history, persist.
    /// A session with no answered questions leaves no record.
    pub fn finish_game(&mut self, duration_secs: u32) -> Option<SessionRecord> {
        let record = self
            .tally
            .finalize(self.profile.progression.level, duration_secs)?;
        self.push_history(record.clone());
        self.save_data();
        Some(record)
    }

    // --- practice mode ---

    pub fn start_targeted_practice(&mut self, operation: Operation) {
        let mut session =
            PracticeSession::targeted(operation, self.config.practice_question_count);
        session.begin();
        self.practice = Some(session);
        self.tally = SessionTally::default();
    }

    /// Returns false when the matching retry queue is empty.
    pub fn start_review_practice(&mut self, kind: PracticeKind) -> bool {
        let entries = match kind {
            PracticeKind::WrongOnes => self.profile.tracker.wrong_queue.entries(),
            PracticeKind::SlowOnes => self.profile.tracker.slow_queue.entries(),
            PracticeKind::TargetedOp(_) => return false,
        };
        match PracticeSession::review(kind, entries, &mut self.rng) {
            Some(mut session) => {
                session.begin();
                self.practice = Some(session);
                self.tally = SessionTally::default();
                true
            }
            None => false,
        }
    }

    /// The next practice question, or None when the session is complete.
    /// Review questions are re-shown verbatim from their queue entry.
    pub fn next_practice_question(&mut self) -> Option<Question> {
        let session = self.practice.as_ref()?;
        if session.is_complete() {
            return None;
        }
        match session.kind {
            PracticeKind::TargetedOp(operation) => {
                let enabled = self.profile.active_operations();
                Some(generator::generate(
                    self.profile.progression.level,
                    &enabled,
                    self.profile.self_assessment_tier,
                    Some(operation),
                    &mut self.rng,
                ))
            }
            PracticeKind::WrongOnes | PracticeKind::SlowOnes => {
                session.current_entry().map(|entry| entry.to_question())
            }
        }
    }

    /// Score one practice answer. Stats and queues update exactly as in
    /// game mode, but no XP is awarded, and a correct answer retires the
    /// question from its retry queue.
    pub fn submit_practice_answer(
        &mut self,
        question: &Question,
        user_answer: f64,
        elapsed_secs: f64,
    ) -> AnswerOutcome {
        let correct = scoring::answers_match(user_answer, question.answer);
        self.profile
            .tracker
            .record_answer(question, correct, elapsed_secs);
        self.tally
            .record(question.operation, correct, elapsed_secs, 0);

        if let Some(ref mut session) = self.practice {
            if correct {
                let queue = match session.kind {
                    PracticeKind::WrongOnes => Some(QueueKind::Wrong),
                    PracticeKind::SlowOnes => Some(QueueKind::Slow),
                    PracticeKind::TargetedOp(_) => None,
                };
                if let Some(queue) = queue {
                    self.profile.tracker.remove_if_present(
                        queue,
                        &question.canonical,
                        question.operation,
                    );
                }
            }
            session.advance();
        }

        AnswerOutcome {
            correct,
            correct_answer: question.answer,
            xp_awarded: 0,
            levels_gained: 0,
        }
    }

    pub fn finish_practice(&mut self, duration_secs: u32) -> Option<SessionRecord> {
        self.practice = None;
        let record = self
            .tally
            .finalize(self.profile.progression.level, duration_secs)?;
        self.push_history(record.clone());
        self.save_data();
        Some(record)
    }

    // --- shared helpers ---

    pub fn hint(&mut self, question: &Question) -> String {
        hints::hint_for(question, &mut self.rng)
    }

    pub fn choices_for(&mut self, question: &Question) -> Vec<f64> {
        distractors::choice_options(
            question.answer,
            self.profile.progression.level,
            self.profile.self_assessment_tier,
            &mut self.rng,
        )
    }

    pub fn weaknesses(&self) -> Vec<(Operation, crate::engine::op_stats::OperationStat)> {
        self.profile
            .tracker
            .weaknesses(&self.profile.active_operations())
    }

    fn push_history(&mut self, record: SessionRecord) {
        self.profile.session_history.push(record);
        if self.profile.session_history.len() > SESSION_HISTORY_CAP {
            self.profile.session_history.remove(0);
        }
    }

    fn save_data(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save_profile(&self.profile);
        }
    }
}
