pub mod basic;
pub mod distractors;
pub mod division;
pub mod hints;
pub mod percentages;
pub mod powers;
pub mod question;
pub mod roots;

use rand::prelude::SliceRandom;
use rand::rngs::SmallRng;

use crate::engine::difficulty::{self, AssessmentTier};
use question::{Operation, Question};

/// Upper bound on operation fallbacks before the deterministic addition
/// escape hatch. Keeps generation total even in pathological settings
/// (e.g. only roots enabled at level 3).
const MAX_FALLBACKS: usize = 8;

/// Produce one question for the level. `forced` pins the operation when it
/// is enabled (targeted practice); otherwise the operation is drawn
/// uniformly from `enabled`. Empty `enabled` yields the error sentinel —
/// callers branch on `Question::is_error` rather than unwinding.
///
/// Constrained operations (division, powers, roots, percentages) can reject
/// a draw; each rejection swaps to a simpler operation and retries, and
/// after `MAX_FALLBACKS` rounds we always succeed with addition.
pub fn generate(
    level: u32,
    enabled: &[Operation],
    tier: AssessmentTier,
    forced: Option<Operation>,
    rng: &mut SmallRng,
) -> Question {
    if enabled.is_empty() {
        return Question::error_sentinel();
    }
    let params = difficulty::resolve(level, tier);

    let mut op = match forced {
        Some(f) if enabled.contains(&f) => f,
        _ => *enabled.choose(rng).expect("enabled is non-empty"),
    };

    for _ in 0..MAX_FALLBACKS {
        if level < op.unlock_level() {
            op = fall_back(&[Operation::Addition, Operation::Subtraction], enabled, rng);
            continue;
        }
        match op {
            Operation::Addition => return basic::addition(&params, rng),
            Operation::Subtraction => return basic::subtraction(level, &params, rng),
            Operation::Multiplication => return basic::multiplication(level, &params, rng),
            Operation::Division => match division::division(level, &params, rng) {
                Some(q) => return q,
                None => {
                    op = fall_back(&[Operation::Addition], enabled, rng);
                }
            },
            Operation::Powers => match powers::powers(level, rng) {
                Some(q) => return q,
                None => {
                    op = fall_back(
                        &[Operation::Addition, Operation::Multiplication],
                        enabled,
                        rng,
                    );
                }
            },
            Operation::Roots => match roots::roots(level, &params, rng) {
                Some(q) => return q,
                None => {
                    op = fall_back(
                        &[Operation::Addition, Operation::Subtraction],
                        enabled,
                        rng,
                    );
                }
            },
            Operation::Percentages => match percentages::percentages(level, rng) {
                Some(q) => return q,
                None => {
                    op = fall_back(
                        &[Operation::Addition, Operation::Multiplication],
                        enabled,
                        rng,
                    );
                }
            },
            Operation::Error => break,
        }
    }

    basic::addition(&params, rng)
}

/// Pick a fallback operation: one of `candidates` if the user has it
/// enabled, else any enabled operation.
fn fall_back(candidates: &[Operation], enabled: &[Operation], rng: &mut SmallRng) -> Operation {
    let pick = *candidates.choose(rng).expect("candidates is non-empty");
    if enabled.contains(&pick) {
        pick
    } else {
        *enabled.choose(rng).expect("enabled is non-empty")
    }
}
