use rand::Rng;
use rand::prelude::SliceRandom;
use rand::rngs::SmallRng;

use crate::engine::difficulty::DifficultyParams;
use crate::generator::question::{Operation, Question};

/// Unlocked at level 15. Generates the answer first (an integer base),
/// raises it to the root degree, and presents the power as the radicand.
/// Square roots are weighted 2:1 over cube roots. A radicand more than
/// twice the level's value ceiling rejects the draw below level 40.
///
/// Canonical form stores `(radicand, degree, '√')` — the tuple the retry
/// queue re-renders, not the hidden base.
pub fn roots(level: u32, params: &DifficultyParams, rng: &mut SmallRng) -> Option<Question> {
    let degree = *[2, 2, 3].choose(rng).unwrap_or(&2);
    let max_base: i64 = if degree == 2 { 20 } else { 10 };

    let base = rng.gen_range(2..=max_base.max(2));
    let radicand = base.pow(degree as u32);

    if radicand > params.value_range.1 * 2 && level < 40 {
        return None;
    }
    Some(Question::new(
        Operation::Roots,
        radicand,
        degree,
        '√',
        base as f64,
    ))
}
