use rand::Rng;
use rand::rngs::SmallRng;

use crate::engine::difficulty::DifficultyParams;
use crate::generator::question::{Operation, Question};

const MAX_ATTEMPTS: usize = 100;

/// Build an exact-quotient division by working backwards: pick a divisor and
/// a quotient, multiply, and accept only if the dividend lands in the
/// level's value range. Naive forward sampling overshoots the range almost
/// every time at low levels, so the attempt cap plus the caller's addition
/// fallback is what keeps generation total.
pub fn division(level: u32, params: &DifficultyParams, rng: &mut SmallRng) -> Option<Question> {
    let (min_val, max_val) = params.value_range;
    let mult_range = params.mult_range.unwrap_or((2, 12));

    for _ in 0..MAX_ATTEMPTS {
        let div_min = if level > 3 { 2 } else { 1 };
        let div_max = (mult_range.1 / 2 + 1).max(div_min + 1);
        let divisor = rng.gen_range(div_min..=div_max).max(1);

        let quotient_max = mult_range.0.max(2);
        let quotient = rng.gen_range(1..=quotient_max);

        let dividend = divisor * quotient;
        if min_val <= dividend && dividend <= max_val {
            return Some(Question::new(
                Operation::Division,
                dividend,
                divisor,
                '÷',
                quotient as f64,
            ));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::difficulty::{AssessmentTier, resolve};
    use rand::SeedableRng;

    #[test]
    fn test_division_is_always_exact() {
        let mut rng = SmallRng::seed_from_u64(7);
        for level in [1, 4, 10, 18, 25, 40, 80] {
            let params = resolve(level, AssessmentTier::Good);
            for _ in 0..300 {
                if let Some(q) = division(level, &params, &mut rng) {
                    assert_eq!(q.operand_a % q.operand_b, 0);
                    assert_eq!(q.answer, (q.operand_a / q.operand_b) as f64);
                    assert!(
                        q.operand_a >= params.value_range.0
                            && q.operand_a <= params.value_range.1,
                        "dividend {} outside range at level {level}",
                        q.operand_a
                    );
                }
            }
        }
    }

    #[test]
    fn test_divisor_floor_above_level_three() {
        let mut rng = SmallRng::seed_from_u64(8);
        let params = resolve(10, AssessmentTier::Good);
        for _ in 0..300 {
            if let Some(q) = division(10, &params, &mut rng) {
                assert!(q.operand_b >= 2);
            }
        }
    }

    #[test]
    fn test_unsatisfiable_range_gives_none() {
        let mut rng = SmallRng::seed_from_u64(9);
        // Dividend can be at most (12/2+1) * 2 = 14; a floor of 5000 is
        // unreachable, so the attempt cap must trip.
        let params = DifficultyParams {
            value_range: (5000, 6000),
            digits: 4,
            mult_range: Some((2, 12)),
        };
        assert!(division(20, &params, &mut rng).is_none());
    }
}
