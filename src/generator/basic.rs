use rand::Rng;
use rand::rngs::SmallRng;

use crate::engine::difficulty::DifficultyParams;
use crate::generator::question::{Operation, Question};

pub fn addition(params: &DifficultyParams, rng: &mut SmallRng) -> Question {
    let (min, max) = params.value_range;
    let a = rng.gen_range(min..=max);
    let b = rng.gen_range(min..=max);
    Question::new(Operation::Addition, a, b, '+', (a + b) as f64)
}

/// Subtrahend is drawn from `[min, a]` so the answer is never negative.
/// Below level 10 the operands are additionally swapped into order.
pub fn subtraction(level: u32, params: &DifficultyParams, rng: &mut SmallRng) -> Question {
    let (min, max) = params.value_range;
    let mut a = rng.gen_range(min..=max);
    let mut b = rng.gen_range(min..=a);
    if level < 10 && a < b {
        std::mem::swap(&mut a, &mut b);
    }
    Question::new(Operation::Subtraction, a, b, '-', (a - b) as f64)
}

/// Early levels override the bracket's multiplier range so beginners stay
/// on small times tables: 1-5 below level 4, 1-10 below level 8.
pub fn multiplication(level: u32, params: &DifficultyParams, rng: &mut SmallRng) -> Question {
    let (raw_min, raw_max) = params.mult_range.unwrap_or((2, 10));
    let mult_min = raw_min.max(1);
    let mult_max = raw_max.max(mult_min + 1);

    let (a, b) = if level <= 3 {
        (rng.gen_range(1..=5), rng.gen_range(1..=5))
    } else if level <= 7 {
        (rng.gen_range(1..=10), rng.gen_range(1..=10))
    } else {
        (
            rng.gen_range(mult_min..=mult_max),
            rng.gen_range(mult_min..=mult_max),
        )
    };
    Question::new(Operation::Multiplication, a, b, '×', (a * b) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::difficulty::{AssessmentTier, resolve};
    use rand::SeedableRng;

    #[test]
    fn test_addition_answer_and_range() {
        let mut rng = SmallRng::seed_from_u64(1);
        let params = resolve(12, AssessmentTier::Good);
        for _ in 0..500 {
            let q = addition(&params, &mut rng);
            assert_eq!(q.answer, (q.operand_a + q.operand_b) as f64);
            assert!(q.operand_a >= params.value_range.0 && q.operand_a <= params.value_range.1);
            assert!(q.operand_b >= params.value_range.0 && q.operand_b <= params.value_range.1);
        }
    }

    #[test]
    fn test_subtraction_never_negative() {
        let mut rng = SmallRng::seed_from_u64(2);
        for level in [1, 5, 9, 20, 60] {
            let params = resolve(level, AssessmentTier::Good);
            for _ in 0..500 {
                let q = subtraction(level, &params, &mut rng);
                assert!(q.answer >= 0.0, "negative answer at level {level}");
                assert_eq!(q.answer, (q.operand_a - q.operand_b) as f64);
            }
        }
    }

    #[test]
    fn test_multiplication_early_levels_stay_small() {
        let mut rng = SmallRng::seed_from_u64(3);
        let params = resolve(2, AssessmentTier::Good);
        for _ in 0..200 {
            let q = multiplication(2, &params, &mut rng);
            assert!(q.operand_a >= 1 && q.operand_a <= 5);
            assert!(q.operand_b >= 1 && q.operand_b <= 5);
        }
        for _ in 0..200 {
            let q = multiplication(6, &params, &mut rng);
            assert!(q.operand_a >= 1 && q.operand_a <= 10);
            assert!(q.operand_b >= 1 && q.operand_b <= 10);
        }
    }

    #[test]
    fn test_multiplication_uses_bracket_range() {
        let mut rng = SmallRng::seed_from_u64(4);
        let params = resolve(40, AssessmentTier::Good);
        let (lo, hi) = params.mult_range.unwrap();
        for _ in 0..200 {
            let q = multiplication(40, &params, &mut rng);
            assert!(q.operand_a >= lo && q.operand_a <= hi);
            assert!(q.operand_b >= lo && q.operand_b <= hi);
            assert_eq!(q.answer, (q.operand_a * q.operand_b) as f64);
        }
    }
}
