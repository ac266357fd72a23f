use rand::Rng;
use rand::rngs::SmallRng;

use crate::generator::question::{Operation, Question};

/// Result ceiling below level 40. Keeps early power questions mental-math
/// sized instead of five-digit monsters.
const LOW_LEVEL_RESULT_CAP: i64 = 10_000;

/// Unlocked at level 10. Base and exponent bounds widen with level; an
/// oversized result rejects the draw so the caller falls back to
/// addition/multiplication.
pub fn powers(level: u32, rng: &mut SmallRng) -> Option<Question> {
    let base_max: i64 = if level < 20 {
        15
    } else if level < 30 {
        10
    } else {
        20
    };
    let exp_max: i64 = if level < 25 {
        3
    } else if level < 40 {
        4
    } else {
        3
    };

    let base = rng.gen_range(2..=base_max.max(2));
    let exponent = rng.gen_range(2..=exp_max);

    let answer = base.checked_pow(exponent as u32)?;
    if answer > LOW_LEVEL_RESULT_CAP && level < 40 {
        return None;
    }
    Some(Question::new(
        Operation::Powers,
        base,
        exponent,
        '^',
        answer as f64,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_powers_answer_correct() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..500 {
            if let Some(q) = powers(15, &mut rng) {
                assert_eq!(q.answer, (q.operand_a.pow(q.operand_b as u32)) as f64);
                assert!(q.operand_a >= 2);
                assert!(q.operand_b >= 2);
            }
        }
    }

    #[test]
    fn test_low_level_results_capped() {
        let mut rng = SmallRng::seed_from_u64(12);
        for _ in 0..500 {
            if let Some(q) = powers(20, &mut rng) {
                assert!(q.answer <= LOW_LEVEL_RESULT_CAP as f64);
            }
        }
    }

    #[test]
    fn test_cap_no_longer_rejects_past_level_forty() {
        let mut rng = SmallRng::seed_from_u64(13);
        for _ in 0..500 {
            assert!(powers(45, &mut rng).is_some());
        }
    }

    #[test]
    fn test_wide_exponent_band_can_reject() {
        // Levels 25-39 allow exponent 4; 15^4 = 50625 trips the cap.
        let mut rng = SmallRng::seed_from_u64(14);
        let mut rejected = false;
        for _ in 0..2000 {
            if powers(30, &mut rng).is_none() {
                rejected = true;
                break;
            }
        }
        assert!(rejected, "expected at least one oversized draw");
    }
}
