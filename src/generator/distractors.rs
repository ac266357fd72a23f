use rand::Rng;
use rand::prelude::SliceRandom;
use rand::rngs::SmallRng;

use crate::engine::difficulty::{AssessmentTier, resolve};

/// Four answer buttons for multiple-choice mode: the correct answer plus
/// three plausible distractors, shuffled. The layered fallbacks at the
/// bottom make the four-distinct-values guarantee unconditional, which is
/// the property the UI relies on.
///
/// Negative distractors are suppressed unless the answer itself is
/// negative.
pub fn choice_options(
    correct: f64,
    level: u32,
    tier: AssessmentTier,
    rng: &mut SmallRng,
) -> Vec<f64> {
    let params = resolve(level, tier);
    let is_int = correct.fract() == 0.0;
    let mut options = vec![correct];

    if correct == 1.0 {
        // Tiny answers get a hand-picked confusion set; proportional offsets
        // around 1 all collapse to the same few values.
        let mut candidates = vec![0.0, 2.0, 3.0, correct * 2.0, correct + rng.gen_range(1..=3) as f64];
        if correct * 10.0 <= 20.0 {
            candidates.push(correct * 10.0);
        }
        candidates.shuffle(rng);
        for cand in candidates {
            if options.len() < 4 {
                push_unique(&mut options, cand);
            }
        }
    } else {
        let mut variation = ((correct * 0.1) as i64).max(1);
        variation = variation.min(params.value_range.1 / 10);
        if variation == 0 {
            variation = if correct == 0.0 { rng.gen_range(1..=5) } else { 1 };
        }

        let offset_types = [-1.0, 1.0, -2.0, 2.0, -0.5, 0.5, -0.1, 0.1];
        let mut attempts = 0;
        while options.len() < 4 && attempts < 20 {
            let offset_type = *offset_types.choose(rng).unwrap_or(&1.0);
            let magnitude = rng.gen_range(1..=variation + (level / 5) as i64) as f64;
            let offset = magnitude * offset_type;

            let distractor = if !is_int || offset.abs() < 1.0 {
                let raw = correct + offset;
                if is_int && (raw - raw.round()).abs() > 1e-9 {
                    round1(raw)
                } else if is_int {
                    raw.round()
                } else {
                    raw
                }
            } else {
                correct + offset.round()
            };

            if distractor >= 0.0 || correct < 0.0 {
                push_unique(&mut options, distractor);
            }
            attempts += 1;
        }
    }

    // Top up with coarse arithmetic variants when proportional offsets
    // produced too few unique values.
    let base = if correct == 0.0 { 1.0 } else { correct };
    let mut attempts = 0;
    while options.len() < 4 && attempts < 20 {
        let distractor = match rng.gen_range(0..3) {
            0 => base + rng.gen_range(1..=5) as f64,
            1 => base - rng.gen_range(1..=5) as f64,
            _ => {
                let scaled = base * *[2.0, 3.0, 0.5].choose(rng).unwrap_or(&2.0);
                if is_int { scaled.round() } else { scaled }
            }
        };
        if distractor >= 0.0 || correct < 0.0 {
            push_unique(&mut options, distractor);
        }
        attempts += 1;
    }

    // Deterministic fill: step outward from the correct answer.
    let mut idx = 1.0;
    let mut safety = 0;
    while options.len() < 4 && safety < 20 {
        let plus = correct + idx;
        let minus = correct - idx;
        push_unique(&mut options, plus);
        if options.len() == 4 {
            break;
        }
        if minus >= 0.0 || correct < 0.0 {
            push_unique(&mut options, minus);
        }
        idx += 1.0;
        safety += 1;
    }

    // Last resort: values safely above everything already present.
    while options.len() < 4 {
        let ceiling = options.iter().cloned().fold(correct, f64::max) + 10.0;
        push_unique(&mut options, ceiling + rng.gen_range(1..=5) as f64);
    }

    options.shuffle(rng);
    options.truncate(4);
    options
}

fn push_unique(options: &mut Vec<f64>, value: f64) {
    if !options.iter().any(|&v| v == value) {
        options.push(value);
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn assert_valid(options: &[f64], correct: f64) {
        assert_eq!(options.len(), 4, "expected 4 options, got {options:?}");
        let matches = options.iter().filter(|&&v| v == correct).count();
        assert_eq!(matches, 1, "correct answer count wrong in {options:?}");
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(options[i], options[j], "duplicate in {options:?}");
            }
        }
    }

    #[test]
    fn test_always_four_distinct_with_correct_once() {
        let mut rng = SmallRng::seed_from_u64(51);
        let answers = [0.0, 1.0, 2.0, 7.0, 42.0, 100.0, 625.0, 9999.0, 12.5, -8.0];
        for _ in 0..100 {
            for &correct in &answers {
                for level in [1, 8, 20, 60, 150] {
                    let options = choice_options(correct, level, AssessmentTier::Good, &mut rng);
                    assert_valid(&options, correct);
                }
            }
        }
    }

    #[test]
    fn test_no_negative_options_for_positive_answers() {
        let mut rng = SmallRng::seed_from_u64(52);
        for _ in 0..500 {
            let options = choice_options(3.0, 5, AssessmentTier::Good, &mut rng);
            for &v in &options {
                assert!(v >= 0.0, "negative distractor {v} for positive answer");
            }
        }
    }

    #[test]
    fn test_negative_answer_allows_negative_distractors() {
        let mut rng = SmallRng::seed_from_u64(53);
        let options = choice_options(-10.0, 20, AssessmentTier::Good, &mut rng);
        assert_valid(&options, -10.0);
    }

    #[test]
    fn test_answer_of_one_uses_small_confusion_set() {
        let mut rng = SmallRng::seed_from_u64(54);
        for _ in 0..200 {
            let options = choice_options(1.0, 3, AssessmentTier::Good, &mut rng);
            assert_valid(&options, 1.0);
            // Everything in the hand-picked set stays single/double digit.
            for &v in &options {
                assert!(v <= 20.0);
            }
        }
    }

    #[test]
    fn test_order_is_randomized() {
        let mut rng = SmallRng::seed_from_u64(55);
        let mut position_sum = 0;
        for _ in 0..200 {
            let options = choice_options(50.0, 20, AssessmentTier::Good, &mut rng);
            position_sum += options.iter().position(|&v| v == 50.0).unwrap();
        }
        // Mean position should hover around 1.5; a fixed slot would pin it.
        assert!(position_sum > 100 && position_sum < 500);
    }
}
