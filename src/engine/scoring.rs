/// XP for one correct game-mode answer: flat base, a speed bonus, and a
/// small level kicker. Multiple-choice answers are worth 70% — guessing
/// among four buttons is easier than typing the number.
pub fn answer_xp(elapsed_secs: f64, level: u32, multiple_choice: bool) -> u64 {
    let mut xp = 10u64;
    if elapsed_secs < 3.0 {
        xp += 5;
    } else if elapsed_secs < 5.0 {
        xp += 2;
    }
    xp += (level / 5) as u64;
    if multiple_choice {
        xp = (xp as f64 * 0.7) as u64;
    }
    xp
}

const FLOAT_REL_TOLERANCE: f64 = 1e-5;

/// Integer answers compare exactly; fractional ones within a relative
/// tolerance, since the user typed a decimal approximation.
pub fn answers_match(user: f64, correct: f64) -> bool {
    if correct.fract() == 0.0 {
        user == correct
    } else {
        (user - correct).abs() <= FLOAT_REL_TOLERANCE * correct.abs().max(user.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_answer_bonus() {
        assert_eq!(answer_xp(2.0, 1, false), 15);
        assert_eq!(answer_xp(4.0, 1, false), 12);
        assert_eq!(answer_xp(8.0, 1, false), 10);
    }

    #[test]
    fn test_level_kicker() {
        assert_eq!(answer_xp(8.0, 25, false), 15);
        assert_eq!(answer_xp(2.0, 50, false), 25);
    }

    #[test]
    fn test_multiple_choice_discount() {
        // 15 * 0.7 = 10.5, truncated.
        assert_eq!(answer_xp(2.0, 1, true), 10);
    }

    #[test]
    fn test_integer_answers_compare_exactly() {
        assert!(answers_match(42.0, 42.0));
        assert!(!answers_match(42.00001, 42.0));
    }

    #[test]
    fn test_fractional_answers_use_tolerance() {
        assert!(answers_match(2.5000001, 2.5));
        assert!(!answers_match(2.6, 2.5));
    }
}
