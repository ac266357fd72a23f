use rand::Rng;
use rand::rngs::SmallRng;

use crate::generator::question::{Operation, Question};

/// Mental-math hint for practice mode. Picks a strategy from the operands;
/// some branches randomize between a decomposition and a generic nudge so
/// repeated drills don't always show the same line.
pub fn hint_for(question: &Question, rng: &mut SmallRng) -> String {
    let a = question.canonical.a;
    let b = question.canonical.b;
    match question.operation {
        Operation::Addition => {
            if a > 10 && b > 10 && rng.gen_bool(0.7) {
                format!(
                    "Try: ({} + {}) + ({} + {})",
                    a / 10 * 10,
                    b / 10 * 10,
                    a % 10,
                    b % 10
                )
            } else {
                "Hint: count up from the larger number".to_string()
            }
        }
        Operation::Subtraction => {
            if b > 10 && a - b > 10 && rng.gen_bool(0.7) {
                format!("Try: {} - {}, then subtract {}", a, b / 10 * 10, b % 10)
            } else {
                format!("Hint: what + {b} = {a}?")
            }
        }
        Operation::Multiplication => multiplication_hint(a, b, rng),
        Operation::Division => {
            let mut hint = format!("Hint: what × {b} = {a}?");
            if b != 0 && a % b == 0 && a / b < 12 && b < 12 && rng.gen_bool(0.7) {
                hint.push_str(&format!("\nUse the {b} times table"));
            }
            hint
        }
        Operation::Powers => format!("Hint: {a} multiplied by itself {b} times"),
        Operation::Roots => format!("Hint: what number multiplied by itself {b} times gives {a}?"),
        Operation::Percentages => {
            let mut hint = format!("Hint: ({a}/100) × {b}");
            if a % 10 == 0 && rng.gen_bool(0.7) {
                hint.push_str(&format!(
                    "\n10% of {b} is {}. You need {} of these",
                    b / 10,
                    a / 10
                ));
            }
            hint
        }
        Operation::Error => String::new(),
    }
}

fn multiplication_hint(a: i64, b: i64, rng: &mut SmallRng) -> String {
    let nearest_ten = (b as f64 / 10.0).round() as i64 * 10;
    if b == 10 {
        format!("Hint: {a} × 10 = {a}0")
    } else if b == 11 && a < 100 {
        format!("Try: ({a}×10) + {a}")
    } else if b == 5 {
        format!("Try: ({a}×10) ÷ 2")
    } else if b == 25 {
        format!("Try: ({a}×100) ÷ 4")
    } else if a > 10 && b > 10 && b % 10 != 0 && (b - nearest_ten).abs() <= 2 && rng.gen_bool(0.6) {
        let diff = b - nearest_ten;
        let sign = if diff >= 0 { '+' } else { '-' };
        format!("Try: {a}×({nearest_ten}{sign}{})", diff.abs())
    } else {
        "Hint: break one number down".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_division_hint_inverts() {
        let mut rng = SmallRng::seed_from_u64(61);
        let q = Question::new(Operation::Division, 24, 6, '÷', 4.0);
        let hint = hint_for(&q, &mut rng);
        assert!(hint.contains("what × 6 = 24"));
    }

    #[test]
    fn test_multiply_by_ten_shortcut() {
        let mut rng = SmallRng::seed_from_u64(62);
        let q = Question::new(Operation::Multiplication, 7, 10, '×', 70.0);
        assert_eq!(hint_for(&q, &mut rng), "Hint: 7 × 10 = 70");
    }

    #[test]
    fn test_percentage_hint_mentions_chunks() {
        let mut rng = SmallRng::seed_from_u64(63);
        let q = Question::new(Operation::Percentages, 30, 200, '%', 60.0);
        let hint = hint_for(&q, &mut rng);
        assert!(hint.starts_with("Hint: (30/100) × 200"));
    }

    #[test]
    fn test_error_sentinel_has_no_hint() {
        let mut rng = SmallRng::seed_from_u64(64);
        assert_eq!(hint_for(&Question::error_sentinel(), &mut rng), "");
    }
}
