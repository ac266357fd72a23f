use serde::{Deserialize, Serialize};

/// Every drillable operation, plus the `Error` sentinel produced when a
/// caller asks for a question with nothing enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Powers,
    Roots,
    Percentages,
    Error,
}

impl Operation {
    /// The seven real operations, in settings order. Excludes the sentinel.
    pub const ALL: [Operation; 7] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
        Operation::Powers,
        Operation::Roots,
        Operation::Percentages,
    ];

    /// Minimum level at which this operation may appear.
    pub fn unlock_level(self) -> u32 {
        match self {
            Operation::Powers => 10,
            Operation::Roots => 15,
            Operation::Percentages => 8,
            _ => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::Addition => "Addition",
            Operation::Subtraction => "Subtraction",
            Operation::Multiplication => "Multiplication",
            Operation::Division => "Division",
            Operation::Powers => "Powers",
            Operation::Roots => "Roots",
            Operation::Percentages => "Percentages",
            Operation::Error => "Error",
        }
    }
}

/// The exact operand/operator tuple a question's answer was computed from.
/// Identity key for retry-queue dedup, and the source of truth when a queued
/// question is re-rendered. Order-sensitive: 3+5 and 5+3 are distinct.
/// For roots, `a` is the radicand and `b` the root degree.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalForm {
    pub a: i64,
    pub b: i64,
    pub symbol: char,
}

impl CanonicalForm {
    pub fn new(a: i64, b: i64, symbol: char) -> Self {
        Self { a, b, symbol }
    }

    /// Rebuild display text from the stored tuple. Must match what the
    /// generator originally showed for the same question.
    pub fn display(&self, operation: Operation) -> String {
        match operation {
            Operation::Powers => format!("{}^{} = ?", self.a, self.b),
            Operation::Roots => {
                let radical = if self.b == 3 { '∛' } else { '√' };
                format!("{radical}{} = ?", self.a)
            }
            Operation::Percentages => format!("{}% of {} = ?", self.a, self.b),
            _ => format!("{} {} {} = ?", self.a, self.symbol, self.b),
        }
    }
}

/// One generated question. All fields are always present; the error sentinel
/// uses zeroed operands so every consumer can rely on a fixed shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub answer: f64,
    pub operation: Operation,
    pub operand_a: i64,
    pub operand_b: i64,
    pub canonical: CanonicalForm,
}

impl Question {
    pub fn new(operation: Operation, a: i64, b: i64, symbol: char, answer: f64) -> Self {
        let canonical = CanonicalForm::new(a, b, symbol);
        Self {
            text: canonical.display(operation),
            answer,
            operation,
            operand_a: a,
            operand_b: b,
            canonical,
        }
    }

    /// Sentinel returned when no operations are enabled. Callers branch on
    /// `is_error()` instead of unwinding; see the settings flow.
    pub fn error_sentinel() -> Self {
        Self {
            text: "No operations enabled".to_string(),
            answer: 0.0,
            operation: Operation::Error,
            operand_a: 0,
            operand_b: 0,
            canonical: CanonicalForm::new(0, 0, '?'),
        }
    }

    pub fn is_error(&self) -> bool {
        self.operation == Operation::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_levels() {
        assert_eq!(Operation::Addition.unlock_level(), 1);
        assert_eq!(Operation::Percentages.unlock_level(), 8);
        assert_eq!(Operation::Powers.unlock_level(), 10);
        assert_eq!(Operation::Roots.unlock_level(), 15);
    }

    #[test]
    fn test_canonical_display_basic() {
        let form = CanonicalForm::new(12, 5, '+');
        assert_eq!(form.display(Operation::Addition), "12 + 5 = ?");
    }

    #[test]
    fn test_canonical_display_roots() {
        let square = CanonicalForm::new(49, 2, '√');
        assert_eq!(square.display(Operation::Roots), "√49 = ?");
        let cube = CanonicalForm::new(27, 3, '√');
        assert_eq!(cube.display(Operation::Roots), "∛27 = ?");
    }

    #[test]
    fn test_canonical_display_percentages() {
        let form = CanonicalForm::new(25, 200, '%');
        assert_eq!(form.display(Operation::Percentages), "25% of 200 = ?");
    }

    #[test]
    fn test_commutative_pairs_are_distinct() {
        let ab = CanonicalForm::new(3, 5, '+');
        let ba = CanonicalForm::new(5, 3, '+');
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_error_sentinel_shape() {
        let q = Question::error_sentinel();
        assert!(q.is_error());
        assert_eq!(q.answer, 0.0);
        assert_eq!(q.operand_a, 0);
    }

    #[test]
    fn test_operation_serde_lowercase() {
        let json = serde_json::to_string(&Operation::Multiplication).unwrap();
        assert_eq!(json, "\"multiplication\"");
        let back: Operation = serde_json::from_str("\"roots\"").unwrap();
        assert_eq!(back, Operation::Roots);
    }
}
