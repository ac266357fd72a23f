use serde::{Deserialize, Serialize};

/// One-time self-rating chosen on first launch. Controls how fast
/// difficulty keeps ramping once the bracket table runs out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentTier {
    Bad,
    #[default]
    Good,
    Nice,
    Perfect,
}

impl AssessmentTier {
    pub const ALL: [AssessmentTier; 4] = [
        AssessmentTier::Bad,
        AssessmentTier::Good,
        AssessmentTier::Nice,
        AssessmentTier::Perfect,
    ];

    /// Divisor for the value/multiplier range extrapolation past the last
    /// bracket. Smaller divisor, steeper ramp.
    fn range_divisor(self) -> f64 {
        match self {
            AssessmentTier::Bad => 30.0,
            AssessmentTier::Good => 20.0,
            AssessmentTier::Nice => 15.0,
            AssessmentTier::Perfect => 10.0,
        }
    }

    fn digit_divisor(self) -> u32 {
        match self {
            AssessmentTier::Bad => 20,
            AssessmentTier::Perfect => 10,
            _ => 15,
        }
    }
}

/// Numeric envelope for question generation at one level. Constructed fresh
/// per request; extrapolation copies and scales, never mutates a bracket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyParams {
    pub value_range: (i64, i64),
    pub digits: u32,
    pub mult_range: Option<(i64, i64)>,
}

struct Bracket {
    min_level: u32,
    max_level: u32,
    params: DifficultyParams,
}

const BRACKETS: [Bracket; 7] = [
    Bracket {
        min_level: 1,
        max_level: 5,
        params: DifficultyParams {
            value_range: (1, 10),
            digits: 1,
            mult_range: None,
        },
    },
    Bracket {
        min_level: 6,
        max_level: 10,
        params: DifficultyParams {
            value_range: (1, 50),
            digits: 2,
            mult_range: None,
        },
    },
    Bracket {
        min_level: 11,
        max_level: 15,
        params: DifficultyParams {
            value_range: (10, 100),
            digits: 2,
            mult_range: None,
        },
    },
    Bracket {
        min_level: 16,
        max_level: 20,
        params: DifficultyParams {
            value_range: (10, 200),
            digits: 3,
            mult_range: Some((2, 20)),
        },
    },
    Bracket {
        min_level: 21,
        max_level: 30,
        params: DifficultyParams {
            value_range: (50, 500),
            digits: 3,
            mult_range: Some((2, 50)),
        },
    },
    Bracket {
        min_level: 31,
        max_level: 50,
        params: DifficultyParams {
            value_range: (100, 1000),
            digits: 3,
            mult_range: Some((10, 100)),
        },
    },
    Bracket {
        min_level: 51,
        max_level: 100,
        params: DifficultyParams {
            value_range: (100, 9999),
            digits: 4,
            mult_range: Some((10, 200)),
        },
    },
];

const MAX_DIGITS: u32 = 6;

/// Resolve the difficulty envelope for a level. Pure: same inputs, same
/// params. Past the last bracket the envelope is extrapolated linearly with
/// tier-dependent divisors, then repaired so callers never see an inverted
/// range.
pub fn resolve(level: u32, tier: AssessmentTier) -> DifficultyParams {
    let mut params = DifficultyParams {
        value_range: (1, 10),
        digits: 1,
        mult_range: Some((2, 10)),
    };
    for bracket in &BRACKETS {
        if bracket.min_level <= level && level <= bracket.max_level {
            params = bracket.params;
            break;
        }
    }

    let last = &BRACKETS[BRACKETS.len() - 1];
    if level > last.max_level {
        params = last.params;
        let overshoot = level - last.max_level;
        let factor = 1.0 + overshoot as f64 / tier.range_divisor();

        params.value_range = (
            (params.value_range.0 as f64 * factor) as i64,
            (params.value_range.1 as f64 * factor) as i64,
        );
        if let Some((lo, hi)) = params.mult_range {
            params.mult_range = Some(((lo as f64 * factor) as i64, (hi as f64 * factor) as i64));
        }
        params.digits = (params.digits + overshoot / tier.digit_divisor()).min(MAX_DIGITS);
    }

    params.value_range = repair_range(params.value_range);
    if let Some(range) = params.mult_range {
        let (lo, hi) = repair_range(range);
        params.mult_range = Some((lo.max(1), hi));
    }
    params
}

/// Collapse an inverted or degenerate range to the nearest valid one.
fn repair_range((lo, hi): (i64, i64)) -> (i64, i64) {
    if lo < hi {
        (lo, hi)
    } else if hi > 1 {
        ((hi - 1).max(1), hi)
    } else {
        (1, 2)
    }
}
