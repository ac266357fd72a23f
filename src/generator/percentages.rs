use rand::Rng;
use rand::prelude::SliceRandom;
use rand::rngs::SmallRng;

use crate::generator::question::{Operation, Question};

const BASE_MENU: [i64; 14] = [10, 20, 40, 50, 60, 80, 100, 120, 150, 200, 250, 300, 400, 500];
const EXTENDED_MENU: [i64; 4] = [600, 750, 800, 1000];

/// Unlocked at level 8. Percent is a small multiple of 5/10/20/25 capped at
/// 100; the base comes from a fixed menu of round numbers (extended past
/// level 25). Only exact-integer results are accepted — a fractional product
/// rejects the draw and the caller regenerates.
pub fn percentages(level: u32, rng: &mut SmallRng) -> Option<Question> {
    let step = *[5, 10, 20, 25].choose(rng).unwrap_or(&10);
    let percent = (rng.gen_range(1..=4) * step).min(100);

    let base = if level > 25 {
        let mut menu: Vec<i64> = BASE_MENU.to_vec();
        menu.extend_from_slice(&EXTENDED_MENU);
        *menu.choose(rng).unwrap_or(&100)
    } else {
        *BASE_MENU.choose(rng).unwrap_or(&100)
    };

    if (percent * base) % 100 != 0 {
        return None;
    }
    let answer = percent * base / 100;
    Some(Question::new(
        Operation::Percentages,
        percent,
        base,
        '%',
        answer as f64,
    ))
}
