use serde::{Deserialize, Serialize};

/// XP required to advance *from* `level` to the next one.
/// 100 at the floor, then a 1.5x geometric ramp. The curve is strictly
/// increasing up to level 99; from level 100 the true value exceeds
/// u64::MAX and the result pins there. Reaching that ceiling would take
/// ~1.8e19 earned XP, so it is unobservable in practice.
pub fn xp_required(level: u32) -> u64 {
    if level <= 1 {
        return 100;
    }
    let raw = 100.0 * 1.5f64.powi(level as i32 - 1);
    if raw >= u64::MAX as f64 {
        return u64::MAX;
    }
    raw as u64
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressionState {
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next: xp_required(2),
        }
    }
}

impl ProgressionState {
    /// Credit XP, rolling overflow into level-ups. Returns the number of
    /// levels gained so the caller can announce them.
    pub fn award(&mut self, amount: u64) -> u32 {
        self.xp += amount;
        let mut levels_gained = 0;
        while self.xp >= self.xp_to_next {
            self.xp -= self.xp_to_next;
            self.level += 1;
            self.xp_to_next = xp_required(self.level + 1);
            levels_gained += 1;
        }
        levels_gained
    }
}
