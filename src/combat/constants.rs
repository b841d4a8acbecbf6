//! Combat rules constants - all tunable values in one place

/// Added to every attack roll
pub const PROFICIENCY_BONUS: i32 = 2;

/// Die rolled for attacks and initiative
pub const ATTACK_DIE: u32 = 20;

/// Natural roll that always hits and doubles damage dice
pub const CRITICAL_ROLL: u32 = 20;

/// Natural roll that always misses
pub const FUMBLE_ROLL: u32 = 1;

/// Floor on damage from a successful hit
pub const MIN_HIT_DAMAGE: u32 = 1;
