//! Data-driven game balance
//!
//! Per-level curves and buff economics live here so the sim modules stay
//! free of magic numbers. All functions clamp out-of-range levels rather
//! than reject them.

use crate::consts::RUN_SPEED_BASE;

/// Fragments needed to finish a level
pub const FRAGMENT_TARGET: u32 = 5;
/// Final level; finishing it wins the run
pub const MAX_LEVEL: u32 = 5;
/// Score bonus on victory
pub const VICTORY_BONUS: u64 = 20000;
/// Score awarded for breaking a breakable while sliding
pub const BREAK_SCORE: u64 = 200;
/// Score consolation when healing at full lives
pub const FULL_LIFE_HEAL_SCORE: u64 = 500;
/// Default gem value when the object carries no points override
pub const GEM_POINTS: u32 = 50;

/// Buff durations (seconds of simulation time)
pub const MAGNET_DURATION: f32 = 8.0;
pub const MULTIPLIER_DURATION: f32 = 10.0;
pub const SHIELD_DURATION: f32 = 8.0;
pub const PHOENIX_DURATION: f32 = 5.0;

/// Minimum depth separation between consecutive special buffs
pub const MIN_BUFF_SEPARATION: f32 = 40.0;
/// Heal buffs spawned per run, at most
pub const MAX_HEAL_SPAWNS: u32 = 3;

/// Buff roll bands out of 100: [0,20) magnet, [20,40) multiplier,
/// [40,52) invincible, [52,59) heal, rest plain gem
pub const BUFF_BAND_MAGNET: f32 = 20.0;
pub const BUFF_BAND_MULTIPLIER: f32 = 40.0;
pub const BUFF_BAND_INVINCIBLE: f32 = 52.0;
pub const BUFF_BAND_HEAL: f32 = 59.0;

/// Base hazard spawn chance per opportunity, before the difficulty scale
pub const HAZARD_CHANCE_NORMAL: f32 = 0.05;
pub const HAZARD_CHANCE_DANGER: f32 = 0.08;

/// Difficulty contribution of the current level
pub fn level_factor(level: u32) -> f32 {
    match level {
        0 | 1 => 1.25,
        2 => 1.35,
        3 => 1.45,
        _ => 1.55,
    }
}

/// Difficulty contribution of the running combo, capped at 2x
pub fn combo_factor(combo: u32) -> f32 {
    (1.0 + 0.05 * combo as f32).min(2.0)
}

/// Chance that a hazard opportunity uses chaos placement instead of a
/// fixed pattern
pub fn chaos_chance(level: u32) -> f32 {
    0.4 + 0.1 * level as f32
}

/// Distance between milestone fragments, growing 1.5x per level from a
/// 150-unit base
pub fn fragment_interval(level: u32) -> f32 {
    150.0 * 1.5f32.powi(level.saturating_sub(1) as i32)
}

/// Scroll-speed increase applied when entering `next_level`
pub fn level_speed_boost(next_level: u32) -> f32 {
    let factor = match next_level {
        3 | 4 => 0.10,
        5 => 0.12,
        _ => 0.15,
    };
    RUN_SPEED_BASE * factor
}

/// Scroll-speed increase per fragment collected; kept gentle at the top
/// levels so the run stays controllable
pub fn fragment_speed_boost(level: u32) -> f32 {
    let scale = if level >= 5 { 1.15 } else { 1.0 };
    RUN_SPEED_BASE * 0.08 * scale
}

/// Oscillation speed for hammers spawned in chaos mode
pub fn hammer_speed(level: u32) -> f32 {
    3.0 + 0.5 * level as f32
}

/// Oscillation speed for hammers in the rhythm pattern
pub fn rhythm_hammer_speed(level: u32) -> f32 {
    4.0 + 0.5 * level as f32
}
