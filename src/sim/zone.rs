//! Difficulty scalar and zone cycling
//!
//! The corridor alternates `Normal -> {Safe | Danger} -> Normal` on a fixed
//! distance cadence. Difficulty combines the level table with the running
//! combo and feeds spawn gaps, hazard chance, and fireball closing speed.

use super::state::{GameState, Zone};
use crate::consts::ZONE_LENGTH;
use crate::tuning;

/// Combined difficulty scalar, bounded to [1.25, 3.1] by its factors
pub fn difficulty(level: u32, combo: u32) -> f32 {
    tuning::level_factor(level) * tuning::combo_factor(combo)
}

/// Fire a zone transition once enough corridor has scrolled past.
/// Leaving `Normal` picks `Safe` or `Danger` by fair coin; leaving either
/// of those always returns to `Normal`.
pub fn update_zone(state: &mut GameState) {
    if state.zone_distance <= ZONE_LENGTH {
        return;
    }
    state.zone_distance = 0.0;

    let next = match state.progress.zone {
        Zone::Normal => {
            if state.rng.chance(0.5) {
                Zone::Safe
            } else {
                Zone::Danger
            }
        }
        Zone::Safe | Zone::Danger => Zone::Normal,
    };
    log::debug!("Zone transition: {:?} -> {:?}", state.progress.zone, next);
    state.progress.zone = next;
}
