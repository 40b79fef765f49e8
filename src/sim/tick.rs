//! Fixed-order simulation step
//!
//! One pass per tick: inputs, stamina, kinematics, scroll, zone
//! bookkeeping, object resolution, then spawning. The order never varies,
//! so identical seeds and input sequences replay identically.

use glam::Vec3;

use super::state::{GameEvent, GameState, LevelOutcome, ObjectKind, RunStatus, SoundCue, WorldObject};
use super::{resolve, spawn, zone};
use crate::consts::*;
use crate::tuning;

/// Edge-triggered controls for a single tick. The embedder turns held
/// keys into one-shot flags; the sim never sees raw key state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Step one lane left
    pub left: bool,
    /// Step one lane right
    pub right: bool,
    /// Jump, or double jump while airborne
    pub jump: bool,
    /// Start a slide
    pub slide: bool,
    /// Burn the banked phoenix charge
    pub activate_phoenix: bool,
}

/// Advance the simulation by `dt` seconds. Anything but `Playing`
/// freezes the world where it stands; the menu, the shop, and both end
/// screens all hold the same snapshot.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.progress.status != RunStatus::Playing {
        return;
    }

    // Clamp runaway frames (tab switches, debugger stops) so one tick
    // can never teleport objects through the contact window
    let dt = dt.min(MAX_TICK_DT);
    state.time += dt;
    let now = state.time;

    apply_inputs(state, input, now);
    state.progress.regen_stamina(STAMINA_REGEN * dt);
    state.player.update(dt, now);

    let speed = if state.progress.buffs.shield_active(now) {
        state.progress.speed * SHIELD_SPEED_SCALE
    } else {
        state.progress.speed
    };
    let dist = speed * dt;
    state.distance += dist;
    state.zone_distance += dist;

    zone::update_zone(state);

    let difficulty = zone::difficulty(state.progress.level, state.progress.combo);
    if resolve::resolve(state, dist, dt, difficulty) == LevelOutcome::Advanced {
        enter_next_level(state);
    }

    spawn::generate(state, difficulty);
}

fn apply_inputs(state: &mut GameState, input: &TickInput, now: f32) {
    let lane_count = state.progress.lane_count;
    if input.left {
        state.player.shift_lane(-1, lane_count);
    }
    if input.right {
        state.player.shift_lane(1, lane_count);
    }

    if input.jump {
        if !state.player.airborne() {
            // Ground jumps are free
            state.player.apply_jump();
            state.push_event(GameEvent::Sound(SoundCue::Jump));
        } else {
            let max_jumps = if state.progress.has_double_jump { 2 } else { 1 };
            if state.player.jumps_used < max_jumps
                && state.progress.use_stamina(DOUBLE_JUMP_STAMINA_COST)
            {
                state.player.apply_jump();
                state.push_event(GameEvent::Sound(SoundCue::DoubleJump));
            }
        }
    }

    if input.slide && !state.player.sliding(now) && state.progress.use_stamina(SLIDE_STAMINA_COST)
    {
        state.player.start_slide(now);
    }

    if input.activate_phoenix {
        state.progress.activate_phoenix(now);
    }
}

/// Level-up world effect: sweep the far track clear and drop the shop
/// portal into the gap, then rebase the fragment schedule for the new
/// level's interval.
fn enter_next_level(state: &mut GameState) {
    state.objects.retain(|o| o.pos.z > -80.0);

    let id = state.next_object_id();
    state.objects.push(WorldObject::new(
        id,
        ObjectKind::ShopPortal,
        Vec3::new(0.0, 0.0, -100.0),
    ));

    state.next_fragment_at =
        state.distance - SPAWN_DISTANCE + tuning::fragment_interval(state.progress.level);
    log::info!(
        "Level {} begins at distance {:.0}",
        state.progress.level,
        state.distance
    );
}
