//! Procedural spawn generation
//!
//! Keeps the track populated ahead of the player. Milestone fragments run
//! on their own distance schedule and preempt everything else; safe zones
//! hand out give-away sets; everywhere else a difficulty-scaled roll
//! decides between chaos placement (random lanes and kinds with a safety
//! pass) and one of the authored patterns.

use std::f32::consts::PI;

use glam::Vec3;

use super::state::{GameState, HammerAxis, ObjectKind, WorldObject, Zone, palette};
use crate::consts::*;
use crate::{lane_center_x, tuning};

/// Chance that a hazard wave is chased by a buff drop
const BUFF_FOLLOW_CHANCE: f32 = 0.15;
/// Chance a chaos spike carries a bonus gem overhead
const OBSTACLE_GEM_CHANCE: f32 = 0.5;

/// Kind pool for chaos placement
const CHAOS_POOL: [ObjectKind; 6] = [
    ObjectKind::Obstacle,
    ObjectKind::TallObstacle,
    ObjectKind::FlyingObstacle,
    ObjectKind::Pit,
    ObjectKind::Hammer,
    ObjectKind::Enemy,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Wall,
    Hurdle,
    LowHigh,
    Tunnel,
    Needle,
    Rhythm,
    Barrage,
    TrickyWall,
    MixedBarrier,
}

const PATTERNS: [Pattern; 9] = [
    Pattern::Wall,
    Pattern::Hurdle,
    Pattern::LowHigh,
    Pattern::Tunnel,
    Pattern::Needle,
    Pattern::Rhythm,
    Pattern::Barrage,
    Pattern::TrickyWall,
    Pattern::MixedBarrier,
];

#[derive(Debug, Clone, Copy)]
enum Giveaway {
    CoinLine,
    PillarGate,
    CoinArch,
}

const GIVEAWAYS: [Giveaway; 3] = [Giveaway::CoinLine, Giveaway::PillarGate, Giveaway::CoinArch];

/// Top up the track when the spawn horizon opens. `difficulty` tightens
/// the gap between waves and raises the hazard chance.
pub fn generate(state: &mut GameState, difficulty: f32) {
    // Fireballs travel under their own power and do not hold the horizon
    let furthest = state
        .objects
        .iter()
        .filter(|o| o.kind != ObjectKind::Fireball)
        .map(|o| o.pos.z)
        .fold(f32::INFINITY, f32::min);
    let furthest = if furthest.is_finite() { furthest } else { -20.0 };

    if furthest <= -SPAWN_DISTANCE {
        return;
    }

    let min_gap = ((16.0 + state.progress.speed * 0.4) / difficulty).max(10.0);
    let spawn_z = (furthest - min_gap).min(-SPAWN_DISTANCE);

    if state.distance >= state.next_fragment_at
        && state.progress.fragments_collected < tuning::FRAGMENT_TARGET
    {
        spawn_fragment(state, spawn_z);
        return;
    }

    if state.progress.zone == Zone::Safe {
        spawn_giveaway(state, spawn_z);
        return;
    }

    let base_chance = match state.progress.zone {
        Zone::Danger => tuning::HAZARD_CHANCE_DANGER,
        _ => tuning::HAZARD_CHANCE_NORMAL,
    };
    if !state.rng.chance(base_chance * difficulty) {
        return;
    }

    if state.rng.chance(tuning::chaos_chance(state.progress.level)) {
        spawn_chaos_wave(state, spawn_z);
    } else {
        spawn_pattern(state, spawn_z);
    }

    if state.rng.chance(BUFF_FOLLOW_CHANCE) {
        let lane = state.rng.lane(state.progress.lane_count);
        spawn_buff(state, lane_center_x(lane), spawn_z + 5.0);
    }
}

/// Push a fresh object and hand it back for decoration
fn place(state: &mut GameState, kind: ObjectKind, x: f32, y: f32, z: f32) -> &mut WorldObject {
    let id = state.next_object_id();
    state.objects.push(WorldObject::new(id, kind, Vec3::new(x, y, z)));
    let last = state.objects.len() - 1;
    &mut state.objects[last]
}

fn place_gem(state: &mut GameState, x: f32, y: f32, z: f32, points: u32) {
    let gem = place(state, ObjectKind::Gem, x, y, z);
    gem.color = Some(palette::GOLD);
    gem.points = Some(points);
}

fn spawn_fragment(state: &mut GameState, spawn_z: f32) {
    let lane = state.rng.lane(state.progress.lane_count);
    let fragment = place(
        state,
        ObjectKind::Fragment,
        lane_center_x(lane),
        1.5,
        spawn_z,
    );
    fragment.color = Some(palette::GOLD);

    state.next_fragment_at += tuning::fragment_interval(state.progress.level);
    log::debug!(
        "Fragment placed at {:.0}, next due at distance {:.0}",
        spawn_z,
        state.next_fragment_at
    );
}

/// Safe-zone sets contain no hazards in the play lanes
fn spawn_giveaway(state: &mut GameState, spawn_z: f32) {
    match state.rng.pick(&GIVEAWAYS) {
        Giveaway::CoinLine => {
            let lane = state.rng.lane(state.progress.lane_count);
            let x = lane_center_x(lane);
            for k in 0..5 {
                place_gem(state, x, 1.2, spawn_z - k as f32 * 2.0, tuning::GEM_POINTS);
            }
        }
        Giveaway::PillarGate => {
            // Decorative frame outside the play lanes, prize in the middle
            for side in [-1.0f32, 1.0] {
                let pillar = place(
                    state,
                    ObjectKind::TallObstacle,
                    side * 2.0 * LANE_WIDTH,
                    2.0,
                    spawn_z,
                );
                pillar.color = Some(palette::PILLAR);
            }
            spawn_buff(state, 0.0, spawn_z);
        }
        Giveaway::CoinArch => {
            for k in 0..5 {
                let y = (k as f32 / 4.0 * PI).sin() * 2.0 + 1.2;
                place_gem(state, 0.0, y, spawn_z - k as f32 * 1.5, tuning::GEM_POINTS);
            }
        }
    }
}

/// Random lanes, random kinds, then a safety pass so the wave stays
/// clearable
fn spawn_chaos_wave(state: &mut GameState, spawn_z: f32) {
    let level = state.progress.level;
    let lane_count = state.progress.lane_count;
    let max_lane = (lane_count / 2) as i32;

    let roll = state.rng.unit();
    let lanes_to_spawn: usize = if level >= 4 {
        if roll > 0.85 {
            3
        } else if roll > 0.4 {
            2
        } else {
            1
        }
    } else if level == 1 {
        if roll > 0.7 { 2 } else { 1 }
    } else if roll > 0.6 {
        2
    } else {
        1
    };
    let lanes_to_spawn = lanes_to_spawn.min(lane_count as usize);

    let mut lanes: Vec<i32> = (-max_lane..=max_lane).collect();
    state.rng.shuffle(&mut lanes);
    lanes.truncate(lanes_to_spawn);

    let mut kinds: Vec<ObjectKind> = (0..lanes_to_spawn)
        .map(|_| state.rng.pick(&CHAOS_POOL))
        .collect();

    // A solid wall of tall obstacles cannot be cleared; crack the middle
    if kinds.len() == 3 && kinds.iter().all(|k| *k == ObjectKind::TallObstacle) {
        kinds[1] = ObjectKind::Breakable;
    }

    log::debug!("Chaos wave, {} lane(s) at {:.0}", lanes.len(), spawn_z);

    let osc_speed = tuning::hammer_speed(level);
    for (lane, drawn) in lanes.into_iter().zip(kinds) {
        // A cut of the drawn enemies demote to crates
        let kind = if drawn == ObjectKind::Enemy && state.rng.unit() > 0.7 {
            ObjectKind::Breakable
        } else {
            drawn
        };

        let x = lane_center_x(lane);
        let y = match kind {
            ObjectKind::Hammer => 4.0,
            ObjectKind::FlyingObstacle => 1.4,
            ObjectKind::TallObstacle => 2.0,
            ObjectKind::Enemy => 0.5,
            _ => 0.05,
        };

        let hammer_setup = if kind == ObjectKind::Hammer {
            let phase = state.rng.unit() * PI;
            let axis = if state.rng.chance(0.5) {
                HammerAxis::Horizontal
            } else {
                HammerAxis::Vertical
            };
            Some((phase, axis))
        } else {
            None
        };
        let bonus_gem = kind == ObjectKind::Obstacle && state.rng.chance(OBSTACLE_GEM_CHANCE);

        let obj = place(state, kind, x, y, spawn_z);
        if let Some((phase, axis)) = hammer_setup {
            obj.phase_offset = phase;
            obj.osc_speed = osc_speed;
            obj.axis = axis;
        }
        if bonus_gem {
            place_gem(state, x, 2.5, spawn_z, tuning::GEM_POINTS);
        }
    }
}

fn spawn_pattern(state: &mut GameState, spawn_z: f32) {
    let lane_count = state.progress.lane_count;
    let max_lane = (lane_count / 2) as i32;
    let pattern = state.rng.pick(&PATTERNS);
    log::debug!("Pattern {:?} at {:.0}", pattern, spawn_z);

    match pattern {
        // One open lane with a gem, the rest walled off
        Pattern::Wall => {
            let open = state.rng.lane(lane_count);
            for lane in -max_lane..=max_lane {
                let x = lane_center_x(lane);
                if lane == open {
                    place_gem(state, x, 1.2, spawn_z, tuning::GEM_POINTS);
                } else {
                    place(state, ObjectKind::TallObstacle, x, 2.0, spawn_z);
                }
            }
        }

        // Two spikes in a row; the gem rewards the jump over the first
        Pattern::Hurdle => {
            let x = lane_center_x(state.rng.lane(lane_count));
            place(state, ObjectKind::Obstacle, x, 0.05, spawn_z);
            place_gem(state, x, 2.5, spawn_z, tuning::GEM_POINTS);
            place(state, ObjectKind::Obstacle, x, 0.05, spawn_z - 8.0);
        }

        // Jump, then immediately slide
        Pattern::LowHigh => {
            let x = lane_center_x(state.rng.lane(lane_count));
            place(state, ObjectKind::Obstacle, x, 0.05, spawn_z);
            place(state, ObjectKind::FlyingObstacle, x, 1.4, spawn_z - 6.0);
            place_gem(state, x, 0.5, spawn_z - 6.0, tuning::GEM_POINTS);
        }

        // A pair of arches long enough to force a held slide
        Pattern::Tunnel => {
            let x = lane_center_x(state.rng.lane(lane_count));
            place(state, ObjectKind::FlyingObstacle, x, 1.4, spawn_z);
            place(state, ObjectKind::FlyingObstacle, x, 1.4, spawn_z - 6.0);
        }

        // Walls on the sides, a pit in the middle, a high prize over it
        Pattern::Needle => {
            place(state, ObjectKind::TallObstacle, -LANE_WIDTH, 2.0, spawn_z);
            place(state, ObjectKind::TallObstacle, LANE_WIDTH, 2.0, spawn_z);
            place(state, ObjectKind::Pit, 0.0, 0.02, spawn_z);
            place_gem(state, 0.0, 3.0, spawn_z, 100);
        }

        // Three staggered hammers; the middle one swings sideways
        Pattern::Rhythm => {
            let osc_speed = tuning::rhythm_hammer_speed(state.progress.level);
            for i in -1..=1i32 {
                let hammer = place(state, ObjectKind::Hammer, lane_center_x(i), 4.0, spawn_z);
                hammer.axis = if i == 0 {
                    HammerAxis::Horizontal
                } else {
                    HammerAxis::Vertical
                };
                hammer.phase_offset = (i + 1) as f32;
                hammer.osc_speed = osc_speed;
            }
        }

        // The same threat in every lane at once
        Pattern::Barrage => {
            #[derive(Clone, Copy)]
            enum Volley {
                Spikes,
                Flyers,
                Hammers,
            }
            let volley = state
                .rng
                .pick(&[Volley::Spikes, Volley::Flyers, Volley::Hammers]);
            for lane in -max_lane..=max_lane {
                let x = lane_center_x(lane);
                match volley {
                    Volley::Spikes => {
                        place(state, ObjectKind::Obstacle, x, 0.05, spawn_z);
                    }
                    Volley::Flyers => {
                        place(state, ObjectKind::FlyingObstacle, x, 1.4, spawn_z);
                    }
                    Volley::Hammers => {
                        let hammer = place(state, ObjectKind::Hammer, x, 4.0, spawn_z);
                        hammer.axis = HammerAxis::Vertical;
                        hammer.phase_offset = (lane + max_lane) as f32 * 0.5;
                        hammer.osc_speed = 5.0;
                    }
                }
            }
            if state.rng.chance(0.5) {
                place_gem(state, 0.0, 2.5, spawn_z - 4.0, 100);
            }
        }

        // Looks like a wall, but one lane only needs the right move
        Pattern::TrickyWall => {
            let action_lane = state.rng.lane(lane_count);
            let low_action = state.rng.chance(0.5);
            for lane in -max_lane..=max_lane {
                let x = lane_center_x(lane);
                if lane != action_lane {
                    place(state, ObjectKind::TallObstacle, x, 2.0, spawn_z);
                } else if low_action {
                    place(state, ObjectKind::Obstacle, x, 0.05, spawn_z);
                    place_gem(state, x, 2.5, spawn_z, tuning::GEM_POINTS);
                } else {
                    place(state, ObjectKind::FlyingObstacle, x, 1.4, spawn_z);
                    place_gem(state, x, 0.5, spawn_z, tuning::GEM_POINTS);
                }
            }
        }

        // Alternating jump/slide demands across the lanes
        Pattern::MixedBarrier => {
            let (primary, secondary) = if state.rng.chance(0.5) {
                ((ObjectKind::Obstacle, 0.05), (ObjectKind::FlyingObstacle, 1.4))
            } else {
                ((ObjectKind::FlyingObstacle, 1.4), (ObjectKind::Obstacle, 0.05))
            };
            for lane in -max_lane..=max_lane {
                let (kind, y) = if (lane + max_lane) % 2 == 0 {
                    primary
                } else {
                    secondary
                };
                place(state, kind, lane_center_x(lane), y, spawn_z);
            }
        }
    }
}

/// Buff drop with anti-clustering: too close to the previous special and
/// the roll degrades to a plain gem. The heal band additionally honors
/// its per-run cap.
fn spawn_buff(state: &mut GameState, x: f32, z: f32) {
    if (z - state.last_buff_depth).abs() < tuning::MIN_BUFF_SEPARATION {
        place_gem(state, x, 1.2, z, tuning::GEM_POINTS);
        return;
    }

    let roll = state.rng.unit() * 100.0;
    let heal_allowed = state.progress.heals_spawned < tuning::MAX_HEAL_SPAWNS;

    let special = if roll < tuning::BUFF_BAND_MAGNET {
        Some((ObjectKind::BuffMagnet, palette::MAGNET))
    } else if roll < tuning::BUFF_BAND_MULTIPLIER {
        Some((ObjectKind::BuffMultiplier, palette::MULTIPLIER))
    } else if roll < tuning::BUFF_BAND_INVINCIBLE {
        Some((ObjectKind::BuffInvincible, palette::GOLD))
    } else if roll < tuning::BUFF_BAND_HEAL && heal_allowed {
        state.progress.heals_spawned += 1;
        Some((ObjectKind::BuffHeal, palette::HEAL))
    } else {
        None
    };

    match special {
        Some((kind, color)) => {
            let buff = place(state, kind, x, 1.2, z);
            buff.color = Some(color);
            state.last_buff_depth = z;
        }
        None => place_gem(state, x, 1.2, z, tuning::GEM_POINTS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start_run();
        state
    }

    fn is_buff(kind: ObjectKind) -> bool {
        matches!(
            kind,
            ObjectKind::BuffMagnet
                | ObjectKind::BuffMultiplier
                | ObjectKind::BuffInvincible
                | ObjectKind::BuffHeal
        )
    }

    #[test]
    fn test_no_spawn_while_horizon_occupied() {
        let mut state = playing_state(7);
        let id = state.next_object_id();
        state.objects.push(WorldObject::new(
            id,
            ObjectKind::Gem,
            Vec3::new(0.0, 1.2, -130.0),
        ));
        for _ in 0..100 {
            generate(&mut state, 2.0);
        }
        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn test_fragment_preempts_everything() {
        let mut state = playing_state(7);
        state.distance = state.next_fragment_at;
        generate(&mut state, 1.25);

        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].kind, ObjectKind::Fragment);
        // Schedule advanced by the level-1 interval
        assert_eq!(state.next_fragment_at, 300.0);
    }

    #[test]
    fn test_fragment_capped_at_level_target() {
        let mut state = playing_state(7);
        state.distance = state.next_fragment_at;
        state.progress.fragments_collected = tuning::FRAGMENT_TARGET;
        for _ in 0..200 {
            generate(&mut state, 1.25);
            if !state.objects.is_empty() {
                break;
            }
        }
        assert!(
            !state
                .objects
                .iter()
                .any(|o| o.kind == ObjectKind::Fragment)
        );
    }

    #[test]
    fn test_gap_narrows_with_difficulty() {
        // Speed 22.8 makes the raw gap (16 + 9.12) / difficulty
        let mut easy = playing_state(7);
        easy.distance = easy.next_fragment_at;
        let id = easy.next_object_id();
        easy.objects
            .push(WorldObject::new(id, ObjectKind::Gem, Vec3::new(0.0, 1.2, -110.0)));
        generate(&mut easy, 1.25);
        let easy_z = easy.objects.last().map(|o| o.pos.z).unwrap();
        assert!((easy_z - (-110.0 - 25.12 / 1.25)).abs() < 1e-3);

        let mut hard = playing_state(7);
        hard.distance = hard.next_fragment_at;
        let id = hard.next_object_id();
        hard.objects
            .push(WorldObject::new(id, ObjectKind::Gem, Vec3::new(0.0, 1.2, -110.0)));
        generate(&mut hard, 2.0);
        let hard_z = hard.objects.last().map(|o| o.pos.z).unwrap();
        assert!((hard_z - (-110.0 - 25.12 / 2.0)).abs() < 1e-3);

        assert!(hard_z > easy_z);
    }

    #[test]
    fn test_gap_never_below_floor() {
        let mut state = playing_state(7);
        state.distance = state.next_fragment_at;
        let id = state.next_object_id();
        state
            .objects
            .push(WorldObject::new(id, ObjectKind::Gem, Vec3::new(0.0, 1.2, -115.0)));
        generate(&mut state, 10.0);
        let z = state.objects.last().map(|o| o.pos.z).unwrap();
        assert!((z - (-125.0)).abs() < 1e-3);
    }

    #[test]
    fn test_safe_zone_spawns_no_lane_hazards() {
        for seed in 0..24 {
            let mut state = playing_state(seed);
            state.progress.zone = Zone::Safe;
            generate(&mut state, 1.25);

            assert!(!state.objects.is_empty());
            for obj in &state.objects {
                // Pillar-gate frames sit outside the play lanes
                assert!(
                    !obj.kind.is_hazard() || obj.pos.x.abs() > 2.0 * LANE_WIDTH - 0.1,
                    "hazard {:?} in play lanes during safe zone (seed {seed})",
                    obj.kind
                );
            }
        }
    }

    #[test]
    fn test_hazard_waves_spawn_ahead_of_player() {
        let mut state = playing_state(42);
        let mut spawned = 0;
        for _ in 0..5_000 {
            generate(&mut state, 2.0);
            if !state.objects.is_empty() {
                spawned += 1;
                for obj in &state.objects {
                    // Buff chasers may sit 5 units inside the horizon
                    assert!(obj.pos.z <= -SPAWN_DISTANCE + 5.0 + 1e-3);
                }
                state.objects.clear();
            }
            if spawned > 50 {
                break;
            }
        }
        assert!(spawned > 50, "hazard rolls never produced a wave");
    }

    #[test]
    fn test_chaos_never_walls_every_lane() {
        for seed in 0..32 {
            let mut state = playing_state(seed);
            state.progress.level = 5; // widest chaos rolls
            for _ in 0..200 {
                generate(&mut state, 3.0);
                let tall_in_lanes = state
                    .objects
                    .iter()
                    .filter(|o| {
                        o.kind == ObjectKind::TallObstacle && o.pos.x.abs() < 2.0 * LANE_WIDTH - 0.1
                    })
                    .count();
                assert!(
                    tall_in_lanes < 3,
                    "untraversable tall wall (seed {seed})"
                );
                state.objects.clear();
            }
        }
    }

    #[test]
    fn test_buff_too_close_degrades_to_gem() {
        let mut state = playing_state(7);
        state.last_buff_depth = -100.0;
        spawn_buff(&mut state, 0.0, -120.0);

        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].kind, ObjectKind::Gem);
        // The miss does not move the separation anchor
        assert_eq!(state.last_buff_depth, -100.0);
    }

    #[test]
    fn test_buff_specials_update_separation_anchor() {
        let mut seen_special = false;
        for seed in 0..64 {
            let mut state = playing_state(seed);
            spawn_buff(&mut state, 0.0, -150.0);
            let kind = state.objects[0].kind;
            if is_buff(kind) {
                seen_special = true;
                assert_eq!(state.last_buff_depth, -150.0);
            } else {
                assert_eq!(kind, ObjectKind::Gem);
            }
        }
        assert!(seen_special, "no special rolled across 64 seeds");
    }

    #[test]
    fn test_heal_spawns_respect_run_cap() {
        for seed in 0..16 {
            let mut state = playing_state(seed);
            state.progress.heals_spawned = tuning::MAX_HEAL_SPAWNS;
            for k in 0..64 {
                state.last_buff_depth = -999.0;
                spawn_buff(&mut state, 0.0, -150.0 - k as f32);
            }
            assert!(
                !state
                    .objects
                    .iter()
                    .any(|o| o.kind == ObjectKind::BuffHeal),
                "heal spawned past the cap (seed {seed})"
            );
        }
    }

    #[test]
    fn test_spawned_ids_stay_unique() {
        let mut state = playing_state(3);
        let mut ids = HashSet::new();
        for _ in 0..2_000 {
            generate(&mut state, 2.5);
            for obj in &state.objects {
                assert!(ids.insert(obj.id), "duplicate object id {}", obj.id);
            }
            state.objects.clear();
        }
        assert!(!ids.is_empty());
    }

    #[test]
    fn test_danger_zone_spawns_more_often_than_normal() {
        let mut normal_waves = 0;
        let mut danger_waves = 0;

        let mut state = playing_state(11);
        state.progress.zone = Zone::Normal;
        for _ in 0..2_000 {
            generate(&mut state, 1.25);
            if !state.objects.is_empty() {
                normal_waves += 1;
                state.objects.clear();
            }
        }

        let mut state = playing_state(11);
        state.progress.zone = Zone::Danger;
        for _ in 0..2_000 {
            generate(&mut state, 1.25);
            if !state.objects.is_empty() {
                danger_waves += 1;
                state.objects.clear();
            }
        }

        assert!(danger_waves > normal_waves);
    }

    #[test]
    fn test_wave_objects_sit_in_sane_positions() {
        let mut state = playing_state(29);
        for _ in 0..2_000 {
            generate(&mut state, 2.0);
            for obj in &state.objects {
                assert!(obj.pos.x.abs() <= 2.0 * LANE_WIDTH + 1e-3);
                assert!(obj.pos.y >= 0.0 && obj.pos.y <= 4.5);
                assert!(obj.active);
            }
            state.objects.clear();
        }
    }
}
