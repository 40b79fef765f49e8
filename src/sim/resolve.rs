//! Collision and interaction resolver
//!
//! One pass over the live objects per tick: advance depth by the scroll
//! distance, award pass-behind combo credit, run the magnet pull, then
//! test the contact window and dispatch the per-kind effect. Inactive
//! objects and everything past the removal threshold are culled at the
//! end of the pass, so an object resolves at most once.

use glam::Vec3;

use super::player::Player;
use super::state::{
    BuffKind, DamageResult, GameEvent, GameState, HammerAxis, LevelOutcome, ObjectKind, Progress,
    SoundCue, WorldObject, palette,
};
use crate::consts::*;
use crate::tuning;

/// Gems inside this lateral+depth radius feel the magnet
const MAGNET_RANGE: f32 = 15.0;
/// Magnet closing speed (units/s)
const MAGNET_PULL_SPEED: f32 = 15.0;
/// Enemies fire their one shot when crossing this depth
const ENEMY_FIRE_DEPTH: f32 = -90.0;
/// Vertical reach for collecting pickups
const PICKUP_VERTICAL_RANGE: f32 = 2.5;

/// Advance and resolve every live object against the player. `dist` is the
/// scroll distance covered this tick. Returns the level outcome when a
/// collected fragment finished a level.
pub fn resolve(state: &mut GameState, dist: f32, dt: f32, difficulty: f32) -> LevelOutcome {
    let now = state.time;
    let mut outcome = LevelOutcome::None;
    // Enemies that fired this tick; their shots spawn after the pass
    let mut fired: Vec<Vec3> = Vec::new();

    {
        let GameState {
            progress,
            player,
            objects,
            events,
            ..
        } = state;

        let player_pos = player.pos();
        let magnet_on = progress.buffs.magnet_active(now);

        for obj in objects.iter_mut() {
            // Fireballs close in faster than the world scrolls
            let move_amount = if obj.kind == ObjectKind::Fireball {
                dist + MISSILE_SPEED * difficulty * dt
            } else {
                dist
            };
            let prev_z = obj.pos.z;
            obj.pos.z += move_amount;

            // Pass-behind credit, once per object; only hazards pay combo
            if obj.kind != ObjectKind::Warning
                && obj.active
                && !obj.passed
                && obj.pos.z > player_pos.z + 1.0
            {
                obj.passed = true;
                if obj.kind.is_hazard() {
                    progress.add_combo(1);
                }
            }

            // Magnet pull bends nearby gems into the player's path
            if magnet_on && obj.kind == ObjectKind::Gem && obj.active {
                let dx = player_pos.x - obj.pos.x;
                let dz = player_pos.z - obj.pos.z;
                let to_player = (dx * dx + dz * dz).sqrt();
                if to_player < MAGNET_RANGE && obj.pos.z > player_pos.z - 2.0 {
                    let pull = MAGNET_PULL_SPEED * dt;
                    obj.pos.x += dx / to_player * pull;
                    obj.pos.z += dz / to_player * pull;
                    obj.pos.y += (1.0 - obj.pos.y) * (dt * 5.0);
                }
            }

            // One-time firing trigger
            if obj.kind == ObjectKind::Enemy
                && obj.active
                && !obj.has_fired
                && obj.pos.z > ENEMY_FIRE_DEPTH
            {
                obj.has_fired = true;
                fired.push(obj.pos);
            }

            if !obj.active {
                continue;
            }

            // The portal pulls the player in on depth alone, any lane
            if obj.kind == ObjectKind::ShopPortal {
                if (obj.pos.z - player_pos.z).abs() < 2.0 {
                    progress.open_shop();
                    obj.active = false;
                }
                continue;
            }

            // Contact window: the object crossed the player plane this tick
            // and sits in the player's lane
            let in_window =
                prev_z < player_pos.z + HIT_DEPTH && obj.pos.z > player_pos.z - HIT_DEPTH;
            if !in_window || (obj.pos.x - player_pos.x).abs() >= HIT_LATERAL {
                continue;
            }

            match obj.kind {
                ObjectKind::Breakable => {
                    if player_pos.y > 1.2 {
                        // Cleared it in the air; the crate stays
                    } else if player.sliding(now) {
                        progress.add_score(tuning::BREAK_SCORE);
                        progress.add_combo(1);
                        events.push(GameEvent::Sound(SoundCue::Break));
                        events.push(GameEvent::ParticleBurst {
                            pos: obj.pos,
                            color: palette::RUBBLE,
                        });
                        obj.active = false;
                    } else {
                        damage_player(progress, player, events, now);
                        obj.active = false;
                    }
                }

                ObjectKind::Pit => {
                    // Grounded into the pit hurts; airborne clears it.
                    // The pit never deactivates: it can hit again on the
                    // next pass through its window.
                    if player_pos.y < 0.2 {
                        damage_player(progress, player, events, now);
                    }
                }

                ObjectKind::Hammer => {
                    let cycle = (now * obj.osc_speed + obj.phase_offset).sin();
                    let player_bottom = player_pos.y;
                    let player_top = player_pos.y + PLAYER_HEIGHT;

                    let hit = match obj.axis {
                        HammerAxis::Horizontal => {
                            // Head sweeps +/-2.5 around the base, only
                            // dangerous in the upper band
                            let head_x = obj.pos.x + cycle * 2.5;
                            (head_x - player_pos.x).abs() < 1.0
                                && player_top > 2.0
                                && player_bottom < 5.0
                        }
                        HammerAxis::Vertical => {
                            let head_y = (cycle + 1.0) / 2.0 * 4.0 + 0.6;
                            player_bottom < head_y + 0.6 && player_top > head_y - 0.6
                        }
                    };

                    if hit {
                        damage_player(progress, player, events, now);
                        obj.active = false;
                    }
                }

                // Ground telegraph, never collides; portals were handled above
                ObjectKind::Warning | ObjectKind::ShopPortal => {}

                ObjectKind::Obstacle
                | ObjectKind::TallObstacle
                | ObjectKind::FlyingObstacle
                | ObjectKind::Enemy
                | ObjectKind::Fireball => {
                    let (band_bottom, band_top) = hazard_band(obj);
                    let player_bottom = player_pos.y;
                    let player_top = player.hitbox_top(now);

                    if player_bottom < band_top && player_top > band_bottom {
                        if obj.kind == ObjectKind::FlyingObstacle && player.sliding(now) {
                            // Clean slide under the arch
                        } else {
                            damage_player(progress, player, events, now);
                            obj.active = false;
                            if obj.kind == ObjectKind::Fireball {
                                events.push(GameEvent::ParticleBurst {
                                    pos: obj.pos,
                                    color: palette::FIREBALL,
                                });
                            }
                        }
                    }
                }

                ObjectKind::Gem
                | ObjectKind::Fragment
                | ObjectKind::BuffMagnet
                | ObjectKind::BuffMultiplier
                | ObjectKind::BuffHeal
                | ObjectKind::BuffInvincible => {
                    if (obj.pos.y - player_pos.y).abs() < PICKUP_VERTICAL_RANGE {
                        match obj.kind {
                            ObjectKind::Gem => {
                                progress.collect_gem(obj.points(), now);
                                events.push(GameEvent::Sound(SoundCue::Coin));
                            }
                            ObjectKind::Fragment => {
                                let result = progress.collect_fragment();
                                if result != LevelOutcome::None {
                                    outcome = result;
                                }
                                events.push(GameEvent::Sound(SoundCue::Fragment));
                            }
                            ObjectKind::BuffMagnet => {
                                progress.activate_buff(BuffKind::Magnet, now);
                                events.push(GameEvent::Sound(SoundCue::Buff));
                            }
                            ObjectKind::BuffMultiplier => {
                                progress.activate_buff(BuffKind::Multiplier, now);
                                events.push(GameEvent::Sound(SoundCue::Buff));
                            }
                            ObjectKind::BuffInvincible => {
                                progress.activate_buff(BuffKind::Invincible, now);
                                events.push(GameEvent::Sound(SoundCue::Buff));
                            }
                            ObjectKind::BuffHeal => {
                                progress.heal();
                                events.push(GameEvent::Sound(SoundCue::Heal));
                            }
                            _ => unreachable!(),
                        }

                        let burst_color = if obj.kind == ObjectKind::BuffHeal {
                            palette::HEAL
                        } else {
                            obj.color.unwrap_or(palette::WHITE)
                        };
                        events.push(GameEvent::ParticleBurst {
                            pos: obj.pos,
                            color: burst_color,
                        });
                        obj.active = false;
                    }
                }
            }
        }

        // Resolved objects leave this tick; everything else leaves once it
        // crosses the removal threshold behind the player
        objects.retain(|o| o.active && o.pos.z <= REMOVE_DISTANCE);
    }

    for pos in fired {
        log::debug!("Enemy fired at depth {:.1}", pos.z);
        let id = state.next_object_id();
        let mut fireball =
            WorldObject::new(id, ObjectKind::Fireball, Vec3::new(pos.x, 0.8, pos.z));
        fireball.color = Some(palette::FIREBALL);
        state.objects.push(fireball);

        let id = state.next_object_id();
        let telegraph =
            WorldObject::new(id, ObjectKind::Warning, Vec3::new(pos.x, 0.02, pos.z + 4.0));
        state.objects.push(telegraph);
    }

    outcome
}

/// Vertical band occupied by a damage hazard
fn hazard_band(obj: &WorldObject) -> (f32, f32) {
    match obj.kind {
        ObjectKind::Obstacle => (0.0, 0.5),
        ObjectKind::TallObstacle => (0.0, 4.0),
        ObjectKind::FlyingObstacle => (0.9, 4.0),
        _ => (obj.pos.y - 0.5, obj.pos.y + 0.5),
    }
}

/// Damage funnel: the mercy window eats the hit silently; shield/phoenix
/// block it inside the progress action. Real damage starts a fresh mercy
/// window and notifies the collaborators.
fn damage_player(
    progress: &mut Progress,
    player: &mut Player,
    events: &mut Vec<GameEvent>,
    now: f32,
) -> bool {
    if player.mercy_active(now) {
        return false;
    }
    match progress.take_damage(now) {
        DamageResult::Blocked => false,
        DamageResult::Applied | DamageResult::Fatal => {
            player.start_mercy(now);
            events.push(GameEvent::PlayerHit);
            events.push(GameEvent::Sound(SoundCue::Damage));
            true
        }
    }
}
