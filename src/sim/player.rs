//! Player kinematics
//!
//! Lateral mass-spring-damper toward the target lane, vertical jump
//! integrator, and the slide/mercy windows. The resolver only reads the
//! resulting position and flags; it never writes them.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::lane_center_x;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Discrete lane the spring chases (0 = middle)
    pub lane: i32,
    /// Continuous lateral position; collision testing uses this, not the lane
    pub x: f32,
    pub vx: f32,
    pub y: f32,
    pub vy: f32,
    /// Jumps taken since last grounded (0 = on the ground)
    pub jumps_used: u32,
    /// Slide expiry (simulation time)
    #[serde(default)]
    pub slide_until: Option<f32>,
    /// Post-damage invulnerability expiry
    #[serde(default)]
    pub mercy_until: Option<f32>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            lane: 0,
            x: 0.0,
            vx: 0.0,
            y: 0.0,
            vy: 0.0,
            jumps_used: 0,
            slide_until: None,
            mercy_until: None,
        }
    }

    /// Back to the middle lane, grounded, all windows cleared
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// World position; the player rides the fixed z = 0 reference plane
    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, 0.0)
    }

    pub fn airborne(&self) -> bool {
        self.jumps_used > 0
    }

    /// Step one lane left (-1) or right (+1), clamped to the lane range
    pub fn shift_lane(&mut self, delta: i32, lane_count: u32) {
        let max = (lane_count / 2) as i32;
        self.lane = (self.lane + delta).clamp(-max, max);
    }

    /// Apply a jump impulse. Callers gate on stamina and the double-jump
    /// unlock; this only does the physics.
    pub fn apply_jump(&mut self) {
        self.vy = JUMP_FORCE;
        self.jumps_used += 1;
    }

    pub fn start_slide(&mut self, now: f32) {
        self.slide_until = Some(now + SLIDE_DURATION);
    }

    pub fn sliding(&self, now: f32) -> bool {
        self.slide_until.is_some_and(|t| now < t)
    }

    pub fn start_mercy(&mut self, now: f32) {
        self.mercy_until = Some(now + MERCY_DURATION);
    }

    pub fn mercy_active(&self, now: f32) -> bool {
        self.mercy_until.is_some_and(|t| now < t)
    }

    /// Top of the collision box; lowered while sliding
    pub fn hitbox_top(&self, now: f32) -> f32 {
        if self.sliding(now) {
            self.y + SLIDE_HEIGHT
        } else {
            self.y + PLAYER_HEIGHT
        }
    }

    /// Integrate the spring and jump physics and expire stale windows
    pub fn update(&mut self, dt: f32, now: f32) {
        // Lane spring: a = (target - x) * k - v * c, Euler integrated
        let target = lane_center_x(self.lane);
        let accel = (target - self.x) * SPRING_STIFFNESS - self.vx * SPRING_DAMPING;
        self.vx += accel * dt;
        self.x += self.vx * dt;

        // Vertical physics; the floor is y = 0 (pits damage rather than swallow)
        if self.airborne() {
            self.y += self.vy * dt;
            self.vy -= GRAVITY * dt;
            if self.y <= 0.0 {
                self.y = 0.0;
                self.vy = 0.0;
                self.jumps_used = 0;
            }
        }

        if self.slide_until.is_some_and(|t| now >= t) {
            self.slide_until = None;
        }
        if self.mercy_until.is_some_and(|t| now >= t) {
            self.mercy_until = None;
        }
    }
}
