//! Lane Rush - endless runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `shop`: Purchasable upgrades and the character roster
//! - `highscore`: Best-score persistence
//! - `web`: wasm-bindgen boundary for browser embedders (wasm32 only)

pub mod highscore;
pub mod shop;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use shop::{Character, ShopItem};

/// Game configuration constants
pub mod consts {
    /// Distance between adjacent lane centers
    pub const LANE_WIDTH: f32 = 2.2;
    /// Lanes available during a run
    pub const LANE_COUNT: u32 = 3;

    /// Forward scroll speed at level 1 (units/s)
    pub const RUN_SPEED_BASE: f32 = 22.8;
    /// Extra closing speed for fireballs, before the difficulty scale
    pub const MISSILE_SPEED: f32 = 30.0;
    /// Scroll speed multiplier while the shield buff is up
    pub const SHIELD_SPEED_SCALE: f32 = 1.5;

    /// Objects spawn this far ahead of the player (depth -SPAWN_DISTANCE)
    pub const SPAWN_DISTANCE: f32 = 120.0;
    /// Objects this far behind the player are dropped
    pub const REMOVE_DISTANCE: f32 = 20.0;
    /// Corridor length of one zone before the next transition
    pub const ZONE_LENGTH: f32 = 300.0;

    /// Player vertical physics
    pub const GRAVITY: f32 = 60.0;
    pub const JUMP_FORCE: f32 = 18.0;
    /// Height of the standing collision box
    pub const PLAYER_HEIGHT: f32 = 1.8;
    /// Height of the collision box while sliding
    pub const SLIDE_HEIGHT: f32 = 0.8;

    /// Lane-change spring
    pub const SPRING_STIFFNESS: f32 = 120.0;
    pub const SPRING_DAMPING: f32 = 12.0;

    /// Slide duration (seconds) and stamina cost
    pub const SLIDE_DURATION: f32 = 0.8;
    pub const SLIDE_STAMINA_COST: f32 = 15.0;
    /// Stamina cost of the second jump (first is free)
    pub const DOUBLE_JUMP_STAMINA_COST: f32 = 20.0;
    /// Stamina regained per second while running
    pub const STAMINA_REGEN: f32 = 10.0;

    /// Invulnerability window after taking a hit
    pub const MERCY_DURATION: f32 = 1.5;

    /// Largest simulation step; longer frames are clamped to this
    pub const MAX_TICK_DT: f32 = 0.05;

    /// Lateral tolerance for player/object contact
    pub const HIT_LATERAL: f32 = 0.9;
    /// Depth window half-width for player/object contact
    pub const HIT_DEPTH: f32 = 0.9;
}

/// Center x of a lane index (0 = middle, negative = left)
#[inline]
pub fn lane_center_x(lane: i32) -> f32 {
    lane as f32 * consts::LANE_WIDTH
}

/// Pack 8-bit RGB channels into the 0xRRGGBB form object colors use
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Millisecond wall-clock seed for casual runs. Replays that need a fixed
/// seed pass their own to [`sim::GameState::new`] instead.
#[cfg(target_arch = "wasm32")]
pub fn seed_from_clock() -> u64 {
    js_sys::Date::now() as u64
}

/// Millisecond wall-clock seed for casual runs. Replays that need a fixed
/// seed pass their own to [`sim::GameState::new`] instead.
#[cfg(not(target_arch = "wasm32"))]
pub fn seed_from_clock() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Initialize logging for the current platform.
///
/// Call once at startup from the embedder. On wasm32 this routes `log`
/// macros to the browser console and installs the panic hook; natively it
/// defers to `env_logger` (RUST_LOG).
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::try_init();
    }
}
