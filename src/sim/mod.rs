//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed update order only
//! - Seeded RNG only
//! - Stable iteration order (by object ID)
//! - No rendering or platform dependencies

pub mod player;
pub mod resolve;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod zone;

pub use player::Player;
pub use state::{
    ActiveBuffs, BuffKind, DamageResult, GameEvent, GameState, HammerAxis, LevelOutcome,
    ObjectKind, Progress, RngState, RunStatus, SoundCue, WorldObject, Zone, palette,
};
pub use tick::{TickInput, tick};
pub use zone::difficulty;
