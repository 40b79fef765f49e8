//! Purchasable upgrades and the character roster
//!
//! Score doubles as currency. The shop screen drives purchases through
//! `Progress::buy_item` / `Progress::unlock_character`; this module owns
//! the catalogue data those actions check against.

use serde::{Deserialize, Serialize};

/// One-shot and permanent upgrades sold mid-run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopItem {
    /// Permanently raises max lives by one (and grants the new life)
    MaxLife,
    /// Restores one life, capped at the current maximum
    Heal,
    /// Stores a manually-triggered 5-second invulnerability charge
    PhoenixCharge,
}

impl ShopItem {
    /// Purchase price in score points
    pub fn cost(&self) -> u64 {
        match self {
            ShopItem::MaxLife => 2000,
            ShopItem::Heal => 1000,
            ShopItem::PhoenixCharge => 3000,
        }
    }

    /// Items that cannot be stacked; hidden from the shop while owned
    pub fn one_time(&self) -> bool {
        matches!(self, ShopItem::PhoenixCharge)
    }
}

/// Playable avatars, unlocked with score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Character {
    /// Starter, always owned
    #[default]
    Scout,
    Warden,
    Gale,
}

/// Render-layer tint set for one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterPalette {
    pub body: u32,
    pub skin: u32,
    pub accent: u32,
    pub effect: u32,
}

impl Character {
    pub const ALL: [Character; 3] = [Character::Scout, Character::Warden, Character::Gale];

    /// Unlock price in score points (starter is free)
    pub fn cost(&self) -> u64 {
        match self {
            Character::Scout => 0,
            Character::Warden => 5000,
            Character::Gale => 12000,
        }
    }

    pub fn palette(&self) -> CharacterPalette {
        match self {
            Character::Scout => CharacterPalette {
                body: 0xffffff,
                skin: 0xd7a173,
                accent: 0xffd700,
                effect: 0x00b0ff,
            },
            Character::Warden => CharacterPalette {
                body: 0xb71c1c,
                skin: 0xd7a173,
                accent: 0xcd7f32,
                effect: 0xff1744,
            },
            Character::Gale => CharacterPalette {
                body: 0xe3f2fd,
                skin: 0xd7a173,
                accent: 0x00e5ff,
                effect: 0xffffff,
            },
        }
    }
}
