//! Browser embedder boundary
//!
//! A thin wasm-bindgen wrapper around the sim. The JS side owns the frame
//! loop and the DOM screens: it feeds edge-triggered input, advances the
//! tick, and reads JSON snapshots for rendering and HUD state. Native
//! consumers skip this module and use the `sim` API directly.

use wasm_bindgen::prelude::*;

use crate::shop::{Character, ShopItem};
use crate::sim::{GameState, TickInput, tick};

/// One game instance, owned by the JS side
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a game. Pass a seed for a reproducible run; omit it for a
    /// clock-seeded casual one.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> WebGame {
        crate::init_logging();
        let seed = seed.map_or_else(crate::seed_from_clock, |s| s as u64);
        log::info!("Game created with seed {seed}");
        WebGame {
            state: GameState::new(seed),
            input: TickInput::default(),
        }
    }

    pub fn start_run(&mut self) {
        self.state.start_run();
    }

    pub fn return_to_menu(&mut self) {
        self.state.return_to_menu();
    }

    // Edge-triggered inputs, consumed by the next advance()

    pub fn press_left(&mut self) {
        self.input.left = true;
    }

    pub fn press_right(&mut self) {
        self.input.right = true;
    }

    pub fn press_jump(&mut self) {
        self.input.jump = true;
    }

    pub fn press_slide(&mut self) {
        self.input.slide = true;
    }

    pub fn press_phoenix(&mut self) {
        self.input.activate_phoenix = true;
    }

    /// Advance the sim by `dt` seconds and clear the pending input edges
    pub fn advance(&mut self, dt: f32) {
        let input = self.input;
        self.input = TickInput::default();
        tick(&mut self.state, &input, dt);
    }

    /// Live objects as JSON for the renderer
    pub fn objects_json(&self) -> String {
        to_json(&self.state.objects())
    }

    /// Player snapshot as JSON
    pub fn player_json(&self) -> String {
        to_json(&self.state.player)
    }

    /// Progress (score, lives, buffs, shop state) as JSON
    pub fn progress_json(&self) -> String {
        to_json(&self.state.progress)
    }

    /// Drain the event queue as JSON; each event is delivered exactly once
    pub fn drain_events_json(&mut self) -> String {
        to_json(&self.state.take_events())
    }

    // Scalar getters for HUD bindings that skip the JSON path

    pub fn status(&self) -> String {
        format!("{:?}", self.state.progress.status)
    }

    pub fn score(&self) -> f64 {
        self.state.progress.score as f64
    }

    pub fn high_score(&self) -> f64 {
        self.state.progress.high_score as f64
    }

    pub fn lives(&self) -> u32 {
        self.state.progress.lives
    }

    pub fn stamina(&self) -> f32 {
        self.state.progress.stamina
    }

    pub fn combo(&self) -> u32 {
        self.state.progress.combo
    }

    pub fn level(&self) -> u32 {
        self.state.progress.level
    }

    // Shop passthroughs; indices follow the catalogue order

    pub fn close_shop(&mut self) {
        self.state.progress.close_shop();
    }

    pub fn buy_item(&mut self, index: u32) -> bool {
        match index {
            0 => self.state.progress.buy_item(ShopItem::MaxLife),
            1 => self.state.progress.buy_item(ShopItem::Heal),
            2 => self.state.progress.buy_item(ShopItem::PhoenixCharge),
            _ => false,
        }
    }

    pub fn unlock_character(&mut self, index: u32) -> bool {
        match Character::ALL.get(index as usize) {
            Some(c) => self.state.progress.unlock_character(*c),
            None => false,
        }
    }

    pub fn select_character(&mut self, index: u32) {
        if let Some(c) = Character::ALL.get(index as usize) {
            self.state.progress.select_character(*c);
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::warn!("Snapshot serialization failed: {err}");
        String::from("null")
    })
}
