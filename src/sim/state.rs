//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here. The world
//! is a flat list of [`WorldObject`]s ordered by spawn id; the run economy
//! (score, lives, buffs) is a [`Progress`] mutated only through its named
//! actions.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::consts::*;
use crate::shop::{Character, ShopItem};
use crate::{highscore, tuning};

/// Signature colors carried by spawned objects (0xRRGGBB)
pub mod palette {
    pub const GOLD: u32 = 0xffd700;
    pub const MAGNET: u32 = 0xff1744;
    pub const MULTIPLIER: u32 = 0x00e676;
    pub const HEAL: u32 = 0xff4081;
    pub const FIREBALL: u32 = 0x00e5ff;
    pub const RUBBLE: u32 = 0x8d6e63;
    pub const PILLAR: u32 = 0xf5f5f5;
    pub const WHITE: u32 = 0xffffff;
}

/// Current status of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RunStatus {
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Shop screen open (world frozen, resumes to previous status)
    Shop,
    /// Run ended by losing the last life
    GameOver,
    /// Run ended by collecting the final fragment at the last level
    Victory,
}

/// Corridor mode, cycling by distance traveled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Zone {
    #[default]
    Normal,
    /// Reward-only corridor, no hazard rolls
    Safe,
    /// Higher hazard density
    Danger,
}

/// Everything that can occupy the corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Low spike row, jump over
    Obstacle,
    /// Full-height pillar, change lanes
    TallObstacle,
    /// Overhead arch, slide under
    FlyingObstacle,
    /// Ground hazard, jump across; persists through hits
    Pit,
    /// Crate that breaks (for score) when slid into, jumpable
    Breakable,
    /// Oscillating hammer, time the gap
    Hammer,
    Gem,
    /// Level milestone pickup
    Fragment,
    /// Touching it opens the shop
    ShopPortal,
    /// Turret that fires one fireball when close enough
    Enemy,
    Fireball,
    BuffMagnet,
    BuffMultiplier,
    BuffHeal,
    BuffInvincible,
    /// Ground telegraph, never collides
    Warning,
}

impl ObjectKind {
    /// Kinds that award combo when passed without collision
    pub fn is_hazard(&self) -> bool {
        matches!(
            self,
            ObjectKind::Obstacle
                | ObjectKind::TallObstacle
                | ObjectKind::FlyingObstacle
                | ObjectKind::Pit
                | ObjectKind::Enemy
                | ObjectKind::Fireball
                | ObjectKind::Hammer
        )
    }

    /// Kinds resolved by the pickup path (reward + deactivate)
    pub fn is_pickup(&self) -> bool {
        matches!(
            self,
            ObjectKind::Gem
                | ObjectKind::Fragment
                | ObjectKind::BuffMagnet
                | ObjectKind::BuffMultiplier
                | ObjectKind::BuffHeal
                | ObjectKind::BuffInvincible
        )
    }

    /// Reward value when the object carries no points override
    pub fn default_points(&self) -> u32 {
        match self {
            ObjectKind::Gem => tuning::GEM_POINTS,
            _ => 0,
        }
    }
}

/// Swing axis for hammers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HammerAxis {
    /// Head bobs up and down through the lane
    #[default]
    Vertical,
    /// Head sweeps across the lane at chest height
    Horizontal,
}

fn default_osc_speed() -> f32 {
    3.0
}

/// A spawned entity in the corridor
///
/// Depth (`pos.z`) is negative far ahead of the player and advances toward
/// and past zero as the world scrolls; objects are dropped once it exceeds
/// the removal threshold behind the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: u64,
    pub kind: ObjectKind,
    pub pos: Vec3,
    /// False once resolved (collected/hit/destroyed); culled same tick
    pub active: bool,
    /// Set once depth moves behind the player; combo credit fires on the edge
    #[serde(default)]
    pub passed: bool,
    /// One-time firing latch, only meaningful for `Enemy`
    #[serde(default)]
    pub has_fired: bool,
    #[serde(default)]
    pub color: Option<u32>,
    /// Reward override; kind default when absent
    #[serde(default)]
    pub points: Option<u32>,
    /// Oscillation phase for rhythmic hazards (radians)
    #[serde(default)]
    pub phase_offset: f32,
    /// Oscillation speed for rhythmic hazards (radians/s)
    #[serde(default = "default_osc_speed")]
    pub osc_speed: f32,
    #[serde(default)]
    pub axis: HammerAxis,
}

impl WorldObject {
    pub fn new(id: u64, kind: ObjectKind, pos: Vec3) -> Self {
        Self {
            id,
            kind,
            pos,
            active: true,
            passed: false,
            has_fired: false,
            color: None,
            points: None,
            phase_offset: 0.0,
            osc_speed: default_osc_speed(),
            axis: HammerAxis::default(),
        }
    }

    /// Reward value, falling back to the kind default
    pub fn points(&self) -> u32 {
        self.points.unwrap_or_else(|| self.kind.default_points())
    }
}

/// Sound effects requested by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Coin,
    Fragment,
    Damage,
    Jump,
    DoubleJump,
    Buff,
    Break,
    Heal,
}

/// Fire-and-forget notifications for the rendering/audio collaborators,
/// drained once per frame via [`GameState::take_events`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Real damage landed (screen flash, rumble)
    PlayerHit,
    ParticleBurst { pos: Vec3, color: u32 },
    Sound(SoundCue),
}

/// Timed buffs, activated by pickups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffKind {
    Magnet,
    Multiplier,
    /// Shield: blocks damage and boosts scroll speed
    Invincible,
}

/// Scheduled buff expiries, compared against simulation time each tick.
/// Re-activation before expiry extends to the newest deadline.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActiveBuffs {
    pub magnet_until: Option<f32>,
    pub multiplier_until: Option<f32>,
    pub shield_until: Option<f32>,
    /// Manually-triggered one-shot immortality
    pub phoenix_until: Option<f32>,
}

impl ActiveBuffs {
    pub fn magnet_active(&self, now: f32) -> bool {
        self.magnet_until.is_some_and(|t| now < t)
    }

    pub fn multiplier_active(&self, now: f32) -> bool {
        self.multiplier_until.is_some_and(|t| now < t)
    }

    pub fn shield_active(&self, now: f32) -> bool {
        self.shield_until.is_some_and(|t| now < t)
    }

    pub fn phoenix_active(&self, now: f32) -> bool {
        self.phoenix_until.is_some_and(|t| now < t)
    }

    /// Level transitions drop the timed buffs but keep a running phoenix
    pub fn clear_timed(&mut self) {
        self.magnet_until = None;
        self.multiplier_until = None;
        self.shield_until = None;
    }
}

/// Outcome of a damage action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    /// Shield or phoenix absorbed the hit
    Blocked,
    Applied,
    /// The hit ended the run
    Fatal,
}

/// Outcome of collecting a milestone fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    None,
    /// Entered the next level; the world needs its level-up effects
    Advanced,
    Victory,
}

/// Run economy and progression, mutated only through named actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    pub status: RunStatus,
    /// Status to restore when the shop closes
    pub previous_status: RunStatus,
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    pub max_lives: u32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub combo: u32,
    pub level: u32,
    pub fragments_collected: u32,
    pub gems_collected: u32,
    /// Forward scroll speed (units/s); zero outside a run
    pub speed: f32,
    pub lane_count: u32,
    pub zone: Zone,
    /// Heal buffs placed so far this run (capped)
    pub heals_spawned: u32,
    pub has_double_jump: bool,
    /// An unused phoenix charge is held
    pub has_phoenix: bool,
    pub buffs: ActiveBuffs,
    pub selected_character: Character,
    pub unlocked_characters: Vec<Character>,
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    pub fn new() -> Self {
        Self {
            status: RunStatus::Menu,
            previous_status: RunStatus::Menu,
            score: 0,
            high_score: highscore::load(),
            lives: 3,
            max_lives: 3,
            stamina: 100.0,
            max_stamina: 100.0,
            combo: 0,
            level: 1,
            fragments_collected: 0,
            gems_collected: 0,
            speed: 0.0,
            lane_count: LANE_COUNT,
            zone: Zone::Normal,
            heals_spawned: 0,
            has_double_jump: true,
            has_phoenix: false,
            buffs: ActiveBuffs::default(),
            selected_character: Character::default(),
            unlocked_characters: vec![Character::default()],
        }
    }

    /// Begin a fresh run; character unlocks and the high score persist
    pub fn start_run(&mut self) {
        self.status = RunStatus::Playing;
        self.previous_status = RunStatus::Playing;
        self.score = 0;
        self.lives = 3;
        self.max_lives = 3;
        self.stamina = self.max_stamina;
        self.combo = 0;
        self.level = 1;
        self.fragments_collected = 0;
        self.gems_collected = 0;
        self.speed = RUN_SPEED_BASE;
        self.lane_count = LANE_COUNT;
        self.zone = Zone::Normal;
        self.heals_spawned = 0;
        self.has_double_jump = true;
        self.has_phoenix = false;
        self.buffs = ActiveBuffs::default();
    }

    pub fn return_to_menu(&mut self) {
        self.status = RunStatus::Menu;
    }

    /// Combo score multiplier: +10% per 10 combo
    fn combo_multiplier(&self) -> f32 {
        1.0 + (self.combo / 10) as f32 * 0.1
    }

    /// Award score through the combo multiplier
    pub fn add_score(&mut self, base: u64) {
        let scored = (base as f32 * self.combo_multiplier()).floor() as u64;
        self.score += scored;
    }

    /// Gem pickup: doubled under the multiplier buff, then combo-scaled
    pub fn collect_gem(&mut self, value: u32, now: f32) {
        let mut value = value as u64;
        if self.buffs.multiplier_active(now) {
            value *= 2;
        }
        self.add_score(value);
        self.gems_collected += 1;
    }

    /// One hit against the life pool. Shield and phoenix block it; the
    /// caller is responsible for the post-hit mercy window.
    pub fn take_damage(&mut self, now: f32) -> DamageResult {
        if self.buffs.shield_active(now) || self.buffs.phoenix_active(now) {
            return DamageResult::Blocked;
        }

        self.combo = 0;

        if self.lives > 1 {
            self.lives -= 1;
            DamageResult::Applied
        } else {
            self.lives = 0;
            self.status = RunStatus::GameOver;
            self.speed = 0.0;
            self.persist_high_score();
            log::info!("Run over: score {}", self.score);
            DamageResult::Fatal
        }
    }

    /// Milestone fragment: speed bump, and the fifth one ends the level
    pub fn collect_fragment(&mut self) -> LevelOutcome {
        self.fragments_collected += 1;
        self.speed += tuning::fragment_speed_boost(self.level);

        if self.fragments_collected >= tuning::FRAGMENT_TARGET {
            if self.level < tuning::MAX_LEVEL {
                self.advance_level();
                LevelOutcome::Advanced
            } else {
                self.score += tuning::VICTORY_BONUS;
                self.status = RunStatus::Victory;
                self.persist_high_score();
                log::info!("Victory: score {}", self.score);
                LevelOutcome::Victory
            }
        } else {
            LevelOutcome::None
        }
    }

    /// Enter the next level: speed boost, fresh fragments and zone, timed
    /// buffs dropped
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.lane_count = LANE_COUNT;
        self.status = RunStatus::Playing;
        self.speed += tuning::level_speed_boost(self.level);
        self.fragments_collected = 0;
        self.zone = Zone::Normal;
        self.buffs.clear_timed();
        log::info!("Level {} reached (speed {:.1})", self.level, self.speed);
    }

    pub fn use_stamina(&mut self, amount: f32) -> bool {
        if self.stamina >= amount {
            self.stamina -= amount;
            true
        } else {
            false
        }
    }

    pub fn regen_stamina(&mut self, amount: f32) {
        self.stamina = (self.stamina + amount).min(self.max_stamina);
    }

    pub fn add_combo(&mut self, amount: u32) {
        self.combo += amount;
    }

    pub fn activate_buff(&mut self, kind: BuffKind, now: f32) {
        match kind {
            BuffKind::Magnet => self.buffs.magnet_until = Some(now + tuning::MAGNET_DURATION),
            BuffKind::Multiplier => {
                self.buffs.multiplier_until = Some(now + tuning::MULTIPLIER_DURATION)
            }
            BuffKind::Invincible => self.buffs.shield_until = Some(now + tuning::SHIELD_DURATION),
        }
    }

    /// Restore one life, or convert to score at full health
    pub fn heal(&mut self) {
        if self.lives < self.max_lives {
            self.lives += 1;
        } else {
            self.add_score(tuning::FULL_LIFE_HEAL_SCORE);
        }
    }

    /// Spend score on a shop item; false when unaffordable
    pub fn buy_item(&mut self, item: ShopItem) -> bool {
        let cost = item.cost();
        if self.score < cost {
            return false;
        }
        self.score -= cost;
        match item {
            ShopItem::MaxLife => {
                self.max_lives += 1;
                self.lives += 1;
            }
            ShopItem::Heal => {
                self.lives = (self.lives + 1).min(self.max_lives);
            }
            ShopItem::PhoenixCharge => {
                self.has_phoenix = true;
            }
        }
        true
    }

    /// Spend score to unlock a character; selects it on success
    pub fn unlock_character(&mut self, character: Character) -> bool {
        if self.unlocked_characters.contains(&character) {
            return false;
        }
        let cost = character.cost();
        if self.score < cost {
            return false;
        }
        self.score -= cost;
        self.unlocked_characters.push(character);
        self.selected_character = character;
        true
    }

    /// Switch to an already-owned character
    pub fn select_character(&mut self, character: Character) {
        if self.unlocked_characters.contains(&character) {
            self.selected_character = character;
        }
    }

    pub fn open_shop(&mut self) {
        self.previous_status = self.status;
        self.status = RunStatus::Shop;
    }

    pub fn close_shop(&mut self) {
        self.status = self.previous_status;
    }

    /// Burn the held phoenix charge for a short immortality window
    pub fn activate_phoenix(&mut self, now: f32) {
        if self.has_phoenix && !self.buffs.phoenix_active(now) {
            self.has_phoenix = false;
            self.buffs.phoenix_until = Some(now + tuning::PHOENIX_DURATION);
        }
    }

    /// Write the high score through if the current score beats it
    pub fn persist_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
            highscore::store(self.high_score);
        }
    }
}

/// Seeded RNG; all simulation randomness flows through here so same-seed
/// runs replay identically
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState(Pcg32);

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }

    /// Uniform in [0, 1)
    pub fn unit(&mut self) -> f32 {
        self.0.random::<f32>()
    }

    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        self.0.random_range(lo..hi)
    }

    /// Bernoulli with probability `p`
    pub fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }

    /// Uniform lane index in [-max, max] for the given lane count
    pub fn lane(&mut self, lane_count: u32) -> i32 {
        let max = (lane_count / 2) as i32;
        self.0.random_range(-max..=max)
    }

    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.0.random_range(0..items.len())]
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        use rand::seq::SliceRandom;
        items.shuffle(&mut self.0);
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: RngState,
    /// Simulation clock (seconds since run start)
    pub time: f32,
    pub progress: Progress,
    pub player: Player,
    /// Live objects, ordered by spawn id
    pub objects: Vec<WorldObject>,
    /// Total scroll distance this run
    pub distance: f32,
    /// Scroll distance since the last zone transition
    pub zone_distance: f32,
    /// Distance threshold for the next milestone fragment
    pub next_fragment_at: f32,
    /// Spawn depth of the last special buff (separation rule)
    pub last_buff_depth: f32,
    /// Outgoing notifications, drained by the embedder each frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u64,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: RngState::new(seed),
            time: 0.0,
            progress: Progress::new(),
            player: Player::new(),
            objects: Vec::new(),
            distance: 0.0,
            zone_distance: 0.0,
            next_fragment_at: tuning::fragment_interval(1),
            last_buff_depth: -999.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new object id (never reused)
    pub fn next_object_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin or restart a run: world cleared, accumulators rebased,
    /// progression reset (unlocks kept)
    pub fn start_run(&mut self) {
        self.objects.clear();
        self.events.clear();
        self.time = 0.0;
        self.distance = 0.0;
        self.zone_distance = 0.0;
        self.next_fragment_at = tuning::fragment_interval(1);
        self.last_buff_depth = -999.0;
        self.player.reset();
        self.progress.start_run();
        log::info!("Run started (seed {})", self.seed);
    }

    /// Abandon the run and clear the world
    pub fn return_to_menu(&mut self) {
        self.objects.clear();
        self.events.clear();
        self.distance = 0.0;
        self.zone_distance = 0.0;
        self.next_fragment_at = tuning::fragment_interval(1);
        self.last_buff_depth = -999.0;
        self.progress.return_to_menu();
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain the pending notifications (call once per frame)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Live objects for the rendering layer
    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_score_applies_combo_multiplier() {
        let mut p = Progress::new();
        p.start_run();
        p.combo = 25;
        p.add_score(100);
        // floor(25/10) steps of 10% -> x1.2
        assert_eq!(p.score, 120);
    }

    #[test]
    fn test_add_score_without_combo() {
        let mut p = Progress::new();
        p.start_run();
        p.add_score(100);
        assert_eq!(p.score, 100);
    }

    #[test]
    fn test_collect_gem_doubles_under_multiplier() {
        let mut p = Progress::new();
        p.start_run();
        p.activate_buff(BuffKind::Multiplier, 0.0);
        p.collect_gem(50, 1.0);
        assert_eq!(p.score, 100);
        assert_eq!(p.gems_collected, 1);

        // Expired multiplier no longer doubles
        p.collect_gem(50, 100.0);
        assert_eq!(p.score, 150);
    }

    #[test]
    fn test_take_damage_resets_combo_and_spends_life() {
        let mut p = Progress::new();
        p.start_run();
        p.combo = 12;
        assert_eq!(p.take_damage(0.0), DamageResult::Applied);
        assert_eq!(p.combo, 0);
        assert_eq!(p.lives, 2);
        assert_eq!(p.status, RunStatus::Playing);
    }

    #[test]
    fn test_last_life_ends_the_run() {
        let mut p = Progress::new();
        p.start_run();
        p.lives = 1;
        p.score = 777;
        assert_eq!(p.take_damage(0.0), DamageResult::Fatal);
        assert_eq!(p.lives, 0);
        assert_eq!(p.status, RunStatus::GameOver);
        assert_eq!(p.speed, 0.0);
        assert_eq!(p.high_score, 777);
    }

    #[test]
    fn test_shield_blocks_damage() {
        let mut p = Progress::new();
        p.start_run();
        p.combo = 5;
        p.activate_buff(BuffKind::Invincible, 0.0);
        assert_eq!(p.take_damage(1.0), DamageResult::Blocked);
        assert_eq!(p.lives, 3);
        assert_eq!(p.combo, 5);
    }

    #[test]
    fn test_fragment_progression_and_level_up() {
        let mut p = Progress::new();
        p.start_run();
        let base_speed = p.speed;

        for _ in 0..4 {
            assert_eq!(p.collect_fragment(), LevelOutcome::None);
        }
        assert!(p.speed > base_speed);
        assert_eq!(p.collect_fragment(), LevelOutcome::Advanced);
        assert_eq!(p.level, 2);
        assert_eq!(p.fragments_collected, 0);
        assert_eq!(p.zone, Zone::Normal);
    }

    #[test]
    fn test_final_fragment_wins_the_run() {
        let mut p = Progress::new();
        p.start_run();
        p.level = 5;
        p.fragments_collected = 4;
        p.score = 1000;
        assert_eq!(p.collect_fragment(), LevelOutcome::Victory);
        assert_eq!(p.status, RunStatus::Victory);
        assert_eq!(p.score, 1000 + tuning::VICTORY_BONUS);
        assert_eq!(p.high_score, 21000);
    }

    #[test]
    fn test_level_up_clears_timed_buffs_but_not_phoenix() {
        let mut p = Progress::new();
        p.start_run();
        p.activate_buff(BuffKind::Magnet, 0.0);
        p.has_phoenix = true;
        p.activate_phoenix(0.0);
        p.advance_level();
        assert!(!p.buffs.magnet_active(1.0));
        assert!(p.buffs.phoenix_active(1.0));
    }

    #[test]
    fn test_heal_caps_at_max_lives() {
        let mut p = Progress::new();
        p.start_run();
        p.lives = 2;
        p.heal();
        assert_eq!(p.lives, 3);
        p.heal();
        assert_eq!(p.lives, 3);
        assert_eq!(p.score, tuning::FULL_LIFE_HEAL_SCORE);
    }

    #[test]
    fn test_buff_reactivation_extends_expiry() {
        let mut p = Progress::new();
        p.start_run();
        p.activate_buff(BuffKind::Magnet, 0.0);
        p.activate_buff(BuffKind::Magnet, 5.0);
        assert!(p.buffs.magnet_active(tuning::MAGNET_DURATION + 2.0));
        assert!(!p.buffs.magnet_active(5.0 + tuning::MAGNET_DURATION + 0.1));
    }

    #[test]
    fn test_shop_purchases() {
        let mut p = Progress::new();
        p.start_run();
        p.score = 6000;

        assert!(p.buy_item(ShopItem::MaxLife));
        assert_eq!(p.max_lives, 4);
        assert_eq!(p.lives, 4);
        assert_eq!(p.score, 4000);

        assert!(p.buy_item(ShopItem::PhoenixCharge));
        assert!(p.has_phoenix);

        // Broke now
        assert!(!p.buy_item(ShopItem::MaxLife));
        assert_eq!(p.score, 1000);
    }

    #[test]
    fn test_character_unlock_persists_across_runs() {
        let mut p = Progress::new();
        p.start_run();
        p.score = 5000;
        assert!(p.unlock_character(Character::Warden));
        assert_eq!(p.selected_character, Character::Warden);
        assert_eq!(p.score, 0);

        // Already owned
        assert!(!p.unlock_character(Character::Warden));

        p.start_run();
        assert!(p.unlocked_characters.contains(&Character::Warden));
        assert_eq!(p.selected_character, Character::Warden);
    }

    #[test]
    fn test_select_requires_ownership() {
        let mut p = Progress::new();
        p.select_character(Character::Gale);
        assert_eq!(p.selected_character, Character::Scout);
    }

    #[test]
    fn test_shop_round_trip_restores_status() {
        let mut p = Progress::new();
        p.start_run();
        p.open_shop();
        assert_eq!(p.status, RunStatus::Shop);
        p.close_shop();
        assert_eq!(p.status, RunStatus::Playing);
    }

    #[test]
    fn test_phoenix_is_single_use() {
        let mut p = Progress::new();
        p.start_run();
        p.has_phoenix = true;
        p.activate_phoenix(0.0);
        assert!(p.buffs.phoenix_active(1.0));
        assert!(!p.has_phoenix);

        // No charge left, nothing happens after expiry
        p.activate_phoenix(10.0);
        assert!(!p.buffs.phoenix_active(10.0));
    }

    #[test]
    fn test_object_points_fall_back_to_kind_default() {
        let gem = WorldObject::new(1, ObjectKind::Gem, Vec3::new(0.0, 1.2, -120.0));
        assert_eq!(gem.points(), tuning::GEM_POINTS);

        let mut rich = WorldObject::new(2, ObjectKind::Gem, Vec3::ZERO);
        rich.points = Some(100);
        assert_eq!(rich.points(), 100);

        let pit = WorldObject::new(3, ObjectKind::Pit, Vec3::ZERO);
        assert_eq!(pit.points(), 0);
    }

    #[test]
    fn test_object_ids_monotonic() {
        let mut state = GameState::new(7);
        let a = state.next_object_id();
        let b = state.next_object_id();
        assert!(b > a);
    }

    #[test]
    fn test_start_run_resets_world() {
        let mut state = GameState::new(7);
        state.start_run();
        let id = state.next_object_id();
        state
            .objects
            .push(WorldObject::new(id, ObjectKind::Gem, Vec3::new(0.0, 1.2, -50.0)));
        state.distance = 400.0;
        state.time = 12.0;

        state.start_run();
        assert!(state.objects.is_empty());
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.time, 0.0);
        assert_eq!(state.progress.status, RunStatus::Playing);

        // Ids keep counting up across runs
        assert!(state.next_object_id() > id);
    }

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = RngState::new(42);
        let mut b = RngState::new(42);
        for _ in 0..32 {
            assert_eq!(a.unit(), b.unit());
        }
        let mut a_lanes: Vec<i32> = Vec::new();
        let mut b_lanes: Vec<i32> = Vec::new();
        for _ in 0..16 {
            a_lanes.push(a.lane(3));
            b_lanes.push(b.lane(3));
        }
        assert_eq!(a_lanes, b_lanes);
        assert!(a_lanes.iter().all(|l| (-1..=1).contains(l)));
    }
}
