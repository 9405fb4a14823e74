//! Game state and core simulation types
//!
//! The tick loop owns everything in here; frontends only read it between ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Bounded, Rect};
use super::effects::EffectQueue;
use crate::consts::*;
use crate::{lane_center, secs_to_ticks};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Difficulty selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Visual treatment of hazards for a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardStyle {
    pub color: &'static str,
    pub hit_color: &'static str,
    /// Eye glow, zombies only
    pub glow: Option<&'static str>,
    /// Random ±5px vertical shuffle while walking
    pub jitter: bool,
}

/// Game variant. Both share one simulation and differ only in these knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Zombies, single hit ends the run
    #[default]
    Zombie,
    /// Pedestrians, three lives
    Pedestrian,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Zombie => "zombie",
            Variant::Pedestrian => "pedestrian",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "zombie" | "zombies" | "a" => Some(Variant::Zombie),
            "pedestrian" | "pedestrians" | "b" => Some(Variant::Pedestrian),
            _ => None,
        }
    }

    /// Starting lives, `None` when a single collision ends the run
    pub fn starting_lives(&self) -> Option<u8> {
        match self {
            Variant::Zombie => None,
            Variant::Pedestrian => Some(3),
        }
    }

    /// Scale applied to the difficulty's vehicle speed at spawn
    pub fn vehicle_speed_factor(&self) -> f32 {
        match self {
            Variant::Zombie => 0.9,
            Variant::Pedestrian => 1.0,
        }
    }

    pub fn invincibility_ticks(&self) -> u64 {
        match self {
            Variant::Zombie => secs_to_ticks(3),
            Variant::Pedestrian => secs_to_ticks(5),
        }
    }

    /// Horizontal span (left, width) power-ups may spawn across
    pub fn power_up_span(&self) -> (f32, f32) {
        match self {
            Variant::Zombie => (ROAD_LEFT, ROAD_WIDTH),
            Variant::Pedestrian => (0.0, CANVAS_WIDTH),
        }
    }

    pub fn hazard_style(&self) -> HazardStyle {
        match self {
            Variant::Zombie => HazardStyle {
                color: "#000000",
                hit_color: "#7f8c8d",
                glow: Some("#ff0000"),
                jitter: true,
            },
            Variant::Pedestrian => HazardStyle {
                color: "#e67e22",
                hit_color: "#7f8c8d",
                glow: None,
                jitter: false,
            },
        }
    }
}

/// Spawn/speed tuning for one difficulty at the current level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub vehicle_speed: f32,
    pub spawn_rate: f32,
    pub power_up_rate: f32,
}

impl DifficultyProfile {
    /// Profile for a difficulty at a level. Speed and spawn rate grow with
    /// level; spawn rate never exceeds MAX_SPAWN_RATE.
    pub fn for_level(variant: Variant, difficulty: Difficulty, level: u32) -> Self {
        let l = level as f32;
        let (vehicle_speed, spawn_rate) = match variant {
            Variant::Zombie => {
                let scale = match difficulty {
                    Difficulty::Easy => 1.0,
                    Difficulty::Medium => 1.3,
                    Difficulty::Hard => 1.6,
                };
                ((2.0 + l * 0.5) * scale, 0.01 + l * 0.003)
            }
            Variant::Pedestrian => match difficulty {
                Difficulty::Easy => (2.0 + l * 0.2, 0.005 + l * 0.001),
                Difficulty::Medium => (3.0 + l * 0.3, 0.015 + l * 0.003),
                Difficulty::Hard => (4.0 + l * 0.4, 0.02 + l * 0.004),
            },
        };
        let power_up_rate = match difficulty {
            Difficulty::Easy => 0.01,
            Difficulty::Medium => 0.008,
            Difficulty::Hard => 0.005,
        };
        Self {
            vehicle_speed,
            spawn_rate: spawn_rate.min(MAX_SPAWN_RATE),
            power_up_rate,
        }
    }
}

/// Per-difficulty profiles, recomputed every tick from the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub easy: DifficultyProfile,
    pub medium: DifficultyProfile,
    pub hard: DifficultyProfile,
}

impl DifficultyTable {
    pub fn new(variant: Variant, level: u32) -> Self {
        Self {
            easy: DifficultyProfile::for_level(variant, Difficulty::Easy, level),
            medium: DifficultyProfile::for_level(variant, Difficulty::Medium, level),
            hard: DifficultyProfile::for_level(variant, Difficulty::Hard, level),
        }
    }

    pub fn recompute(&mut self, variant: Variant, level: u32) {
        *self = Self::new(variant, level);
    }

    pub fn get(&self, difficulty: Difficulty) -> &DifficultyProfile {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

/// Boost resource: drains while active, recharges after a cooldown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boost {
    pub active: bool,
    /// 0..=BOOST_MAX
    pub amount: f32,
    /// Ticks left before recharge resumes
    pub cooldown: u32,
    pub max_cooldown: u32,
    pub drain_rate: f32,
    pub recharge_rate: f32,
    /// Boost key state last tick (activation is edge-triggered)
    #[serde(default)]
    pub key_held: bool,
}

impl Default for Boost {
    fn default() -> Self {
        Self {
            active: false,
            amount: BOOST_MAX,
            cooldown: 0,
            max_cooldown: BOOST_MAX_COOLDOWN,
            drain_rate: BOOST_DRAIN_RATE,
            recharge_rate: BOOST_RECHARGE_RATE,
            key_held: false,
        }
    }
}

/// Trail point for bike rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub lean: f32,
}

/// The player's bike
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bike {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub acceleration: f32,
    pub friction: f32,
    pub max_speed: f32,
    /// Current lean in degrees (eases toward a velocity-derived target)
    pub lean: f32,
    pub max_lean: f32,
    pub boost: Boost,
    /// Recent positions, newest first
    #[serde(skip)]
    pub trail: Vec<TrailPoint>,
}

impl Default for Bike {
    fn default() -> Self {
        Self::new(Vec2::new(lane_center(1) - BIKE_WIDTH / 2.0, CANVAS_HEIGHT - 100.0))
    }
}

impl Bike {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(BIKE_WIDTH, BIKE_HEIGHT),
            vel: Vec2::ZERO,
            acceleration: BIKE_ACCELERATION,
            friction: BIKE_FRICTION,
            max_speed: BIKE_MAX_SPEED,
            lean: 0.0,
            max_lean: BIKE_MAX_LEAN,
            boost: Boost::default(),
            trail: Vec::with_capacity(BIKE_TRAIL_LENGTH + 1),
        }
    }

    /// Record current position to trail (call once per tick)
    pub fn record_trail(&mut self) {
        self.trail.insert(
            0,
            TrailPoint {
                pos: self.pos,
                lean: self.lean,
            },
        );
        self.trail.truncate(BIKE_TRAIL_LENGTH);
    }
}

impl Bounded for Bike {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Vehicle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleKind {
    Car,
    Bus,
    Auto,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Car, VehicleKind::Bus, VehicleKind::Auto];

    pub fn size(&self) -> Vec2 {
        match self {
            VehicleKind::Car => Vec2::new(60.0, 80.0),
            VehicleKind::Bus => Vec2::new(70.0, 100.0),
            VehicleKind::Auto => Vec2::new(65.0, 90.0),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            VehicleKind::Car => "#3498db",
            VehicleKind::Bus => "#2ecc71",
            VehicleKind::Auto => "#f1c40f",
        }
    }
}

/// Oncoming traffic, moves straight down its lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u32,
    pub kind: VehicleKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward pixels per tick
    pub speed: f32,
}

impl Bounded for Vehicle {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Whether a hazard is still walking or has been struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardTone {
    Alive,
    Dead,
}

/// A pedestrian or zombie crossing the road
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Walking: (±walk speed, 0), sign = direction across the road.
    /// Struck: (0, speed of the vehicle that hit it).
    pub vel: Vec2,
    pub hit: bool,
    pub tone: HazardTone,
}

impl Hazard {
    /// Mark as struck by a vehicle. Returns false if it was already hit.
    pub fn strike(&mut self, vehicle_speed: f32) -> bool {
        if self.hit {
            return false;
        }
        self.hit = true;
        self.tone = HazardTone::Dead;
        self.vel = Vec2::new(0.0, vehicle_speed);
        self.pos.y += vehicle_speed;
        true
    }
}

impl Bounded for Hazard {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Invincibility,
    SlowMotion,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Invincibility, PowerUpKind::SlowMotion];

    pub fn color(&self) -> &'static str {
        match self {
            PowerUpKind::Invincibility => "#f1c40f",
            PowerUpKind::SlowMotion => "#3498db",
        }
    }
}

/// A falling power-up pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Bounded for PowerUp {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Active timed effects and transient presentation flags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub invincible: bool,
    /// Tick at which the most recent invincibility window ends
    pub invincible_until: u64,
    /// Slow-motion windows currently open
    pub slow_motion: u32,
    pub collision_flash: bool,
    /// Level shown on the level-up banner while it is up
    pub level_up_banner: Option<u32>,
}

/// Entity category for the depth-sorted draw list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawKind {
    Vehicle,
    Hazard,
    PowerUp,
}

/// One entry of the back-to-front draw order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    pub kind: DrawKind,
    /// Index into the matching entity list
    pub index: usize,
    /// Bottom edge (y + height), ascending = back to front
    pub depth: f32,
}

/// Fire-and-forget notifications for frontends, drained after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelUp { level: u32 },
    CollisionFlash,
    LifeLost { remaining: u8 },
    GameOver { score: u64, distance: u64, level: u32 },
    PowerUpCollected { kind: PowerUpKind },
    PowerUpActivated { kind: PowerUpKind },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Bumped on every start/restart; stale timed effects carry an old value
    pub session: u32,
    /// Monotonic frame counter, never reset
    pub clock: u64,
    pub phase: GamePhase,
    pub variant: Variant,
    pub difficulty: Difficulty,
    pub difficulty_table: DifficultyTable,
    pub score: u64,
    pub multiplier: f32,
    pub multiplier_timer: u32,
    pub distance: f32,
    pub level: u32,
    /// `None` for the single-life variant
    pub lives: Option<u8>,
    /// World speed, drives distance
    pub speed: f32,
    /// Lane-marker scroll, 0..ROAD_DASH_PERIOD
    pub road_offset: f32,
    pub bike: Bike,
    pub vehicles: Vec<Vehicle>,
    pub hazards: Vec<Hazard>,
    pub power_ups: Vec<PowerUp>,
    /// Collected but not yet activated
    pub held_power_up: Option<PowerUpKind>,
    pub effects: ActiveEffects,
    pub timers: EffectQueue,
    /// Disabled in scripted scenarios
    pub spawning: bool,
    #[serde(skip)]
    pub draw_order: Vec<DrawItem>,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state sitting at the menu
    pub fn new(seed: u64, variant: Variant, difficulty: Difficulty) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            session: 0,
            clock: 0,
            phase: GamePhase::Menu,
            variant,
            difficulty,
            difficulty_table: DifficultyTable::new(variant, 1),
            score: 0,
            multiplier: 1.0,
            multiplier_timer: 0,
            distance: 0.0,
            level: 1,
            lives: variant.starting_lives(),
            speed: WORLD_SPEED,
            road_offset: 0.0,
            bike: Bike::default(),
            vehicles: Vec::new(),
            hazards: Vec::new(),
            power_ups: Vec::new(),
            held_power_up: None,
            effects: ActiveEffects::default(),
            timers: EffectQueue::default(),
            spawning: true,
            draw_order: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a state already in play
    pub fn playing(seed: u64, variant: Variant, difficulty: Difficulty) -> Self {
        let mut state = Self::new(seed, variant, difficulty);
        state.begin_run();
        state
    }

    /// Reset per-run fields and enter Playing. Pending timers stay queued but
    /// belong to the previous session, so they are ignored when they fire.
    pub fn begin_run(&mut self) {
        self.session = self.session.wrapping_add(1);
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.multiplier = 1.0;
        self.multiplier_timer = 0;
        self.distance = 0.0;
        self.level = 1;
        self.lives = self.variant.starting_lives();
        self.difficulty_table = DifficultyTable::new(self.variant, 1);
        self.road_offset = 0.0;
        self.bike = Bike::default();
        self.vehicles.clear();
        self.hazards.clear();
        self.power_ups.clear();
        self.held_power_up = None;
        self.effects = ActiveEffects::default();
        self.draw_order.clear();
        self.events.clear();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Profile for the selected difficulty at the current level
    pub fn profile(&self) -> DifficultyProfile {
        *self.difficulty_table.get(self.difficulty)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_invincible(&self) -> bool {
        self.effects.invincible
    }

    /// Award points through the multiplier, then bump the multiplier
    pub fn award_score(&mut self, points: u32) {
        self.score += (points as f32 * self.multiplier).round() as u64;
        self.multiplier = (self.multiplier + MULTIPLIER_STEP).min(MULTIPLIER_MAX);
        self.multiplier_timer = MULTIPLIER_DURATION;
    }

    /// Flat bonus that bypasses the multiplier
    pub fn award_bonus(&mut self, points: u64) {
        self.score += points;
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
