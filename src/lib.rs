//! Dead Lane - a lane-dodging arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `game`: Frame driver that turns input events into ticks and feeds frontends
//! - `ports`: Read models and collaborator traits for HUD/renderer/notifications
//! - `settings`: Run configuration

pub mod game;
pub mod ports;
pub mod settings;
pub mod sim;

pub use game::{Game, InputEvent, Keys};
pub use ports::{DrawItem, DrawKind, Frontend, HudSnapshot, PortError};
pub use settings::{Settings, SettingsError};
pub use sim::{Difficulty, Variant};

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per display refresh)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Road, centred on the canvas
    pub const ROAD_WIDTH: f32 = 500.0;
    pub const ROAD_LEFT: f32 = (CANVAS_WIDTH - ROAD_WIDTH) / 2.0;
    /// Lane centres as a fraction of road width
    pub const LANE_FRACTIONS: [f32; 4] = [0.125, 0.375, 0.625, 0.875];

    /// Lane-marker scroll
    pub const ROAD_SPEED: f32 = 2.0;
    pub const ROAD_DASH_PERIOD: f32 = 40.0;

    /// World speed (distance accrues at WORLD_SPEED / 10 per tick)
    pub const WORLD_SPEED: f32 = 5.0;

    /// Bike defaults
    pub const BIKE_WIDTH: f32 = 40.0;
    pub const BIKE_HEIGHT: f32 = 80.0;
    pub const BIKE_ACCELERATION: f32 = 0.5;
    pub const BIKE_FRICTION: f32 = 0.95;
    pub const BIKE_MAX_SPEED: f32 = 10.0;
    pub const BIKE_MAX_LEAN: f32 = 30.0; // degrees
    pub const BIKE_LEAN_EASING: f32 = 0.2;
    pub const BIKE_TRAIL_LENGTH: usize = 5;

    /// Boost resource
    pub const BOOST_MAX: f32 = 100.0;
    pub const BOOST_FACTOR: f32 = 1.5;
    pub const BOOST_DRAIN_RATE: f32 = 2.0;
    pub const BOOST_RECHARGE_RATE: f32 = 0.5;
    pub const BOOST_MAX_COOLDOWN: u32 = 180;

    /// Hazards (pedestrians/zombies)
    pub const HAZARD_WIDTH: f32 = 20.0;
    pub const HAZARD_HEIGHT: f32 = 40.0;
    pub const HAZARD_SPAWN_RATE: f32 = 0.01;
    pub const HAZARD_JITTER_CHANCE: f32 = 0.05;
    pub const HAZARD_JITTER_STEP: f32 = 5.0;
    /// Horizontal slack beyond the canvas before a hazard is culled
    pub const HAZARD_CULL_MARGIN: f32 = 50.0;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 30.0;
    pub const POWER_UP_SPEED: f32 = 3.0;

    /// Scoring
    pub const VEHICLE_PASS_POINTS: u32 = 10;
    pub const HAZARD_STRIKE_BONUS: u64 = 5;
    pub const LEVEL_SCORE_STEP: u64 = 100;
    pub const MULTIPLIER_STEP: f32 = 0.5;
    pub const MULTIPLIER_MAX: f32 = 4.0;
    pub const MULTIPLIER_DURATION: u32 = 300; // 5 seconds

    /// Difficulty caps
    pub const MAX_SPAWN_RATE: f32 = 0.05;
    pub const SPAWN_LEVEL_CAP: u32 = 5;

    /// Timed effect durations (ticks)
    pub const SLOW_MOTION_TICKS: u64 = 3 * TICKS_PER_SECOND as u64;
    pub const COLLISION_FLASH_TICKS: u64 = TICKS_PER_SECOND as u64 / 2;
    pub const LEVEL_UP_BANNER_TICKS: u64 = 2 * TICKS_PER_SECOND as u64;
    pub const LIFE_LOSS_GRACE_TICKS: u64 = TICKS_PER_SECOND as u64;
}

/// X coordinate of a lane centre
#[inline]
pub fn lane_center(lane: usize) -> f32 {
    let fractions = consts::LANE_FRACTIONS;
    consts::ROAD_LEFT + consts::ROAD_WIDTH * fractions[lane % fractions.len()]
}

/// Number of lanes on the road
#[inline]
pub fn lane_count() -> usize {
    consts::LANE_FRACTIONS.len()
}

/// Convert a duration in seconds to simulation ticks
#[inline]
pub fn secs_to_ticks(secs: u32) -> u64 {
    secs as u64 * consts::TICKS_PER_SECOND as u64
}
