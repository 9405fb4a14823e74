//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-count timing only (no wall clock)
//! - Seeded RNG only
//! - Timed effects go through the session-tagged queue
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Bounded, Rect, collides, overlaps};
pub use effects::{Effect, EffectQueue, ScheduledEffect};
pub use state::{
    ActiveEffects, Bike, Boost, Difficulty, DifficultyProfile, DifficultyTable, DrawItem,
    DrawKind, GameEvent, GamePhase, GameState, Hazard, HazardStyle, HazardTone, PowerUp,
    PowerUpKind, TrailPoint, Variant, Vehicle, VehicleKind,
};
pub use tick::{TickInput, activate_power_up, tick};
