//! Frontend collaborator contracts
//!
//! The simulation never touches a screen. After each frame the driver hands a
//! `HudSnapshot`, the drained `GameEvent`s and a read-only view of the state to
//! a `Frontend`. Frontend failures are reported back as `PortError` and
//! logged; they never stop the game.

use serde::Serialize;
use thiserror::Error;

use crate::sim::{GameEvent, GameState, PowerUpKind};

pub use crate::sim::{DrawItem, DrawKind};

/// Errors a frontend may report
#[derive(Debug, Error)]
pub enum PortError {
    #[error("HUD element missing: {0}")]
    MissingElement(String),
    #[error("frontend unavailable: {0}")]
    Unavailable(String),
}

/// What the HUD shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub level: u32,
    /// Whole metres
    pub distance: u64,
    pub multiplier: f32,
    /// `None` for the single-life variant
    pub lives: Option<u8>,
    pub held_power_up: Option<PowerUpKind>,
    pub boost_amount: f32,
    pub boost_cooldown: u32,
    pub invincible: bool,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            level: state.level,
            distance: state.distance.floor() as u64,
            multiplier: state.multiplier,
            lives: state.lives,
            held_power_up: state.held_power_up,
            boost_amount: state.bike.boost.amount,
            boost_cooldown: state.bike.boost.cooldown,
            invincible: state.is_invincible(),
        }
    }

    /// Multiplier as shown on screen, e.g. "x1.5"
    pub fn multiplier_label(&self) -> String {
        format!("x{:.1}", self.multiplier)
    }

    /// Multiplier readout is highlighted above x1
    pub fn multiplier_active(&self) -> bool {
        self.multiplier > 1.0
    }
}

/// Presentation layer driven once per frame
pub trait Frontend {
    /// Refresh the HUD read model
    fn update_hud(&mut self, hud: &HudSnapshot) -> Result<(), PortError>;

    /// Level-up, collision flash, game over and power-up notifications
    fn notify(&mut self, event: &GameEvent) -> Result<(), PortError>;

    /// Paint the frame. `state.draw_order` is back-to-front.
    fn draw(&mut self, _state: &GameState) -> Result<(), PortError> {
        Ok(())
    }
}
