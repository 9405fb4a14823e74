//! Deferred timed effects
//!
//! Timers are queue entries `(fire_tick, session, effect)` checked at the start
//! of every tick. Entries only flip flags or scale speeds; they never add or
//! remove entities. An entry whose session no longer matches the state's
//! session is dropped without effect, so timers armed before a restart
//! cannot leak into the new run.

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Clear invincibility if no later window was granted since
    EndInvincibility { until: u64 },
    /// Double every current vehicle's speed back
    EndSlowMotion,
    ClearCollisionFlash,
    DismissLevelUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEffect {
    pub fire_tick: u64,
    pub session: u32,
    pub effect: Effect,
}

/// Pending timers, unordered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectQueue {
    pending: Vec<ScheduledEffect>,
}

impl EffectQueue {
    pub fn schedule(&mut self, fire_tick: u64, session: u32, effect: Effect) {
        self.pending.push(ScheduledEffect {
            fire_tick,
            session,
            effect,
        });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every entry due at or before `now`, in firing order
    pub fn take_due(&mut self, now: u64) -> Vec<ScheduledEffect> {
        let mut due = Vec::new();
        self.pending.retain(|entry| {
            if entry.fire_tick <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|e| e.fire_tick);
        due
    }
}

impl GameState {
    /// Arm a timer for the current session, `delay` ticks from now
    pub fn schedule(&mut self, delay: u64, effect: Effect) {
        let fire_tick = self.clock + delay;
        self.timers.schedule(fire_tick, self.session, effect);
    }
}

/// Fire every due timer. Runs every tick regardless of phase.
pub fn process_timers(state: &mut GameState) {
    for entry in state.timers.take_due(state.clock) {
        if entry.session != state.session {
            log::debug!(
                "Dropping stale {:?} from session {} (now {})",
                entry.effect,
                entry.session,
                state.session
            );
            continue;
        }
        apply(state, entry.effect);
    }
}

fn apply(state: &mut GameState, effect: Effect) {
    match effect {
        Effect::EndInvincibility { until } => {
            if state.effects.invincible_until == until {
                state.effects.invincible = false;
            }
        }
        Effect::EndSlowMotion => {
            // Not a true inverse: vehicles spawned during the window were never
            // halved but get doubled here too.
            for vehicle in &mut state.vehicles {
                vehicle.speed *= 2.0;
            }
            state.effects.slow_motion = state.effects.slow_motion.saturating_sub(1);
        }
        Effect::ClearCollisionFlash => state.effects.collision_flash = false,
        Effect::DismissLevelUp => state.effects.level_up_banner = None,
    }
}
