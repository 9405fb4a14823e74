//! Idle/demo mode driver
//!
//! Synthesises steering input from the current state: dodge the nearest
//! obstacle bearing down on the bike, otherwise drift back to the home spot.

use super::collision::{Bounded, Rect};
use super::state::{Bike, GameState};
use super::tick::TickInput;
use crate::consts::*;

/// How far above the bike obstacles count as threats
const LOOKAHEAD: f32 = 220.0;
/// Extra horizontal clearance wanted around the bike
const MARGIN: f32 = 15.0;
/// Fire a held power-up when a threat is this close
const PANIC_DISTANCE: f32 = 40.0;
/// Dead zone around the home spot
const HOME_SLACK: f32 = 4.0;
/// Don't keep pushing once already moving this fast toward the goal
const CRUISE_SPEED: f32 = 3.0;

/// Overwrite the movement part of `input` with autopilot decisions
pub fn drive(state: &GameState, input: &mut TickInput) {
    input.left = false;
    input.right = false;
    input.up = false;
    input.down = false;
    input.boost = false;

    let bike = state.bike.bounds();

    match nearest_threat(state, &bike) {
        Some(threat) => {
            let room_left = threat.left() - ROAD_LEFT;
            let room_right = ROAD_LEFT + ROAD_WIDTH - threat.right();
            if room_left > room_right {
                input.left = true;
            } else {
                input.right = true;
            }
            // Back off while the gap closes
            input.down = true;

            if state.held_power_up.is_some() && threat.bottom() > bike.top() - PANIC_DISTANCE {
                input.activate_power_up = true;
            }
        }
        None => {
            let home = Bike::default().pos;
            let bike = &state.bike;
            seek(bike.pos.x, bike.vel.x, home.x, &mut input.left, &mut input.right);
            seek(bike.pos.y, bike.vel.y, home.y, &mut input.up, &mut input.down);
        }
    }
}

/// Closest obstacle ahead of the bike whose column overlaps the bike's
fn nearest_threat(state: &GameState, bike: &Rect) -> Option<Rect> {
    let column = (bike.left() - MARGIN, bike.right() + MARGIN);
    let vehicles = state.vehicles.iter().map(|v| v.bounds());
    let hazards = state.hazards.iter().filter(|h| !h.hit).map(|h| h.bounds());

    vehicles
        .chain(hazards)
        .filter(|r| r.right() > column.0 && r.left() < column.1)
        .filter(|r| r.bottom() > bike.top() - LOOKAHEAD && r.top() < bike.bottom())
        .max_by(|a, b| a.bottom().total_cmp(&b.bottom()))
}

/// Push toward `target` along one axis, easing off near it
fn seek(pos: f32, vel: f32, target: f32, negative: &mut bool, positive: &mut bool) {
    let delta = target - pos;
    if delta > HOME_SLACK && vel < CRUISE_SPEED {
        *positive = true;
    } else if delta < -HOME_SLACK && vel > -CRUISE_SPEED {
        *negative = true;
    }
}
