//! Bike controller
//!
//! Held keys push velocity, friction bleeds it off, the boost resource
//! amplifies it, and the result is integrated and clamped to the road.

use super::state::Bike;
use super::tick::TickInput;
use crate::consts::*;

/// Advance the bike by one tick of input
pub fn step_bike(bike: &mut Bike, input: &TickInput) {
    update_boost_trigger(bike, input.boost);

    if input.left {
        bike.vel.x -= bike.acceleration;
    }
    if input.right {
        bike.vel.x += bike.acceleration;
    }
    if input.up {
        bike.vel.y -= bike.acceleration;
    }
    if input.down {
        bike.vel.y += bike.acceleration;
    }

    let boost = &mut bike.boost;
    if boost.active && boost.amount > 0.0 {
        bike.vel *= BOOST_FACTOR;
        boost.amount = (boost.amount - boost.drain_rate).max(0.0);
        if boost.amount <= 0.0 {
            boost.active = false;
            boost.cooldown = boost.max_cooldown;
        }
    }

    bike.vel *= bike.friction;

    if !boost.active {
        if boost.cooldown > 0 {
            boost.cooldown -= 1;
        } else if boost.amount < BOOST_MAX {
            boost.amount = (boost.amount + boost.recharge_rate).min(BOOST_MAX);
        }
    }

    // Clamp only; velocity keeps pushing into the wall
    let pos = bike.pos + bike.vel;
    bike.pos.x = pos.x.clamp(ROAD_LEFT, ROAD_LEFT + ROAD_WIDTH - bike.size.x);
    bike.pos.y = pos.y.clamp(0.0, CANVAS_HEIGHT - bike.size.y);

    // First-order ease toward the velocity-derived lean
    let target_lean = (bike.vel.x / bike.max_speed) * bike.max_lean;
    bike.lean += (target_lean - bike.lean) * BIKE_LEAN_EASING;

    bike.record_trail();
}

/// Boost engages on the press edge only when charged and off cooldown, and
/// disengages as soon as the key is released.
fn update_boost_trigger(bike: &mut Bike, held: bool) {
    let boost = &mut bike.boost;
    if held && !boost.key_held && !boost.active && boost.amount > 0.0 && boost.cooldown == 0 {
        boost.active = true;
    }
    if !held {
        boost.active = false;
    }
    boost.key_held = held;
}
