//! Per-frame simulation tick
//!
//! Core game loop that advances the run by one frame. Step order matters:
//! later steps read values written by earlier ones.

use rand::Rng;

use super::autopilot;
use super::collision::{Bounded, overlaps};
use super::effects::{Effect, process_timers};
use super::physics::step_bike;
use super::spawn::run_spawner;
use super::state::{DrawItem, DrawKind, GameEvent, GamePhase, GameState, PowerUpKind};
use crate::consts::*;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Boost key held
    pub boost: bool,
    /// Use the held power-up (one-shot)
    pub activate_power_up: bool,
    /// Idle/demo mode - autopilot drives the bike
    pub idle_mode: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.clock += 1;

    // Timers fire even outside play; stale sessions are filtered inside
    process_timers(state);

    if state.phase != GamePhase::Playing {
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot::drive(state, &mut input);
    }
    let input = &input;

    if input.activate_power_up {
        activate_power_up(state);
    }

    // 1. Multiplier decay
    if state.multiplier_timer > 0 {
        state.multiplier_timer -= 1;
        if state.multiplier_timer == 0 {
            state.multiplier = 1.0;
        }
    }

    // 2. Difficulty follows level
    state.difficulty_table.recompute(state.variant, state.level);

    // 3. Lane-marker scroll
    state.road_offset = (state.road_offset + ROAD_SPEED) % ROAD_DASH_PERIOD;

    // 4. Bike physics
    step_bike(&mut state.bike, input);

    // 5. Spawning
    if state.spawning {
        run_spawner(state);
    }

    // 6-8. Entity updates
    update_vehicles(state);
    update_hazards(state);
    update_power_ups(state);

    if state.is_playing() {
        // 9. Distance
        state.distance += state.speed / 10.0;

        // 10. Level progression
        check_level_up(state);
    }

    // 12. Draw order for the renderer
    rebuild_draw_order(state);
}

/// Move vehicles down, award passes, and test against the bike
fn update_vehicles(state: &mut GameState) {
    let bike = state.bike.bounds();
    let mut passed = 0;
    let mut bike_hits = 0;

    state.vehicles.retain_mut(|vehicle| {
        vehicle.pos.y += vehicle.speed;
        if vehicle.pos.y > CANVAS_HEIGHT {
            passed += 1;
            return false;
        }
        if overlaps(&bike, &vehicle.bounds()) {
            bike_hits += 1;
        }
        true
    });

    for _ in 0..passed {
        state.award_score(VEHICLE_PASS_POINTS);
    }
    for _ in 0..bike_hits {
        resolve_bike_collision(state);
    }
}

/// Walk hazards, let vehicles strike them, cull, and test against the bike
fn update_hazards(state: &mut GameState) {
    let bike = state.bike.bounds();
    let jitter = state.variant.hazard_style().jitter;
    let rng = &mut state.rng;
    let vehicles = &state.vehicles;
    let mut strikes = 0u64;
    let mut bike_hits = 0;

    state.hazards.retain_mut(|hazard| {
        if hazard.hit {
            // Carried along at the striking vehicle's speed
            hazard.pos.y += hazard.vel.y;
        } else {
            hazard.pos.x += hazard.vel.x;
            if jitter && rng.random::<f32>() < HAZARD_JITTER_CHANCE {
                hazard.pos.y += if rng.random_bool(0.5) {
                    HAZARD_JITTER_STEP
                } else {
                    -HAZARD_JITTER_STEP
                };
            }
        }

        for vehicle in vehicles {
            if !hazard.hit
                && overlaps(&hazard.bounds(), &vehicle.bounds())
                && hazard.strike(vehicle.speed)
            {
                strikes += 1;
            }
        }

        let off_screen = hazard.pos.x < -HAZARD_CULL_MARGIN
            || hazard.pos.x > CANVAS_WIDTH + HAZARD_CULL_MARGIN
            || hazard.pos.y > CANVAS_HEIGHT
            || hazard.pos.y + hazard.size.y < -HAZARD_CULL_MARGIN;
        if off_screen {
            return false;
        }

        if !hazard.hit && overlaps(&bike, &hazard.bounds()) {
            bike_hits += 1;
        }
        true
    });

    // Score is final once the run has ended this tick
    if state.is_playing() {
        state.award_bonus(strikes * HAZARD_STRIKE_BONUS);
    }
    for _ in 0..bike_hits {
        resolve_bike_collision(state);
    }
}

/// Drop power-ups, cull at the bottom, and collect on contact
fn update_power_ups(state: &mut GameState) {
    let bike = state.bike.bounds();
    let mut collected = None;

    state.power_ups.retain_mut(|power_up| {
        power_up.pos.y += power_up.speed;
        if power_up.pos.y > CANVAS_HEIGHT {
            return false;
        }
        if overlaps(&bike, &power_up.bounds()) {
            collected = Some(power_up.kind);
            return false;
        }
        true
    });

    if let Some(kind) = collected {
        // Replaces any power-up still held
        state.held_power_up = Some(kind);
        state.events.push(GameEvent::PowerUpCollected { kind });
        log::debug!("Collected {:?}", kind);
    }
}

/// Apply the outcome of the bike touching a vehicle or an un-hit hazard
pub fn resolve_bike_collision(state: &mut GameState) {
    if !state.is_playing() || state.is_invincible() {
        return;
    }

    state.multiplier = 1.0;
    state.multiplier_timer = 0;
    state.effects.collision_flash = true;
    state.schedule(COLLISION_FLASH_TICKS, Effect::ClearCollisionFlash);
    state.events.push(GameEvent::CollisionFlash);

    match state.lives {
        Some(lives) => {
            let remaining = lives.saturating_sub(1);
            state.lives = Some(remaining);
            if remaining == 0 {
                game_over(state);
            } else {
                log::info!("Life lost, {} remaining", remaining);
                state.events.push(GameEvent::LifeLost { remaining });
                grant_invincibility(state, LIFE_LOSS_GRACE_TICKS);
            }
        }
        None => game_over(state),
    }
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    let distance = state.distance.floor() as u64;
    log::info!(
        "Game over: score {} distance {}m level {}",
        state.score,
        distance,
        state.level
    );
    state.events.push(GameEvent::GameOver {
        score: state.score,
        distance,
        level: state.level,
    });
}

/// Make the bike invincible for `ticks`, never shortening a longer window
pub fn grant_invincibility(state: &mut GameState, ticks: u64) {
    let until = state.clock + ticks;
    if state.effects.invincible && state.effects.invincible_until >= until {
        return;
    }
    state.effects.invincible = true;
    state.effects.invincible_until = until;
    state.schedule(ticks, Effect::EndInvincibility { until });
}

/// Use the held power-up, if any. The slot empties regardless of kind.
pub fn activate_power_up(state: &mut GameState) {
    let Some(kind) = state.held_power_up.take() else {
        return;
    };

    match kind {
        PowerUpKind::Invincibility => {
            let ticks = state.variant.invincibility_ticks();
            grant_invincibility(state, ticks);
        }
        PowerUpKind::SlowMotion => {
            for vehicle in &mut state.vehicles {
                vehicle.speed *= 0.5;
            }
            state.effects.slow_motion += 1;
            state.schedule(SLOW_MOTION_TICKS, Effect::EndSlowMotion);
        }
    }

    log::debug!("Activated {:?}", kind);
    state.events.push(GameEvent::PowerUpActivated { kind });
}

/// One level per tick at most, once score reaches level × 100
fn check_level_up(state: &mut GameState) {
    if state.score >= state.level as u64 * LEVEL_SCORE_STEP {
        state.level += 1;
        state.effects.level_up_banner = Some(state.level);
        state.schedule(LEVEL_UP_BANNER_TICKS, Effect::DismissLevelUp);
        state.events.push(GameEvent::LevelUp { level: state.level });
        log::info!("Level up: {}", state.level);
    }
}

/// Merge all drawables and sort back-to-front by bottom edge
fn rebuild_draw_order(state: &mut GameState) {
    let vehicles = state.vehicles.iter().enumerate().map(|(index, v)| DrawItem {
        kind: DrawKind::Vehicle,
        index,
        depth: v.pos.y + v.size.y,
    });
    let hazards = state.hazards.iter().enumerate().map(|(index, h)| DrawItem {
        kind: DrawKind::Hazard,
        index,
        depth: h.pos.y + h.size.y,
    });
    let power_ups = state.power_ups.iter().enumerate().map(|(index, p)| DrawItem {
        kind: DrawKind::PowerUp,
        index,
        depth: p.pos.y + p.size.y,
    });

    let mut order: Vec<DrawItem> = vehicles.chain(hazards).chain(power_ups).collect();
    order.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    state.draw_order = order;
}
