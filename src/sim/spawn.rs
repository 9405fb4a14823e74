//! Probabilistic entity spawning
//!
//! Each tick draws one uniform sample per category against its rate. Spawns
//! only ever append; overlapping an existing entity is allowed.

use glam::Vec2;
use rand::Rng;

use super::state::{
    GameState, Hazard, HazardTone, PowerUp, PowerUpKind, Vehicle, VehicleKind,
};
use crate::consts::*;
use crate::{lane_center, lane_count};

/// Run all three spawn gates for this tick
pub fn run_spawner(state: &mut GameState) {
    let profile = state.profile();

    if state.rng.random::<f32>() < vehicle_rate(state) {
        spawn_vehicle(state);
    }

    if state.rng.random::<f32>() < HAZARD_SPAWN_RATE {
        spawn_hazard(state);
    }

    if state.rng.random::<f32>() < profile.power_up_rate {
        spawn_power_up(state);
    }
}

/// Per-tick vehicle spawn chance. Level scaling stops at SPAWN_LEVEL_CAP.
pub fn vehicle_rate(state: &GameState) -> f32 {
    state.profile().spawn_rate * state.level.min(SPAWN_LEVEL_CAP) as f32
}

/// Random vehicle in a random lane, just above the visible area
pub fn spawn_vehicle(state: &mut GameState) {
    let lane = state.rng.random_range(0..lane_count());
    let kind = VehicleKind::ALL[state.rng.random_range(0..VehicleKind::ALL.len())];
    let speed = state.profile().vehicle_speed * state.variant.vehicle_speed_factor();
    push_vehicle(state, kind, lane, speed);
}

/// Place a vehicle of `kind` centred on `lane` with its bottom edge at y = 0
pub fn push_vehicle(state: &mut GameState, kind: VehicleKind, lane: usize, speed: f32) {
    let size = kind.size();
    let vehicle = Vehicle {
        id: state.next_entity_id(),
        kind,
        pos: Vec2::new(lane_center(lane) - size.x / 2.0, -size.y),
        size,
        speed,
    };
    log::debug!("Spawned {:?} in lane {} at speed {:.2}", kind, lane, speed);
    state.vehicles.push(vehicle);
}

/// Hazard at a random road edge and height, walking toward the other edge
pub fn spawn_hazard(state: &mut GameState) {
    let from_left = state.rng.random_bool(0.5);
    let y = state.rng.random::<f32>() * (CANVAS_HEIGHT - 100.0) + 50.0;
    let magnitude = state.rng.random_range(0.5..1.5);

    let (x, speed) = if from_left {
        (ROAD_LEFT, magnitude)
    } else {
        (ROAD_LEFT + ROAD_WIDTH, -magnitude)
    };

    let hazard = Hazard {
        id: state.next_entity_id(),
        pos: Vec2::new(x, y),
        size: Vec2::new(HAZARD_WIDTH, HAZARD_HEIGHT),
        vel: Vec2::new(speed, 0.0),
        hit: false,
        tone: HazardTone::Alive,
    };
    state.hazards.push(hazard);
}

/// Power-up of a random kind at a random x, just above the visible area
pub fn spawn_power_up(state: &mut GameState) {
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let (left, width) = state.variant.power_up_span();
    let x = state.rng.random::<f32>() * (width - POWER_UP_SIZE) + left;

    let power_up = PowerUp {
        id: state.next_entity_id(),
        kind,
        pos: Vec2::new(x, -POWER_UP_SIZE),
        size: Vec2::splat(POWER_UP_SIZE),
        speed: POWER_UP_SPEED,
    };
    log::debug!("Spawned {:?} power-up at x={:.0}", kind, x);
    state.power_ups.push(power_up);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Difficulty, Variant};

    #[test]
    fn test_vehicle_spawns_above_screen_in_a_lane() {
        let mut state = GameState::playing(42, Variant::Zombie, Difficulty::Medium);
        for _ in 0..50 {
            spawn_vehicle(&mut state);
        }
        let lanes: Vec<f32> = (0..lane_count()).map(lane_center).collect();
        let expected_speed = state.profile().vehicle_speed * 0.9;
        for v in &state.vehicles {
            assert_eq!(v.pos.y + v.size.y, 0.0);
            let centre = v.pos.x + v.size.x / 2.0;
            assert!(lanes.iter().any(|l| (l - centre).abs() < 0.001));
            assert!((v.speed - expected_speed).abs() < 0.0001);
            assert_eq!(v.size, v.kind.size());
        }
    }

    #[test]
    fn test_pedestrian_vehicles_keep_full_speed() {
        let mut state = GameState::playing(42, Variant::Pedestrian, Difficulty::Hard);
        spawn_vehicle(&mut state);
        assert!((state.vehicles[0].speed - state.profile().vehicle_speed).abs() < 0.0001);
    }

    #[test]
    fn test_hazards_drift_across_the_road() {
        let mut state = GameState::playing(9, Variant::Zombie, Difficulty::Medium);
        for _ in 0..100 {
            spawn_hazard(&mut state);
        }
        for h in &state.hazards {
            let speed = h.vel.x.abs();
            assert!((0.5..1.5).contains(&speed));
            assert_eq!(h.vel.y, 0.0);
            if h.pos.x == ROAD_LEFT {
                assert!(h.vel.x > 0.0);
            } else {
                assert_eq!(h.pos.x, ROAD_LEFT + ROAD_WIDTH);
                assert!(h.vel.x < 0.0);
            }
            assert!(h.pos.y >= 50.0 && h.pos.y < CANVAS_HEIGHT - 50.0);
            assert!(!h.hit);
        }
    }

    #[test]
    fn test_power_ups_respect_variant_span() {
        let mut state = GameState::playing(5, Variant::Zombie, Difficulty::Easy);
        for _ in 0..100 {
            spawn_power_up(&mut state);
        }
        for p in &state.power_ups {
            assert!(p.pos.x >= ROAD_LEFT);
            assert!(p.pos.x + p.size.x <= ROAD_LEFT + ROAD_WIDTH);
            assert_eq!(p.pos.y, -POWER_UP_SIZE);
            assert_eq!(p.speed, POWER_UP_SPEED);
        }

        let mut state = GameState::playing(5, Variant::Pedestrian, Difficulty::Easy);
        for _ in 0..100 {
            spawn_power_up(&mut state);
        }
        for p in &state.power_ups {
            assert!(p.pos.x >= 0.0 && p.pos.x + p.size.x <= CANVAS_WIDTH);
        }
    }

    #[test]
    fn test_spawner_is_additive() {
        let mut state = GameState::playing(77, Variant::Zombie, Difficulty::Hard);
        state.level = 5;
        state.difficulty_table.recompute(state.variant, state.level);
        let mut last = 0;
        for _ in 0..500 {
            run_spawner(&mut state);
            let total = state.vehicles.len() + state.hazards.len() + state.power_ups.len();
            assert!(total >= last);
            last = total;
        }
        assert!(!state.vehicles.is_empty());
    }

    #[test]
    fn test_vehicle_rate_level_scaling_caps() {
        let mut state = GameState::playing(3, Variant::Zombie, Difficulty::Medium);
        state.level = 9;
        state.difficulty_table.recompute(state.variant, state.level);
        let base = state.profile().spawn_rate;
        assert!((vehicle_rate(&state) - base * SPAWN_LEVEL_CAP as f32).abs() < 1e-6);

        // Same profile, level 5 vs level 9: identical draw chance
        let at_nine = vehicle_rate(&state);
        state.level = 5;
        assert_eq!(vehicle_rate(&state), at_nine);

        state.level = 2;
        assert!((vehicle_rate(&state) - base * 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_vehicle_spawn_frequency_matches_rate() {
        let mut state = GameState::playing(2024, Variant::Pedestrian, Difficulty::Easy);
        state.level = 9;
        state.difficulty_table.recompute(state.variant, state.level);
        let rate = vehicle_rate(&state);
        let draws = 20_000;
        for _ in 0..draws {
            run_spawner(&mut state);
        }
        let observed = state.vehicles.len() as f32 / draws as f32;
        assert!((observed - rate).abs() < 0.01, "observed {observed}, expected {rate}");
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = GameState::playing(1, Variant::Zombie, Difficulty::Medium);
        spawn_vehicle(&mut state);
        spawn_hazard(&mut state);
        spawn_power_up(&mut state);
        let ids = [state.vehicles[0].id, state.hazards[0].id, state.power_ups[0].id];
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
    }
}
