//! Frame driver
//!
//! Owns the `GameState`, folds discrete input events into it, runs one tick
//! per display frame, and hands the results to a `Frontend`.

use crate::ports::{Frontend, HudSnapshot};
use crate::settings::Settings;
use crate::sim::{Difficulty, GamePhase, GameState, TickInput, tick};

/// Held movement keys, sampled by the input provider every frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub boost: bool,
}

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Use the held power-up on the next frame
    ActivatePowerUp,
    /// Only honoured outside of play
    SetDifficulty(Difficulty),
    /// Menu -> Playing
    Start,
    /// Playing/GameOver -> fresh run
    Restart,
}

/// Game instance holding all state
pub struct Game {
    state: GameState,
    keys: Keys,
    idle_mode: bool,
    /// One-shot, cleared after the next tick
    activate_pending: bool,
    last_phase: GamePhase,
}

impl Game {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let state = GameState::new(seed, settings.variant, settings.difficulty);
        Self {
            last_phase: state.phase,
            state,
            keys: Keys::default(),
            idle_mode: settings.autopilot,
            activate_pending: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn set_keys(&mut self, keys: Keys) {
        self.keys = keys;
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::from_state(&self.state)
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::ActivatePowerUp => self.activate_pending = true,
            InputEvent::SetDifficulty(difficulty) => {
                if self.state.phase == GamePhase::Playing {
                    log::warn!("Ignoring difficulty change to {} mid-run", difficulty.as_str());
                } else {
                    self.state.difficulty = difficulty;
                    log::info!("Difficulty set to {}", difficulty.as_str());
                }
            }
            InputEvent::Start => {
                if self.state.phase == GamePhase::Menu {
                    self.state.begin_run();
                    log::info!(
                        "Run started ({} / {}, seed {})",
                        self.state.variant.as_str(),
                        self.state.difficulty.as_str(),
                        self.state.seed
                    );
                } else {
                    log::debug!("Start ignored in {:?}", self.state.phase);
                }
            }
            InputEvent::Restart => {
                if self.state.phase == GamePhase::Menu {
                    log::debug!("Restart ignored at menu");
                    return;
                }
                self.state.begin_run();
                self.activate_pending = false;
                log::info!("Run restarted (session {})", self.state.session);
            }
        }
    }

    /// Run one display frame: tick, then feed the frontend
    pub fn frame(&mut self, frontend: &mut dyn Frontend) {
        let input = TickInput {
            left: self.keys.left,
            right: self.keys.right,
            up: self.keys.up,
            down: self.keys.down,
            boost: self.keys.boost,
            activate_power_up: self.activate_pending,
            idle_mode: self.idle_mode,
        };
        tick(&mut self.state, &input);
        self.activate_pending = false;

        for event in self.state.drain_events() {
            if let Err(e) = frontend.notify(&event) {
                log::warn!("Frontend dropped {:?}: {}", event, e);
            }
        }

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, phase);
            self.last_phase = phase;
        }

        if let Err(e) = frontend.update_hud(&self.hud()) {
            log::warn!("HUD update failed: {}", e);
        }
        if let Err(e) = frontend.draw(&self.state) {
            log::warn!("Draw failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::ports::PortError;
    use crate::sim::spawn::push_vehicle;
    use crate::sim::{GameEvent, PowerUpKind, Variant, VehicleKind};

    #[derive(Default)]
    struct Recorder {
        huds: Vec<HudSnapshot>,
        events: Vec<GameEvent>,
        fail: bool,
    }

    impl Frontend for Recorder {
        fn update_hud(&mut self, hud: &HudSnapshot) -> Result<(), PortError> {
            if self.fail {
                return Err(PortError::MissingElement("scoreValue".into()));
            }
            self.huds.push(hud.clone());
            Ok(())
        }

        fn notify(&mut self, event: &GameEvent) -> Result<(), PortError> {
            if self.fail {
                return Err(PortError::Unavailable("overlay".into()));
            }
            self.events.push(event.clone());
            Ok(())
        }
    }

    fn started(variant: Variant) -> Game {
        let settings = Settings {
            variant,
            ..Default::default()
        };
        let mut game = Game::new(&settings, 31337);
        game.handle(InputEvent::Start);
        game.state_mut().spawning = false;
        game
    }

    #[test]
    fn test_menu_to_playing() {
        let mut game = Game::new(&Settings::default(), 1);
        let mut ui = Recorder::default();
        game.frame(&mut ui);
        assert_eq!(game.phase(), GamePhase::Menu);
        assert_eq!(game.state().distance, 0.0);

        game.handle(InputEvent::Start);
        assert_eq!(game.phase(), GamePhase::Playing);
        game.frame(&mut ui);
        assert_eq!(game.state().distance, 0.5);
    }

    #[test]
    fn test_autopilot_setting_and_override() {
        let settings = Settings {
            autopilot: true,
            ..Default::default()
        };
        assert!(Game::new(&settings, 1).idle_mode);

        let mut game = Game::new(&Settings::default(), 1);
        assert!(!game.idle_mode);
        game.set_idle_mode(true);
        assert!(game.idle_mode);
    }

    #[test]
    fn test_difficulty_only_changes_outside_play() {
        let mut game = Game::new(&Settings::default(), 1);
        game.handle(InputEvent::SetDifficulty(Difficulty::Hard));
        assert_eq!(game.state().difficulty, Difficulty::Hard);

        game.handle(InputEvent::Start);
        game.handle(InputEvent::SetDifficulty(Difficulty::Easy));
        assert_eq!(game.state().difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_keys_move_bike() {
        let mut game = started(Variant::Zombie);
        let mut ui = Recorder::default();
        let x = game.state().bike.pos.x;
        game.set_keys(Keys {
            right: true,
            ..Default::default()
        });
        game.frame(&mut ui);
        assert!(game.state().bike.pos.x > x);
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut game = started(Variant::Zombie);
        let mut ui = Recorder::default();
        {
            let state = game.state_mut();
            push_vehicle(state, VehicleKind::Car, 1, 5.0);
            state.vehicles[0].pos.y = state.bike.pos.y - 80.0;
            state.score = 40;
        }
        game.frame(&mut ui);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(ui.events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                score: 40,
                distance: 0,
                level: 1
            }
        )));

        game.handle(InputEvent::Restart);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.state().score, 0);
        assert!(game.state().vehicles.is_empty());
        assert_eq!(game.state().session, 2);
    }

    #[test]
    fn test_power_up_activation_is_one_shot() {
        let mut game = started(Variant::Pedestrian);
        let mut ui = Recorder::default();
        game.state_mut().held_power_up = Some(PowerUpKind::Invincibility);
        game.handle(InputEvent::ActivatePowerUp);
        game.frame(&mut ui);
        assert!(game.state().is_invincible());
        assert!(ui.events.contains(&GameEvent::PowerUpActivated {
            kind: PowerUpKind::Invincibility
        }));

        // A second power-up collected later is not consumed by the old press
        game.state_mut().held_power_up = Some(PowerUpKind::SlowMotion);
        game.frame(&mut ui);
        assert_eq!(game.state().held_power_up, Some(PowerUpKind::SlowMotion));
    }

    #[test]
    fn test_stale_banner_timer_does_not_leak_into_new_run() {
        let mut game = started(Variant::Zombie);
        let mut ui = Recorder::default();

        game.state_mut().score = 100;
        game.frame(&mut ui);
        assert_eq!(game.state().effects.level_up_banner, Some(2));

        for _ in 0..10 {
            game.frame(&mut ui);
        }
        game.handle(InputEvent::Restart);
        game.state_mut().spawning = false;
        for _ in 0..40 {
            game.frame(&mut ui);
        }

        // New run levels up; its banner must outlive the old run's timer
        game.state_mut().score = 100;
        game.frame(&mut ui);
        assert_eq!(game.state().effects.level_up_banner, Some(2));
        for _ in 0..(LEVEL_UP_BANNER_TICKS - 40) {
            game.frame(&mut ui);
        }
        assert_eq!(game.state().effects.level_up_banner, Some(2));

        for _ in 0..60 {
            game.frame(&mut ui);
        }
        assert_eq!(game.state().effects.level_up_banner, None);
    }

    #[test]
    fn test_stale_invincibility_timer_ignored() {
        let mut game = started(Variant::Zombie);
        let mut ui = Recorder::default();
        game.state_mut().held_power_up = Some(PowerUpKind::Invincibility);
        game.handle(InputEvent::ActivatePowerUp);
        game.frame(&mut ui);

        for _ in 0..100 {
            game.frame(&mut ui);
        }
        game.handle(InputEvent::Restart);
        game.state_mut().spawning = false;
        game.state_mut().held_power_up = Some(PowerUpKind::Invincibility);
        game.handle(InputEvent::ActivatePowerUp);
        game.frame(&mut ui);

        // Past the first window's expiry, inside the second
        for _ in 0..120 {
            game.frame(&mut ui);
        }
        assert!(game.state().is_invincible());
    }

    #[test]
    fn test_failing_frontend_does_not_stop_the_game() {
        let mut game = started(Variant::Zombie);
        let mut ui = Recorder {
            fail: true,
            ..Default::default()
        };
        for _ in 0..10 {
            game.frame(&mut ui);
        }
        assert_eq!(game.state().distance, 5.0);
        assert!(ui.huds.is_empty());
    }

    #[test]
    fn test_hud_pushed_every_frame() {
        let mut game = started(Variant::Pedestrian);
        let mut ui = Recorder::default();
        for _ in 0..3 {
            game.frame(&mut ui);
        }
        assert_eq!(ui.huds.len(), 3);
        assert_eq!(ui.huds[2].distance, 1);
        assert_eq!(ui.huds[2].lives, Some(3));
    }
}
