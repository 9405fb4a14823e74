//! Dead Lane entry point
//!
//! Headless runner: loads settings, drives one run frame by frame and logs
//! what a HUD would show.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use dead_lane::sim::{GameEvent, GamePhase, GameState};
    use dead_lane::{Frontend, Game, HudSnapshot, InputEvent, PortError, Settings};

    /// Frontend that writes notifications to the log
    pub struct LogFrontend {
        hud_interval: u32,
        frames: u32,
    }

    impl LogFrontend {
        pub fn new(hud_interval: u32) -> Self {
            Self {
                hud_interval,
                frames: 0,
            }
        }
    }

    impl Frontend for LogFrontend {
        fn update_hud(&mut self, hud: &HudSnapshot) -> Result<(), PortError> {
            self.frames += 1;
            if self.frames % self.hud_interval == 0 {
                log::info!(
                    "score {} {} | level {} | {}m | boost {:.0}{}",
                    hud.score,
                    hud.multiplier_label(),
                    hud.level,
                    hud.distance,
                    hud.boost_amount,
                    match hud.lives {
                        Some(lives) => format!(" | lives {}", lives),
                        None => String::new(),
                    }
                );
            }
            Ok(())
        }

        fn notify(&mut self, event: &GameEvent) -> Result<(), PortError> {
            match event {
                GameEvent::LevelUp { level } => log::info!("LEVEL {}!", level),
                GameEvent::LifeLost { remaining } => log::info!("Ouch! {} lives left", remaining),
                GameEvent::GameOver {
                    score,
                    distance,
                    level,
                } => log::info!(
                    "GAME OVER - score {} distance {}m level {}",
                    score,
                    distance,
                    level
                ),
                GameEvent::CollisionFlash => log::debug!("Collision"),
                GameEvent::PowerUpCollected { kind } => log::debug!("Picked up {:?}", kind),
                GameEvent::PowerUpActivated { kind } => log::info!("{:?} activated", kind),
            }
            Ok(())
        }

        fn draw(&mut self, state: &GameState) -> Result<(), PortError> {
            log::trace!(
                "frame {}: {} drawables",
                state.clock,
                state.draw_order.len()
            );
            Ok(())
        }
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Dead Lane (headless) starting...");

        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load(&path).unwrap_or_else(|e| {
                log::warn!("{}; using default settings", e);
                Settings::default()
            }),
            None => {
                log::info!("Using default settings");
                Settings::default()
            }
        };

        let seed = settings.seed.unwrap_or_else(clock_seed);
        let mut game = Game::new(&settings, seed);
        // No keyboard here, so autopilot always drives regardless of the setting
        game.set_idle_mode(true);
        game.handle(InputEvent::Start);

        let mut frontend = LogFrontend::new(settings.hud_interval);
        let mut frames = 0;
        while frames < settings.max_frames && game.phase() == GamePhase::Playing {
            game.frame(&mut frontend);
            frames += 1;
        }

        let hud = game.hud();
        let summary = serde_json::json!({
            "seed": seed,
            "variant": settings.variant.as_str(),
            "difficulty": settings.difficulty.as_str(),
            "frames": frames,
            "game_over": game.phase() == GamePhase::GameOver,
            "hud": hud,
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize summary: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser frontend in this crate
}
