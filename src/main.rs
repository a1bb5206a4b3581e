//! Asteroid Dodger entry point
//!
//! On the web the library's `DodgerApp` is the entry point and this binary
//! does nothing. Natively it runs a headless session driven by a simple
//! autopilot and logs the result, which is handy for balance tuning.
//!
//! Usage: `asteroid-dodger [--seed N] [--frames N] [--tuning FILE]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use asteroid_dodger::input::{Direction, InputEvent};
    use asteroid_dodger::platform::shared_default_store;
    use asteroid_dodger::sim::{GamePhase, TickOutcome};
    use asteroid_dodger::{GameLoop, Settings, Tuning};

    /// Display frame period
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// How close a hazard gets before the autopilot reacts
    const DANGER_RADIUS: f32 = 160.0;

    pub struct Args {
        pub seed: u64,
        pub frames: u32,
        pub tuning: Option<String>,
    }

    impl Args {
        pub fn parse() -> Self {
            let mut args = Args {
                seed: 0x5EED,
                frames: 60 * 60,
                tuning: None,
            };
            let mut iter = std::env::args().skip(1);
            while let Some(flag) = iter.next() {
                let value = iter.next();
                match (flag.as_str(), value) {
                    ("--seed", Some(v)) => match v.parse() {
                        Ok(seed) => args.seed = seed,
                        Err(_) => log::warn!("Ignoring bad --seed {}", v),
                    },
                    ("--frames", Some(v)) => match v.parse() {
                        Ok(frames) => args.frames = frames,
                        Err(_) => log::warn!("Ignoring bad --frames {}", v),
                    },
                    ("--tuning", Some(v)) => args.tuning = Some(v),
                    (other, _) => log::warn!("Ignoring unknown argument {}", other),
                }
            }
            args
        }
    }

    pub fn run(args: Args) {
        let tuning = match &args.tuning {
            Some(path) => match Tuning::load_from_file(path) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Failed to load tuning from {}: {}, using defaults", path, e);
                    Tuning::default()
                }
            },
            None => Tuning::default(),
        };

        let store = shared_default_store();
        let settings = Settings::load(&store);
        let mut game = GameLoop::new(args.seed, tuning, &settings, Box::new(store));
        game.start();

        let mut now = 0.0;
        let mut frames = 0;
        while frames < args.frames {
            steer(&mut game);
            let outcome = game.tick(now);
            now += FRAME_MS;
            frames += 1;
            if let TickOutcome::Collided { hazard_id } = outcome {
                log::info!("Hit by hazard {} after {} frames", hazard_id, frames);
                break;
            }
        }

        if game.phase() == GamePhase::Running {
            log::info!("Survived all {} frames", frames);
        }
        log::info!(
            "Final score {} (high score {}{})",
            game.score(),
            game.scores().best(),
            if game.scores().is_persistent() { "" } else { ", not saved" }
        );
        game.dispose();
    }

    /// Sidestep the nearest hazard, drift back to center otherwise
    fn steer(game: &mut GameLoop) {
        let ship = game.state().ship.position;
        let center = game.state().bounds.center();
        let threat = game
            .state()
            .hazards
            .iter()
            .map(|h| (h.position, h.position.distance(ship) - h.radius))
            .filter(|(_, gap)| *gap < DANGER_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(pos, _)| pos);

        let (left, right) = match threat {
            Some(pos) => (pos.x >= ship.x, pos.x < ship.x),
            None => (ship.x > center.x + 10.0, ship.x < center.x - 10.0),
        };
        for (dir, pressed) in [(Direction::Left, left), (Direction::Right, right)] {
            let event = if pressed { InputEvent::KeyDown(dir) } else { InputEvent::KeyUp(dir) };
            game.handle_input(event);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Dodger (headless) starting...");
    headless::run(headless::Args::parse());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is DodgerApp, this is just to satisfy the compiler
}
