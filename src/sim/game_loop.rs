//! Game loop: owns the simulation and mediates phase transitions
//!
//! A host calls [`GameLoop::tick`] once per display frame with the frame
//! timestamp, then renders from [`GameLoop::snapshot`].

use super::hazard::TrailConfig;
use super::state::{GamePhase, GameState};
use super::tick::{TickOutcome, tick};
use crate::highscores::ScoreTracker;
use crate::input::InputEvent;
use crate::persistence::KeyValueStore;
use crate::render::FrameSnapshot;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// One game session
#[derive(Debug)]
pub struct GameLoop {
    tuning: Tuning,
    trail: TrailConfig,
    state: GameState,
    scores: ScoreTracker,
    disposed: bool,
}

impl GameLoop {
    /// Create a loop in `NotStarted`, reading the high score from `store`
    pub fn new(seed: u64, tuning: Tuning, settings: &Settings, store: Box<dyn KeyValueStore>) -> Self {
        // Out-of-range spans still run; they sample their min
        if let Err(e) = tuning.validate() {
            log::warn!("Running with questionable tuning: {}", e);
        }
        let state = GameState::new(seed, &tuning);
        let trail = trail_config(&tuning, settings);
        let scores = ScoreTracker::new(store);
        log::info!(
            "Game loop ready (seed {}, field {}x{}, high score {})",
            seed,
            tuning.field_width,
            tuning.field_height,
            scores.high_score()
        );
        Self {
            tuning,
            trail,
            state,
            scores,
            disposed: false,
        }
    }

    /// Begin the first run. Ignored while a run is in progress.
    pub fn start(&mut self) {
        if self.disposed {
            return;
        }
        match self.state.phase {
            GamePhase::NotStarted | GamePhase::GameOver => self.begin_run(),
            GamePhase::Running => log::debug!("start() ignored, already running"),
        }
    }

    /// Begin a new run from any phase; the high score is kept
    pub fn restart(&mut self) {
        if self.disposed {
            return;
        }
        self.begin_run();
    }

    fn begin_run(&mut self) {
        self.scores.reset();
        self.state.reset_run();
        self.state.phase = GamePhase::Running;
        log::info!("Run started (high score {})", self.scores.high_score());
    }

    /// Advance one display frame
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        if self.disposed {
            return TickOutcome::Idle;
        }
        let outcome = tick(&mut self.state, &self.tuning, &self.trail, now_ms);
        match outcome {
            TickOutcome::Survived => self.scores.increment(self.tuning.score_per_frame),
            TickOutcome::Collided { .. } => {
                log::info!("Game over, score {}", self.scores.current());
                self.scores.commit_if_high_score();
            }
            TickOutcome::Idle | TickOutcome::Skipped => {}
        }
        outcome
    }

    /// Apply a key transition to the ship's movement flags
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.disposed {
            return;
        }
        self.state.ship.movement.set(event.direction(), event.is_pressed());
    }

    /// Swap in new preferences (takes effect next frame)
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.trail = trail_config(&self.tuning, settings);
    }

    /// Stop accepting frames and input. Hosts must also drop their callbacks.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.state.ship.movement = Default::default();
        log::info!("Game loop disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.scores.current()
    }

    pub fn high_score(&self) -> u64 {
        self.scores.high_score()
    }

    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted scenarios and editors
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Read-only view of this frame for the renderer
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state, &self.scores)
    }
}

fn trail_config(tuning: &Tuning, settings: &Settings) -> TrailConfig {
    TrailConfig {
        emit_chance: tuning.trail_emit_chance,
        max_particles: settings.max_trail_particles(),
    }
}
