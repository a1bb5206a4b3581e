//! Asteroid Dodger - A 2D arcade dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game loop)
//! - `highscores`: Score counter with a persisted best score
//! - `persistence`: Key-value storage backends (memory, JSON file, LocalStorage)
//! - `input`: Keyboard mapping to movement flags
//! - `render`: Read-only frame snapshots for an external renderer
//! - `constellation`: Star-matching puzzle
//! - `settings`: Player preferences (quality, trails)
//! - `platform`: Browser host loop and default storage
//! - `tuning`: Data-driven game balance

pub mod constellation;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::ScoreTracker;
pub use settings::{QualityPreset, Settings};
pub use sim::GameLoop;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_WIDTH: f32 = 40.0;
    pub const SHIP_HEIGHT: f32 = 60.0;
    /// Pixels per frame, per active direction flag
    pub const SHIP_SPEED: f32 = 5.0;

    /// Time between hazard spawns
    pub const SPAWN_INTERVAL_MS: f64 = 2000.0;

    /// Hazard shape ranges (radius is half-open, counts are inclusive)
    pub const HAZARD_MIN_RADIUS: f32 = 20.0;
    pub const HAZARD_MAX_RADIUS: f32 = 40.0;
    pub const HAZARD_MIN_VERTICES: usize = 8;
    pub const HAZARD_MAX_VERTICES: usize = 11;
    pub const HAZARD_MIN_CRATERS: usize = 2;
    pub const HAZARD_MAX_CRATERS: usize = 4;
    pub const HAZARD_MIN_SPEED: f32 = 2.0;
    pub const HAZARD_MAX_SPEED: f32 = 4.0;
    /// Max rotation per frame in either direction (radians)
    pub const HAZARD_MAX_SPIN: f32 = 0.025;

    /// Chance per frame that a hazard emits a trail particle
    pub const TRAIL_EMIT_CHANCE: f64 = 0.3;

    /// Score added every running frame
    pub const SCORE_PER_FRAME: u64 = 1;

    /// Persistence keys
    pub const HIGH_SCORE_KEY: &str = "asteroidDodgerHighScore";
    pub const SETTINGS_KEY: &str = "asteroidDodgerSettings";
}

/// Unit vector at angle `theta`, scaled by `r`
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}
