//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads comes from [`Tuning`], so a
//! JSON file can rebalance the game without a rebuild. Missing fields fall
//! back to the defaults in [`crate::consts`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::*;

/// Errors from loading or validating tuning data
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Well-formed but unusable values
    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

/// Half-open `[min, max)` range for floats, inclusive for counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl Span<f32> {
    /// Uniform sample in `[min, max)`. A collapsed, inverted or non-finite
    /// span yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min < self.max && (self.max - self.min).is_finite() {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

impl Span<usize> {
    /// Uniform sample in `[min, max]`; an inverted span yields `min`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        if self.min < self.max {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub ship_width: f32,
    pub ship_height: f32,
    /// Pixels per frame for each held direction
    pub ship_speed: f32,
    /// Scale diagonal movement down to axis speed
    pub normalize_diagonal: bool,

    pub spawn_interval_ms: f64,
    pub hazard_radius: Span<f32>,
    pub hazard_speed: Span<f32>,
    pub hazard_vertices: Span<usize>,
    pub hazard_craters: Span<usize>,
    /// Max spin per frame (radians)
    pub hazard_max_spin: f32,

    /// Chance per frame of a trail particle
    pub trail_emit_chance: f64,
    /// Score added each running frame
    pub score_per_frame: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            ship_speed: SHIP_SPEED,
            normalize_diagonal: false,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            hazard_radius: Span::new(HAZARD_MIN_RADIUS, HAZARD_MAX_RADIUS),
            hazard_speed: Span::new(HAZARD_MIN_SPEED, HAZARD_MAX_SPEED),
            hazard_vertices: Span::new(HAZARD_MIN_VERTICES, HAZARD_MAX_VERTICES),
            hazard_craters: Span::new(HAZARD_MIN_CRATERS, HAZARD_MAX_CRATERS),
            hazard_max_spin: HAZARD_MAX_SPIN,
            trail_emit_chance: TRAIL_EMIT_CHANCE,
            score_per_frame: SCORE_PER_FRAME,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid(format!("{} must be positive, got {}", name, v)))
            }
        };
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("ship_width", self.ship_width)?;
        positive("ship_height", self.ship_height)?;

        if !self.ship_speed.is_finite() || self.ship_speed < 0.0 {
            return Err(TuningError::Invalid(format!(
                "ship_speed must be non-negative, got {}",
                self.ship_speed
            )));
        }
        if !self.spawn_interval_ms.is_finite() || self.spawn_interval_ms <= 0.0 {
            return Err(TuningError::Invalid(format!(
                "spawn_interval_ms must be positive, got {}",
                self.spawn_interval_ms
            )));
        }

        let float_range = |name: &str, r: &Span<f32>| {
            if r.min.is_finite() && r.max.is_finite() && r.min > 0.0 && r.min <= r.max {
                Ok(())
            } else {
                Err(TuningError::Invalid(format!(
                    "{} must satisfy 0 < min <= max, got [{}, {})",
                    name, r.min, r.max
                )))
            }
        };
        float_range("hazard_radius", &self.hazard_radius)?;
        float_range("hazard_speed", &self.hazard_speed)?;

        if self.hazard_vertices.min < 3 || self.hazard_vertices.min > self.hazard_vertices.max {
            return Err(TuningError::Invalid(format!(
                "hazard_vertices must satisfy 3 <= min <= max, got [{}, {}]",
                self.hazard_vertices.min, self.hazard_vertices.max
            )));
        }
        if self.hazard_craters.min > self.hazard_craters.max {
            return Err(TuningError::Invalid(format!(
                "hazard_craters must satisfy min <= max, got [{}, {}]",
                self.hazard_craters.min, self.hazard_craters.max
            )));
        }
        if !self.hazard_max_spin.is_finite() || self.hazard_max_spin < 0.0 {
            return Err(TuningError::Invalid(format!(
                "hazard_max_spin must be non-negative, got {}",
                self.hazard_max_spin
            )));
        }
        if !(0.0..=1.0).contains(&self.trail_emit_chance) {
            return Err(TuningError::Invalid(format!(
                "trail_emit_chance must be within [0, 1], got {}",
                self.trail_emit_chance
            )));
        }
        Ok(())
    }
}
