//! Game state and core simulation types
//!
//! Entities are plain records. Behavior lives in free functions in
//! `hazard`, `collision` and `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawner::Spawner;
use crate::input::Direction;
use crate::tuning::Tuning;

/// Offset mixed into the run seed for the cosmetic RNG stream
const FX_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start action
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Ship was hit
    GameOver,
}

/// Rectangular play area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
}

impl FieldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if `pos` lies inside the field grown by `margin` on every side
    pub fn contains_with_margin(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self::new(crate::consts::FIELD_WIDTH, crate::consts::FIELD_HEIGHT)
    }
}

/// Held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementFlags {
    /// Set or clear one flag (last writer wins)
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Sum of unit steps for every held flag (screen coordinates, +y is down).
    ///
    /// Not normalized: a diagonal has length √2.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    /// Center position
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels moved per frame for each held flag
    pub speed: f32,
    pub movement: MovementFlags,
}

impl Ship {
    /// Create a ship at the center of the field
    pub fn new(bounds: &FieldBounds, tuning: &Tuning) -> Self {
        Self {
            position: bounds.center(),
            width: tuning.ship_width,
            height: tuning.ship_height,
            speed: tuning.ship_speed,
            movement: MovementFlags::default(),
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Apply held flags, then clamp into the field
    pub fn apply_movement(&mut self, bounds: &FieldBounds, normalize_diagonal: bool) {
        let mut dir = self.movement.direction();
        if normalize_diagonal {
            dir = dir.normalize_or_zero();
        }
        self.position += dir * self.speed;
        self.clamp_to(bounds);
    }

    /// Keep the whole hull inside the field
    pub fn clamp_to(&mut self, bounds: &FieldBounds) {
        let half = self.half_extents();
        // A field narrower than the ship pins it to the far edge
        self.position.x = self.position.x.max(half.x).min(bounds.width - half.x);
        self.position.y = self.position.y.max(half.y).min(bounds.height - half.y);
    }
}

/// Trail flavour, picked once per hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrailKind {
    Fire,
    Ice,
}

impl TrailKind {
    /// Particle color as RGB
    pub fn color(&self) -> [u8; 3] {
        match self {
            TrailKind::Fire => [0xff, 0x66, 0x00],
            TrailKind::Ice => [0x66, 0xcc, 0xff],
        }
    }
}

/// Surface crater, relative to the hazard center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crater {
    pub position: Vec2,
    pub radius: f32,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Displacement per frame
    pub velocity: Vec2,
    pub color: [u8; 3],
    /// Frames left before removal
    pub remaining_life: i32,
    pub initial_life: i32,
    pub size: f32,
}

impl Particle {
    /// Advance one frame. Returns false once the particle has expired.
    pub fn update(&mut self) -> bool {
        self.position += self.velocity;
        self.remaining_life -= 1;
        self.remaining_life > 0
    }

    /// Fraction of life left, in [0, 1]
    pub fn life_ratio(&self) -> f32 {
        if self.initial_life <= 0 {
            return 0.0;
        }
        (self.remaining_life.max(0) as f32 / self.initial_life as f32).min(1.0)
    }
}

/// An asteroid-like obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub id: u32,
    /// Center position
    pub position: Vec2,
    /// Heading; displacement per frame is `velocity * speed`
    pub velocity: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Outline relative to center, generated at spawn
    pub vertices: Vec<Vec2>,
    /// Craters relative to center, generated at spawn
    pub craters: Vec<Crater>,
    /// Radians, wrapped to [0, 2π)
    pub rotation: f32,
    /// Radians per frame
    pub rotation_speed: f32,
    pub trail_kind: TrailKind,
    /// Trail particles owned by this hazard
    pub particles: Vec<Particle>,
}

impl Hazard {
    /// Displacement applied every frame
    pub fn step(&self) -> Vec2 {
        self.velocity * self.speed
    }
}

/// Complete simulation state owned by the game loop
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (spawn positions, shapes)
    pub rng: Pcg32,
    /// Cosmetic RNG (trail particles only)
    pub fx_rng: Pcg32,
    pub phase: GamePhase,
    pub bounds: FieldBounds,
    pub ship: Ship,
    /// Live hazards in spawn order
    pub hazards: Vec<Hazard>,
    pub spawner: Spawner,
    /// Running frames simulated since the last start
    pub frame_count: u64,
    /// Timestamp of the last accepted frame
    pub last_frame_ms: Option<f64>,
    /// Consecutive frames rejected for running behind `last_frame_ms`
    pub stale_frames: u32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh, not-yet-started state
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let bounds = FieldBounds::new(tuning.field_width, tuning.field_height);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_SEED_SALT),
            phase: GamePhase::NotStarted,
            bounds,
            ship: Ship::new(&bounds, tuning),
            hazards: Vec::new(),
            spawner: Spawner::new(tuning.spawn_interval_ms),
            frame_count: 0,
            last_frame_ms: None,
            stale_frames: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clear the field and recenter the ship for a new run
    pub fn reset_run(&mut self) {
        self.hazards.clear();
        self.ship.position = self.bounds.center();
        self.ship.movement = MovementFlags::default();
        self.spawner.reset();
        self.frame_count = 0;
        self.last_frame_ms = None;
        self.stale_frames = 0;
    }

    /// Total trail particles across all hazards
    pub fn particle_count(&self) -> usize {
        self.hazards.iter().map(|h| h.particles.len()).sum()
    }
}
