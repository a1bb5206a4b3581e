//! Hazard spawning
//!
//! Decides when a new hazard appears and where it comes from.

use glam::Vec2;
use rand::Rng;

use super::hazard::{generate_craters, generate_outline};
use super::state::{FieldBounds, Hazard, TrailKind};
use crate::tuning::{Span, Tuning};

/// Field edge a hazard enters through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Unit vector pointing from this edge into the field
    pub fn inward(&self) -> Vec2 {
        match self {
            Edge::Top => Vec2::Y,
            Edge::Right => Vec2::NEG_X,
            Edge::Bottom => Vec2::NEG_Y,
            Edge::Left => Vec2::X,
        }
    }
}

/// Interval-based spawn timer
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    pub interval_ms: f64,
    /// Timestamp of the last spawn; `None` fires on the next check
    pub last_spawn_ms: Option<f64>,
}

impl Spawner {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_spawn_ms: None,
        }
    }

    /// Re-arm so the next check fires
    pub fn reset(&mut self) {
        self.last_spawn_ms = None;
    }

    /// Move a last-spawn time that lies after `now_ms` back to it
    pub fn rebase(&mut self, now_ms: f64) {
        if let Some(last) = self.last_spawn_ms {
            if last > now_ms {
                self.last_spawn_ms = Some(now_ms);
            }
        }
    }

    /// True at most once per interval; records `now_ms` when it fires
    pub fn should_spawn(&mut self, now_ms: f64) -> bool {
        if !now_ms.is_finite() {
            return false;
        }
        let due = match self.last_spawn_ms {
            None => true,
            Some(last) => now_ms - last >= self.interval_ms,
        };
        if due {
            self.last_spawn_ms = Some(now_ms);
        }
        due
    }
}

/// Build a hazard just outside a random edge, heading into the field
pub fn create_hazard<R: Rng>(id: u32, bounds: &FieldBounds, tuning: &Tuning, rng: &mut R) -> Hazard {
    let radius = tuning.hazard_radius.sample(rng);
    let vertex_count = tuning.hazard_vertices.sample(rng);
    let spin = tuning.hazard_max_spin;
    let rotation_speed = if spin > 0.0 {
        Span::new(-spin, spin).sample(rng)
    } else {
        0.0
    };
    let speed = tuning.hazard_speed.sample(rng);

    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let along_x = rng.random::<f32>() * bounds.width;
    let along_y = rng.random::<f32>() * bounds.height;
    let position = match edge {
        Edge::Top => Vec2::new(along_x, -radius),
        Edge::Right => Vec2::new(bounds.width + radius, along_y),
        Edge::Bottom => Vec2::new(along_x, bounds.height + radius),
        Edge::Left => Vec2::new(-radius, along_y),
    };

    // Inward component in [1, 3), perpendicular drift in [-1, 1)
    let inward = edge.inward() * rng.random_range(1.0_f32..3.0);
    let drift = edge.inward().perp() * rng.random_range(-1.0_f32..1.0);
    let velocity = inward + drift;

    let vertices = generate_outline(rng, radius, vertex_count);
    let crater_count = tuning.hazard_craters.sample(rng);
    let craters = generate_craters(rng, radius, crater_count);
    let trail_kind = if rng.random_bool(0.5) {
        TrailKind::Fire
    } else {
        TrailKind::Ice
    };

    log::debug!(
        "Spawned hazard {} on {:?} edge at ({:.1}, {:.1}), r={:.1}",
        id,
        edge,
        position.x,
        position.y,
        radius
    );

    Hazard {
        id,
        position,
        velocity,
        speed,
        radius,
        vertices,
        craters,
        rotation: 0.0,
        rotation_speed,
        trail_kind,
        particles: Vec::new(),
    }
}
