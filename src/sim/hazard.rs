//! Hazard behavior: procedural shape, per-frame motion, exhaust trail

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{Crater, FieldBounds, Hazard, Particle};
use crate::{polar_to_cartesian, wrap_angle};

/// Max outward jitter of an outline vertex, as a fraction of radius
const OUTLINE_JITTER: f32 = 0.3;
/// Craters sit within this fraction of the radius from center
const CRATER_MAX_OFFSET: f32 = 0.7;
const CRATER_MIN_RADIUS: f32 = 0.1;
const CRATER_RADIUS_SPREAD: f32 = 0.3;

/// Trail particles spawn on a ring at this fraction of the radius
const TRAIL_RING: f32 = 0.8;
const TRAIL_MIN_SPEED: f32 = 1.0;
const TRAIL_MIN_LIFE: i32 = 30;
const TRAIL_LIFE_SPREAD: f32 = 20.0;
const TRAIL_MIN_SIZE: f32 = 1.0;

/// Trail emission parameters for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailConfig {
    /// Probability of emitting one particle per frame
    pub emit_chance: f64,
    /// Cap on live particles per hazard (0 disables trails)
    pub max_particles: usize,
}

/// Angle-stepped polygon with per-vertex outward jitter
pub fn generate_outline<R: Rng>(rng: &mut R, radius: f32, vertex_count: usize) -> Vec<Vec2> {
    (0..vertex_count)
        .map(|i| {
            let theta = i as f32 / vertex_count as f32 * TAU;
            let r = radius + rng.random::<f32>() * radius * OUTLINE_JITTER;
            polar_to_cartesian(r, theta)
        })
        .collect()
}

/// Craters placed by polar offset from the center
pub fn generate_craters<R: Rng>(rng: &mut R, radius: f32, count: usize) -> Vec<Crater> {
    (0..count)
        .map(|_| {
            let theta = rng.random::<f32>() * TAU;
            let distance = rng.random::<f32>() * radius * CRATER_MAX_OFFSET;
            let crater_radius =
                rng.random::<f32>() * radius * CRATER_RADIUS_SPREAD + radius * CRATER_MIN_RADIUS;
            Crater {
                position: polar_to_cartesian(distance, theta),
                radius: crater_radius,
            }
        })
        .collect()
}

/// Build one exhaust particle on the hazard's rim, drifting in a random direction
pub fn emit_trail_particle<R: Rng>(hazard: &Hazard, rng: &mut R) -> Particle {
    let rim_theta = rng.random::<f32>() * TAU;
    let position = hazard.position + polar_to_cartesian(hazard.radius * TRAIL_RING, rim_theta);

    let speed = TRAIL_MIN_SPEED + rng.random::<f32>();
    let heading = rng.random::<f32>() * TAU;
    let life = TRAIL_MIN_LIFE + (rng.random::<f32>() * TRAIL_LIFE_SPREAD) as i32;

    Particle {
        position,
        velocity: polar_to_cartesian(speed, heading),
        color: hazard.trail_kind.color(),
        remaining_life: life,
        initial_life: life,
        size: TRAIL_MIN_SIZE + rng.random::<f32>(),
    }
}

/// Age every particle one frame and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| p.update());
}

/// Advance one frame: move, spin, maybe emit, age the trail
pub fn update_hazard<R: Rng>(hazard: &mut Hazard, trail: &TrailConfig, fx_rng: &mut R) {
    hazard.position += hazard.step();
    hazard.rotation = wrap_angle(hazard.rotation + hazard.rotation_speed);

    if trail.max_particles > 0 && rng_chance(fx_rng, trail.emit_chance) {
        let particle = emit_trail_particle(hazard, fx_rng);
        hazard.particles.push(particle);
        if hazard.particles.len() > trail.max_particles {
            // Oldest first
            let excess = hazard.particles.len() - trail.max_particles;
            hazard.particles.drain(..excess);
        }
    }

    update_particles(&mut hazard.particles);
}

/// True once the center is more than two radii outside any field edge
pub fn is_out_of_bounds(hazard: &Hazard, bounds: &FieldBounds) -> bool {
    !bounds.contains_with_margin(hazard.position, hazard.radius * 2.0)
}

fn rng_chance<R: Rng>(rng: &mut R, p: f64) -> bool {
    if p.is_nan() || p <= 0.0 {
        return false;
    }
    rng.random_bool(p.min(1.0))
}
