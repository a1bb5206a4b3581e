//! Collision detection between the ship and hazards
//!
//! Both bodies are treated as circles. The ship's hull is a tapered
//! polygon, so the circle over-reports hits near the nose.

use glam::Vec2;

use super::state::{Hazard, Ship};

/// Radius of the circle standing in for the ship hull
#[inline]
pub fn ship_collision_radius(ship: &Ship) -> f32 {
    ship.width.min(ship.height) / 2.0
}

/// Strict circle overlap: touching circles do not collide
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Check whether a hazard overlaps the ship
pub fn ship_hazard_collision(ship: &Ship, hazard: &Hazard) -> bool {
    circles_overlap(
        ship.position,
        ship_collision_radius(ship),
        hazard.position,
        hazard.radius,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{FieldBounds, MovementFlags, TrailKind};
    use crate::tuning::Tuning;

    fn ship_at(position: Vec2) -> Ship {
        let mut ship = Ship::new(&FieldBounds::default(), &Tuning::default());
        ship.position = position;
        ship.movement = MovementFlags::default();
        ship
    }

    fn hazard_at(position: Vec2, radius: f32) -> Hazard {
        Hazard {
            id: 1,
            position,
            velocity: Vec2::ZERO,
            speed: 0.0,
            radius,
            vertices: Vec::new(),
            craters: Vec::new(),
            rotation: 0.0,
            rotation_speed: 0.0,
            trail_kind: TrailKind::Fire,
            particles: Vec::new(),
        }
    }

    #[test]
    fn test_ship_radius_uses_short_side() {
        let ship = ship_at(Vec2::ZERO);
        assert_eq!(ship_collision_radius(&ship), 20.0);
    }

    #[test]
    fn test_overlap_hits() {
        let ship = ship_at(Vec2::new(400.0, 300.0));
        let hazard = hazard_at(Vec2::new(400.0, 290.0), 30.0);
        assert!(ship_hazard_collision(&ship, &hazard));
    }

    #[test]
    fn test_touching_is_a_miss() {
        let ship = ship_at(Vec2::new(400.0, 300.0));
        let hazard = hazard_at(Vec2::new(400.0, 250.0), 30.0);
        assert!(!ship_hazard_collision(&ship, &hazard));

        let hazard = hazard_at(Vec2::new(400.0, 250.5), 30.0);
        assert!(ship_hazard_collision(&ship, &hazard));
    }

    #[test]
    fn test_far_apart_misses() {
        let ship = ship_at(Vec2::new(100.0, 100.0));
        let hazard = hazard_at(Vec2::new(700.0, 500.0), 40.0);
        assert!(!ship_hazard_collision(&ship, &hazard));
    }

    #[test]
    fn test_symmetric_and_repeatable() {
        let a = Vec2::new(10.0, 20.0);
        let b = Vec2::new(40.0, 60.0);
        for _ in 0..3 {
            assert_eq!(circles_overlap(a, 20.0, b, 31.0), circles_overlap(b, 31.0, a, 20.0));
        }
        assert!(circles_overlap(a, 20.0, b, 31.0));
        assert!(!circles_overlap(a, 20.0, b, 30.0));
    }
}
