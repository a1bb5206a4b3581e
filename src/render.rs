//! Read-only frame snapshots for an external renderer
//!
//! The simulation never draws. After each tick the host captures a
//! [`FrameSnapshot`] and hands it to whatever renders the frame (a canvas
//! script on the web, a log line natively). Every drawable entity is a
//! variant of [`Drawable`], so a renderer dispatches on the tag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::highscores::ScoreTracker;
use crate::sim::collision::ship_collision_radius;
use crate::sim::state::{Crater, FieldBounds, GamePhase, GameState, Hazard, Particle, Ship, TrailKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub collision_radius: f32,
    /// Any movement key held (engine flame)
    pub thrusting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardView {
    pub id: u32,
    pub position: Vec2,
    pub radius: f32,
    pub rotation: f32,
    pub vertices: Vec<Vec2>,
    pub craters: Vec<Crater>,
    pub trail_kind: TrailKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Vec2,
    pub color: [u8; 3],
    /// Remaining / initial life, in [0, 1]; doubles as alpha
    pub life_ratio: f32,
    /// Size shrunk by life ratio
    pub draw_size: f32,
}

/// One thing to draw, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drawable {
    Ship(ShipView),
    Hazard(HazardView),
    Particle(ParticleView),
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub bounds: FieldBounds,
    /// Back to front: hazards with their trails, then the ship
    pub drawables: Vec<Drawable>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, scores: &ScoreTracker) -> Self {
        let mut drawables = Vec::with_capacity(state.hazards.len() + state.particle_count() + 1);
        for hazard in &state.hazards {
            drawables.push(Drawable::Hazard(hazard_view(hazard)));
            drawables.extend(hazard.particles.iter().map(|p| Drawable::Particle(particle_view(p))));
        }
        if state.phase != GamePhase::NotStarted {
            drawables.push(Drawable::Ship(ship_view(&state.ship)));
        }

        Self {
            phase: state.phase,
            score: scores.current(),
            high_score: scores.best(),
            bounds: state.bounds,
            drawables,
        }
    }

    /// JSON for a script-side renderer
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn ship(&self) -> Option<&ShipView> {
        self.drawables.iter().find_map(|d| match d {
            Drawable::Ship(ship) => Some(ship),
            _ => None,
        })
    }

    pub fn hazards(&self) -> impl Iterator<Item = &HazardView> {
        self.drawables.iter().filter_map(|d| match d {
            Drawable::Hazard(h) => Some(h),
            _ => None,
        })
    }

    pub fn particles(&self) -> impl Iterator<Item = &ParticleView> {
        self.drawables.iter().filter_map(|d| match d {
            Drawable::Particle(p) => Some(p),
            _ => None,
        })
    }
}

fn ship_view(ship: &Ship) -> ShipView {
    ShipView {
        position: ship.position,
        width: ship.width,
        height: ship.height,
        collision_radius: ship_collision_radius(ship),
        thrusting: ship.movement.any(),
    }
}

fn hazard_view(hazard: &Hazard) -> HazardView {
    HazardView {
        id: hazard.id,
        position: hazard.position,
        radius: hazard.radius,
        rotation: hazard.rotation,
        vertices: hazard.vertices.clone(),
        craters: hazard.craters.clone(),
        trail_kind: hazard.trail_kind,
    }
}

fn particle_view(particle: &Particle) -> ParticleView {
    let life_ratio = particle.life_ratio();
    ParticleView {
        position: particle.position,
        color: particle.color,
        life_ratio,
        draw_size: particle.size * life_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::hazard::emit_trail_particle;
    use crate::sim::spawner::create_hazard;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn populated_state() -> GameState {
        let tuning = Tuning::default();
        let mut state = GameState::new(8, &tuning);
        state.phase = GamePhase::Running;
        let mut rng = Pcg32::seed_from_u64(8);
        let mut hazard = create_hazard(1, &state.bounds, &tuning, &mut rng);
        let particle = emit_trail_particle(&hazard, &mut rng);
        hazard.particles.push(particle);
        state.hazards.push(hazard);
        state
    }

    #[test]
    fn test_capture_orders_back_to_front() {
        let state = populated_state();
        let scores = ScoreTracker::new(Box::new(MemoryStore::new()));
        let snap = FrameSnapshot::capture(&state, &scores);

        assert_eq!(snap.drawables.len(), 3);
        assert!(matches!(snap.drawables[0], Drawable::Hazard(_)));
        assert!(matches!(snap.drawables[1], Drawable::Particle(_)));
        assert!(matches!(snap.drawables[2], Drawable::Ship(_)));
        assert_eq!(snap.ship().map(|s| s.collision_radius), Some(20.0));

        let p = snap.particles().next().expect("one particle");
        assert_eq!(p.life_ratio, 1.0);
    }

    #[test]
    fn test_no_ship_before_start() {
        let tuning = Tuning::default();
        let state = GameState::new(1, &tuning);
        let scores = ScoreTracker::new(Box::new(MemoryStore::new()));
        let snap = FrameSnapshot::capture(&state, &scores);
        assert!(snap.ship().is_none());
        assert_eq!(snap.phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_json_is_tagged() {
        let state = populated_state();
        let scores = ScoreTracker::new(Box::new(MemoryStore::new()));
        let json = FrameSnapshot::capture(&state, &scores).to_json().expect("serialize");
        assert!(json.contains(r#""kind":"hazard""#));
        assert!(json.contains(r#""kind":"particle""#));
        assert!(json.contains(r#""kind":"ship""#));

        let back: FrameSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.hazards().count(), 1);
    }
}
