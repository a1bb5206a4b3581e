//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-locked stepping (one step per display frame)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod game_loop;
pub mod hazard;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, ship_collision_radius, ship_hazard_collision};
pub use game_loop::GameLoop;
pub use hazard::{
    TrailConfig, emit_trail_particle, generate_craters, generate_outline, is_out_of_bounds, update_hazard,
    update_particles,
};
pub use spawner::{Edge, Spawner, create_hazard};
pub use state::{
    Crater, FieldBounds, GamePhase, GameState, Hazard, MovementFlags, Particle, Ship, TrailKind,
};
pub use tick::{TickOutcome, tick};
