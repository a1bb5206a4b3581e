//! Per-frame simulation step
//!
//! Advances the simulation by exactly one display frame. Movement and
//! scoring are frame-locked, so the timestamp only drives the spawn timer.

use super::collision::ship_hazard_collision;
use super::hazard::{TrailConfig, is_out_of_bounds, update_hazard};
use super::spawner::create_hazard;
use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// Backwards frames in a row before the clock is rebased to them
pub const REBASE_AFTER_STALE_FRAMES: u32 = 30;

/// What happened during one call to [`tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; state untouched
    Idle,
    /// Timestamp was non-finite or went backwards; treated as zero elapsed time
    Skipped,
    /// Frame simulated and the ship survived it
    Survived,
    /// Ship was hit; the phase is now `GameOver`
    Collided { hazard_id: u32 },
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, tuning: &Tuning, trail: &TrailConfig, now_ms: f64) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Idle;
    }

    if !accept_timestamp(state, now_ms) {
        log::trace!("Skipping frame with invalid timestamp {}", now_ms);
        return TickOutcome::Skipped;
    }

    state.frame_count += 1;

    // 1. Ship movement
    state.ship.apply_movement(&state.bounds, tuning.normalize_diagonal);

    // 2. Spawning
    if state.spawner.should_spawn(now_ms) {
        let id = state.next_entity_id();
        let hazard = create_hazard(id, &state.bounds, tuning, &mut state.rng);
        state.hazards.push(hazard);
    }

    // 3. Hazard motion and trails
    for hazard in &mut state.hazards {
        update_hazard(hazard, trail, &mut state.fx_rng);
    }

    // 4. Collisions - first hit in spawn order ends the run
    if let Some(index) = state
        .hazards
        .iter()
        .position(|h| ship_hazard_collision(&state.ship, h))
    {
        let hit = state.hazards.remove(index);
        state.phase = GamePhase::GameOver;
        log::info!(
            "Ship hit by hazard {} at ({:.1}, {:.1}) after {} frames",
            hit.id,
            hit.position.x,
            hit.position.y,
            state.frame_count
        );
        return TickOutcome::Collided { hazard_id: hit.id };
    }

    // 5. Drop hazards that drifted away; the caller applies the score
    state.hazards.retain(|h| !is_out_of_bounds(h, &state.bounds));

    TickOutcome::Survived
}

/// Record `now_ms` as the latest frame time if it is usable.
///
/// A timestamp behind the last accepted one is rejected, unless that has
/// happened [`REBASE_AFTER_STALE_FRAMES`] times in a row: then the earlier
/// time was a glitch and the clock restarts from `now_ms`.
fn accept_timestamp(state: &mut GameState, now_ms: f64) -> bool {
    if !now_ms.is_finite() {
        return false;
    }
    if let Some(last) = state.last_frame_ms {
        if now_ms < last {
            state.stale_frames += 1;
            if state.stale_frames < REBASE_AFTER_STALE_FRAMES {
                return false;
            }
            log::warn!(
                "Frame clock {:.0} ms behind for {} frames, rebasing",
                last - now_ms,
                state.stale_frames
            );
            state.spawner.rebase(now_ms);
        }
    }
    state.stale_frames = 0;
    state.last_frame_ms = Some(now_ms);
    true
}
