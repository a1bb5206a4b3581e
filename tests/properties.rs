//! Property tests for gameplay invariants

use asteroid_dodger::consts::HIGH_SCORE_KEY;
use asteroid_dodger::highscores::ScoreTracker;
use asteroid_dodger::input::{Direction, InputEvent};
use asteroid_dodger::persistence::{KeyValueStore, MemoryStore};
use asteroid_dodger::sim::{
    FieldBounds, GamePhase, GameState, Hazard, Spawner, TickOutcome, TrailConfig, TrailKind, circles_overlap,
    create_hazard, tick,
};
use asteroid_dodger::{GameLoop, Settings, Tuning};
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn key_event() -> impl Strategy<Value = InputEvent> {
    (direction(), any::<bool>()).prop_map(|(dir, pressed)| {
        if pressed { InputEvent::KeyDown(dir) } else { InputEvent::KeyUp(dir) }
    })
}

fn still_hazard(position: Vec2, radius: f32) -> Hazard {
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
        trail_kind: TrailKind::Ice,
        particles: Vec::new(),
    }
}

proptest! {
    #[test]
    fn ship_never_leaves_field(
        seed in any::<u64>(),
        width in 100.0_f32..1200.0,
        height in 100.0_f32..1000.0,
        events in prop::collection::vec(key_event(), 1..200),
    ) {
        let tuning = Tuning { field_width: width, field_height: height, ..Tuning::default() };
        let mut state = GameState::new(seed, &tuning);
        state.phase = GamePhase::Running;
        state.spawner.last_spawn_ms = Some(0.0);
        state.spawner.interval_ms = f64::MAX;
        let trail = TrailConfig { emit_chance: 0.0, max_particles: 0 };

        let half = state.ship.half_extents();
        for (i, event) in events.iter().enumerate() {
            state.ship.movement.set(event.direction(), event.is_pressed());
            tick(&mut state, &tuning, &trail, i as f64 * 16.0);
            let p = state.ship.position;
            prop_assert!(p.x >= half.x && p.x <= width - half.x, "x {} out of field", p.x);
            prop_assert!(p.y >= half.y && p.y <= height - half.y, "y {} out of field", p.y);
        }
    }

    #[test]
    fn score_counts_survived_frames(seed in any::<u64>(), frames in 1_u32..300) {
        let mut game = GameLoop::new(seed, Tuning::default(), &Settings::default(), Box::new(MemoryStore::new()));
        game.start();
        let mut survived = 0;
        for i in 0..frames {
            let before = game.score();
            match game.tick(i as f64 * 16.0) {
                TickOutcome::Survived => {
                    survived += 1;
                    prop_assert_eq!(game.score(), before + 1);
                }
                _ => prop_assert_eq!(game.score(), before),
            }
        }
        prop_assert_eq!(game.score(), survived);
    }

    #[test]
    fn spawner_fires_at_most_once_per_interval(
        interval in 1.0_f64..5000.0,
        steps in prop::collection::vec(0.0_f64..3000.0, 1..100),
    ) {
        let mut spawner = Spawner::new(interval);
        let mut now = 0.0;
        let mut last_fire: Option<f64> = None;
        for step in steps {
            now += step;
            if spawner.should_spawn(now) {
                if let Some(prev) = last_fire {
                    prop_assert!(now - prev >= interval);
                }
                last_fire = Some(now);
            }
        }
    }

    #[test]
    fn overlap_is_symmetric(
        ax in -1000.0_f32..1000.0, ay in -1000.0_f32..1000.0, ar in 0.0_f32..100.0,
        bx in -1000.0_f32..1000.0, by in -1000.0_f32..1000.0, br in 0.0_f32..100.0,
    ) {
        let a = Vec2::new(ax, ay);
        let b = Vec2::new(bx, by);
        prop_assert_eq!(circles_overlap(a, ar, b, br), circles_overlap(b, br, a, ar));
    }

    #[test]
    fn high_score_never_decreases(stored in 0_u64..10_000, runs in prop::collection::vec(0_u64..20_000, 1..20)) {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, &stored.to_string()).expect("memory store");
        let mut tracker = ScoreTracker::new(Box::new(store));
        let mut best = stored;
        for run in runs {
            tracker.reset();
            tracker.increment(run);
            let before = tracker.high_score();
            tracker.commit_if_high_score();
            prop_assert!(tracker.high_score() >= before);
            best = best.max(run);
            prop_assert_eq!(tracker.high_score(), best);
        }
    }

    #[test]
    fn far_hazards_are_pruned(seed in any::<u64>(), dist in 2.1_f32..10.0, angle in 0.0_f32..std::f32::consts::TAU) {
        let tuning = Tuning::default();
        let mut state = GameState::new(seed, &tuning);
        state.phase = GamePhase::Running;
        state.spawner.last_spawn_ms = Some(0.0);
        state.spawner.interval_ms = f64::MAX;

        let bounds = FieldBounds::default();
        let radius = 30.0;
        // Past the 2r margin on at least one axis
        let offset = Vec2::new(angle.cos(), angle.sin()) * (bounds.width + radius * dist);
        state.hazards.push(still_hazard(bounds.center() + offset, radius));

        let trail = TrailConfig { emit_chance: 0.0, max_particles: 0 };
        prop_assert_eq!(tick(&mut state, &tuning, &trail, 16.0), TickOutcome::Survived);
        prop_assert!(state.hazards.is_empty());
    }

    #[test]
    fn created_hazards_head_into_field(seed in any::<u64>()) {
        let tuning = Tuning::default();
        let bounds = FieldBounds::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let h = create_hazard(1, &bounds, &tuning, &mut rng);
        // One radius outside an edge, moving back toward it
        let inward = (h.position.y < 0.0 && h.velocity.y > 0.0)
            || (h.position.y > bounds.height && h.velocity.y < 0.0)
            || (h.position.x < 0.0 && h.velocity.x > 0.0)
            || (h.position.x > bounds.width && h.velocity.x < 0.0);
        prop_assert!(inward, "hazard at {:?} moving {:?}", h.position, h.velocity);
        prop_assert!(h.radius >= 20.0 && h.radius < 40.0);
    }
}
