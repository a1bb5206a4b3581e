//! End-to-end game scenarios driven through the public API

use asteroid_dodger::consts::HIGH_SCORE_KEY;
use asteroid_dodger::input::{Direction, InputEvent};
use asteroid_dodger::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
use asteroid_dodger::sim::{
    GamePhase, Hazard, Spawner, TickOutcome, TrailConfig, TrailKind, ship_hazard_collision, update_hazard,
};
use asteroid_dodger::{GameLoop, Settings, Tuning};
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn falling_hazard(id: u32) -> Hazard {
    Hazard {
        id,
        position: Vec2::new(400.0, -40.0),
        velocity: Vec2::new(0.0, 3.0),
        speed: 1.0,
        radius: 30.0,
        vertices: Vec::new(),
        craters: Vec::new(),
        rotation: 0.0,
        rotation_speed: 0.0,
        trail_kind: TrailKind::Fire,
        particles: Vec::new(),
    }
}

/// Running game with spawning switched off
fn quiet_game(store: Box<dyn KeyValueStore>) -> GameLoop {
    let mut game = GameLoop::new(7, Tuning::default(), &Settings::default(), store);
    game.start();
    let spawner = &mut game.state_mut().spawner;
    spawner.last_spawn_ms = Some(0.0);
    spawner.interval_ms = f64::MAX;
    game
}

#[test]
fn falling_hazard_reaches_ship_after_110_frames() {
    let game = quiet_game(Box::new(MemoryStore::new()));
    let ship = game.state().ship.clone();
    assert_eq!(ship.position, Vec2::new(400.0, 300.0));

    let mut hazard = falling_hazard(1);
    let trail = TrailConfig {
        emit_chance: 0.0,
        max_particles: 0,
    };
    let mut rng = Pcg32::seed_from_u64(0);
    for _ in 0..110 {
        update_hazard(&mut hazard, &trail, &mut rng);
    }

    assert_eq!(hazard.position, Vec2::new(400.0, 290.0));
    assert!((hazard.position.distance(ship.position) - 10.0).abs() < 1e-4);
    assert!(ship_hazard_collision(&ship, &hazard));
}

#[test]
fn falling_hazard_ends_the_run() {
    let mut game = quiet_game(Box::new(MemoryStore::new()));
    let id = game.state_mut().next_entity_id();
    game.state_mut().hazards.push(falling_hazard(id));

    let mut now = 16.0;
    let mut hit_frame = None;
    for frame in 1..=110_u32 {
        match game.tick(now) {
            TickOutcome::Collided { hazard_id } => {
                assert_eq!(hazard_id, id);
                hit_frame = Some(frame);
                break;
            }
            outcome => assert_eq!(outcome, TickOutcome::Survived),
        }
        now += 16.0;
    }

    // Circles first overlap once the gap drops under 50: 340 - 3n < 50
    assert_eq!(hit_frame, Some(97));
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.score(), 96);
    assert!(game.state().hazards.is_empty());
}

#[test]
fn restart_after_game_over() {
    let mut store = MemoryStore::new();
    store.set(HIGH_SCORE_KEY, "5000").expect("memory store");
    let mut game = GameLoop::new(3, Tuning::default(), &Settings::default(), Box::new(store));
    game.start();
    game.handle_input(InputEvent::KeyDown(Direction::Up));

    let mut now = 0.0;
    for _ in 0..150 {
        game.tick(now);
        now += 16.0;
    }
    let id = game.state_mut().next_entity_id();
    let mut hazard = falling_hazard(id);
    hazard.position = game.state().ship.position;
    game.state_mut().hazards.push(hazard);
    game.tick(now);
    assert_eq!(game.phase(), GamePhase::GameOver);

    game.restart();
    assert_eq!(game.phase(), GamePhase::Running);
    assert_eq!(game.score(), 0);
    assert!(game.state().hazards.is_empty());
    assert_eq!(game.state().particle_count(), 0);
    assert_eq!(game.high_score(), 5000);
    assert!(!game.state().ship.movement.any());
}

#[test]
fn spawn_timer_fires_once_per_interval() {
    let mut spawner = Spawner::new(2000.0);
    assert!(spawner.should_spawn(0.0));
    assert!(!spawner.should_spawn(0.0));
    assert!(!spawner.should_spawn(500.0));
    assert!(spawner.should_spawn(2001.0));
}

#[test]
fn high_score_survives_sessions() {
    let path = std::env::temp_dir().join(format!("asteroid-dodger-scenario-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    {
        let store = JsonFileStore::open(&path).expect("open store");
        let mut game = quiet_game(Box::new(store));
        let mut now = 16.0;
        for _ in 0..40 {
            game.tick(now);
            now += 16.0;
        }
        let id = game.state_mut().next_entity_id();
        let mut hazard = falling_hazard(id);
        hazard.position = game.state().ship.position;
        game.state_mut().hazards.push(hazard);
        assert!(matches!(game.tick(now), TickOutcome::Collided { .. }));
        assert_eq!(game.high_score(), 40);
    }

    let store = JsonFileStore::open(&path).expect("reopen store");
    let game = GameLoop::new(1, Tuning::default(), &Settings::default(), Box::new(store));
    assert_eq!(game.high_score(), 40);

    let _ = std::fs::remove_file(&path);
}
