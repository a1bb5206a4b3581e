//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web)
//! - Keyboard listeners
//! - Storage (LocalStorage on web, a JSON file natively)
//! - Deterministic teardown

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::{Cell, RefCell};

use crate::persistence::{KeyValueStore, SharedStore, UnavailableStore};
use crate::sim::GameLoop;

/// Best available store for this platform, or one that always fails
pub fn default_store() -> Box<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    {
        match crate::persistence::LocalStorageStore::open() {
            Ok(store) => return Box::new(store),
            Err(e) => log::warn!("LocalStorage unavailable, scores will not persist: {}", e),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = native_store_path();
        match crate::persistence::JsonFileStore::open(&path) {
            Ok(store) => return Box::new(store),
            Err(e) => log::warn!("Cannot open {}, scores will not persist: {}", path.display(), e),
        }
    }

    Box::new(UnavailableStore)
}

/// [`default_store`] behind one shared handle, for settings and scores alike
pub fn shared_default_store() -> SharedStore {
    SharedStore::new(default_store())
}

/// Where the native build keeps its store
#[cfg(not(target_arch = "wasm32"))]
pub fn native_store_path() -> std::path::PathBuf {
    std::env::var_os("ASTEROID_DODGER_STORE")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from("asteroid-dodger.json"))
}

/// Tick a shared game and serialize the frame.
///
/// The borrow ends before this returns, so the result can go to a render
/// callback that calls back into the game. `None` if the game is borrowed
/// elsewhere or the snapshot does not serialize.
pub fn advance_frame(game: &RefCell<GameLoop>, now_ms: f64) -> Option<String> {
    let Ok(mut game) = game.try_borrow_mut() else {
        log::warn!("Frame at {:.0} ms dropped, game busy", now_ms);
        return None;
    };
    game.tick(now_ms);
    match game.snapshot().to_json() {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("Snapshot not serialized: {}", e);
            None
        }
    }
}

/// Frame-loop bookkeeping shared between a host and its frame callback.
///
/// Tracks whether a frame is running so disposal from inside the render
/// callback can postpone freeing that callback until it has returned.
#[derive(Debug, Default)]
pub struct FrameLifecycle {
    disposed: Cell<bool>,
    in_frame: Cell<bool>,
}

impl FrameLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a frame; false once disposed
    pub fn enter(&self) -> bool {
        if self.disposed.get() {
            return false;
        }
        self.in_frame.set(true);
        true
    }

    /// End a frame; true if the next one should be scheduled
    pub fn exit(&self) -> bool {
        self.in_frame.set(false);
        !self.disposed.get()
    }

    /// Mark disposed. False if it already was.
    pub fn dispose(&self) -> bool {
        !self.disposed.replace(true)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    pub fn in_frame(&self) -> bool {
        self.in_frame.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::settings::Settings;
    use crate::sim::GamePhase;
    use crate::tuning::Tuning;

    fn shared_game() -> RefCell<GameLoop> {
        let mut game = GameLoop::new(4, Tuning::default(), &Settings::default(), Box::new(MemoryStore::new()));
        game.start();
        RefCell::new(game)
    }

    #[test]
    fn test_render_callback_can_reenter_game() {
        let game = shared_game();
        let mut now = 0.0;
        for _ in 0..5 {
            let json = advance_frame(&game, now).expect("frame json");
            // What a page renderer does with the frame
            let score = game.borrow().score();
            assert!(json.contains(&format!(r#""score":{}"#, score)));
            now += 16.0;
        }
        assert_eq!(game.borrow().score(), 5);

        advance_frame(&game, now).expect("frame json");
        game.borrow_mut().restart();
        assert_eq!(game.borrow().score(), 0);
        assert_eq!(game.borrow().phase(), GamePhase::Running);
    }

    #[test]
    fn test_busy_game_drops_frame() {
        let game = shared_game();
        let held = game.borrow();
        assert_eq!(advance_frame(&game, 0.0), None);
        drop(held);
        assert!(advance_frame(&game, 16.0).is_some());
    }

    #[test]
    fn test_dispose_inside_frame_is_deferred() {
        let life = FrameLifecycle::new();
        assert!(life.enter());
        assert!(life.in_frame());
        // Render callback disposes the host mid-frame
        assert!(life.dispose());
        assert!(life.in_frame());
        assert!(!life.exit());
        assert!(!life.in_frame());
        assert!(!life.enter());
        assert!(!life.dispose());
    }

    #[test]
    fn test_frames_continue_until_disposed() {
        let life = FrameLifecycle::new();
        for _ in 0..3 {
            assert!(life.enter());
            assert!(life.exit());
        }
        assert!(life.dispose());
        assert!(life.is_disposed());
        assert!(!life.enter());
    }

    #[test]
    fn test_shared_store_serves_settings_and_scores() {
        let store = SharedStore::new(Box::new(MemoryStore::new()));
        let mut writer = store.clone();
        Settings::default().save(&mut writer);
        let mut game = GameLoop::new(1, Tuning::default(), &Settings::load(&store), Box::new(store.clone()));
        game.start();
        game.tick(0.0);
        assert_eq!(Settings::load(&store), Settings::default());
        assert!(game.scores().is_persistent());
    }
}
