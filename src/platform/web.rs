//! Browser host: frame scheduling, keyboard listeners, teardown
//!
//! Exposed to JavaScript as `DodgerApp`. The page supplies a render callback
//! that receives each frame's snapshot as a JSON string, and must call
//! `dispose()` when the game leaves the page. The callback may call back
//! into the app, including `dispose()`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use super::{FrameLifecycle, advance_frame, shared_default_store};
use crate::input::InputEvent;
use crate::persistence::SharedStore;
use crate::settings::Settings;
use crate::sim::GameLoop;
use crate::tuning::Tuning;

type FrameCallback = Closure<dyn FnMut(f64)>;
type KeyCallback = Closure<dyn FnMut(KeyboardEvent)>;

#[wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Asteroid Dodger module loaded");
}

/// Live game mounted on the page
#[wasm_bindgen]
pub struct DodgerApp {
    game: Rc<RefCell<GameLoop>>,
    store: SharedStore,
    frame: Rc<RefCell<Option<FrameCallback>>>,
    frame_handle: Rc<Cell<Option<i32>>>,
    keydown: Option<KeyCallback>,
    keyup: Option<KeyCallback>,
    life: Rc<FrameLifecycle>,
}

#[wasm_bindgen]
impl DodgerApp {
    /// Mount the game: register key listeners and start the frame loop.
    ///
    /// `on_frame` is called once per frame with the snapshot JSON.
    /// `tuning_json` optionally overrides the default balance.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64, on_frame: js_sys::Function, tuning_json: Option<String>) -> Result<DodgerApp, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Tuning::default(),
        };
        let store = shared_default_store();
        let settings = Settings::load(&store);
        let game = GameLoop::new(seed as u64, tuning, &settings, Box::new(store.clone()));
        let game = Rc::new(RefCell::new(game));

        let keydown = key_listener(game.clone(), true);
        let keyup = key_listener(game.clone(), false);
        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;

        let frame: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let frame_handle = Rc::new(Cell::new(None));
        let life = Rc::new(FrameLifecycle::new());

        {
            let game = game.clone();
            let frame_ref = Rc::downgrade(&frame);
            let handle = frame_handle.clone();
            let life = life.clone();
            *frame.borrow_mut() = Some(Closure::new(move |time: f64| {
                if !life.enter() {
                    return;
                }
                handle.set(None);
                // No borrow of the game is held past this point
                if let Some(json) = advance_frame(&game, time) {
                    if let Err(e) = on_frame.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                        log::warn!("Render callback failed: {:?}", e);
                    }
                }
                if !life.exit() {
                    return;
                }
                if let Some(frame) = frame_ref.upgrade() {
                    if let Some(cb) = frame.borrow().as_ref() {
                        handle.set(request_frame(cb).ok());
                    }
                }
            }));
        }

        if let Some(cb) = frame.borrow().as_ref() {
            frame_handle.set(Some(request_frame(cb)?));
        }

        log::info!("Asteroid Dodger mounted (seed {})", seed as u64);

        Ok(DodgerApp {
            game,
            store,
            frame,
            frame_handle,
            keydown: Some(keydown),
            keyup: Some(keyup),
            life,
        })
    }

    pub fn start(&self) {
        if let Ok(mut game) = self.game.try_borrow_mut() {
            game.start();
        }
    }

    pub fn restart(&self) {
        if let Ok(mut game) = self.game.try_borrow_mut() {
            game.restart();
        }
    }

    pub fn score(&self) -> f64 {
        self.game.try_borrow().map(|g| g.score() as f64).unwrap_or(0.0)
    }

    #[wasm_bindgen(js_name = highScore)]
    pub fn high_score(&self) -> f64 {
        self.game.try_borrow().map(|g| g.high_score() as f64).unwrap_or(0.0)
    }

    /// Apply settings given as JSON; unknown fields keep their defaults
    #[wasm_bindgen(js_name = applySettings)]
    pub fn apply_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings: Settings = serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        settings.save(&mut self.store);
        let mut game = self
            .game
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("game busy"))?;
        game.apply_settings(&settings);
        Ok(())
    }

    /// Cancel the frame loop, remove key listeners, dispose the game.
    ///
    /// Safe to call from the render callback: the running frame finishes and
    /// schedules nothing further.
    pub fn dispose(&mut self) {
        if !self.life.dispose() {
            return;
        }
        if let Some(window) = web_sys::window() {
            if let Some(handle) = self.frame_handle.take() {
                let _ = window.cancel_animation_frame(handle);
            }
            for (name, listener) in [("keydown", self.keydown.take()), ("keyup", self.keyup.take())] {
                if let Some(listener) = listener {
                    let _ = window
                        .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
                }
            }
        }
        // A running frame still needs its closure; drop keeps it until then
        if !self.life.in_frame() {
            self.frame.borrow_mut().take();
        }
        if let Ok(mut game) = self.game.try_borrow_mut() {
            game.dispose();
        }
    }
}

impl Drop for DodgerApp {
    fn drop(&mut self) {
        self.dispose();
        if let Some(cb) = self.frame.borrow_mut().take() {
            if self.life.in_frame() {
                // Freed from inside its own frame; leak rather than free a running closure
                cb.forget();
            }
        }
    }
}

fn key_listener(game: Rc<RefCell<GameLoop>>, pressed: bool) -> KeyCallback {
    Closure::new(move |event: KeyboardEvent| {
        if let Some(input) = InputEvent::from_key(&event.key(), pressed) {
            // Arrow keys would otherwise scroll the page
            event.prevent_default();
            match game.try_borrow_mut() {
                Ok(mut game) => game.handle_input(input),
                Err(_) => log::debug!("Key event dropped, game busy"),
            }
        }
    })
}

fn request_frame(cb: &FrameCallback) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .request_animation_frame(cb.as_ref().unchecked_ref())
}
