//! Keyboard input
//!
//! Handlers only translate key names into flag changes; the game loop applies
//! the flags on its next frame.

use serde::{Deserialize, Serialize};

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` value to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// A logical key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Direction),
    KeyUp(Direction),
}

impl InputEvent {
    /// Build from a key name and whether it was pressed
    pub fn from_key(key: &str, pressed: bool) -> Option<Self> {
        Direction::from_key(key).map(|dir| {
            if pressed {
                InputEvent::KeyDown(dir)
            } else {
                InputEvent::KeyUp(dir)
            }
        })
    }

    pub fn direction(&self) -> Direction {
        match *self {
            InputEvent::KeyDown(dir) | InputEvent::KeyUp(dir) => dir,
        }
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self, InputEvent::KeyDown(_))
    }
}
