//! Keyboard/touch bindings
//!
//! Key codes follow the DOM `KeyboardEvent.code` names so a browser or
//! native shell can forward events untranslated.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Pause,
}

impl Key {
    /// Map a key code (e.g. `ArrowLeft`, `KeyA`) onto a game key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(Key::Up),
            "ArrowDown" | "KeyS" => Some(Key::Down),
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "Space" => Some(Key::Fire),
            "KeyP" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// Movement directions held this tick. Opposites may both be held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Keys currently held down
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key was not already held
    pub fn press(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Replace the movement keys with `dirs` (touch pads drive this)
    pub fn set_directions(&mut self, dirs: Directions) {
        for (key, held) in [
            (Key::Up, dirs.up),
            (Key::Down, dirs.down),
            (Key::Left, dirs.left),
            (Key::Right, dirs.right),
        ] {
            if held {
                self.held.insert(key);
            } else {
                self.held.remove(&key);
            }
        }
    }

    /// Snapshot of the held movement keys
    pub fn directions(&self) -> Directions {
        Directions {
            up: self.is_held(Key::Up),
            down: self.is_held(Key::Down),
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
        }
    }
}
