//! Control surface for a presentation layer
//!
//! A `Session` owns the game state and the held-key set. The shell forwards
//! key/touch events and calls `frame` once per display refresh; it reads
//! `state()` to draw and acts on the returned events (toasts, banners).

use crate::input::{Directions, HeldKeys, Key};
use crate::sim::{EventRecord, GamePhase, GameState, TickInput, fire_once, tick};
use crate::tuning::Tuning;

/// One running game plus its input
pub struct Session {
    state: GameState,
    keys: HeldKeys,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        log::info!("Session created with seed: {}", seed);
        Self {
            state: GameState::with_tuning(seed, tuning),
            keys: HeldKeys::new(),
        }
    }

    /// Read-only snapshot for rendering
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    // === Match control ===

    /// Begin a fresh match. Keys held from the last one are dropped.
    pub fn start_or_reset(&mut self) {
        self.keys.clear();
        self.state.start_or_reset();
    }

    pub fn pause(&mut self) {
        self.state.pause();
    }

    pub fn resume(&mut self) {
        self.state.resume();
    }

    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
    }

    pub fn quit_to_menu(&mut self) {
        self.state.quit_to_menu();
    }

    /// Manual shot, rate-limited by the shared cooldown
    pub fn fire_once(&mut self, now_ms: f64) -> bool {
        fire_once(&mut self.state, now_ms)
    }

    // === Input ===

    pub fn set_held_directions(&mut self, dirs: Directions) {
        self.keys.set_directions(dirs);
    }

    pub fn held_directions(&self) -> Directions {
        self.keys.directions()
    }

    /// Forward a key press (DOM key code). Unknown codes are ignored.
    pub fn key_down(&mut self, code: &str, now_ms: f64) {
        let Some(key) = Key::from_code(code) else {
            return;
        };
        let newly_pressed = self.keys.press(key);

        match key {
            Key::Pause if newly_pressed => self.toggle_pause(),
            Key::Fire => {
                self.fire_once(now_ms);
            }
            _ => {}
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.keys.release(key);
        }
    }

    /// Run one tick (if playing) and hand back everything that happened
    pub fn frame(&mut self, now_ms: f64) -> Vec<EventRecord> {
        let input = TickInput {
            held: self.keys.directions(),
            now_ms,
        };
        tick(&mut self.state, &input);
        self.state.drain_events()
    }
}
