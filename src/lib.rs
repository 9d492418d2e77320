//! Interstellar Pioneer - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, scoring)
//! - `session`: Control surface for a presentation layer (start, pause, fire, input)
//! - `input`: Key code bindings and the held-direction set
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod session;
pub mod sim;
pub mod tuning;

pub use input::{Directions, HeldKeys, Key};
pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical canvas dimensions (all positions live in this space)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player spawns this far above the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 100.0;

    /// Bullets are points; this is only a render hint
    pub const BULLET_SIZE: f32 = 4.0;

    /// Nominal display refresh (one tick per frame)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
