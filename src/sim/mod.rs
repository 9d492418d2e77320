//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per rendered frame
//! - Seeded RNG only, threaded explicitly
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod achievements;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use achievements::{Achievement, AchievementId, Achievements};
pub use collision::{Rect, contains_point, intersects};
pub use spawner::{roll_power_up, spawn_enemy, unlocked_kinds};
pub use state::{
    ActiveEffects, Bullet, Enemy, EnemyKind, EnemyProfile, EventRecord, GameEvent, GamePhase,
    GameState, Particle, Player, PowerUp, PowerUpKind, Star,
};
pub use tick::{TickInput, fire_once, tick};
