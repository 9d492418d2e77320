//! Enemy and power-up spawning
//!
//! Both processes are pure functions of the level, the tuning and the RNG
//! stream handed in, so a seeded `Pcg32` reproduces them exactly.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Cumulative drop weights: 25% triple shot, 25% shield, 20% speed boost,
/// 15% life up, 15% clear screen
const POWER_UP_THRESHOLDS: [(f32, PowerUpKind); 4] = [
    (0.25, PowerUpKind::TripleShot),
    (0.50, PowerUpKind::Shield),
    (0.70, PowerUpKind::SpeedBoost),
    (0.85, PowerUpKind::LifeUp),
];

impl PowerUpKind {
    /// Map a uniform roll in [0, 1) onto the weighted distribution
    pub fn from_roll(roll: f32) -> Self {
        POWER_UP_THRESHOLDS
            .iter()
            .find(|(threshold, _)| roll < *threshold)
            .map(|&(_, kind)| kind)
            .unwrap_or(PowerUpKind::ClearScreen)
    }
}

/// Enemy kinds that may spawn at `level`
pub fn unlocked_kinds(level: u32) -> Vec<EnemyKind> {
    EnemyKind::ALL
        .into_iter()
        .filter(|kind| level >= kind.unlock_level())
        .collect()
}

/// Pick a kind uniformly from those unlocked and place it just above the
/// top edge at a random x
pub fn spawn_enemy(level: u32, rng: &mut impl Rng) -> Enemy {
    let kinds = unlocked_kinds(level);
    let kind = if kinds.is_empty() {
        EnemyKind::Basic
    } else {
        kinds[rng.random_range(0..kinds.len())]
    };

    let profile = kind.profile();
    let x = rng.random::<f32>() * (CANVAS_WIDTH - profile.width);
    Enemy::new(kind, Vec2::new(x, -profile.height))
}

/// Roll for a drop whose top-left corner sits at `center`. Most rolls produce nothing.
pub fn roll_power_up(center: Vec2, tuning: &Tuning, rng: &mut impl Rng) -> Option<PowerUp> {
    if rng.random::<f32>() >= tuning.power_up_drop_chance {
        return None;
    }

    let kind = PowerUpKind::from_roll(rng.random::<f32>());
    Some(PowerUp {
        pos: center,
        size: Vec2::splat(tuning.power_up_size),
        speed: tuning.power_up_speed,
        kind,
    })
}
