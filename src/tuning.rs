//! Game balance and tuning
//!
//! Every number that shapes difficulty lives here so a match can be tuned
//! from JSON without recompiling. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Data-driven balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Player bounding box edge (square)
    pub player_size: f32,
    /// Base movement speed (units per tick, per axis)
    pub player_speed: f32,
    /// Speed multiplier while speed boost is active
    pub speed_boost_multiplier: f32,
    /// Lives at match start and cap for life-up pickups
    pub max_lives: u8,
    /// Invincibility window after taking a hit (ticks)
    pub invincibility_ticks: u32,

    // === Weapons ===
    /// Minimum wall-clock time between shots (ms)
    pub fire_cooldown_ms: f64,
    /// Fire automatically every tick the cooldown allows
    pub auto_fire: bool,
    /// Bullet travel speed (units per tick)
    pub bullet_speed: f32,
    /// Angular offset of the side bullets in triple shot (radians)
    pub triple_shot_spread: f32,
    /// Bullets are dropped this far past any canvas edge
    pub bullet_margin: f32,

    // === Power-ups ===
    /// Power-up bounding box edge (square)
    pub power_up_size: f32,
    /// Power-up fall speed (units per tick)
    pub power_up_speed: f32,
    /// Duration of timed power-ups (ticks)
    pub power_up_duration_ticks: u32,
    /// Chance that a destroyed enemy drops a power-up
    pub power_up_drop_chance: f32,

    // === Scoring & pacing ===
    /// Points lost when an enemy leaves the bottom edge
    pub escape_penalty: u64,
    /// Score needed per level
    pub points_per_level: u64,
    /// Spawn period at level 0 (ticks)
    pub spawn_period_base: u32,
    /// Spawn period reduction per level (ticks)
    pub spawn_period_step: u32,
    /// Fastest allowed spawn period (ticks)
    pub spawn_period_min: u32,

    // === Cosmetics ===
    /// Particle life lost per tick
    pub particle_decay: f32,
    /// Particle cap (oldest are dropped first)
    pub max_particles: usize,
    /// Number of background stars
    pub star_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: 40.0,
            player_speed: 5.0,
            speed_boost_multiplier: 1.6,
            max_lives: 3,
            invincibility_ticks: 120,

            fire_cooldown_ms: 200.0,
            auto_fire: true,
            bullet_speed: 7.0,
            triple_shot_spread: 0.2,
            bullet_margin: 20.0,

            power_up_size: 30.0,
            power_up_speed: 1.5,
            power_up_duration_ticks: 600,
            power_up_drop_chance: 0.2,

            escape_penalty: 50,
            points_per_level: 500,
            spawn_period_base: 60,
            spawn_period_step: 5,
            spawn_period_min: 20,

            particle_decay: 0.02,
            max_particles: 512,
            star_count: 150,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, then correct anything out of range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Serialize to pretty JSON (for shipping a balance file)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp nonsensical values back to something playable
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        if !(self.player_size > 0.0) {
            log::warn!("player_size {} invalid, using {}", self.player_size, defaults.player_size);
            self.player_size = defaults.player_size;
        }
        // The ship has to fit on the canvas for clamping to make sense
        let max_player_size = CANVAS_WIDTH.min(CANVAS_HEIGHT);
        if self.player_size > max_player_size {
            log::warn!("player_size {} larger than the canvas, clamping to {}", self.player_size, max_player_size);
            self.player_size = max_player_size;
        }
        if !(self.player_speed > 0.0 && self.player_speed.is_finite()) {
            log::warn!("player_speed {} invalid, using {}", self.player_speed, defaults.player_speed);
            self.player_speed = defaults.player_speed;
        }
        if !self.speed_boost_multiplier.is_finite() {
            log::warn!("speed_boost_multiplier {} invalid, using {}", self.speed_boost_multiplier, defaults.speed_boost_multiplier);
            self.speed_boost_multiplier = defaults.speed_boost_multiplier;
        }
        if !(self.speed_boost_multiplier >= 1.0) {
            log::warn!("speed_boost_multiplier {} below 1, clamping", self.speed_boost_multiplier);
            self.speed_boost_multiplier = 1.0;
        }
        if self.max_lives == 0 {
            log::warn!("max_lives is 0, using {}", defaults.max_lives);
            self.max_lives = defaults.max_lives;
        }
        if !(self.fire_cooldown_ms >= 0.0) {
            log::warn!("fire_cooldown_ms {} invalid, clamping to 0", self.fire_cooldown_ms);
            self.fire_cooldown_ms = 0.0;
        }
        if !(self.bullet_speed > 0.0 && self.bullet_speed.is_finite()) {
            log::warn!("bullet_speed {} invalid, using {}", self.bullet_speed, defaults.bullet_speed);
            self.bullet_speed = defaults.bullet_speed;
        }
        if !(self.power_up_size > 0.0 && self.power_up_size.is_finite()) {
            log::warn!("power_up_size {} invalid, using {}", self.power_up_size, defaults.power_up_size);
            self.power_up_size = defaults.power_up_size;
        }
        if !(self.power_up_speed >= 0.0 && self.power_up_speed.is_finite()) {
            log::warn!("power_up_speed {} invalid, using {}", self.power_up_speed, defaults.power_up_speed);
            self.power_up_speed = defaults.power_up_speed;
        }
        if !(0.0..=1.0).contains(&self.power_up_drop_chance) {
            log::warn!("power_up_drop_chance {} outside [0, 1], clamping", self.power_up_drop_chance);
            self.power_up_drop_chance = if self.power_up_drop_chance > 1.0 { 1.0 } else { 0.0 };
        }
        if self.points_per_level == 0 {
            log::warn!("points_per_level is 0, using {}", defaults.points_per_level);
            self.points_per_level = defaults.points_per_level;
        }
        if self.spawn_period_min == 0 {
            log::warn!("spawn_period_min is 0, clamping to 1");
            self.spawn_period_min = 1;
        }
        if !(self.particle_decay > 0.0) {
            log::warn!("particle_decay {} invalid, using {}", self.particle_decay, defaults.particle_decay);
            self.particle_decay = defaults.particle_decay;
        }

        self
    }

    /// Ticks between enemy spawns at a given level (shrinks, floored)
    pub fn spawn_period(&self, level: u32) -> u32 {
        self.spawn_period_base
            .saturating_sub(level.saturating_mul(self.spawn_period_step))
            .max(self.spawn_period_min)
    }

    /// Level implied by a score
    pub fn level_for_score(&self, score: u64) -> u32 {
        (score / self.points_per_level + 1).min(u32::MAX as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_period_floor() {
        let tuning = Tuning::default();
        assert_eq!(tuning.spawn_period(1), 55);
        assert_eq!(tuning.spawn_period(4), 40);
        assert_eq!(tuning.spawn_period(8), 20);
        assert_eq!(tuning.spawn_period(50), 20);
    }

    #[test]
    fn test_level_for_score() {
        let tuning = Tuning::default();
        assert_eq!(tuning.level_for_score(0), 1);
        assert_eq!(tuning.level_for_score(499), 1);
        assert_eq!(tuning.level_for_score(500), 2);
        assert_eq!(tuning.level_for_score(2000), 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_lives": 5, "auto_fire": false }"#).unwrap();
        assert_eq!(tuning.max_lives, 5);
        assert!(!tuning.auto_fire);
        assert_eq!(tuning.points_per_level, 500);
        assert_eq!(tuning.fire_cooldown_ms, 200.0);
    }

    #[test]
    fn test_sanitize_corrects_bad_values() {
        let tuning = Tuning::from_json(
            r#"{ "max_lives": 0, "power_up_drop_chance": 3.0, "points_per_level": 0, "player_speed": -2.0 }"#,
        )
        .unwrap();
        assert_eq!(tuning.max_lives, 3);
        assert_eq!(tuning.power_up_drop_chance, 1.0);
        assert_eq!(tuning.points_per_level, 500);
        assert_eq!(tuning.player_speed, 5.0);
    }

    #[test]
    fn test_oversized_ship_is_clamped_and_playable() {
        use crate::input::Directions;
        use crate::sim::{GameState, TickInput, tick};

        let tuning = Tuning::from_json(r#"{ "player_size": 700 }"#).unwrap();
        assert_eq!(tuning.player_size, CANVAS_HEIGHT);

        let mut state = GameState::with_tuning(7, tuning);
        state.start_or_reset();
        tick(&mut state, &TickInput::default());
        let p = &state.player;
        assert!(p.pos.x >= 0.0 && p.pos.x + p.size.x <= CANVAS_WIDTH);
        assert!(p.pos.y >= 0.0 && p.pos.y + p.size.y <= CANVAS_HEIGHT);

        let held = Directions {
            left: true,
            right: true,
            ..Directions::default()
        };
        tick(&mut state, &TickInput { held, now_ms: 0.0 });
        assert!(state.player.pos.is_finite());
    }

    #[test]
    fn test_infinite_speeds_fall_back_to_defaults() {
        use crate::input::Directions;
        use crate::sim::{GameState, TickInput, tick};

        let tuning = Tuning::from_json(
            r#"{ "player_speed": 1e39, "speed_boost_multiplier": 1e39, "bullet_speed": 1e39 }"#,
        )
        .unwrap();
        assert_eq!(tuning.player_speed, 5.0);
        assert_eq!(tuning.speed_boost_multiplier, 1.6);
        assert_eq!(tuning.bullet_speed, 7.0);

        let mut state = GameState::with_tuning(7, tuning);
        state.start_or_reset();
        let held = Directions {
            left: true,
            right: true,
            ..Directions::default()
        };
        tick(&mut state, &TickInput { held, now_ms: 0.0 });
        assert!(state.player.pos.is_finite());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let mut tuning = Tuning::default();
        tuning.escape_penalty = 75;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
