//! Game state and core simulation types
//!
//! `GameState` is the entity registry: it owns the player, every entity
//! collection, the RNG stream and the pending event queue. Rules live in
//! `tick`; this module only stores, adds, removes and resets.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::achievements::{AchievementId, Achievements};
use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    Start,
    /// Active gameplay
    Playing,
    /// Frozen mid-match
    Paused,
    /// Lives ran out
    GameOver,
}

/// Colors handed to the renderer (0xRRGGBB)
pub mod colors {
    pub const BLUE: u32 = 0x3b82f6;
    pub const EMERALD: u32 = 0x10b981;
    pub const RED: u32 = 0xef4444;
    pub const WHITE: u32 = 0xffffff;
}

/// Active power-up effects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub triple_shot_ticks: u32,
    pub shield_active: bool,
    pub speed_boost_ticks: u32,
}

impl ActiveEffects {
    /// Triple shot and shield held at the same time
    pub fn power_combo(&self) -> bool {
        self.triple_shot_ticks > 0 && self.shield_active
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Effective speed this tick (boosted or base)
    pub speed: f32,
    pub lives: u8,
    pub max_lives: u8,
    pub score: u64,
    pub level: u32,
    pub invincible: bool,
    /// Ticks of invincibility left (non-zero iff `invincible`)
    pub invincible_timer: u32,
    pub power_ups: ActiveEffects,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let size = tuning.player_size;
        Self {
            pos: Vec2::new(
                CANVAS_WIDTH / 2.0 - size / 2.0,
                CANVAS_HEIGHT - PLAYER_SPAWN_OFFSET,
            ),
            size: Vec2::splat(size),
            speed: tuning.player_speed,
            lives: tuning.max_lives,
            max_lives: tuning.max_lives,
            score: 0,
            level: 1,
            invincible: false,
            invincible_timer: 0,
            power_ups: ActiveEffects::default(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Where bullets leave the ship (top centre)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }

    /// Keep the ship fully on the canvas
    pub fn clamp_to_canvas(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, CANVAS_WIDTH - self.size.x);
        self.pos.y = self.pos.y.clamp(0.0, CANVAS_HEIGHT - self.size.y);
    }

    pub fn grant_invincibility(&mut self, ticks: u32) {
        self.invincible_timer = ticks;
        self.invincible = ticks > 0;
    }

    /// Count down the invincibility window by one tick
    pub fn tick_invincibility(&mut self) {
        self.invincible_timer = self.invincible_timer.saturating_sub(1);
        self.invincible = self.invincible_timer > 0;
    }

    pub fn gain_life(&mut self) {
        self.lives = self.lives.saturating_add(1).min(self.max_lives);
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }
}

/// A projectile (treated as a point for collisions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub speed: f32,
    /// Direction of travel (radians, -π/2 is straight up)
    pub angle: f32,
    pub is_player: bool,
}

impl Bullet {
    pub fn advance(&mut self) {
        self.pos += Vec2::from_angle(self.angle) * self.speed;
    }

    /// Outside the canvas by more than `margin` on any side
    pub fn is_off_screen(&self, margin: f32) -> bool {
        self.pos.x <= -margin
            || self.pos.x >= CANVAS_WIDTH + margin
            || self.pos.y <= -margin
            || self.pos.y >= CANVAS_HEIGHT + margin
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Heavy,
}

/// Fixed per-kind stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: u32,
    pub points: u64,
    pub color: u32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Heavy];

    pub fn profile(self) -> EnemyProfile {
        match self {
            EnemyKind::Basic => EnemyProfile {
                width: 35.0,
                height: 35.0,
                speed: 2.0,
                health: 1,
                points: 100,
                color: colors::BLUE,
            },
            EnemyKind::Fast => EnemyProfile {
                width: 25.0,
                height: 25.0,
                speed: 4.0,
                health: 1,
                points: 150,
                color: colors::EMERALD,
            },
            EnemyKind::Heavy => EnemyProfile {
                width: 50.0,
                height: 50.0,
                speed: 1.0,
                health: 3,
                points: 300,
                color: colors::RED,
            },
        }
    }

    /// First level at which this kind may spawn
    pub fn unlock_level(self) -> u32 {
        match self {
            EnemyKind::Basic => 1,
            EnemyKind::Fast => 2,
            EnemyKind::Heavy => 3,
        }
    }
}

/// An enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub kind: EnemyKind,
    pub health: u32,
    pub max_health: u32,
    pub color: u32,
    pub points: u64,
}

impl Enemy {
    /// Build an enemy of `kind` with its top-left corner at `pos`
    pub fn new(kind: EnemyKind, pos: Vec2) -> Self {
        let profile = kind.profile();
        Self {
            pos,
            size: Vec2::new(profile.width, profile.height),
            speed: profile.speed,
            kind,
            health: profile.health,
            max_health: profile.health,
            color: profile.color,
            points: profile.points,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Top edge has passed the bottom of the canvas
    pub fn escaped(&self) -> bool {
        self.pos.y > CANVAS_HEIGHT
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    TripleShot,
    Shield,
    SpeedBoost,
    LifeUp,
    ClearScreen,
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32, // 0-1, decreases over time
    pub max_life: f32,
    pub color: u32,
    pub size: f32,
}

/// Background star (decorative)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl Star {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * CANVAS_WIDTH,
                rng.random::<f32>() * CANVAS_HEIGHT,
            ),
            size: rng.random::<f32>() * 2.0 + 0.5,
            speed: rng.random::<f32>() * 1.5 + 0.5,
        }
    }
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An enemy got past the player (score penalty applied)
    EnemyEscaped,
    /// Score crossed into a new level; the wave was cleared
    LevelUp { level: u32 },
    AchievementUnlocked { id: AchievementId },
    EnemyDestroyed { kind: EnemyKind, x: f32, y: f32 },
    /// Player lost a life
    PlayerHit { lives: u8 },
    /// Shield took the hit instead of the player
    ShieldAbsorbed,
    PowerUpCollected { kind: PowerUpKind },
    GameOver { score: u64, level: u32 },
}

/// A queued event with the tick and wall-clock time it happened at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub tick: u64,
    pub time_ms: f64,
    pub event: GameEvent,
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Seed the RNG stream started from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Ticks simulated since the match started
    pub tick: u64,
    /// Wall-clock time of the most recent tick (ms)
    pub now_ms: f64,
    /// Wall-clock time of the most recent shot (ms)
    pub last_shot_ms: Option<f64>,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Background stars (not gameplay-affecting)
    pub stars: Vec<Star>,
    /// Unlocks survive resets within a session
    pub achievements: Achievements,
    /// Events not yet drained by the presentation layer
    pub events: Vec<EventRecord>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..tuning.star_count).map(|_| Star::random(&mut rng)).collect();

        Self {
            seed,
            player: Player::new(&tuning),
            tuning,
            phase: GamePhase::Start,
            tick: 0,
            now_ms: 0.0,
            last_shot_ms: None,
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            stars,
            achievements: Achievements::default(),
            events: Vec::new(),
            rng,
        }
    }

    /// Restart the RNG stream from a new seed
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Return the match to its initial state. Phase, achievements, stars and
    /// the RNG stream are left alone.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.tuning);
        self.bullets.clear();
        self.enemies.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.events.clear();
        self.tick = 0;
        self.last_shot_ms = None;
    }

    // === Match control ===

    /// Start a fresh match from any phase
    pub fn start_or_reset(&mut self) {
        self.reset();
        self.phase = GamePhase::Playing;
        log::info!("Match started (seed {})", self.seed);
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            log::debug!("Paused at tick {}", self.tick);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            log::debug!("Resumed at tick {}", self.tick);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Leave a paused or finished match for the title screen
    pub fn quit_to_menu(&mut self) {
        if matches!(self.phase, GamePhase::Paused | GamePhase::GameOver) {
            self.phase = GamePhase::Start;
        }
    }

    // === Registry ===

    pub fn add_bullet(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn add_power_up(&mut self, power_up: PowerUp) {
        self.power_ups.push(power_up);
    }

    /// Add a particle, dropping the oldest when at the cap
    pub fn add_particle(&mut self, particle: Particle) {
        if self.tuning.max_particles == 0 {
            return;
        }
        if self.particles.len() >= self.tuning.max_particles {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    pub fn remove_enemy(&mut self, index: usize) -> Option<Enemy> {
        (index < self.enemies.len()).then(|| self.enemies.remove(index))
    }

    pub fn remove_power_up(&mut self, index: usize) -> Option<PowerUp> {
        (index < self.power_ups.len()).then(|| self.power_ups.remove(index))
    }

    pub fn remove_bullet(&mut self, index: usize) -> Option<Bullet> {
        (index < self.bullets.len()).then(|| self.bullets.remove(index))
    }

    /// Burst of particles at `center`
    pub fn spawn_explosion(&mut self, center: Vec2, color: u32, count: usize) {
        for _ in 0..count {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 6.0,
                (self.rng.random::<f32>() - 0.5) * 6.0,
            );
            let max_life = self.rng.random::<f32>() * 0.5 + 0.5;
            let size = self.rng.random::<f32>() * 3.0 + 1.0;
            self.add_particle(Particle {
                pos: center,
                vel,
                life: 1.0,
                max_life,
                color,
                size,
            });
        }
    }

    // === Events ===

    /// Queue an event stamped with the current tick and time
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(EventRecord {
            tick: self.tick,
            time_ms: self.now_ms,
            event,
        });
    }

    /// Hand all pending events to the caller
    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.events)
    }

    /// Unlock an achievement and announce it, once
    pub fn unlock(&mut self, id: AchievementId) {
        if self.achievements.try_unlock(id) {
            self.emit(GameEvent::AchievementUnlocked { id });
        }
    }
}

/// Explosion sizes
pub const EXPLOSION_PARTICLES: usize = 15;
pub const PLAYER_HIT_PARTICLES: usize = 30;
