//! Per-frame simulation tick
//!
//! One call advances the match by exactly one rendered frame. Phases run in
//! a fixed order, which decides what can interact within the same tick:
//! input, status timers, firing, spawning, stars, bullets, enemies,
//! power-ups, bullet hits, particles.

use std::f32::consts::FRAC_PI_2;

use rand::Rng;

use super::achievements::Achievements;
use super::collision::{contains_point, intersects};
use super::spawner::{roll_power_up, spawn_enemy};
use super::state::{
    Bullet, Enemy, EXPLOSION_PARTICLES, GameEvent, GamePhase, GameState, PLAYER_HIT_PARTICLES,
    PowerUpKind, colors,
};
use crate::consts::*;
use crate::input::Directions;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Movement keys held when the tick started
    pub held: Directions,
    /// Wall-clock time of this frame (ms); gates the fire cooldown
    pub now_ms: f64,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Nothing moves outside of active play
    if state.phase != GamePhase::Playing {
        return;
    }

    state.tick += 1;
    state.now_ms = input.now_ms;

    move_player(state, input.held);
    update_status_timers(state);
    if state.tuning.auto_fire {
        try_fire(state, input.now_ms);
    }
    spawn_enemies(state);
    update_stars(state);
    update_bullets(state);
    update_enemies(state);
    update_power_ups(state);
    resolve_bullet_hits(state);
    update_particles(state);
}

/// Manually triggered shot. Shares the auto-fire cooldown.
pub fn fire_once(state: &mut GameState, now_ms: f64) -> bool {
    state.phase == GamePhase::Playing && try_fire(state, now_ms)
}

/// Fire if the cooldown has elapsed. Returns whether anything was fired.
fn try_fire(state: &mut GameState, now_ms: f64) -> bool {
    if let Some(last) = state.last_shot_ms {
        if now_ms - last < state.tuning.fire_cooldown_ms {
            return false;
        }
    }
    state.last_shot_ms = Some(now_ms);

    let origin = state.player.muzzle();
    let speed = state.tuning.bullet_speed;
    let spread = state.tuning.triple_shot_spread;
    let up = -FRAC_PI_2;

    let spread_angles = [up, up - spread, up + spread];
    let angles = if state.player.power_ups.triple_shot_ticks > 0 {
        &spread_angles[..]
    } else {
        &spread_angles[..1]
    };
    for &angle in angles {
        state.add_bullet(Bullet {
            pos: origin,
            speed,
            angle,
            is_player: true,
        });
    }
    true
}

/// Full per-axis speed on every held direction (diagonals are faster)
fn move_player(state: &mut GameState, held: Directions) {
    let player = &mut state.player;
    if held.left {
        player.pos.x -= player.speed;
    }
    if held.right {
        player.pos.x += player.speed;
    }
    if held.up {
        player.pos.y -= player.speed;
    }
    if held.down {
        player.pos.y += player.speed;
    }
    player.clamp_to_canvas();
}

fn update_status_timers(state: &mut GameState) {
    let base_speed = state.tuning.player_speed;
    let boost = state.tuning.speed_boost_multiplier;
    let player = &mut state.player;

    player.tick_invincibility();

    let effects = &mut player.power_ups;
    effects.triple_shot_ticks = effects.triple_shot_ticks.saturating_sub(1);
    if effects.speed_boost_ticks > 0 {
        effects.speed_boost_ticks -= 1;
        player.speed = base_speed * boost;
    } else {
        player.speed = base_speed;
    }
}

fn spawn_enemies(state: &mut GameState) {
    let level = state.player.level;
    let period = state.tuning.spawn_period(level).max(1) as u64;
    if state.tick % period != 0 {
        return;
    }

    let enemy = spawn_enemy(level, &mut state.rng);
    log::debug!(
        "Spawned {:?} at x={:.0} (tick {})",
        enemy.kind,
        enemy.pos.x,
        state.tick
    );
    state.add_enemy(enemy);
}

fn update_stars(state: &mut GameState) {
    let GameState { stars, rng, .. } = state;
    for star in stars.iter_mut() {
        star.pos.y += star.speed;
        if star.pos.y > CANVAS_HEIGHT {
            star.pos.y = 0.0;
            star.pos.x = rng.random::<f32>() * CANVAS_WIDTH;
        }
    }
}

fn update_bullets(state: &mut GameState) {
    let margin = state.tuning.bullet_margin;
    for bullet in state.bullets.iter_mut() {
        bullet.advance();
    }
    state.bullets.retain(|b| !b.is_off_screen(margin));
}

/// Move enemies, resolve player contact and escapes
fn update_enemies(state: &mut GameState) {
    let invincibility = state.tuning.invincibility_ticks;
    let penalty = state.tuning.escape_penalty;

    let enemies = std::mem::take(&mut state.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());

    for mut enemy in enemies {
        enemy.pos.y += enemy.speed;

        if !state.player.invincible && intersects(&enemy.rect(), &state.player.rect()) {
            if state.player.power_ups.shield_active {
                // Shield soaks the hit and takes the enemy with it
                state.player.power_ups.shield_active = false;
                state.player.grant_invincibility(invincibility);
                state.spawn_explosion(enemy.rect().center(), enemy.color, EXPLOSION_PARTICLES);
                state.emit(GameEvent::ShieldAbsorbed);
                log::debug!("Shield absorbed a {:?}", enemy.kind);
                continue;
            }

            state.player.lose_life();
            state.player.grant_invincibility(invincibility);
            let center = state.player.rect().center();
            state.spawn_explosion(center, colors::WHITE, PLAYER_HIT_PARTICLES);
            state.emit(GameEvent::PlayerHit {
                lives: state.player.lives,
            });

            if state.player.lives == 0 {
                state.phase = GamePhase::GameOver;
                log::info!(
                    "Game over: score {} at level {}",
                    state.player.score,
                    state.player.level
                );
                state.emit(GameEvent::GameOver {
                    score: state.player.score,
                    level: state.player.level,
                });
            }
        }

        if enemy.escaped() {
            state.player.score = state.player.score.saturating_sub(penalty);
            log::debug!("{:?} escaped, score now {}", enemy.kind, state.player.score);
            state.emit(GameEvent::EnemyEscaped);
            continue;
        }

        survivors.push(enemy);
    }

    state.enemies = survivors;
}

/// Move power-ups and apply any the player touches
fn update_power_ups(state: &mut GameState) {
    let power_ups = std::mem::take(&mut state.power_ups);
    let mut survivors = Vec::with_capacity(power_ups.len());

    for mut power_up in power_ups {
        power_up.pos.y += power_up.speed;

        if intersects(&power_up.rect(), &state.player.rect()) {
            apply_power_up(state, power_up.kind);
            if let Some(id) = Achievements::earned_by_effects(&state.player.power_ups) {
                state.unlock(id);
            }
            continue;
        }

        if power_up.pos.y < CANVAS_HEIGHT {
            survivors.push(power_up);
        }
    }

    state.power_ups = survivors;
}

fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    let duration = state.tuning.power_up_duration_ticks;
    log::debug!("Picked up {:?}", kind);

    match kind {
        PowerUpKind::TripleShot => state.player.power_ups.triple_shot_ticks = duration,
        PowerUpKind::Shield => state.player.power_ups.shield_active = true,
        PowerUpKind::SpeedBoost => state.player.power_ups.speed_boost_ticks = duration,
        PowerUpKind::LifeUp => state.player.gain_life(),
        PowerUpKind::ClearScreen => {
            // Every enemy on screen pops for half its value
            let enemies = std::mem::take(&mut state.enemies);
            let mut bonus = 0;
            for enemy in &enemies {
                state.spawn_explosion(enemy.rect().center(), enemy.color, EXPLOSION_PARTICLES);
                bonus += enemy.points / 2;
            }
            award_points(state, bonus);
        }
    }

    state.emit(GameEvent::PowerUpCollected { kind });
}

/// Each bullet damages at most the first enemy it is inside of
fn resolve_bullet_hits(state: &mut GameState) {
    let bullets = std::mem::take(&mut state.bullets);
    let mut survivors = Vec::with_capacity(bullets.len());

    for bullet in bullets {
        let target = if bullet.is_player {
            state
                .enemies
                .iter()
                .position(|e| contains_point(&e.rect(), bullet.pos))
        } else {
            None
        };

        let Some(idx) = target else {
            survivors.push(bullet);
            continue;
        };

        let enemy = &mut state.enemies[idx];
        enemy.health = enemy.health.saturating_sub(1);
        if enemy.health == 0 {
            if let Some(enemy) = state.remove_enemy(idx) {
                destroy_enemy(state, enemy);
            }
        }
    }

    state.bullets = survivors;
}

fn destroy_enemy(state: &mut GameState, enemy: Enemy) {
    let center = enemy.rect().center();
    state.spawn_explosion(center, enemy.color, EXPLOSION_PARTICLES);

    if let Some(power_up) = roll_power_up(center, &state.tuning, &mut state.rng) {
        log::debug!("{:?} dropped {:?}", enemy.kind, power_up.kind);
        state.add_power_up(power_up);
    }

    state.emit(GameEvent::EnemyDestroyed {
        kind: enemy.kind,
        x: center.x,
        y: center.y,
    });
    award_points(state, enemy.points);
}

/// Add to the score, then settle achievements and level-ups
fn award_points(state: &mut GameState, points: u64) {
    if points == 0 {
        return;
    }
    state.player.score = state.player.score.saturating_add(points);
    let score = state.player.score;

    for id in Achievements::earned_by_score(score) {
        state.unlock(id);
    }

    let next_level = state.tuning.level_for_score(score);
    if next_level > state.player.level {
        state.player.level = next_level;
        // Fresh wave
        state.enemies.clear();
        log::info!("Level up: {} (score {})", next_level, score);
        state.emit(GameEvent::LevelUp { level: next_level });

        if let Some(id) = Achievements::earned_by_level(next_level) {
            state.unlock(id);
        }
    }
}

fn update_particles(state: &mut GameState) {
    let decay = state.tuning.particle_decay;
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= decay;
    }
    state.particles.retain(|p| p.life > 0.0);
}
