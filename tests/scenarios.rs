//! End-to-end match scenarios driven through the public API

use glam::Vec2;
use interstellar_pioneer::consts::*;
use interstellar_pioneer::sim::{
    AchievementId, Bullet, Enemy, EnemyKind, GameEvent, GamePhase, GameState, TickInput, fire_once,
    tick,
};
use interstellar_pioneer::{Directions, Session, Tuning};

fn quiet_tuning() -> Tuning {
    Tuning {
        auto_fire: false,
        star_count: 0,
        ..Tuning::default()
    }
}

fn parked(kind: EnemyKind, x: f32, y: f32) -> Enemy {
    let mut enemy = Enemy::new(kind, Vec2::new(x, y));
    enemy.speed = 0.0;
    enemy
}

fn upward_bullet(x: f32, y: f32) -> Bullet {
    Bullet {
        pos: Vec2::new(x, y),
        speed: 7.0,
        angle: -std::f32::consts::FRAC_PI_2,
        is_player: true,
    }
}

fn run(state: &mut GameState, ticks: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for i in 0..ticks {
        let input = TickInput {
            held: Directions::default(),
            now_ms: i as f64 * FRAME_MS,
        };
        tick(state, &input);
        events.extend(state.drain_events().into_iter().map(|r| r.event));
    }
    events
}

#[test]
fn fresh_match_first_kill() {
    let mut state = GameState::with_tuning(2024, quiet_tuning());
    state.start_or_reset();

    // Basic enemy straight above the player's muzzle
    let muzzle = state.player.muzzle();
    state.add_enemy(parked(EnemyKind::Basic, muzzle.x - 17.5, 300.0));
    assert!(fire_once(&mut state, 0.0));

    let events = run(&mut state, 40);

    assert!(state.enemies.is_empty());
    assert_eq!(state.player.score, 100);
    assert_eq!(state.player.level, 1);
    assert!(state.achievements.is_unlocked(AchievementId::FirstBlood));
    assert!(events.contains(&GameEvent::EnemyDestroyed {
        kind: EnemyKind::Basic,
        x: muzzle.x,
        y: 317.5,
    }));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::LevelUp { .. })));
}

#[test]
fn kill_across_level_boundary() {
    let mut state = GameState::with_tuning(7, quiet_tuning());
    state.start_or_reset();
    state.player.score = 480;
    state.add_enemy(parked(EnemyKind::Basic, 100.0, 100.0));
    state.add_enemy(parked(EnemyKind::Basic, 500.0, 150.0));
    state.add_bullet(upward_bullet(117.0, 125.0));

    let events = run(&mut state, 1);

    assert_eq!(state.player.score, 580);
    assert_eq!(state.player.level, 2);
    assert!(state.enemies.is_empty());
    let level_ups = events
        .iter()
        .filter(|e| matches!(e, GameEvent::LevelUp { level: 2 }))
        .count();
    assert_eq!(level_ups, 1);
}

#[test]
fn reset_after_game_over() {
    let mut session = Session::with_tuning(11, quiet_tuning());
    session.start_or_reset();

    // Park the ship in the path of a stream of enemies until it dies
    let mut now = 0.0;
    let mut saw_game_over = false;
    for _ in 0..20_000 {
        for record in session.frame(now) {
            if matches!(record.event, GameEvent::GameOver { .. }) {
                saw_game_over = true;
            }
        }
        if session.phase() == GamePhase::GameOver {
            break;
        }
        // Chase the lowest enemy so contact is guaranteed eventually
        let state = session.state();
        let player_x = state.player.rect().center().x;
        let target = state
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.rect().center().x);
        session.set_held_directions(Directions {
            left: target.is_some_and(|x| x < player_x - 5.0),
            right: target.is_some_and(|x| x > player_x + 5.0),
            ..Directions::default()
        });
        now += FRAME_MS;
    }

    assert!(saw_game_over);
    assert_eq!(session.state().player.lives, 0);

    session.start_or_reset();
    let state = session.state();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.player.score, 0);
    assert_eq!(state.player.level, 1);
    assert_eq!(state.player.lives, 3);
    assert!(state.bullets.is_empty());
    assert!(state.enemies.is_empty());
    assert!(state.power_ups.is_empty());
    assert!(state.particles.is_empty());
}

#[test]
fn quit_to_menu_from_game_over() {
    let mut state = GameState::with_tuning(3, quiet_tuning());
    state.start_or_reset();
    state.player.lives = 1;
    state.add_enemy(Enemy::new(EnemyKind::Heavy, state.player.pos));
    run(&mut state, 1);
    assert_eq!(state.phase, GamePhase::GameOver);

    state.quit_to_menu();
    assert_eq!(state.phase, GamePhase::Start);
    run(&mut state, 10);
    assert_eq!(state.tick, 1);
}

#[test]
fn tuning_from_json_changes_pacing() {
    let tuning = Tuning::from_json(
        r#"{ "spawn_period_base": 10, "spawn_period_min": 10, "star_count": 0, "auto_fire": false }"#,
    )
    .unwrap();
    let mut state = GameState::with_tuning(1, tuning);
    state.start_or_reset();
    run(&mut state, 30);
    // Spawns on ticks 10, 20, 30; none has reached the bottom yet
    assert_eq!(state.enemies.len(), 3);
}

#[test]
fn later_levels_spawn_tougher_kinds() {
    let mut state = GameState::with_tuning(77, quiet_tuning());
    state.start_or_reset();
    state.player.level = 3;
    state.player.score = 1000;
    // Contact is ignored for the whole run
    state.player.grant_invincibility(u32::MAX);
    run(&mut state, 45 * 40);
    assert_eq!(state.phase, GamePhase::Playing);
    assert!(state.enemies.iter().any(|e| e.kind != EnemyKind::Basic));
}
