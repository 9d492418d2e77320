//! Interstellar Pioneer headless driver
//!
//! Runs a demo match with a simple autopilot at a simulated 60 Hz and logs
//! what happens. Use `RUST_LOG=debug` for the per-event trace.
//!
//! Usage: `interstellar-pioneer [seed] [tuning.json]`

use std::time::{SystemTime, UNIX_EPOCH};

use interstellar_pioneer::consts::*;
use interstellar_pioneer::sim::{GameEvent, GamePhase, GameState};
use interstellar_pioneer::{Directions, Session, Tuning};

/// Stop the demo after this many ticks (five minutes of play)
const MAX_TICKS: u64 = 5 * 60 * 60;

fn main() {
    env_logger::init();
    log::info!("Interstellar Pioneer (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);

    let tuning = match args.next() {
        Some(path) => load_tuning(&path),
        None => Tuning::default(),
    };

    let mut session = Session::with_tuning(seed, tuning);
    session.start_or_reset();

    let mut now_ms = 0.0;
    for _ in 0..MAX_TICKS {
        session.set_held_directions(autopilot(session.state()));
        for record in session.frame(now_ms) {
            report(record.tick, &record.event);
        }
        if session.phase() == GamePhase::GameOver {
            break;
        }
        now_ms += FRAME_MS;
    }

    let state = session.state();
    println!("Seed:   {}", seed);
    println!("Ticks:  {}", state.tick);
    println!("Score:  {}", state.player.score);
    println!("Level:  {}", state.player.level);
    println!("Lives:  {}", state.player.lives);
    println!("Achievements:");
    for achievement in &state.achievements.list {
        let mark = if achievement.unlocked { "x" } else { " " };
        println!(
            "  [{}] {} - {}",
            mark,
            achievement.id.name(),
            achievement.id.description()
        );
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn load_tuning(path: &str) -> Tuning {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not read {}: {} - using default tuning", path, e);
            return Tuning::default();
        }
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Bad tuning file {}: {} - using default tuning", path, e);
            Tuning::default()
        }
    }
}

/// Slide under the lowest enemy, grab power-ups when nothing threatens
fn autopilot(state: &GameState) -> Directions {
    let player = &state.player;
    let player_center = player.rect().center();

    let target_x = state
        .power_ups
        .iter()
        .map(|p| p.rect().center())
        .chain(
            state
                .enemies
                .iter()
                .filter(|e| e.pos.y < player.pos.y - 80.0)
                .map(|e| e.rect().center()),
        )
        .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
        .map(|target| target.x);

    // Back away from anything about to ram us
    let threatened = state.enemies.iter().any(|e| {
        let c = e.rect().center();
        (c.x - player_center.x).abs() < player.size.x && c.y > player.pos.y - 120.0
    });

    let mut dirs = Directions::default();
    if threatened {
        dirs.left = player_center.x > CANVAS_WIDTH / 2.0;
        dirs.right = !dirs.left;
    } else if let Some(x) = target_x {
        dirs.left = x < player_center.x - player.speed;
        dirs.right = x > player_center.x + player.speed;
    }
    dirs.down = player.pos.y < CANVAS_HEIGHT - PLAYER_SPAWN_OFFSET;
    dirs
}

fn report(tick: u64, event: &GameEvent) {
    match event {
        GameEvent::LevelUp { level } => log::info!("[{tick}] Level {level}!"),
        GameEvent::AchievementUnlocked { id } => {
            log::info!("[{tick}] Achievement: {} ({})", id.name(), id.description())
        }
        GameEvent::EnemyEscaped => log::info!("[{tick}] Enemy escaped (-penalty)"),
        GameEvent::PlayerHit { lives } => log::info!("[{tick}] Hit! {lives} lives left"),
        GameEvent::GameOver { score, level } => {
            log::info!("[{tick}] Game over with {score} points at level {level}")
        }
        other => log::debug!("[{tick}] {:?}", other),
    }
}
