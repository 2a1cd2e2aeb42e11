//! Headless demo driver
//!
//! Plays a scripted shot on the first level and logs the outcome. Useful for
//! smoke-testing the core without a renderer; the seed comes from the first
//! CLI argument.

use glam::Vec2;

use trickshot::{Game, GamePhase};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    log::info!("seed {seed}");

    let mut game = Game::new(seed);
    if let Err(err) = game.start() {
        log::error!("failed to start: {err}");
        std::process::exit(1);
    }

    // Full-length drag straight down, launching the cue marble upward
    let drag_start = Vec2::new(400.0, 500.0);
    let drag_end = Vec2::new(400.0, 650.0);

    let preview = game.preview(drag_start, drag_end);
    log::info!(
        "preview: {} points, ends at ({:.0}, {:.0})",
        preview.len(),
        preview.last().map_or(0.0, |p| p.x),
        preview.last().map_or(0.0, |p| p.y),
    );

    if !game.apply_shot(drag_start, drag_end) {
        log::error!("scripted shot was rejected");
        std::process::exit(1);
    }

    let mut ticks = 0u32;
    while !game.can_shoot() && game.phase() == GamePhase::Playing {
        game.tick();
        ticks += 1;
        if ticks > 10_000 {
            log::error!("table never settled");
            std::process::exit(1);
        }
    }

    let snap = game.snapshot();
    log::info!(
        "settled after {ticks} ticks: phase {:?}, score {}, {} shots left, {} targets left",
        snap.phase,
        snap.score,
        snap.shots_remaining,
        snap.targets_remaining,
    );
}
