//! Level state machine and host-facing API
//!
//! The host owns the frame loop and input; this layer owns everything else.
//! It instantiates levels, gates shot input, advances the simulation one
//! tick at a time and evaluates win/loss only once the table has settled.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::levels::{self, LevelDef, LevelError};
use crate::sim::state::{Body, GamePhase, Obstacle, Particle, Pocket, World};
use crate::sim::{self, shot};

/// Read-only view of everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub level_index: usize,
    pub level_name: &'a str,
    pub level_description: &'a str,
    pub shots_remaining: u32,
    pub targets_remaining: usize,
    /// True while the table is settled and a shot can be taken
    pub can_shoot: bool,
    pub bodies: &'a [Body],
    pub obstacles: &'a [Obstacle],
    pub pockets: &'a [Pocket],
    pub particles: &'a [Particle],
}

/// The complete game: level catalog, active world, phase and score.
///
/// Deterministic for a given seed and input sequence. The host calls
/// [`Game::tick`] once per display refresh; all other methods are
/// event-driven.
pub struct Game {
    levels: Vec<LevelDef>,
    level_index: usize,
    world: Option<World>,
    phase: GamePhase,
    score: u64,
    rng: Pcg32,
    /// False while a shot is still resolving; win/loss is evaluated on the
    /// transition back to true.
    settled: bool,
}

impl Game {
    /// A game over the built-in campaign.
    pub fn new(seed: u64) -> Self {
        Self::with_levels(levels::builtin_levels(), seed)
    }

    /// A game over a custom level pack. Levels are validated lazily, when
    /// each one is instantiated.
    pub fn with_levels(levels: Vec<LevelDef>, seed: u64) -> Self {
        Self {
            levels,
            level_index: 0,
            world: None,
            phase: GamePhase::Start,
            score: 0,
            rng: Pcg32::seed_from_u64(seed),
            settled: true,
        }
    }

    /// Begin a fresh run from the first level. Resets the score.
    pub fn start(&mut self) -> Result<(), LevelError> {
        self.score = 0;
        self.init_level(0)?;
        log::info!("run started: {} levels", self.levels.len());
        Ok(())
    }

    fn init_level(&mut self, index: usize) -> Result<(), LevelError> {
        let def = self.levels.get(index).ok_or(LevelError::IndexOutOfRange {
            index,
            count: self.levels.len(),
        })?;
        def.validate(index)?;
        log::info!(
            "{} ({} shots, {} targets)",
            def.name,
            def.shots,
            def.marbles.len()
        );
        self.world = Some(World::from_level(def));
        self.level_index = index;
        self.phase = GamePhase::Playing;
        self.settled = true;
        Ok(())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn shots_remaining(&self) -> u32 {
        self.world.as_ref().map_or(0, |w| w.shots_remaining)
    }

    /// Whether a shot gesture would be accepted right now.
    pub fn can_shoot(&self) -> bool {
        self.phase == GamePhase::Playing && self.settled && self.shots_remaining() > 0
    }

    /// Fire a shot from a completed drag gesture. Returns `true` when a shot
    /// was actually taken; weak gestures and gestures outside the shot window
    /// are ignored without consuming budget.
    pub fn apply_shot(&mut self, drag_start: Vec2, drag_end: Vec2) -> bool {
        if !self.can_shoot() {
            return false;
        }
        let Some(impulse) = shot::compute_impulse(drag_start - drag_end) else {
            return false;
        };
        let impulse = shot::apply_variance(impulse, &mut self.rng);

        let world = self.world.as_mut().expect("can_shoot implies a world");
        world.shots_remaining -= 1;
        if let Some(player) = world.player_mut() {
            player.vel = impulse;
        }
        self.settled = false;
        log::info!(
            "shot fired at power {:.1}, {} remaining",
            impulse.length(),
            world.shots_remaining
        );
        true
    }

    /// Predicted trajectory for an in-progress drag. Empty outside the shot
    /// window.
    pub fn preview(&self, drag_start: Vec2, drag_current: Vec2) -> Vec<Vec2> {
        if !self.can_shoot() {
            return Vec::new();
        }
        let world = self.world.as_ref().expect("can_shoot implies a world");
        shot::preview(world, drag_start, drag_current)
    }

    /// Advance one simulation step. Outside `Playing` only particles decay.
    pub fn tick(&mut self) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        if self.phase != GamePhase::Playing {
            sim::effects::update(&mut world.particles);
            return;
        }

        let report = sim::tick(world, &mut self.rng);
        self.score += report.points;

        if !self.settled && report.moving_bodies == 0 {
            self.settled = true;
            self.evaluate_turn();
        }
    }

    /// Win/loss check, run exactly once per settled turn. Clearing the
    /// targets wins the level even when it also spent the last shot; the
    /// final level is no exception, victory waits for the advance action.
    fn evaluate_turn(&mut self) {
        let world = self.world.as_ref().expect("evaluated during play");
        if world.targets_remaining() == 0 {
            self.phase = GamePhase::LevelComplete;
            log::info!("level cleared, score {}", self.score);
        } else if world.shots_remaining == 0 {
            self.phase = GamePhase::GameOver;
            log::info!(
                "out of shots with {} targets left",
                world.targets_remaining()
            );
        }
    }

    /// Advance past a cleared level. Valid only from `LevelComplete`; with
    /// the catalog exhausted this is the campaign victory.
    pub fn next_level(&mut self) -> Result<(), LevelError> {
        if self.phase != GamePhase::LevelComplete {
            return Ok(());
        }
        if self.level_index + 1 >= self.levels.len() {
            self.phase = GamePhase::Victory;
            log::info!("campaign cleared, final score {}", self.score);
            return Ok(());
        }
        self.init_level(self.level_index + 1)
    }

    /// Replay the current level from its initial conditions. Valid only from
    /// `GameOver`; the accumulated score is kept.
    pub fn retry_level(&mut self) -> Result<(), LevelError> {
        if self.phase != GamePhase::GameOver {
            return Ok(());
        }
        self.init_level(self.level_index)
    }

    /// Restart the campaign after a victory. Resets the score.
    pub fn play_again(&mut self) -> Result<(), LevelError> {
        if self.phase != GamePhase::Victory {
            return Ok(());
        }
        self.start()
    }

    /// Frame view for the renderer.
    pub fn snapshot(&self) -> Snapshot<'_> {
        let (bodies, obstacles, pockets, particles, shots, targets): (
            &[Body],
            &[Obstacle],
            &[Pocket],
            &[Particle],
            u32,
            usize,
        ) = match &self.world {
            Some(w) => (
                &w.bodies,
                &w.obstacles,
                &w.pockets,
                &w.particles,
                w.shots_remaining,
                w.targets_remaining(),
            ),
            None => (&[], &[], &[], &[], 0, 0),
        };
        let def = self.levels.get(self.level_index);
        Snapshot {
            phase: self.phase,
            score: self.score,
            level_index: self.level_index,
            level_name: def.map_or("", |d| d.name.as_str()),
            level_description: def.map_or("", |d| d.description.as_str()),
            shots_remaining: shots,
            targets_remaining: targets,
            can_shoot: self.can_shoot(),
            bodies,
            obstacles,
            pockets,
            particles,
        }
    }
}
