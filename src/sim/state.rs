//! Simulation state types
//!
//! Everything the active level owns lives here. A [`World`] is instantiated
//! from a [`LevelDef`] template and discarded on level transition; retries
//! restore exact initial conditions by re-instantiating.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::levels::LevelDef;

/// Current phase of the level lifecycle. Shot input is accepted only in
/// `Playing`, and only once the previous shot has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the run begins
    Start,
    /// Active play on the current level
    Playing,
    /// All targets sunk; waiting for the advance action
    LevelComplete,
    /// Shots exhausted with targets remaining; waiting for retry
    GameOver,
    /// Campaign cleared
    Victory,
}

/// Stable identity for a body. The player body is always `BodyId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// A circular, moving, collidable body (the player's cue marble or a target).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    /// 0xRRGGBB, cosmetic pass-through for the renderer
    pub color: u32,
}

impl Body {
    /// True when both velocity axes are below the settle threshold.
    pub fn at_rest(&self) -> bool {
        self.vel.x.abs() <= SETTLE_THRESHOLD && self.vel.y.abs() <= SETTLE_THRESHOLD
    }
}

/// A static axis-aligned rectangular barrier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner (y grows downward)
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: u32,
}

impl Obstacle {
    /// Closest point on the rectangle to `point`.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.pos.x, self.pos.x + self.width),
            point.y.clamp(self.pos.y, self.pos.y + self.height),
        )
    }
}

/// A circular capture zone.
///
/// Capture uses half the radius so grazing visual overlap does not capture;
/// the full radius is the rendered hole size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pocket {
    pub pos: Vec2,
    pub radius: f32,
}

impl Pocket {
    /// Whether a body centered at `body_pos` is captured this tick.
    pub fn captures(&self, body_pos: Vec2) -> bool {
        body_pos.distance(self.pos) < self.radius / 2.0
    }
}

/// A cosmetic spark. Created by collision/capture events, decays and is
/// discarded; never feeds back into gameplay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at spawn, dead at 0
    pub life: f32,
    pub color: u32,
}

/// Maximum live particles; the oldest are dropped to make room.
pub const MAX_PARTICLES: usize = 256;

/// Mutable per-level simulation state.
///
/// Bodies leave the live list only through pocket capture (never the player)
/// or when the whole world is dropped on level transition. No entity outlives
/// its owning level instance.
#[derive(Debug, Clone)]
pub struct World {
    pub bodies: Vec<Body>,
    pub obstacles: Vec<Obstacle>,
    pub pockets: Vec<Pocket>,
    pub shots_remaining: u32,
    /// The one player-controlled body, held explicitly so no flag scan is needed
    pub player_id: BodyId,
    /// Cosmetic only
    pub particles: Vec<Particle>,
}

impl World {
    /// Instantiate a level: deep-copy the template and inject the player body
    /// at the fixed launch position. The player is not part of level data.
    pub fn from_level(def: &LevelDef) -> Self {
        let player = Body {
            id: BodyId(0),
            pos: PLAYER_START,
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            mass: PLAYER_MASS,
            color: PLAYER_COLOR,
        };
        let mut bodies = Vec::with_capacity(def.marbles.len() + 1);
        bodies.push(player);
        for (i, m) in def.marbles.iter().enumerate() {
            bodies.push(Body {
                id: BodyId(i as u32 + 1),
                pos: m.pos,
                vel: Vec2::ZERO,
                radius: m.radius,
                mass: m.mass,
                color: m.color,
            });
        }
        Self {
            bodies,
            obstacles: def.obstacles.clone(),
            pockets: def.pockets.clone(),
            shots_remaining: def.shots,
            player_id: BodyId(0),
            particles: Vec::new(),
        }
    }

    pub fn player(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == self.player_id)
    }

    pub fn player_mut(&mut self) -> Option<&mut Body> {
        let id = self.player_id;
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Live non-player bodies; the win condition tracks this reaching zero.
    pub fn targets_remaining(&self) -> usize {
        self.bodies.iter().filter(|b| b.id != self.player_id).count()
    }
}
