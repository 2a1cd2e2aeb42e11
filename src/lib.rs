//! Trickshot - a drag-to-shoot marble game core
//!
//! Core modules:
//! - `sim`: deterministic physics simulation (integration, collisions, pockets)
//! - `levels`: hand-authored level catalog and JSON loader
//! - `game`: level state machine and the host-facing API
//!
//! The crate is headless: rendering and input plumbing live in the host, which
//! drives [`Game::tick`] once per display refresh and draws from
//! [`Game::snapshot`]. Everything in here is single-threaded and deterministic
//! for a given seed.

pub mod game;
pub mod levels;
pub mod sim;

pub use game::{Game, Snapshot};
pub use levels::{LevelDef, LevelError, MarbleDef};
pub use sim::state::GamePhase;

/// Game tuning constants
pub mod consts {
    use glam::Vec2;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Center of the circular arena
    pub const ARENA_CENTER: Vec2 = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0);
    /// Bodies may never exit this radius around the arena center
    pub const BOUNDARY_RADIUS: f32 = 280.0;

    /// Per-tick velocity damping
    pub const FRICTION: f32 = 0.98;
    /// Per-axis speed below which a body snaps to rest
    pub const SETTLE_THRESHOLD: f32 = 0.05;

    /// Body-body restitution
    pub const RESTITUTION: f32 = 0.85;
    /// Body-obstacle restitution
    pub const WALL_RESTITUTION: f32 = 0.9;
    /// Boundary restitution - softer than walls to keep shots contained
    pub const BOUNDARY_RESTITUTION: f32 = 0.7;

    /// Drag-vector-to-impulse scale
    pub const FORCE_SCALE: f32 = 0.2;
    /// Impulse magnitude cap
    pub const MAX_POWER: f32 = 35.0;
    /// Gestures below this clamped magnitude are ignored entirely
    pub const MIN_SHOT_POWER: f32 = 2.0;
    /// Multiplicative execution variance applied after clamping (+/- 2%)
    pub const SHOT_VARIANCE: f32 = 0.02;
    /// Trajectory preview horizon in simulation steps
    pub const PREDICT_STEPS: usize = 30;

    /// Fixed launch position for the player body
    pub const PLAYER_START: Vec2 = Vec2::new(400.0, 500.0);
    pub const PLAYER_RADIUS: f32 = 14.0;
    pub const PLAYER_MASS: f32 = 2.0;
    pub const PLAYER_COLOR: u32 = 0xffffff;

    /// Points per captured target
    pub const POCKET_SCORE: u64 = 500;

    /// Particle life lost per tick
    pub const PARTICLE_DECAY: f32 = 0.03;
    /// Burst sizes: obstacle spark, body clack, pocket capture
    pub const WALL_SPARKS: usize = 3;
    pub const CLACK_SPARKS: usize = 5;
    pub const CAPTURE_SPARKS: usize = 15;
    /// Impact speed (|vx| + |vy|) above which an obstacle hit sparks
    pub const SPARK_SPEED: f32 = 2.0;
    /// Impulse magnitude above which a body-body hit sparks
    pub const CLACK_IMPULSE: f32 = 3.0;
}
