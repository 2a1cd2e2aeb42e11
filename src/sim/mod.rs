//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must stay pure and deterministic:
//! - One discrete step per host tick
//! - Seeded RNG only (shot variance, particle spread)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod shot;
pub mod state;
pub mod tick;

pub use shot::{clamped_impulse, compute_impulse, preview};
pub use state::{Body, BodyId, GamePhase, Obstacle, Particle, Pocket, World};
pub use tick::{TickReport, integrate, tick};
