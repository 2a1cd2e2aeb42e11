//! Per-tick simulation advance
//!
//! One discrete step, in strict order: integrate -> collisions (boundary,
//! obstacles, then body pairs) -> pockets -> particles. The returned report
//! carries the settle signal and any points scored; win/loss evaluation
//! belongs to the game layer.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::state::World;
use super::{collision, effects};
use crate::consts::*;

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickReport {
    /// Bodies still above the settle threshold. This is the sole signal used
    /// to detect "turn settled".
    pub moving_bodies: usize,
    /// Points awarded by pocket captures this tick
    pub points: u64,
}

/// Advance every live body by one step and damp its velocity. Bodies whose
/// per-axis speed falls below the settle threshold snap to exactly zero.
/// Returns how many bodies are still in motion.
pub fn integrate(world: &mut World) -> usize {
    let mut moving = 0;
    for body in &mut world.bodies {
        body.pos += body.vel;
        body.vel *= FRICTION;
        if body.at_rest() {
            body.vel = Vec2::ZERO;
        } else {
            moving += 1;
        }
    }
    moving
}

/// One full simulation step.
pub fn tick(world: &mut World, rng: &mut Pcg32) -> TickReport {
    let moving_bodies = integrate(world);
    resolve_collisions(world, rng);
    let points = resolve_pockets(world, rng);
    effects::update(&mut world.particles);
    TickReport {
        moving_bodies,
        points,
    }
}

fn resolve_collisions(world: &mut World, rng: &mut Pcg32) {
    // Burst requests are deferred so the spark RNG draws happen in a stable
    // order regardless of which borrow is live.
    let mut bursts: Vec<(Vec2, u32, usize)> = Vec::new();

    for body in &mut world.bodies {
        collision::resolve_boundary(body);
        for obstacle in &world.obstacles {
            if collision::resolve_obstacle(body, obstacle)
                && body.vel.x.abs() + body.vel.y.abs() > SPARK_SPEED
            {
                bursts.push((body.pos, obstacle.color, WALL_SPARKS));
            }
        }
    }

    let n = world.bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (left, right) = world.bodies.split_at_mut(j);
            let a = &mut left[i];
            let b = &mut right[0];
            if let Some(impulse) = collision::resolve_pair(a, b) {
                if impulse > CLACK_IMPULSE {
                    bursts.push(((a.pos + b.pos) / 2.0, 0xffffff, CLACK_SPARKS));
                }
            }
        }
    }

    for (pos, color, count) in bursts {
        effects::spawn_burst(&mut world.particles, rng, pos, color, count);
    }
}

/// Detect pocket captures. The live-body list stays index-stable during the
/// pass; captured targets are tombstoned and removed afterwards. A body can
/// be captured by at most one pocket per tick.
fn resolve_pockets(world: &mut World, rng: &mut Pcg32) -> u64 {
    let mut points = 0;
    let mut captured: Vec<usize> = Vec::new();
    let mut bursts: Vec<(Vec2, u32)> = Vec::new();
    let player_id = world.player_id;

    for (idx, body) in world.bodies.iter_mut().enumerate() {
        for pocket in &world.pockets {
            if !pocket.captures(body.pos) {
                continue;
            }
            bursts.push((body.pos, body.color));
            if body.id == player_id {
                // Scratch penalty: back to the launch spot, never removed
                body.pos = PLAYER_START;
                body.vel = Vec2::ZERO;
                log::info!("player scratched, reset to launch position");
            } else {
                captured.push(idx);
                points += POCKET_SCORE;
                log::info!("target {:?} captured (+{POCKET_SCORE})", body.id);
            }
            break;
        }
    }

    // Indices were collected in ascending order; remove back to front
    for idx in captured.into_iter().rev() {
        world.bodies.remove(idx);
    }
    for (pos, color) in bursts {
        effects::spawn_burst(&mut world.particles, rng, pos, color, CAPTURE_SPARKS);
    }
    points
}
