//! Shot gesture handling and trajectory preview
//!
//! A shot is a drag vector (press position minus release position) converted
//! into a velocity impulse on the player body. The preview replays the same
//! clamped impulse against the obstacle and boundary rules only, on a
//! read-only view of the world.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::FALLBACK_NORMAL;
use super::state::World;
use crate::consts::*;

/// Convert a drag vector into a launch impulse, clamped to `MAX_POWER` with
/// direction preserved.
pub fn clamped_impulse(drag: Vec2) -> Vec2 {
    let raw = drag * FORCE_SCALE;
    let mag = raw.length();
    if mag > MAX_POWER {
        raw * (MAX_POWER / mag)
    } else {
        raw
    }
}

/// The impulse a completed gesture produces, or `None` when the clamped
/// magnitude falls below the activation threshold (a no-op gesture: no shot
/// consumed, no velocity applied). The random execution variance is applied
/// separately, after clamping.
pub fn compute_impulse(drag: Vec2) -> Option<Vec2> {
    let impulse = clamped_impulse(drag);
    if impulse.length() < MIN_SHOT_POWER {
        None
    } else {
        Some(impulse)
    }
}

/// Apply the +/-2% execution variance. A single factor scales both axes so
/// the direction is preserved.
pub fn apply_variance(impulse: Vec2, rng: &mut Pcg32) -> Vec2 {
    let factor = 1.0 + rng.random_range(-SHOT_VARIANCE..SHOT_VARIANCE);
    impulse * factor
}

/// Forward-simulate a candidate shot for aim feedback.
///
/// Returns the predicted polyline starting at the player position: the raw
/// position update plus obstacle and boundary reflections. No friction, no
/// restitution, no body-body response, no variance - cheap and conservative,
/// recomputed every frame a drag is active. Never touches the real world.
pub fn preview(world: &World, drag_start: Vec2, drag_current: Vec2) -> Vec<Vec2> {
    let Some(player) = world.player() else {
        return Vec::new();
    };

    let mut pos = player.pos;
    let mut vel = clamped_impulse(drag_start - drag_current);
    let radius = player.radius;

    let mut points = Vec::with_capacity(PREDICT_STEPS + 1);
    points.push(pos);

    for _ in 0..PREDICT_STEPS {
        pos += vel;

        for obstacle in &world.obstacles {
            let closest = obstacle.closest_point(pos);
            let delta = pos - closest;
            let dist_sq = delta.length_squared();
            if dist_sq < radius * radius {
                let dist = dist_sq.sqrt();
                let normal = if dist == 0.0 { FALLBACK_NORMAL } else { delta / dist };
                let along = vel.dot(normal);
                if along < 0.0 {
                    vel -= 2.0 * along * normal;
                    pos += normal * (radius - dist + 1.0);
                }
            }
        }

        let delta = pos - ARENA_CENTER;
        let dist = delta.length();
        let limit = BOUNDARY_RADIUS - radius;
        if dist > limit {
            let normal = delta / dist;
            let along = vel.dot(normal);
            vel -= 2.0 * along * normal;
            pos -= normal * (dist - limit);
        }

        points.push(pos);
    }
    points
}
