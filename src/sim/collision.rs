//! Collision detection and response
//!
//! All three collision kinds follow the same shape: positional correction
//! first, then impulse reflection along the contact normal. Obstacle and
//! body-body reflections only fire while the bodies are approaching; the
//! arena boundary reflects unconditionally once overlapped.

use glam::Vec2;

use super::state::{Body, Obstacle};
use crate::consts::*;

/// Fallback normal for the degenerate zero-distance case (straight up in
/// y-down coordinates).
pub const FALLBACK_NORMAL: Vec2 = Vec2::new(0.0, -1.0);

/// Resolve a body against a static rectangular obstacle.
///
/// Returns `true` when the body was reflected, so the caller can request a
/// spark burst at the contact point.
pub fn resolve_obstacle(body: &mut Body, obstacle: &Obstacle) -> bool {
    let closest = obstacle.closest_point(body.pos);
    let delta = body.pos - closest;
    let dist_sq = delta.length_squared();
    if dist_sq >= body.radius * body.radius {
        return false;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist == 0.0 { FALLBACK_NORMAL } else { delta / dist };

    // Push out along the normal by the penetration depth
    body.pos += normal * (body.radius - dist);

    // Reflect only when moving into the surface
    let along = body.vel.dot(normal);
    if along < 0.0 {
        body.vel = (body.vel - 2.0 * along * normal) * WALL_RESTITUTION;
        return true;
    }
    false
}

/// Resolve a pair of bodies against each other.
///
/// Both bodies are separated symmetrically by half the overlap; the impulse
/// is mass-weighted and applied only while the pair is approaching. Returns
/// the impulse magnitude when one was applied.
pub fn resolve_pair(a: &mut Body, b: &mut Body) -> Option<f32> {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.radius + b.radius;
    if dist >= min_dist {
        return None;
    }

    let normal = if dist == 0.0 { FALLBACK_NORMAL } else { delta / dist };
    let overlap = (min_dist - dist) / 2.0;
    a.pos -= normal * overlap;
    b.pos += normal * overlap;

    let rel_vel = b.vel - a.vel;
    let along = rel_vel.dot(normal);
    if along > 0.0 {
        // Already separating
        return None;
    }

    let impulse = -(1.0 + RESTITUTION) * along / (1.0 / a.mass + 1.0 / b.mass);
    let j = impulse * normal;
    a.vel -= j / a.mass;
    b.vel += j / b.mass;
    Some(impulse.abs())
}

/// Resolve a body against the circular arena boundary.
///
/// Overlapping bodies are pushed back radially by the excess and reflected
/// about the radial normal, scaled by the softer boundary restitution.
/// Returns `true` on contact.
pub fn resolve_boundary(body: &mut Body) -> bool {
    let delta = body.pos - ARENA_CENTER;
    let dist = delta.length();
    let limit = BOUNDARY_RADIUS - body.radius;
    if dist <= limit {
        return false;
    }

    let normal = delta / dist;
    body.pos -= normal * (dist - limit);

    let along = body.vel.dot(normal);
    body.vel = (body.vel - 2.0 * along * normal) * BOUNDARY_RESTITUTION;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BodyId;

    fn body(pos: Vec2, vel: Vec2, radius: f32, mass: f32) -> Body {
        Body {
            id: BodyId(1),
            pos,
            vel,
            radius,
            mass,
            color: 0xff0055,
        }
    }

    #[test]
    fn square_obstacle_hit_rebounds_with_wall_restitution() {
        // Body moving left into the right face of a wall
        let wall = Obstacle {
            pos: Vec2::new(0.0, 50.0),
            width: 90.0,
            height: 100.0,
            color: 0x6366f1,
        };
        let mut b = body(Vec2::new(95.0, 100.0), Vec2::new(-6.0, 0.0), 10.0, 1.0);

        assert!(resolve_obstacle(&mut b, &wall));
        assert!((b.vel.x - 5.4).abs() < 1e-4, "vx = {}", b.vel.x);
        assert!(b.vel.y.abs() < 1e-4);
        // Pushed fully out of penetration
        assert!((b.pos.x - 100.0).abs() < 1e-4);
    }

    #[test]
    fn obstacle_does_not_reflect_a_separating_body() {
        let wall = Obstacle {
            pos: Vec2::new(0.0, 50.0),
            width: 90.0,
            height: 100.0,
            color: 0,
        };
        // Overlapping but already moving away
        let mut b = body(Vec2::new(95.0, 100.0), Vec2::new(6.0, 0.0), 10.0, 1.0);

        assert!(!resolve_obstacle(&mut b, &wall));
        assert_eq!(b.vel, Vec2::new(6.0, 0.0));
        // Positional correction still applies
        assert!((b.pos.x - 100.0).abs() < 1e-4);
    }

    #[test]
    fn zero_distance_overlap_falls_back_to_fixed_normal() {
        let wall = Obstacle {
            pos: Vec2::new(90.0, 90.0),
            width: 20.0,
            height: 20.0,
            color: 0,
        };
        // Body center inside the rect: closest point == center, distance 0
        let mut b = body(Vec2::new(100.0, 100.0), Vec2::new(0.0, 3.0), 5.0, 1.0);

        assert!(resolve_obstacle(&mut b, &wall));
        // Pushed straight up by the full radius
        assert!((b.pos.y - 95.0).abs() < 1e-4);
        assert!((b.vel.y - (-3.0 * WALL_RESTITUTION)).abs() < 1e-4);
    }

    #[test]
    fn equal_mass_pair_separates_at_restitution_fraction() {
        let mut a = body(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), 10.0, 1.0);
        let mut b = body(Vec2::new(19.0, 0.0), Vec2::ZERO, 10.0, 1.0);

        let impulse = resolve_pair(&mut a, &mut b).expect("pair must collide");
        assert!(impulse > 0.0);

        // Approach speed 4 => separation speed 4 * 0.85 = 3.4
        let separation = b.vel.x - a.vel.x;
        assert!((separation - 4.0 * RESTITUTION).abs() < 1e-4, "sep = {separation}");
        // Symmetric positional correction, half the overlap each
        assert!((a.pos.x - (-0.5)).abs() < 1e-4);
        assert!((b.pos.x - 19.5).abs() < 1e-4);
    }

    #[test]
    fn mass_weighting_moves_the_lighter_body_more() {
        let mut heavy = body(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), 10.0, 2.0);
        let mut light = body(Vec2::new(19.0, 0.0), Vec2::ZERO, 10.0, 0.5);

        resolve_pair(&mut heavy, &mut light).expect("pair must collide");
        assert!(light.vel.x > heavy.vel.x.abs());
    }

    #[test]
    fn separating_pair_gets_no_impulse() {
        let mut a = body(Vec2::new(0.0, 0.0), Vec2::new(-1.0, 0.0), 10.0, 1.0);
        let mut b = body(Vec2::new(19.0, 0.0), Vec2::new(1.0, 0.0), 10.0, 1.0);

        assert!(resolve_pair(&mut a, &mut b).is_none());
        assert_eq!(a.vel, Vec2::new(-1.0, 0.0));
        assert_eq!(b.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn boundary_pushes_back_and_softens_velocity() {
        // Past the boundary to the right of center, still heading out
        let start = ARENA_CENTER + Vec2::new(BOUNDARY_RADIUS - 4.0, 0.0);
        let mut b = body(start, Vec2::new(5.0, 0.0), 10.0, 1.0);

        assert!(resolve_boundary(&mut b));
        let dist = b.pos.distance(ARENA_CENTER);
        assert!((dist + b.radius - BOUNDARY_RADIUS).abs() < 1e-3);
        assert!((b.vel.x - (-5.0 * BOUNDARY_RESTITUTION)).abs() < 1e-4);
    }

    #[test]
    fn boundary_ignores_contained_bodies() {
        let mut b = body(ARENA_CENTER, Vec2::new(5.0, 0.0), 10.0, 1.0);
        assert!(!resolve_boundary(&mut b));
        assert_eq!(b.pos, ARENA_CENTER);
    }
}
