//! Property tests for the simulation invariants that hold across all inputs:
//! containment inside the arena boundary and the impulse power cap.

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use trickshot::consts::*;
use trickshot::sim::{self, Body, BodyId, World};

fn lone_body_world(pos: Vec2, vel: Vec2, radius: f32) -> World {
    World {
        bodies: vec![Body {
            id: BodyId(0),
            pos,
            vel,
            radius,
            mass: 1.0,
            color: 0xffffff,
        }],
        obstacles: Vec::new(),
        pockets: Vec::new(),
        shots_remaining: 1,
        player_id: BodyId(0),
        particles: Vec::new(),
    }
}

proptest! {
    /// No launch speed or direction can push a body past the arena boundary.
    #[test]
    fn bodies_never_exit_arena(
        angle in 0.0f32..std::f32::consts::TAU,
        speed in 0.0f32..MAX_POWER,
        radius in 5.0f32..25.0,
        offset in -200.0f32..200.0,
    ) {
        let start = ARENA_CENTER + Vec2::new(offset * 0.7, offset * 0.3);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        let mut world = lone_body_world(start, vel, radius);
        let mut rng = Pcg32::seed_from_u64(0);

        for _ in 0..300 {
            sim::tick(&mut world, &mut rng);
            let body = &world.bodies[0];
            let dist = body.pos.distance(ARENA_CENTER);
            prop_assert!(
                dist + body.radius <= BOUNDARY_RADIUS + 1e-3,
                "body at {:?} escaped (dist {dist})",
                body.pos,
            );
        }
    }

    /// Any drag vector, however long, clamps to the power cap.
    #[test]
    fn impulse_never_exceeds_power_cap(
        dx in -5_000.0f32..5_000.0,
        dy in -5_000.0f32..5_000.0,
    ) {
        let impulse = sim::clamped_impulse(Vec2::new(dx, dy));
        prop_assert!(impulse.length() <= MAX_POWER + 1e-3);
    }

    /// Friction alone always brings a body to a complete stop.
    #[test]
    fn friction_settles_every_body(
        vx in -MAX_POWER..MAX_POWER,
        vy in -MAX_POWER..MAX_POWER,
    ) {
        let mut world = lone_body_world(ARENA_CENTER, Vec2::new(vx, vy), 10.0);
        let mut rng = Pcg32::seed_from_u64(0);

        let mut settled = false;
        for _ in 0..2_000 {
            if sim::tick(&mut world, &mut rng).moving_bodies == 0 {
                settled = true;
                break;
            }
        }
        prop_assert!(settled);
        prop_assert_eq!(world.bodies[0].vel, Vec2::ZERO);
    }
}
