//! Enemy spawning and particle bursts
//!
//! All randomness is drawn from the run's RNG so a seed replays exactly.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, Particle};
use crate::consts::*;

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Pick a spawn point just outside a random edge
pub fn spawn_point<R: Rng>(rng: &mut R, width: f32, height: f32) -> (Edge, Vec2) {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let along_x = rng.random::<f32>() * width;
    let along_y = rng.random::<f32>() * height;
    let pos = match edge {
        Edge::Top => Vec2::new(along_x, -ENEMY_SPAWN_MARGIN),
        Edge::Right => Vec2::new(width + ENEMY_SPAWN_MARGIN, along_y),
        Edge::Bottom => Vec2::new(along_x, height + ENEMY_SPAWN_MARGIN),
        Edge::Left => Vec2::new(-ENEMY_SPAWN_MARGIN, along_y),
    };
    (edge, pos)
}

/// Roll a new enemy outside the arena
pub fn spawn_enemy<R: Rng>(rng: &mut R, width: f32, height: f32) -> Enemy {
    let (edge, pos) = spawn_point(rng, width, height);
    let radius = rng.random_range(ENEMY_MIN_RADIUS..ENEMY_MAX_RADIUS);
    let hue = ENEMY_HUE_MIN + rng.random::<f32>() * ENEMY_HUE_SPAN;
    log::debug!("Enemy spawned at {:?} ({:?}), r={:.1}", pos, edge, radius);
    Enemy { pos, radius, hue }
}

/// Emit a burst of particles at a point
pub fn particle_burst<R: Rng>(
    rng: &mut R,
    particles: &mut Vec<Particle>,
    pos: Vec2,
    color: &'static str,
) {
    particles.reserve(PARTICLE_BURST);
    for _ in 0..PARTICLE_BURST {
        let vel = Vec2::new(
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
        );
        particles.push(Particle {
            pos,
            vel,
            radius: rng.random_range(PARTICLE_MIN_RADIUS..PARTICLE_MAX_RADIUS),
            color,
            life: PARTICLE_LIFE,
        });
    }
}
