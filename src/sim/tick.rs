//! Per-frame simulation tick
//!
//! Core game loop that advances the arena by one display frame.

use glam::Vec2;
use rand::Rng;

use super::collision::{circles_overlap, last_bullet_hit, pursuit_step};
use super::spawn::{particle_burst, spawn_enemy};
use super::state::{Bullet, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input intent for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Direction keys / virtual buttons
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire held (space, shoot button) or clicked this frame
    pub fire: bool,
    /// Latest mouse position (arena coordinates)
    pub pointer: Option<Vec2>,
    /// Active touch point (arena coordinates)
    pub touch: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Movement direction from the direction keys, with diagonals scaled
    /// so each axis moves at 1/√2
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if dir.x != 0.0 && dir.y != 0.0 {
            dir *= std::f32::consts::FRAC_1_SQRT_2;
        }
        dir
    }
}

/// Advance the game state by one frame
///
/// `dt_ms` is the wall time since the previous frame. It only drives the fire
/// cooldown, movement is per frame.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    state.events.clear();

    // Handle pause toggle
    if input.pause && state.tuning.allow_pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            GamePhase::Menu => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.clock_ms += dt_ms.max(0.0);

    move_player(state, input);

    // Face the latest pointer/touch position
    if let Some(target) = input.touch.or(input.pointer) {
        state.player.aim_at(target);
    }

    // Touches on the right-hand side of the arena fire
    let touch_fire = input
        .touch
        .is_some_and(|t| t.x >= state.width * TOUCH_MOVE_REGION);
    if input.fire || touch_fire {
        try_fire(state);
    }

    // Bullets
    let (width, height) = (state.width, state.height);
    for bullet in &mut state.bullets {
        bullet.advance();
    }
    state.bullets.retain(|b| b.in_bounds(width, height));

    // Spawn
    if state.rng.random::<f32>() < state.spawn_rate {
        let enemy = spawn_enemy(&mut state.rng, width, height);
        state.enemies.push(enemy);
    }

    update_enemies(state);

    // Particles
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);

    // Wave progression (at most once per tick)
    if state.kills >= state.wave * KILLS_PER_WAVE {
        state.wave += 1;
        state.enemy_speed += state.tuning.enemy_speed_step;
        state.spawn_rate += state.tuning.spawn_rate_step;
        state.kills = 0;
        state.events.push(GameEvent::WaveAdvanced { wave: state.wave });
        log::info!(
            "Wave {} (enemy speed {:.2}, spawn rate {:.3})",
            state.wave,
            state.enemy_speed,
            state.spawn_rate
        );
    }

    if state.health <= 0 {
        state.phase = GamePhase::Menu;
        state.events.push(GameEvent::GameOver {
            score: state.score,
            wave: state.wave,
        });
        log::info!("Game over: score {} at wave {}", state.score, state.wave);
    }
}

/// Keys first, then touch steering, then clamp to the arena
fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    player.pos += input.direction() * player.speed;

    if let Some(touch) = input.touch {
        if touch.x < state.width * TOUCH_MOVE_REGION {
            let dist = player.pos.distance(touch);
            if dist > TOUCH_DEAD_ZONE {
                let speed = (dist * TOUCH_FOLLOW_GAIN).min(player.speed);
                player.pos += pursuit_step(player.pos, touch, speed);
            }
        }
    }

    player.clamp_to(state.width, state.height);
}

/// Spawn a bullet unless the cooldown is still running
fn try_fire(state: &mut GameState) {
    let ready = state
        .last_shot_ms
        .is_none_or(|last| state.clock_ms - last >= FIRE_COOLDOWN_MS);
    if !ready {
        return;
    }

    state
        .bullets
        .push(Bullet::new(state.player.pos, state.player.angle));
    state.last_shot_ms = Some(state.clock_ms);
    state.events.push(GameEvent::ShotFired);
}

/// Steer enemies and resolve their collisions, keeping the survivors
///
/// Player contact is checked before bullets, so an enemy touching the player
/// always deals damage even if a bullet is on it in the same frame.
fn update_enemies(state: &mut GameState) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    let enemies = std::mem::take(&mut state.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());

    for mut enemy in enemies {
        let before = enemy.pos;
        enemy.pos += pursuit_step(before, player_pos, state.enemy_speed);

        if circles_overlap(before, enemy.radius, player_pos, player_radius) {
            state.health -= CONTACT_DAMAGE;
            particle_burst(&mut state.rng, &mut state.particles, enemy.pos, COLOR_PINK);
            state.events.push(GameEvent::PlayerHit { pos: enemy.pos });
            continue;
        }

        if let Some(index) = last_bullet_hit(&state.bullets, enemy.pos, enemy.radius) {
            // Keep list order for the enemies still to be checked
            state.bullets.remove(index);
            state.score += KILL_SCORE;
            state.kills += 1;
            particle_burst(&mut state.rng, &mut state.particles, enemy.pos, COLOR_CYAN);
            state.events.push(GameEvent::EnemyKilled { pos: enemy.pos });
            continue;
        }

        survivors.push(enemy);
    }

    state.enemies = survivors;
}
