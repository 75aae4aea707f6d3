//! FPS Arena - A top-down arena shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (movement, shooting, enemies, collisions, waves)
//! - `tuning`: Data-driven game balance per variant
//! - `session`: Ties a running game to the leaderboard
//! - `renderer`: Scene building and Canvas 2D drawing
//! - `platform`: Browser input mapping
//! - `persistence`: Key-value storage backends

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::Leaderboard;
pub use session::Session;
pub use settings::Settings;
pub use tuning::{Tuning, Variant};

use glam::Vec2;

/// Game configuration constants
///
/// Distances are in canvas pixels and speeds in pixels per frame.
pub mod consts {
    /// Nominal frame time used when the host has no previous timestamp (ms)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_START_HEALTH: i32 = 100;

    /// Touch steering: only the left part of the arena steers
    pub const TOUCH_MOVE_REGION: f32 = 0.7;
    /// Touch steering ignores points this close to the player
    pub const TOUCH_DEAD_ZONE: f32 = 5.0;
    /// Touch steering speed as a fraction of the distance to the touch point
    pub const TOUCH_FOLLOW_GAIN: f32 = 0.1;

    /// Bullets
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 8.0;
    /// Minimum time between two shots (ms)
    pub const FIRE_COOLDOWN_MS: f64 = 150.0;

    /// Enemies spawn this far outside the arena edge
    pub const ENEMY_SPAWN_MARGIN: f32 = 20.0;
    pub const ENEMY_MIN_RADIUS: f32 = 15.0;
    pub const ENEMY_MAX_RADIUS: f32 = 25.0;
    /// Enemy hue band (degrees)
    pub const ENEMY_HUE_MIN: f32 = 300.0;
    pub const ENEMY_HUE_SPAN: f32 = 60.0;

    /// Damage taken per enemy contact
    pub const CONTACT_DAMAGE: i32 = 2;
    /// Score per enemy shot down
    pub const KILL_SCORE: u64 = 10;
    /// Kills needed to clear a wave, multiplied by the wave number
    pub const KILLS_PER_WAVE: u32 = 10;

    /// Particles
    pub const PARTICLE_BURST: usize = 10;
    pub const PARTICLE_LIFE: u32 = 30;
    /// Max speed per axis
    pub const PARTICLE_MAX_SPEED: f32 = 2.0;
    pub const PARTICLE_MIN_RADIUS: f32 = 2.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 6.0;

    /// Colors
    pub const COLOR_CYAN: &str = "#00d4ff";
    pub const COLOR_PINK: &str = "#ff006e";
}

/// Unit vector for an angle (radians)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle (radians) of the vector from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
