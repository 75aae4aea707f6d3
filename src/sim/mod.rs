//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - One `tick` per display frame
//! - Seeded RNG only
//! - No rendering, DOM or storage dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, last_bullet_hit, point_in_circle, pursuit_step};
pub use spawn::{Edge, particle_burst, spawn_enemy};
pub use state::{Bullet, Enemy, GameEvent, GamePhase, GameState, Particle, Player};
pub use tick::{TickInput, tick};
