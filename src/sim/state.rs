//! Game state and core simulation types
//!
//! Everything the frame loop reads or writes lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for Start
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused (desktop variant only)
    Paused,
}

/// Something that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShotFired,
    /// An enemy reached the player
    PlayerHit { pos: Vec2 },
    /// An enemy was shot down
    EnemyKilled { pos: Vec2 },
    WaveAdvanced { wave: u32 },
    /// Health ran out; the run is over
    GameOver { score: u64, wave: u32 },
}

/// The player's avatar
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Movement speed (pixels/frame)
    pub speed: f32,
    /// Facing angle (radians), toward the last pointer position
    pub angle: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            angle: 0.0,
        }
    }

    /// Keep the whole avatar inside the arena
    pub fn clamp_to(&mut self, width: f32, height: f32) {
        // Arenas smaller than the avatar collapse to the centre line
        let max_x = (width - self.radius).max(self.radius);
        let max_y = (height - self.radius).max(self.radius);
        self.pos.x = self.pos.x.clamp(self.radius, max_x);
        self.pos.y = self.pos.y.clamp(self.radius, max_y);
    }

    /// Turn to face a point
    pub fn aim_at(&mut self, target: Vec2) {
        self.angle = crate::angle_between(self.pos, target);
    }
}

/// A bullet travelling in a straight line
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub radius: f32,
    pub angle: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            radius: BULLET_RADIUS,
            angle,
        }
    }

    /// Move one frame along the travel angle
    pub fn advance(&mut self) {
        self.pos += crate::direction(self.angle) * BULLET_SPEED;
    }

    pub fn in_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.x >= 0.0 && self.pos.x <= width && self.pos.y >= 0.0 && self.pos.y <= height
    }
}

/// An enemy chasing the player
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    /// Hue in degrees, rendered at 70% saturation and 50% lightness
    pub hue: f32,
}

impl Enemy {
    pub fn color(&self) -> String {
        format!("hsl({:.0}, 70%, 50%)", self.hue)
    }
}

/// A short-lived decorative particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: &'static str,
    /// Frames left to live
    pub life: u32,
}

impl Particle {
    /// Opacity for rendering (1.0 fresh, fading to 0)
    pub fn alpha(&self) -> f32 {
        self.life as f32 / PARTICLE_LIFE as f32
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Balance numbers for this run
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Arena size (canvas pixels)
    pub width: f32,
    pub height: f32,
    /// Simulated time since the run started (ms)
    pub clock_ms: f64,
    /// Simulated time of the last shot (ms)
    pub last_shot_ms: Option<f64>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u64,
    pub health: i32,
    /// Current wave (1-based)
    pub wave: u32,
    /// Kills since the last wave-up
    pub kills: u32,
    /// Current enemy speed (pixels/frame)
    pub enemy_speed: f32,
    /// Current per-frame spawn probability
    pub spawn_rate: f32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    /// Events raised by the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state sitting at the menu
    pub fn new(seed: u64, width: f32, height: f32, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Menu,
            width,
            height,
            clock_ms: 0.0,
            last_shot_ms: None,
            time_ticks: 0,
            score: 0,
            health: PLAYER_START_HEALTH,
            wave: 1,
            kills: 0,
            enemy_speed: tuning.enemy_start_speed,
            spawn_rate: tuning.spawn_rate_start,
            player: Player::new(Vec2::new(width / 2.0, height / 2.0)),
            bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Begin a fresh run (keeps arena size, RNG stream and tuning)
    pub fn start(&mut self) {
        self.phase = GamePhase::Playing;
        self.clock_ms = 0.0;
        self.last_shot_ms = None;
        self.time_ticks = 0;
        self.score = 0;
        self.health = PLAYER_START_HEALTH;
        self.wave = 1;
        self.kills = 0;
        self.enemy_speed = self.tuning.enemy_start_speed;
        self.spawn_rate = self.tuning.spawn_rate_start;
        self.player = Player::new(self.center());
        self.bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.events.clear();
    }

    /// Arena was resized; the player is recentred
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.player.pos = self.center();
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
