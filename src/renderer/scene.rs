//! Scene building: game state to a flat list of 2D draw commands
//!
//! Kept free of any canvas types so the layout can be tested natively.

use glam::Vec2;

use crate::consts::{COLOR_CYAN, PARTICLE_LIFE};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Background grid spacing (pixels)
pub const GRID_SIZE: f32 = 40.0;
const GRID_COLOR: &str = "rgba(0, 212, 255, 0.1)";
const BACKGROUND: &str = "#000";
/// Facing indicator sticks out this far past the player's edge
const AIM_LENGTH: f32 = 10.0;
const ENEMY_GLOW: f32 = 15.0;
const PLAYER_GLOW: f32 = 20.0;

/// A single 2D drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear { color: String },
    Line {
        from: Vec2,
        to: Vec2,
        color: String,
        width: f32,
    },
    /// Filled circle; `glow` is a shadow blur radius (0 = none)
    Circle {
        center: Vec2,
        radius: f32,
        color: String,
        alpha: f32,
        glow: f32,
    },
    /// Centered text
    Text {
        pos: Vec2,
        text: String,
        font: String,
        color: String,
    },
}

impl DrawCommand {
    fn circle(center: Vec2, radius: f32, color: impl Into<String>) -> Self {
        DrawCommand::Circle {
            center,
            radius,
            color: color.into(),
            alpha: 1.0,
            glow: 0.0,
        }
    }
}

/// Build the draw list for one frame
pub fn build(state: &GameState, settings: &Settings) -> Vec<DrawCommand> {
    let mut commands = vec![DrawCommand::Clear {
        color: BACKGROUND.to_string(),
    }];

    if state.phase == GamePhase::Menu {
        menu(state, &mut commands);
        return commands;
    }

    grid(state.width, state.height, &mut commands);

    if settings.particles {
        for p in &state.particles {
            commands.push(DrawCommand::Circle {
                center: p.pos,
                radius: p.radius,
                color: p.color.to_string(),
                alpha: p.life as f32 / PARTICLE_LIFE as f32,
                glow: 0.0,
            });
        }
    }

    for bullet in &state.bullets {
        commands.push(DrawCommand::circle(bullet.pos, bullet.radius, COLOR_CYAN));
    }

    for enemy in &state.enemies {
        commands.push(DrawCommand::Circle {
            center: enemy.pos,
            radius: enemy.radius,
            color: enemy.color(),
            alpha: 1.0,
            glow: ENEMY_GLOW,
        });
    }

    let player = &state.player;
    let tip = player.pos + crate::direction(player.angle) * (player.radius + AIM_LENGTH);
    commands.push(DrawCommand::Line {
        from: player.pos,
        to: tip,
        color: COLOR_CYAN.to_string(),
        width: 3.0,
    });
    commands.push(DrawCommand::Circle {
        center: player.pos,
        radius: player.radius,
        color: COLOR_CYAN.to_string(),
        alpha: 1.0,
        glow: PLAYER_GLOW,
    });

    if state.phase == GamePhase::Paused {
        commands.push(DrawCommand::Text {
            pos: state.center(),
            text: "Paused".to_string(),
            font: "bold 32px sans-serif".to_string(),
            color: "#ffffff".to_string(),
        });
    }

    commands
}

fn grid(width: f32, height: f32, commands: &mut Vec<DrawCommand>) {
    let mut x = 0.0;
    while x < width {
        commands.push(DrawCommand::Line {
            from: Vec2::new(x, 0.0),
            to: Vec2::new(x, height),
            color: GRID_COLOR.to_string(),
            width: 1.0,
        });
        x += GRID_SIZE;
    }
    let mut y = 0.0;
    while y < height {
        commands.push(DrawCommand::Line {
            from: Vec2::new(0.0, y),
            to: Vec2::new(width, y),
            color: GRID_COLOR.to_string(),
            width: 1.0,
        });
        y += GRID_SIZE;
    }
}

fn menu(state: &GameState, commands: &mut Vec<DrawCommand>) {
    let center = state.center();
    commands.push(DrawCommand::Text {
        pos: center - Vec2::new(0.0, 40.0),
        text: "FPS Arena".to_string(),
        font: "bold 32px sans-serif".to_string(),
        color: COLOR_CYAN.to_string(),
    });
    commands.push(DrawCommand::Text {
        pos: center + Vec2::new(0.0, 20.0),
        text: "Click Start to begin!".to_string(),
        font: "18px sans-serif".to_string(),
        color: "#ffffff".to_string(),
    });
}
