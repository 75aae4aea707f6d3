//! Data-driven game balance
//!
//! Two variants of the game ship: a touch-first mobile build with slower
//! enemies and no pause, and a desktop build that is a bit harder and can be
//! paused.

use serde::{Deserialize, Serialize};

/// Game variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    #[default]
    Mobile,
    Desktop,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Mobile => "Mobile",
            Variant::Desktop => "Desktop",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mobile" | "touch" => Some(Variant::Mobile),
            "desktop" | "classic" => Some(Variant::Desktop),
            _ => None,
        }
    }
}

/// Balance numbers for a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Enemy speed at wave 1 (pixels/frame)
    pub enemy_start_speed: f32,
    /// Enemy speed added on every wave-up
    pub enemy_speed_step: f32,
    /// Per-frame enemy spawn probability at wave 1
    pub spawn_rate_start: f32,
    /// Spawn probability added on every wave-up
    pub spawn_rate_step: f32,
    /// Whether the pause toggle is honoured
    pub allow_pause: bool,
}

impl Tuning {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Mobile => Self {
                enemy_start_speed: 1.0,
                enemy_speed_step: 0.15,
                spawn_rate_start: 0.02,
                spawn_rate_step: 0.005,
                allow_pause: false,
            },
            Variant::Desktop => Self {
                enemy_start_speed: 1.5,
                enemy_speed_step: 0.2,
                spawn_rate_start: 0.02,
                spawn_rate_step: 0.005,
                allow_pause: true,
            },
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}
