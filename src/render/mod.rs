//! Presentation output
//!
//! The core never draws. Each frame it hands the shell a [`DrawList`] of
//! sprite instances and a [`HudSnapshot`]; the shell owns images and pixels.

pub mod sprite;

pub use sprite::{DrawList, SpriteInstance};

use serde::Serialize;

use crate::controller::RunPhase;
use crate::sim::GameState;
use crate::tuning::Tuning;

/// HUD values, serialized for the shell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub phase: RunPhase,
    pub lives: u8,
    pub max_lives: u8,
    pub score: u64,
    pub level: u32,
    pub background: u32,
    pub invincible: bool,
    pub game_over: bool,
}

impl HudSnapshot {
    /// Read the HUD off the run, or show defaults when none is live
    pub fn capture(phase: RunPhase, state: Option<&GameState>, tuning: &Tuning) -> Self {
        match state {
            Some(state) => Self {
                phase,
                lives: state.lives.count(),
                max_lives: state.lives.max(),
                score: state.score,
                level: state.level,
                background: state.background(),
                invincible: state.lives.is_invincible(),
                game_over: state.is_over(),
            },
            None => Self {
                phase,
                lives: tuning.starting_lives,
                max_lives: tuning.max_lives,
                score: 0,
                level: 1,
                background: 0,
                invincible: false,
                game_over: false,
            },
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
