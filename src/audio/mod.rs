//! Sound effects
//!
//! Which sound goes with which game event. Playback itself is Web Audio
//! and only exists on wasm32.

#[cfg(target_arch = "wasm32")]
mod web_audio;

#[cfg(target_arch = "wasm32")]
pub use web_audio::AudioManager;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Leaving the ground
    Jump,
    /// Mid-air jump
    DoubleJump,
    FastFall,
    /// Area attack swing
    Attack,
    /// Player took damage
    Hit,
    /// Item collected
    Pickup,
    LevelUp,
    GameOver,
}

impl SoundEffect {
    /// Sound for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped { double: false } => Some(SoundEffect::Jump),
            GameEvent::Jumped { double: true } => Some(SoundEffect::DoubleJump),
            GameEvent::FastFell => Some(SoundEffect::FastFall),
            GameEvent::Attacked { .. } => Some(SoundEffect::Attack),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::Hit),
            GameEvent::ItemCollected { .. } => Some(SoundEffect::Pickup),
            GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::HazardSpawned { .. }
            | GameEvent::ItemSpawned { .. }
            | GameEvent::HazardPassed { .. } => None,
        }
    }
}
