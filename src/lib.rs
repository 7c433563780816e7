//! Goblin Dash - A side-scrolling auto-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `controller`: Run lifecycle (idle, running, game over, retry)
//! - `driver`: Fixed timestep frame driver for host loops
//! - `assets`: Aggregate asset readiness gate
//! - `render`: Draw list and HUD snapshot for the presentation shell
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `audio`: Sound effects (Web Audio playback on wasm32)
//! - `web`: Browser entry point (wasm32 only)

pub mod assets;
pub mod audio;
pub mod controller;
pub mod driver;
pub mod error;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::{RunController, RunPhase, StartOutcome};
pub use error::{ConfigError, StartError};
pub use settings::Settings;
pub use tuning::{ControlScheme, Tuning};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one step per rendered frame at 60 Hz)
    pub const FRAMES_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / FRAMES_PER_SECOND as f32;
    /// Maximum substeps per display refresh to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    pub const PLAYER_START_X: f32 = 100.0;
    /// Gravity added to vertical velocity every frame (pixels/frame²)
    pub const GRAVITY: f32 = 0.6;
    /// Upward impulse applied by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// Downward velocity forced by a fast-fall
    pub const FAST_FALL_SPEED: f32 = 20.0;
    /// Jump charges restored on landing (double jump)
    pub const MAX_JUMP_CHARGES: u8 = 2;

    /// Lives
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;
    /// Invincibility after a hit (2 seconds at 60 fps)
    pub const INVINCIBILITY_FRAMES: u32 = 120;
    /// Blink cycle while invincible: hidden for the first half of each period
    pub const BLINK_PERIOD: u64 = 10;
    pub const BLINK_HIDDEN: u64 = 5;

    /// Movers scroll left at a constant speed (pixels/frame)
    pub const SCROLL_SPEED: f32 = 5.0;
    /// Goblin (minor hazard) size
    pub const MINOR_SIZE: f32 = 90.0;
    /// Boss (major hazard) size
    pub const MAJOR_SIZE: f32 = 150.0;
    /// Item size
    pub const ITEM_SIZE: f32 = 50.0;

    /// Hazard spawning
    pub const HAZARD_SPAWN_INTERVAL: u64 = 100;
    pub const HAZARD_CAP: usize = 5;
    /// Horizontal gap between the two hazards of a pair
    pub const PAIR_GAP: f32 = 250.0;
    /// Height a raised hazard floats above the floor
    pub const RAISED_OFFSET: f32 = 120.0;

    /// Item spawning
    pub const ITEM_SPAWN_INTERVAL: u64 = 600;
    pub const ITEM_WARMUP_FRAMES: u64 = 1200;
    pub const ITEM_SPAWN_CHANCE: f32 = 0.5;
    /// Items float between these heights above the floor
    pub const ITEM_MIN_LIFT: f32 = 60.0;
    pub const ITEM_MAX_LIFT: f32 = 260.0;

    /// Score needed per level
    pub const LEVEL_SCORE_STEP: u64 = 10;
    /// Number of level backgrounds (the last one repeats)
    pub const BACKGROUND_COUNT: u32 = 4;

    /// Attack clears hazards whose centre is within this distance of the player
    pub const ATTACK_RADIUS: f32 = 200.0;

    /// Hitbox shrink applied to each side of the player rectangle
    pub const HITBOX_PADDING: f32 = 10.0;
    /// The assassin slips through tighter gaps
    pub const ASSASSIN_HITBOX_PADDING: f32 = 22.0;
}
