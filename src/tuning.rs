//! Data-driven game balance
//!
//! `Tuning::default()` mirrors [`crate::consts`]. A JSON file may override any
//! subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Which secondary action the player has besides jumping.
///
/// Fast-fall and attack never coexist in one ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlScheme {
    #[default]
    FastFall,
    Attack,
}

/// Cumulative upper bounds of the spawn pattern table, in draw order.
///
/// A roll below `pair_high` spawns a raised pair, below `pair_staggered` a
/// staggered pair, and so on; anything at or above `single_major` falls back
/// to a single goblin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternWeights {
    pub pair_high: f32,
    pub pair_staggered: f32,
    pub pair_ground: f32,
    pub single_major: f32,
}

impl Default for PatternWeights {
    fn default() -> Self {
        Self {
            pair_high: 0.10,
            pair_staggered: 0.25,
            pair_ground: 0.45,
            single_major: 0.60,
        }
    }
}

impl PatternWeights {
    fn thresholds(&self) -> [f32; 4] {
        [
            self.pair_high,
            self.pair_staggered,
            self.pair_ground,
            self.single_major,
        ]
    }
}

/// Balance knobs for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub control_scheme: ControlScheme,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_start_x: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub fast_fall_speed: f32,

    // === Lives ===
    pub starting_lives: u8,
    pub max_lives: u8,
    pub invincibility_frames: u32,

    // === Movers ===
    pub scroll_speed: f32,

    // === Spawning ===
    pub hazard_spawn_interval: u64,
    pub hazard_cap: usize,
    pub pair_gap: f32,
    pub raised_offset: f32,
    pub patterns: PatternWeights,
    pub item_spawn_interval: u64,
    pub item_warmup_frames: u64,
    pub item_spawn_chance: f32,
    pub item_min_lift: f32,
    pub item_max_lift: f32,

    // === Progression ===
    pub level_score_step: u64,

    // === Attack ===
    pub attack_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            control_scheme: ControlScheme::FastFall,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_start_x: PLAYER_START_X,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            fast_fall_speed: FAST_FALL_SPEED,

            starting_lives: STARTING_LIVES,
            max_lives: MAX_LIVES,
            invincibility_frames: INVINCIBILITY_FRAMES,

            scroll_speed: SCROLL_SPEED,

            hazard_spawn_interval: HAZARD_SPAWN_INTERVAL,
            hazard_cap: HAZARD_CAP,
            pair_gap: PAIR_GAP,
            raised_offset: RAISED_OFFSET,
            patterns: PatternWeights::default(),
            item_spawn_interval: ITEM_SPAWN_INTERVAL,
            item_warmup_frames: ITEM_WARMUP_FRAMES,
            item_spawn_chance: ITEM_SPAWN_CHANCE,
            item_min_lift: ITEM_MIN_LIFT,
            item_max_lift: ITEM_MAX_LIFT,

            level_score_step: LEVEL_SCORE_STEP,

            attack_radius: ATTACK_RADIUS,
        }
    }
}

impl Tuning {
    /// Tuning for the attack ruleset (no fast-fall)
    pub fn with_attack() -> Self {
        Self {
            control_scheme: ControlScheme::Attack,
            ..Self::default()
        }
    }

    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(ConfigError::invalid("field", "dimensions must be positive"));
        }
        if self.player_height >= self.field_height {
            return Err(ConfigError::invalid(
                "player_height",
                "player must fit inside the field",
            ));
        }
        if self.max_lives == 0 {
            return Err(ConfigError::invalid("max_lives", "must be at least 1"));
        }
        if self.starting_lives == 0 || self.starting_lives > self.max_lives {
            return Err(ConfigError::invalid(
                "starting_lives",
                "must be between 1 and max_lives",
            ));
        }
        if self.scroll_speed <= 0.0 {
            return Err(ConfigError::invalid("scroll_speed", "must be positive"));
        }
        if self.hazard_spawn_interval == 0 {
            return Err(ConfigError::invalid("hazard_spawn_interval", "must be non-zero"));
        }
        if self.item_spawn_interval == 0 {
            return Err(ConfigError::invalid("item_spawn_interval", "must be non-zero"));
        }
        if self.level_score_step == 0 {
            return Err(ConfigError::invalid("level_score_step", "must be non-zero"));
        }
        if !(0.0..=1.0).contains(&self.item_spawn_chance) {
            return Err(ConfigError::invalid("item_spawn_chance", "must be within 0..=1"));
        }
        if self.item_min_lift > self.item_max_lift {
            return Err(ConfigError::invalid(
                "item_min_lift",
                "must not exceed item_max_lift",
            ));
        }
        let thresholds = self.patterns.thresholds();
        let ascending = thresholds.windows(2).all(|w| w[0] <= w[1]);
        let in_range = thresholds.iter().all(|t| (0.0..=1.0).contains(t));
        if !ascending || !in_range {
            return Err(ConfigError::invalid(
                "patterns",
                "thresholds must ascend within 0..=1",
            ));
        }
        Ok(())
    }

    /// Resting y of the player's top edge
    #[inline]
    pub fn player_floor_y(&self) -> f32 {
        self.field_height - self.player_height
    }
}
