//! Score-driven level staircase
//!
//! Level `k` lasts until the score reaches `k * level_score_step`; each level
//! swaps the background. Levels only go up.

use super::state::{GameEvent, GameState};
use crate::consts::BACKGROUND_COUNT;

/// Score at which `level` ends
#[inline]
pub fn level_threshold(level: u32, step: u64) -> u64 {
    u64::from(level) * step
}

/// Background shown for a level (the last one repeats)
#[inline]
pub fn background_for_level(level: u32) -> u32 {
    level.clamp(1, BACKGROUND_COUNT) - 1
}

/// Raise the level by one if the score reached the current threshold.
///
/// At most one level per frame.
pub fn check_level_up(state: &mut GameState) -> Option<u32> {
    if state.score < level_threshold(state.level, state.tuning.level_score_step) {
        return None;
    }

    state.level += 1;
    let background = background_for_level(state.level);
    state.events.push(GameEvent::LevelUp {
        level: state.level,
        background,
    });
    log::info!(
        "Level {} reached at score {} (background {})",
        state.level,
        state.score,
        background
    );
    Some(state.level)
}
