//! Run state and core simulation types
//!
//! Everything one run mutates lives in [`GameState`]; dropping it discards the run.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Character, HazardKind, Mover, Player};
use super::lives::Lives;
use super::progression::background_for_level;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Something that happened during a frame, for sounds, effects and the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Jumped { double: bool },
    FastFell,
    Attacked { cleared: usize },
    HazardSpawned { hazard_id: u32, kind: HazardKind },
    ItemSpawned { item_id: u32 },
    PlayerHit { hazard_id: u32, lives_left: u8 },
    ItemCollected { item_id: u32, restored: bool },
    HazardPassed { hazard_id: u32, score: u64 },
    LevelUp { level: u32, background: u32 },
    GameOver { score: u64, level: u32 },
}

/// Complete state of one run (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawner random source
    pub(crate) rng: Pcg32,
    /// Balance in force for this run
    pub tuning: Tuning,
    /// Simulation frame counter
    pub frame: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Current level (starts at 1)
    pub level: u32,
    pub lives: Lives,
    pub player: Player,
    /// Live hazards, in spawn order
    pub hazards: Vec<Mover>,
    /// Live items, in spawn order
    pub items: Vec<Mover>,
    /// Events raised by the most recent frame
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Start a fresh run: player on the floor at the start column, nothing spawned
    pub fn new(seed: u64, character: Character, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(character, &tuning),
            lives: Lives::new(tuning.starting_lives, tuning.max_lives),
            tuning,
            frame: 0,
            phase: GamePhase::Playing,
            score: 0,
            level: 1,
            hazards: Vec::new(),
            items: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Flip between playing and paused. No effect once the run is over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// Close the run: switch to game over and report the final tally
    pub fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            score: self.score,
            level: self.level,
        });
        log::info!(
            "Game over at frame {} (score {}, level {})",
            self.frame,
            self.score,
            self.level
        );
    }

    /// Background index for the current level
    pub fn background(&self) -> u32 {
        background_for_level(self.level)
    }

    /// Whether the player sprite is drawn this frame
    pub fn player_visible(&self) -> bool {
        self.player
            .is_visible(self.frame, self.lives.is_invincible())
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run() {
        let tuning = Tuning::default();
        let state = GameState::new(42, Character::Cleric, tuning.clone());
        assert_eq!(state.frame, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives.count(), tuning.starting_lives);
        assert_eq!(state.player.pos.x, tuning.player_start_x);
        assert_eq!(state.player.pos.y, tuning.player_floor_y());
        assert!(state.hazards.is_empty());
        assert!(state.items.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = GameState::new(42, Character::Cleric, Tuning::default());
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Playing);

        state.phase = GamePhase::GameOver;
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_ids_increase() {
        let mut state = GameState::new(42, Character::Cleric, Tuning::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }
}
