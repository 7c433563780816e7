//! Run lifecycle
//!
//! Owns the current [`GameState`] (if any) and walks it through
//! Idle -> Running -> GameOver -> Idle. Start requests that arrive before the
//! assets are in are remembered and fire on their own once loading completes.

use serde::{Deserialize, Serialize};

use crate::assets::{AssetId, AssetTracker, LoadProgress};
use crate::error::StartError;
use crate::render::{DrawList, HudSnapshot};
use crate::sim::{Character, GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Where the controller is in the run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// Character select; no run exists
    Idle,
    Running,
    Paused,
    /// Run ended; waiting for retry
    GameOver,
}

/// Result of an accepted start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The run is live
    Started,
    /// Assets are still loading; the run starts when they finish
    Deferred,
}

/// Drives runs from character select through game over
#[derive(Debug)]
pub struct RunController {
    tuning: Tuning,
    assets: AssetTracker,
    /// Base seed; each run derives its own from this and the run count
    seed: u64,
    runs: u64,
    selected: Option<Character>,
    start_pending: bool,
    game: Option<GameState>,
}

impl RunController {
    /// Controller expecting the full asset manifest
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_assets(tuning, seed, AssetTracker::new())
    }

    /// Controller gated on a caller-supplied tracker
    pub fn with_assets(tuning: Tuning, seed: u64, assets: AssetTracker) -> Self {
        Self {
            tuning,
            assets,
            seed,
            runs: 0,
            selected: None,
            start_pending: false,
            game: None,
        }
    }

    pub fn phase(&self) -> RunPhase {
        match self.game.as_ref().map(|g| g.phase) {
            None => RunPhase::Idle,
            Some(GamePhase::Playing) => RunPhase::Running,
            Some(GamePhase::Paused) => RunPhase::Paused,
            Some(GamePhase::GameOver) => RunPhase::GameOver,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase() == RunPhase::Running
    }

    /// A start request is waiting on assets
    #[inline]
    pub fn is_start_pending(&self) -> bool {
        self.start_pending
    }

    #[inline]
    pub fn selected(&self) -> Option<Character> {
        self.selected
    }

    #[inline]
    pub fn state(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    #[inline]
    pub fn assets(&self) -> &AssetTracker {
        &self.assets
    }

    /// Swap the balance used by the next run. The live run keeps its own.
    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.tuning = tuning;
    }

    /// Remember a character choice. Ignored outside character select.
    pub fn select_character(&mut self, character: Character) -> bool {
        if self.phase() != RunPhase::Idle {
            return false;
        }
        self.selected = Some(character);
        true
    }

    /// Begin a run with `character`, or with the remembered selection.
    pub fn start_run(&mut self, character: Option<Character>) -> Result<StartOutcome, StartError> {
        if self.game.is_some() {
            return Err(StartError::AlreadyRunning);
        }
        let character = character.or(self.selected).ok_or(StartError::NoCharacter)?;
        self.selected = Some(character);

        if !self.assets.is_ready() {
            self.start_pending = true;
            log::debug!(
                "Deferring start as {:?}: {}/{} assets loaded",
                character,
                self.assets.loaded(),
                self.assets.expected()
            );
            return Ok(StartOutcome::Deferred);
        }

        self.begin(character);
        Ok(StartOutcome::Started)
    }

    /// Start request by character id, as sent by the shell
    pub fn start_run_by_id(&mut self, id: &str) -> Result<StartOutcome, StartError> {
        let character = id.parse::<Character>()?;
        self.start_run(Some(character))
    }

    /// Report a finished asset load. Fires a deferred start on the last one.
    pub fn asset_loaded(&mut self, id: AssetId) -> LoadProgress {
        let progress = self.assets.mark_loaded(id);
        if progress == LoadProgress::Ready && self.start_pending {
            self.start_pending = false;
            if let Some(character) = self.selected {
                self.begin(character);
            }
        }
        progress
    }

    /// Throw the run away and go back to character select
    pub fn reset_run(&mut self) {
        if let Some(game) = self.game.take() {
            log::info!(
                "Run reset at frame {} (score {}, level {})",
                game.frame,
                game.score,
                game.level
            );
        }
        self.selected = None;
        self.start_pending = false;
    }

    /// Leave the game-over screen. No-op in any other phase.
    pub fn retry(&mut self) -> bool {
        if self.phase() != RunPhase::GameOver {
            return false;
        }
        self.reset_run();
        true
    }

    /// Running <-> Paused
    pub fn toggle_pause(&mut self) -> RunPhase {
        if let Some(game) = self.game.as_mut() {
            game.toggle_pause();
            log::debug!("Pause toggled: {:?}", game.phase);
        }
        self.phase()
    }

    /// Pause the live run. Returns false if nothing was running.
    pub fn pause(&mut self) -> bool {
        match self.game.as_mut() {
            Some(game) if game.phase == GamePhase::Playing => {
                game.phase = GamePhase::Paused;
                true
            }
            _ => false,
        }
    }

    /// Advance the live run by one frame and return what happened
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        match self.game.as_mut() {
            Some(game) if game.phase == GamePhase::Playing => {
                tick(game, input);
                game.drain_events()
            }
            _ => Vec::new(),
        }
    }

    /// HUD values for the current phase
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::capture(self.phase(), self.game.as_ref(), &self.tuning)
    }

    /// Sprites for the current frame. Empty outside a run.
    pub fn draw_list(&self, blink: bool) -> DrawList {
        self.game
            .as_ref()
            .map(|game| DrawList::build(game, blink))
            .unwrap_or_default()
    }

    fn begin(&mut self, character: Character) {
        let seed = self
            .seed
            .wrapping_add(self.runs.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.runs += 1;
        log::info!("Run {} started as {:?} (seed {})", self.runs, character, seed);
        self.game = Some(GameState::new(seed, character, self.tuning.clone()));
    }
}
