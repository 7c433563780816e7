//! Browser entry point
//!
//! JavaScript owns the canvas, image loading and key bindings. It drives one
//! [`WebGame`] from `requestAnimationFrame` and reads back the HUD and sprite
//! buffer each frame.

use wasm_bindgen::prelude::*;

use crate::assets::{AssetId, LoadProgress};
use crate::audio::AudioManager;
use crate::controller::{RunController, StartOutcome};
use crate::driver::{Action, FrameDriver};
use crate::render::SpriteInstance;
use crate::settings::Settings;
use crate::sim::{Character, autopilot_input};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Goblin Dash starting...");
}

/// One browser session: settings, sound and the run lifecycle
#[wasm_bindgen]
pub struct WebGame {
    controller: RunController,
    driver: FrameDriver,
    audio: AudioManager,
    settings: Settings,
    /// Demo mode: the autopilot supplies input
    demo: bool,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        let tuning = Tuning {
            control_scheme: settings.control_scheme,
            ..Tuning::default()
        };
        let seed = js_sys::Date::now() as u64;
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        WebGame {
            controller: RunController::new(tuning, seed),
            driver: FrameDriver::new(),
            audio,
            settings,
            demo: false,
        }
    }

    /// Replace the balance from a JSON file. Applies from the next run.
    #[wasm_bindgen(js_name = loadTuning)]
    pub fn load_tuning(&mut self, json: &str) -> Result<(), JsValue> {
        let mut tuning = Tuning::from_json(json).map_err(|e| {
            log::warn!("Rejected tuning: {}", e);
            JsValue::from_str(&e.to_string())
        })?;
        tuning.control_scheme = self.settings.control_scheme;
        self.controller.set_tuning(tuning);
        Ok(())
    }

    /// File names the shell must load, as a JSON array
    #[wasm_bindgen(js_name = assetManifest)]
    pub fn asset_manifest(&self) -> String {
        let names: Vec<String> = AssetId::all().iter().map(AssetId::file_name).collect();
        serde_json::to_string(&names).unwrap_or_default()
    }

    /// Report one finished image. Returns true once everything is in.
    #[wasm_bindgen(js_name = assetLoaded)]
    pub fn asset_loaded(&mut self, file_name: &str) -> bool {
        let Some(id) = AssetId::from_file_name(file_name) else {
            log::warn!("Unknown asset reported: {}", file_name);
            return self.controller.assets().is_ready();
        };
        let progress = self.controller.asset_loaded(id);
        if let LoadProgress::Pending { loaded, expected } = progress {
            log::debug!("Loaded {} ({}/{})", file_name, loaded, expected);
        }
        self.controller.assets().is_ready()
    }

    #[wasm_bindgen(js_name = selectCharacter)]
    pub fn select_character(&mut self, id: &str) -> bool {
        match id.parse::<Character>() {
            Ok(character) => self.controller.select_character(character),
            Err(e) => {
                log::debug!("Ignoring selection: {}", e);
                false
            }
        }
    }

    /// Returns "started", "deferred" or "rejected". Rejections are not errors.
    #[wasm_bindgen(js_name = startRun)]
    pub fn start_run(&mut self, id: Option<String>) -> String {
        self.audio.resume();
        let result = match id {
            Some(id) => self.controller.start_run_by_id(&id),
            None => self.controller.start_run(None),
        };
        match result {
            Ok(StartOutcome::Started) => {
                self.driver.reset_clock();
                "started".to_string()
            }
            Ok(StartOutcome::Deferred) => "deferred".to_string(),
            Err(e) => {
                log::debug!("Start ignored: {}", e);
                "rejected".to_string()
            }
        }
    }

    #[wasm_bindgen(js_name = resetRun)]
    pub fn reset_run(&mut self) {
        self.controller.reset_run();
        self.driver.reset_clock();
    }

    pub fn retry(&mut self) -> bool {
        self.controller.retry()
    }

    pub fn jump(&mut self) {
        self.audio.resume();
        self.driver.press(Action::Jump);
    }

    #[wasm_bindgen(js_name = fastFall)]
    pub fn fast_fall(&mut self) {
        self.driver.press(Action::FastFall);
    }

    pub fn attack(&mut self) {
        self.driver.press(Action::Attack);
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) {
        self.driver.press(Action::Pause);
    }

    /// Let the game play itself
    #[wasm_bindgen(js_name = toggleDemo)]
    pub fn toggle_demo(&mut self) -> bool {
        self.demo = !self.demo;
        log::info!("Demo mode: {}", self.demo);
        self.demo
    }

    /// Window lost focus
    #[wasm_bindgen(js_name = onBlur)]
    pub fn on_blur(&mut self) {
        if self.settings.pause_on_blur && self.controller.pause() {
            log::info!("Auto-paused (window blur)");
        }
    }

    /// Display callback. `time_ms` is the rAF timestamp.
    pub fn frame(&mut self, time_ms: f64) {
        if self.demo {
            if let Some(state) = self.controller.state() {
                let input = autopilot_input(state);
                if input.jump {
                    self.driver.press(Action::Jump);
                }
                if input.attack {
                    self.driver.press(Action::Attack);
                }
            }
        }
        let report = self.driver.frame(&mut self.controller, time_ms);
        self.audio.play_events(&report.events);
    }

    /// HUD as JSON
    pub fn hud(&self) -> String {
        self.controller.hud().to_json()
    }

    pub fn fps(&self) -> u32 {
        if self.settings.show_fps {
            self.driver.fps()
        } else {
            0
        }
    }

    /// Sprite instances for this frame, packed
    pub fn sprites(&self) -> Vec<u8> {
        self.controller
            .draw_list(self.settings.blink_enabled())
            .as_bytes()
            .to_vec()
    }

    /// Bytes per packed sprite
    #[wasm_bindgen(js_name = spriteStride)]
    pub fn sprite_stride() -> usize {
        std::mem::size_of::<SpriteInstance>()
    }

    /// Current settings as JSON
    pub fn settings(&self) -> String {
        self.settings.to_json().unwrap_or_default()
    }

    /// Replace settings from JSON and persist them
    #[wasm_bindgen(js_name = applySettings)]
    pub fn apply_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings =
            Settings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.audio.apply_settings(&settings);

        let mut tuning = self.controller.tuning().clone();
        tuning.control_scheme = settings.control_scheme;
        self.controller.set_tuning(tuning);

        settings.save();
        self.settings = settings;
        Ok(())
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
