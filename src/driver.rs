//! Fixed timestep frame driver
//!
//! The host calls [`FrameDriver::frame`] from its display callback with a
//! timestamp. The driver turns wall-clock time into whole simulation steps,
//! feeds queued input to the first of them, and keeps an FPS estimate.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::controller::RunController;
use crate::sim::{GameEvent, TickInput};

/// Longest frame gap honoured, in seconds. Longer stalls are cut short.
const MAX_FRAME_DT: f32 = 0.1;
/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Player actions, as bound by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    FastFall,
    Attack,
    Pause,
}

/// What one display frame did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Simulation steps run
    pub steps: u32,
    /// Events from all of those steps, in order
    pub events: Vec<GameEvent>,
}

/// Converts display callbacks into fixed simulation steps
#[derive(Debug)]
pub struct FrameDriver {
    accumulator: f32,
    last_time: Option<f64>,
    input: TickInput,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            last_time: None,
            input: TickInput::default(),
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Queue an action for the next simulation step
    pub fn press(&mut self, action: Action) {
        match action {
            Action::Jump => self.input.jump = true,
            Action::FastFall => self.input.fast_fall = true,
            Action::Attack => self.input.attack = true,
            Action::Pause => self.input.pause = true,
        }
    }

    /// Input waiting for the next step
    #[inline]
    pub fn pending(&self) -> &TickInput {
        &self.input
    }

    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Forget timing so the next frame starts fresh (after a tab switch, say)
    pub fn reset_clock(&mut self) {
        self.last_time = None;
        self.accumulator = 0.0;
    }

    /// Run the steps owed since the last call. `time_ms` is a monotonic timestamp.
    pub fn frame(&mut self, controller: &mut RunController, time_ms: f64) -> FrameReport {
        let dt = match self.last_time {
            Some(last) => (((time_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => SIM_DT,
        };
        self.last_time = Some(time_ms);
        self.track_fps(time_ms);

        // Pause must work while paused, so it bypasses the step loop
        if self.input.pause {
            self.input.pause = false;
            controller.toggle_pause();
        }

        let mut report = FrameReport::default();
        if !controller.is_running() {
            // Nothing buffers while the run is stopped
            self.accumulator = 0.0;
            self.input = TickInput::default();
            return report;
        }

        self.accumulator += dt;
        while self.accumulator >= SIM_DT && report.steps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.input);
            report.events.extend(controller.step(&input));
            self.accumulator -= SIM_DT;
            report.steps += 1;

            if !controller.is_running() {
                self.accumulator = 0.0;
                break;
            }
        }

        if report.steps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!(
                "Dropping {:.1} ms of simulation backlog",
                self.accumulator * 1000.0
            );
            self.accumulator = 0.0;
        }

        report
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample sits where the next write goes
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW as f64 - 1.0) * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetTracker;
    use crate::controller::RunPhase;
    use crate::sim::Character;
    use crate::tuning::Tuning;

    fn running() -> RunController {
        let mut controller =
            RunController::with_assets(Tuning::default(), 11, AssetTracker::default());
        controller
            .start_run(Some(Character::Warrior))
            .expect("start");
        controller
    }

    fn frame_of(controller: &RunController) -> u64 {
        controller.state().map_or(0, |s| s.frame)
    }

    #[test]
    fn test_first_frame_runs_one_step() {
        let mut controller = running();
        let mut driver = FrameDriver::new();
        let report = driver.frame(&mut controller, 5000.0);
        assert_eq!(report.steps, 1);
        assert_eq!(frame_of(&controller), 1);
    }

    #[test]
    fn test_steady_frames_step_once_each() {
        let mut controller = running();
        let mut driver = FrameDriver::new();
        let mut time = 1000.0;
        driver.frame(&mut controller, time);
        for _ in 0..30 {
            // A hair over one step per frame
            time += 17.0;
            driver.frame(&mut controller, time);
        }
        let frames = frame_of(&controller);
        assert!((31..=32).contains(&frames), "ran {frames} steps");
    }

    #[test]
    fn test_stall_is_capped() {
        let mut controller = running();
        let mut driver = FrameDriver::new();
        driver.frame(&mut controller, 0.0);
        let report = driver.frame(&mut controller, 3000.0);
        assert_eq!(report.steps, MAX_SUBSTEPS);

        // The backlog is gone; the next normal frame runs a single step
        let report = driver.frame(&mut controller, 3017.0);
        assert_eq!(report.steps, 1);
    }

    #[test]
    fn test_input_consumed_by_one_step() {
        let mut controller = running();
        let mut driver = FrameDriver::new();
        driver.frame(&mut controller, 0.0);

        driver.press(Action::Jump);
        let report = driver.frame(&mut controller, 50.0);
        assert!(report.steps > 1);
        let jumps = report
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Jumped { .. }))
            .count();
        assert_eq!(jumps, 1);
        assert!(driver.pending().is_empty());
    }

    #[test]
    fn test_pause_stops_steps() {
        let mut controller = running();
        let mut driver = FrameDriver::new();
        driver.frame(&mut controller, 0.0);

        driver.press(Action::Pause);
        let report = driver.frame(&mut controller, 17.0);
        assert_eq!(report.steps, 0);
        assert_eq!(controller.phase(), RunPhase::Paused);

        driver.press(Action::Jump);
        driver.frame(&mut controller, 34.0);
        assert!(driver.pending().is_empty());
        assert_eq!(frame_of(&controller), 1);

        driver.press(Action::Pause);
        let report = driver.frame(&mut controller, 51.0);
        assert_eq!(controller.phase(), RunPhase::Running);
        assert_eq!(report.steps, 1);
    }

    #[test]
    fn test_idle_controller_runs_nothing() {
        let mut controller =
            RunController::with_assets(Tuning::default(), 1, AssetTracker::default());
        let mut driver = FrameDriver::new();
        driver.press(Action::Jump);
        let report = driver.frame(&mut controller, 0.0);
        assert_eq!(report, FrameReport::default());
        assert!(driver.pending().is_empty());
    }

    #[test]
    fn test_fps_estimate() {
        let mut controller = running();
        let mut driver = FrameDriver::new();
        let mut time = 10_000.0;
        for _ in 0..(FPS_WINDOW * 2) {
            time += 1000.0 / 60.0;
            driver.frame(&mut controller, time);
        }
        assert_eq!(driver.fps(), 60);
    }
}
