//! Goblin Dash entry point
//!
//! The browser build starts from `web::start`. Natively there is no window;
//! the binary plays a headless demo run and logs how it went.
//!
//! Usage: `goblin-dash [seed] [character] [max_frames]`
//! Set `GOBLIN_DASH_TUNING` to a JSON file to override the balance.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use goblin_dash::assets::AssetTracker;
    use goblin_dash::sim::{Character, GameEvent, autopilot_input};
    use goblin_dash::{RunController, RunPhase, Tuning};

    env_logger::init();
    log::info!("Goblin Dash (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(42);
    let character: Character = args
        .next()
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(Character::Warrior);
    let max_frames: u64 = args
        .next()
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(60 * 60 * 5);

    let tuning = match std::env::var("GOBLIN_DASH_TUNING") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("Loaded tuning from {}", path);
            Tuning::from_json(&json)?
        }
        Err(_) => Tuning::default(),
    };

    // Nothing to load without a renderer
    let mut controller = RunController::with_assets(tuning, seed, AssetTracker::default());
    controller.start_run(Some(character))?;

    let mut hits = 0u32;
    let mut pickups = 0u32;
    while controller.phase() == RunPhase::Running {
        let Some(state) = controller.state() else {
            break;
        };
        if state.frame >= max_frames {
            log::info!("Frame limit reached");
            break;
        }
        let input = autopilot_input(state);
        for event in controller.step(&input) {
            match event {
                GameEvent::PlayerHit { lives_left, .. } => {
                    hits += 1;
                    log::debug!("Hit, {} lives left", lives_left);
                }
                GameEvent::ItemCollected { restored: true, .. } => pickups += 1,
                GameEvent::LevelUp { level, .. } => log::info!("Reached level {}", level),
                _ => {}
            }
        }
    }

    let hud = controller.hud();
    let frame = controller.state().map_or(0, |s| s.frame);
    log::info!(
        "Run over after {} frames ({:.1}s): score {}, level {}, {} hits, {} lives restored",
        frame,
        frame as f64 / f64::from(goblin_dash::consts::FRAMES_PER_SECOND),
        hud.score,
        hud.level,
        hits,
        pickups
    );
    println!("{}", hud.to_json());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
