//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per call
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod lives;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{Aabb, HitCheck};
pub use entity::{Character, HazardKind, Mover, MoverKind, Player};
pub use lives::{HitOutcome, Lives};
pub use spawn::SpawnPattern;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
