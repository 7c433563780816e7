//! Fixed timestep simulation tick
//!
//! One call advances the run by exactly one frame. The host decides when to
//! call it; nothing here reschedules itself.

use super::collision::{resolve_attack, resolve_hazard_hits, resolve_item_pickups};
use super::entity::Mover;
use super::progression::check_level_up;
use super::spawn::run_spawner;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::ControlScheme;

/// Input commands for a single tick (edge-triggered, consumed by one frame)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump (space)
    pub jump: bool,
    /// Fast-fall; ignored under the attack scheme
    pub fast_fall: bool,
    /// Area attack; ignored under the fast-fall scheme
    pub attack: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.pause {
        state.toggle_pause();
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    state.frame += 1;

    run_spawner(state);
    advance_movers(&mut state.hazards);
    advance_movers(&mut state.items);

    apply_player_input(state, input);
    state.player.advance(&state.tuning);

    if input.attack && state.tuning.control_scheme == ControlScheme::Attack {
        resolve_attack(state);
    }

    resolve_hazard_hits(state);
    resolve_item_pickups(state);
    award_pass_through(state);
    check_level_up(state);

    // Game over lands after the frame has scored
    if state.lives.is_depleted() {
        state.end_run();
    }
}

/// Scroll movers one frame and drop the ones that left the field
pub fn advance_movers(movers: &mut Vec<Mover>) {
    for mover in movers.iter_mut() {
        mover.advance();
    }
    movers.retain(|m| !m.is_off_field());
}

fn apply_player_input(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    if input.jump {
        let double = !player.grounded;
        if player.jump(tuning) {
            state.events.push(GameEvent::Jumped { double });
        }
    }

    if input.fast_fall
        && tuning.control_scheme == ControlScheme::FastFall
        && player.fast_fall(tuning)
    {
        state.events.push(GameEvent::FastFell);
    }
}

/// Score every hazard whose trailing edge just passed behind the player.
///
/// Each hazard scores once, whether or not it was dodged cleanly.
pub fn award_pass_through(state: &mut GameState) -> u64 {
    let leading_edge = state.player.pos.x;
    let mut awarded = 0;

    for hazard in state.hazards.iter_mut() {
        if hazard.scored || hazard.right() >= leading_edge {
            continue;
        }
        hazard.scored = true;
        state.score += 1;
        awarded += 1;
        state.events.push(GameEvent::HazardPassed {
            hazard_id: hazard.id,
            score: state.score,
        });
    }

    awarded
}
