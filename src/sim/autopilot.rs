//! Demo mode: the game plays itself
//!
//! Reads the state the same way a player would and produces the next
//! frame's input. Good enough to clear single hazards; dense patterns still
//! catch it out.

use super::entity::HazardKind;
use super::state::GameState;
use super::tick::TickInput;
use crate::tuning::ControlScheme;

/// Gap (hazard left edge to player hitbox right edge) at which to leave the ground
const GOBLIN_TRIGGER: f32 = 45.0;
const BOSS_TRIGGER: f32 = 75.0;
/// Second jump over a boss fires once the climb slows to this speed
const DOUBLE_JUMP_VEL: f32 = -7.0;
/// Fraction of the attack radius the demo waits for before swinging
const ATTACK_REACH: f32 = 0.75;

/// Input the demo player would give this frame
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    let player = &state.player;
    let hitbox = player.hitbox();
    // Hitbox top while standing; anything lower than this can hit us
    let standing_top = state.tuning.player_floor_y() + (hitbox.min.y - player.pos.y);

    let threat = state
        .hazards
        .iter()
        .filter(|h| h.right() > hitbox.min.x && h.rect().max.y > standing_top)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));
    let Some(threat) = threat else {
        return input;
    };
    let kind = threat.hazard_kind().unwrap_or(HazardKind::Minor);

    if player.grounded {
        let trigger = match kind {
            HazardKind::Minor => GOBLIN_TRIGGER,
            HazardKind::Major => BOSS_TRIGGER,
        };
        let gap = threat.pos.x - hitbox.max.x;
        input.jump = (0.0..=trigger).contains(&gap);
    } else if kind == HazardKind::Major
        && player.jump_charges == 1
        && (DOUBLE_JUMP_VEL..0.0).contains(&player.vel_y)
    {
        input.jump = true;
    }

    if state.tuning.control_scheme == ControlScheme::Attack {
        let reach = state.tuning.attack_radius * ATTACK_REACH;
        input.attack = threat.rect().center().distance(hitbox.center()) <= reach;
    }

    input
}
