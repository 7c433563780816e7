//! Collision detection and response
//!
//! Everything is an axis-aligned rectangle. Detection is a plain overlap
//! test; response decides what an overlap means for the run.

use glam::Vec2;

use super::entity::Mover;
use super::lives::HitOutcome;
use super::state::{GameEvent, GameState};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink every side by `pad`, never past the centre
    pub fn shrink(&self, pad: f32) -> Self {
        let pad = Vec2::splat(pad).min(self.size() * 0.5);
        Self {
            min: self.min + pad,
            max: self.max - pad,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Index of the first mover (in iteration order) overlapping `hitbox`
pub fn first_overlap(hitbox: &Aabb, movers: &[Mover]) -> Option<usize> {
    movers.iter().position(|m| hitbox.overlaps(&m.rect()))
}

/// What the hazard check did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitCheck {
    /// Invincible: timer ticked down, nothing tested
    Immune,
    /// Tested, nothing touched
    Clear,
    /// One hazard hit and removed
    Hit { hazard_id: u32, outcome: HitOutcome },
}

/// Test the player against live hazards and apply at most one hit.
///
/// While the invincibility timer runs, it is decremented and no hazard is
/// tested. The first overlapping hazard costs a life, grants invincibility
/// and is removed. A `Defeated` outcome leaves the phase alone: the caller
/// finishes the frame and then ends the run.
pub fn resolve_hazard_hits(state: &mut GameState) -> HitCheck {
    if state.lives.tick_invincibility() {
        return HitCheck::Immune;
    }

    let hitbox = state.player.hitbox();
    let Some(index) = first_overlap(&hitbox, &state.hazards) else {
        return HitCheck::Clear;
    };

    let hazard = state.hazards.remove(index);
    let outcome = state.lives.take_hit(state.tuning.invincibility_frames);
    state.events.push(GameEvent::PlayerHit {
        hazard_id: hazard.id,
        lives_left: state.lives.count(),
    });
    log::debug!(
        "Frame {}: hit by {:?} #{}, {} lives left",
        state.frame,
        hazard.kind,
        hazard.id,
        state.lives.count()
    );

    HitCheck::Hit {
        hazard_id: hazard.id,
        outcome,
    }
}

/// Collect every item the player touches. Invincibility does not matter.
///
/// An item is consumed even when lives are already full. Nothing is restored
/// once the last life is gone.
pub fn resolve_item_pickups(state: &mut GameState) -> usize {
    let hitbox = state.player.hitbox();
    let before = state.items.len();

    state.items.retain(|item| {
        if !hitbox.overlaps(&item.rect()) {
            return true;
        }
        let restored = !state.lives.is_depleted() && state.lives.restore();
        state.events.push(GameEvent::ItemCollected {
            item_id: item.id,
            restored,
        });
        false
    });

    before - state.items.len()
}

/// Clear every hazard whose centre lies within the attack radius of the player.
///
/// Cleared hazards are gone before the pass-through check, so they never score.
pub fn resolve_attack(state: &mut GameState) -> usize {
    let origin = state.player.rect().center();
    let radius_sq = state.tuning.attack_radius * state.tuning.attack_radius;
    let before = state.hazards.len();

    state
        .hazards
        .retain(|h| h.rect().center().distance_squared(origin) > radius_sq);

    let cleared = before - state.hazards.len();
    state.events.push(GameEvent::Attacked { cleared });
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Character, HazardKind, MoverKind};
    use crate::sim::lives::Lives;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        let mut state = GameState::new(7, Character::Warrior, Tuning::default());
        state.player.advance(&state.tuning);
        state
    }

    fn goblin_on_player(state: &mut GameState) -> u32 {
        let id = state.next_entity_id();
        let pos = state.player.pos;
        state
            .hazards
            .push(Mover::new(id, MoverKind::Hazard(HazardKind::Minor), pos, 5.0));
        id
    }

    fn item_on_player(state: &mut GameState) -> u32 {
        let id = state.next_entity_id();
        let pos = state.player.pos;
        state.items.push(Mover::new(id, MoverKind::Item, pos, 5.0));
        id
    }

    #[test]
    fn test_overlap_strict() {
        let a = Aabb::from_pos_size(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Aabb::from_pos_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let inside = Aabb::from_pos_size(Vec2::new(9.0, 9.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_shrink_clamps_at_center() {
        let a = Aabb::from_pos_size(Vec2::ZERO, Vec2::splat(10.0)).shrink(50.0);
        assert_eq!(a.size(), Vec2::ZERO);
        assert_eq!(a.center(), Vec2::splat(5.0));
    }

    #[test]
    fn test_hit_costs_life_and_grants_invincibility() {
        let mut state = state();
        assert_eq!(state.lives.count(), 3);
        let id = goblin_on_player(&mut state);

        let check = resolve_hazard_hits(&mut state);
        assert_eq!(
            check,
            HitCheck::Hit {
                hazard_id: id,
                outcome: HitOutcome::Damaged { remaining: 2 }
            }
        );
        assert_eq!(state.lives.count(), 2);
        assert_eq!(state.lives.invincible_frames(), state.tuning.invincibility_frames);
        assert!(state.hazards.is_empty());
    }

    #[test]
    fn test_one_hit_per_frame() {
        let mut state = state();
        let first = goblin_on_player(&mut state);
        let second = goblin_on_player(&mut state);

        let check = resolve_hazard_hits(&mut state);
        assert!(matches!(check, HitCheck::Hit { hazard_id, .. } if hazard_id == first));
        assert_eq!(state.hazards.len(), 1);
        assert_eq!(state.hazards[0].id, second);
        assert_eq!(state.lives.count(), 2);
    }

    #[test]
    fn test_invincible_skips_detection() {
        let mut state = state();
        goblin_on_player(&mut state);
        resolve_hazard_hits(&mut state);
        goblin_on_player(&mut state);

        assert_eq!(resolve_hazard_hits(&mut state), HitCheck::Immune);
        assert_eq!(state.lives.count(), 2);
        assert_eq!(state.hazards.len(), 1);
        assert_eq!(
            state.lives.invincible_frames(),
            state.tuning.invincibility_frames - 1
        );
    }

    #[test]
    fn test_last_life_reports_defeat() {
        let mut state = state();
        for _ in 0..2 {
            goblin_on_player(&mut state);
            resolve_hazard_hits(&mut state);
            while state.lives.is_invincible() {
                state.lives.tick_invincibility();
            }
        }
        assert_eq!(state.lives.count(), 1);

        goblin_on_player(&mut state);
        let check = resolve_hazard_hits(&mut state);
        assert!(matches!(
            check,
            HitCheck::Hit {
                outcome: HitOutcome::Defeated,
                ..
            }
        ));
        assert_eq!(state.lives.count(), 0);
        assert!(state.lives.is_depleted());
    }

    #[test]
    fn test_no_restore_after_last_life() {
        let mut state = state();
        state.lives = Lives::new(1, 5);
        goblin_on_player(&mut state);
        resolve_hazard_hits(&mut state);
        assert!(state.lives.is_depleted());

        item_on_player(&mut state);
        assert_eq!(resolve_item_pickups(&mut state), 1);
        assert_eq!(state.lives.count(), 0);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::ItemCollected {
                restored: false,
                ..
            }
        )));
    }

    #[test]
    fn test_pickup_at_max_consumes_item() {
        let mut state = state();
        while state.lives.restore() {}
        let max = state.lives.max();
        item_on_player(&mut state);

        assert_eq!(resolve_item_pickups(&mut state), 1);
        assert!(state.items.is_empty());
        assert_eq!(state.lives.count(), max);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::ItemCollected {
                restored: false,
                ..
            }
        )));
    }

    #[test]
    fn test_pickup_ignores_invincibility() {
        let mut state = state();
        goblin_on_player(&mut state);
        resolve_hazard_hits(&mut state);
        assert!(state.lives.is_invincible());

        item_on_player(&mut state);
        assert_eq!(resolve_item_pickups(&mut state), 1);
        assert_eq!(state.lives.count(), 3);
    }

    #[test]
    fn test_attack_clears_nearby_only() {
        let mut state = state();
        goblin_on_player(&mut state);
        let far_id = state.next_entity_id();
        state.hazards.push(Mover::new(
            far_id,
            MoverKind::Hazard(HazardKind::Major),
            Vec2::new(900.0, 570.0),
            5.0,
        ));

        assert_eq!(resolve_attack(&mut state), 1);
        assert_eq!(state.hazards.len(), 1);
        assert_eq!(state.hazards[0].id, far_id);
    }
}
