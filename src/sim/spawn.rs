//! Procedural hazard and item spawning
//!
//! Hazards come in fixed patterns picked by one uniform roll against
//! ascending cumulative thresholds. Pattern selection is a pure function of
//! the roll, so a given random source always yields the same sequence.

use glam::Vec2;
use rand::Rng;

use super::entity::{HazardKind, Mover, MoverKind};
use super::state::{GameEvent, GameState};
use crate::tuning::{PatternWeights, Tuning};

/// Hazard patterns, in threshold order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPattern {
    /// Two raised goblins
    PairHigh,
    /// A goblin on the floor followed by a raised one
    PairStaggered,
    /// Two goblins on the floor
    PairGround,
    /// One boss
    SingleMajor,
    /// One goblin
    SingleMinor,
}

/// Where one hazard of a pattern goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub kind: HazardKind,
    /// Pair gaps behind the right edge
    pub gaps: u8,
    /// Float above the floor instead of standing on it
    pub raised: bool,
}

const fn slot(kind: HazardKind, gaps: u8, raised: bool) -> Slot {
    Slot { kind, gaps, raised }
}

const PAIR_HIGH: &[Slot] = &[
    slot(HazardKind::Minor, 0, true),
    slot(HazardKind::Minor, 1, true),
];
const PAIR_STAGGERED: &[Slot] = &[
    slot(HazardKind::Minor, 0, false),
    slot(HazardKind::Minor, 1, true),
];
const PAIR_GROUND: &[Slot] = &[
    slot(HazardKind::Minor, 0, false),
    slot(HazardKind::Minor, 1, false),
];
const SINGLE_MAJOR: &[Slot] = &[slot(HazardKind::Major, 0, false)];
const SINGLE_MINOR: &[Slot] = &[slot(HazardKind::Minor, 0, false)];

impl SpawnPattern {
    /// Pick a pattern for a roll in `[0, 1)`
    pub fn from_roll(roll: f32, weights: &PatternWeights) -> Self {
        if roll < weights.pair_high {
            SpawnPattern::PairHigh
        } else if roll < weights.pair_staggered {
            SpawnPattern::PairStaggered
        } else if roll < weights.pair_ground {
            SpawnPattern::PairGround
        } else if roll < weights.single_major {
            SpawnPattern::SingleMajor
        } else {
            SpawnPattern::SingleMinor
        }
    }

    /// Hazards of this pattern, lead first
    pub fn slots(&self) -> &'static [Slot] {
        match self {
            SpawnPattern::PairHigh => PAIR_HIGH,
            SpawnPattern::PairStaggered => PAIR_STAGGERED,
            SpawnPattern::PairGround => PAIR_GROUND,
            SpawnPattern::SingleMajor => SINGLE_MAJOR,
            SpawnPattern::SingleMinor => SINGLE_MINOR,
        }
    }
}

impl Slot {
    /// Top-left spawn position
    pub fn position(&self, tuning: &Tuning) -> Vec2 {
        let size = self.kind.size();
        let x = tuning.field_width + f32::from(self.gaps) * tuning.pair_gap;
        let mut y = tuning.field_height - size.y;
        if self.raised {
            y -= tuning.raised_offset;
        }
        Vec2::new(x, y)
    }
}

/// Whether hazards may be considered on this frame
#[inline]
pub fn is_hazard_frame(frame: u64, tuning: &Tuning) -> bool {
    frame % tuning.hazard_spawn_interval == 0
}

/// Whether an item may be considered on this frame
#[inline]
pub fn is_item_frame(frame: u64, tuning: &Tuning) -> bool {
    frame >= tuning.item_warmup_frames && frame % tuning.item_spawn_interval == 0
}

/// Hazard placements for this frame, trimmed to the room under the cap
pub fn plan_hazards<R: Rng + ?Sized>(
    frame: u64,
    live: usize,
    tuning: &Tuning,
    rng: &mut R,
) -> Vec<(HazardKind, Vec2)> {
    if !is_hazard_frame(frame, tuning) {
        return Vec::new();
    }
    let room = tuning.hazard_cap.saturating_sub(live);
    if room == 0 {
        return Vec::new();
    }

    let roll: f32 = rng.random();
    let pattern = SpawnPattern::from_roll(roll, &tuning.patterns);
    log::trace!("Frame {}: roll {:.3} -> {:?}", frame, roll, pattern);

    pattern
        .slots()
        .iter()
        .take(room)
        .map(|slot| (slot.kind, slot.position(tuning)))
        .collect()
}

/// Item placement for this frame, if the chance roll succeeds
pub fn plan_item<R: Rng + ?Sized>(frame: u64, tuning: &Tuning, rng: &mut R) -> Option<Vec2> {
    if !is_item_frame(frame, tuning) {
        return None;
    }
    if rng.random::<f32>() >= tuning.item_spawn_chance {
        return None;
    }

    let size = MoverKind::Item.size();
    let lift = if tuning.item_max_lift > tuning.item_min_lift {
        rng.random_range(tuning.item_min_lift..tuning.item_max_lift)
    } else {
        tuning.item_min_lift
    };
    Some(Vec2::new(
        tuning.field_width,
        tuning.field_height - size.y - lift,
    ))
}

/// Run the spawner for the current frame
pub fn run_spawner(state: &mut GameState) {
    let hazards = plan_hazards(
        state.frame,
        state.hazards.len(),
        &state.tuning,
        &mut state.rng,
    );
    for (kind, pos) in hazards {
        let id = state.next_entity_id();
        let speed = state.tuning.scroll_speed;
        state
            .hazards
            .push(Mover::new(id, MoverKind::Hazard(kind), pos, speed));
        state.events.push(GameEvent::HazardSpawned {
            hazard_id: id,
            kind,
        });
        log::debug!("Frame {}: spawned {:?} #{} at {}", state.frame, kind, id, pos);
    }

    if let Some(pos) = plan_item(state.frame, &state.tuning, &mut state.rng) {
        let id = state.next_entity_id();
        let speed = state.tuning.scroll_speed;
        state.items.push(Mover::new(id, MoverKind::Item, pos, speed));
        state.events.push(GameEvent::ItemSpawned { item_id: id });
        log::debug!("Frame {}: spawned item #{} at {}", state.frame, id, pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_roll_boundaries() {
        let w = PatternWeights::default();
        assert_eq!(SpawnPattern::from_roll(0.0, &w), SpawnPattern::PairHigh);
        assert_eq!(SpawnPattern::from_roll(0.099, &w), SpawnPattern::PairHigh);
        assert_eq!(SpawnPattern::from_roll(0.10, &w), SpawnPattern::PairStaggered);
        assert_eq!(SpawnPattern::from_roll(0.25, &w), SpawnPattern::PairGround);
        assert_eq!(SpawnPattern::from_roll(0.45, &w), SpawnPattern::SingleMajor);
        assert_eq!(SpawnPattern::from_roll(0.60, &w), SpawnPattern::SingleMinor);
        assert_eq!(SpawnPattern::from_roll(0.999, &w), SpawnPattern::SingleMinor);
    }

    #[test]
    fn test_distribution_matches_weights() {
        let w = PatternWeights::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let draws = 20_000;
        let mut counts = [0u32; 5];
        for _ in 0..draws {
            let idx = match SpawnPattern::from_roll(rng.random(), &w) {
                SpawnPattern::PairHigh => 0,
                SpawnPattern::PairStaggered => 1,
                SpawnPattern::PairGround => 2,
                SpawnPattern::SingleMajor => 3,
                SpawnPattern::SingleMinor => 4,
            };
            counts[idx] += 1;
        }
        let expected = [0.10, 0.15, 0.20, 0.15, 0.40];
        for (count, p) in counts.iter().zip(expected) {
            let observed = *count as f32 / draws as f32;
            assert!((observed - p).abs() < 0.02, "observed {observed}, expected {p}");
        }
    }

    #[test]
    fn test_same_source_same_plan() {
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(5);
        let mut b = Pcg32::seed_from_u64(5);
        for frame in (100..5000).step_by(100) {
            assert_eq!(
                plan_hazards(frame, 0, &tuning, &mut a),
                plan_hazards(frame, 0, &tuning, &mut b)
            );
        }
    }

    #[test]
    fn test_off_cadence_frames_spawn_nothing() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(plan_hazards(99, 0, &tuning, &mut rng).is_empty());
        assert!(plan_hazards(101, 0, &tuning, &mut rng).is_empty());
        assert!(!plan_hazards(100, 0, &tuning, &mut rng).is_empty());
    }

    #[test]
    fn test_cap_trims_pairs() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for frame in (100..20_000).step_by(100) {
            let cap = tuning.hazard_cap;
            assert!(plan_hazards(frame, cap, &tuning, &mut rng).is_empty());
            assert!(plan_hazards(frame, cap - 1, &tuning, &mut rng).len() <= 1);
        }
    }

    #[test]
    fn test_pair_layout() {
        let tuning = Tuning::default();
        let slots = SpawnPattern::PairStaggered.slots();
        let lead = slots[0].position(&tuning);
        let trail = slots[1].position(&tuning);
        assert_eq!(lead.x, tuning.field_width);
        assert_eq!(trail.x, tuning.field_width + tuning.pair_gap);
        assert_eq!(lead.y, tuning.field_height - HazardKind::Minor.size().y);
        assert_eq!(trail.y, lead.y - tuning.raised_offset);
    }

    #[test]
    fn test_no_items_before_warmup() {
        let tuning = Tuning {
            item_spawn_chance: 1.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(9);
        for frame in 0..tuning.item_warmup_frames {
            assert!(plan_item(frame, &tuning, &mut rng).is_none());
        }
        let pos = plan_item(tuning.item_warmup_frames, &tuning, &mut rng).expect("item");
        let floor = tuning.field_height - MoverKind::Item.size().y;
        assert!(pos.y <= floor - tuning.item_min_lift);
        assert!(pos.y > floor - tuning.item_max_lift);
    }
}
