//! Asset readiness gate
//!
//! The shell loads sprites and sounds asynchronously and reports each one as
//! it completes. The tracker folds those reports into one "ready" signal
//! that fires exactly once, so nothing has to poll.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::consts::BACKGROUND_COUNT;
use crate::sim::{Character, HazardKind};

/// Every asset a run can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AssetId {
    Character(Character),
    Hazard(HazardKind),
    Item,
    Background(u32),
}

impl AssetId {
    /// File name the shell loads for this asset
    pub fn file_name(&self) -> String {
        match self {
            AssetId::Character(c) => format!("{}.png", c.as_str()),
            AssetId::Hazard(HazardKind::Minor) => "goblin.png".to_string(),
            AssetId::Hazard(HazardKind::Major) => "boss.png".to_string(),
            AssetId::Item => "heart.png".to_string(),
            AssetId::Background(i) => format!("background{}.png", i + 1),
        }
    }

    /// Slot in the sprite atlas, in the same order as [`AssetId::all`]
    pub fn atlas_index(&self) -> u32 {
        let characters = Character::ALL.len() as u32;
        match self {
            AssetId::Character(c) => Character::ALL
                .iter()
                .position(|other| other == c)
                .map_or(0, |i| i as u32),
            AssetId::Hazard(HazardKind::Minor) => characters,
            AssetId::Hazard(HazardKind::Major) => characters + 1,
            AssetId::Item => characters + 2,
            AssetId::Background(i) => characters + 3 + i,
        }
    }

    /// Look up an asset by the file name the shell loaded
    pub fn from_file_name(name: &str) -> Option<AssetId> {
        AssetId::all().into_iter().find(|id| id.file_name() == name)
    }

    /// Every asset the game expects before a run may start
    pub fn all() -> Vec<AssetId> {
        let mut ids: Vec<AssetId> = Character::ALL.into_iter().map(AssetId::Character).collect();
        ids.push(AssetId::Hazard(HazardKind::Minor));
        ids.push(AssetId::Hazard(HazardKind::Major));
        ids.push(AssetId::Item);
        ids.extend((0..BACKGROUND_COUNT).map(AssetId::Background));
        ids
    }
}

/// Result of reporting a load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadProgress {
    /// Still waiting on others
    Pending { loaded: usize, expected: usize },
    /// This report completed the set
    Ready,
    /// Already counted, unknown, or the set was already complete
    Ignored,
}

/// Aggregates per-asset completion into one readiness signal
#[derive(Debug, Clone, Default)]
pub struct AssetTracker {
    expected: BTreeSet<AssetId>,
    loaded: BTreeSet<AssetId>,
}

impl AssetTracker {
    /// Tracker expecting every game asset
    pub fn new() -> Self {
        let mut tracker = Self::default();
        for id in AssetId::all() {
            tracker.register(id);
        }
        tracker
    }

    /// Expect one more asset. Registering twice is harmless.
    pub fn register(&mut self, id: AssetId) {
        self.expected.insert(id);
    }

    /// Report an asset as loaded
    pub fn mark_loaded(&mut self, id: AssetId) -> LoadProgress {
        if self.is_ready() || !self.expected.contains(&id) || !self.loaded.insert(id) {
            log::debug!("Ignoring load report for {:?}", id);
            return LoadProgress::Ignored;
        }

        if self.is_ready() {
            log::info!("All {} assets loaded", self.expected.len());
            LoadProgress::Ready
        } else {
            LoadProgress::Pending {
                loaded: self.loaded.len(),
                expected: self.expected.len(),
            }
        }
    }

    #[inline]
    pub fn loaded(&self) -> usize {
        self.loaded.len()
    }

    #[inline]
    pub fn expected(&self) -> usize {
        self.expected.len()
    }

    /// True once every registered asset has reported in
    pub fn is_ready(&self) -> bool {
        self.loaded.len() >= self.expected.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_fires_once() {
        let mut tracker = AssetTracker::default();
        tracker.register(AssetId::Item);
        tracker.register(AssetId::Hazard(HazardKind::Minor));
        assert!(!tracker.is_ready());

        assert_eq!(
            tracker.mark_loaded(AssetId::Item),
            LoadProgress::Pending {
                loaded: 1,
                expected: 2
            }
        );
        assert_eq!(tracker.mark_loaded(AssetId::Item), LoadProgress::Ignored);
        assert_eq!(
            tracker.mark_loaded(AssetId::Hazard(HazardKind::Minor)),
            LoadProgress::Ready
        );
        assert!(tracker.is_ready());
        assert_eq!(
            tracker.mark_loaded(AssetId::Hazard(HazardKind::Major)),
            LoadProgress::Ignored
        );
    }

    #[test]
    fn test_unknown_asset_ignored() {
        let mut tracker = AssetTracker::default();
        tracker.register(AssetId::Item);
        assert_eq!(
            tracker.mark_loaded(AssetId::Background(0)),
            LoadProgress::Ignored
        );
        assert_eq!(tracker.loaded(), 0);
    }

    #[test]
    fn test_full_manifest() {
        let mut tracker = AssetTracker::new();
        let all = AssetId::all();
        assert_eq!(tracker.expected(), all.len());
        for (i, id) in all.iter().enumerate() {
            let progress = tracker.mark_loaded(*id);
            if i + 1 == all.len() {
                assert_eq!(progress, LoadProgress::Ready);
            } else {
                assert!(matches!(progress, LoadProgress::Pending { .. }));
            }
        }
    }

    #[test]
    fn test_atlas_order_matches_manifest() {
        for (i, id) in AssetId::all().iter().enumerate() {
            assert_eq!(id.atlas_index(), i as u32);
        }
    }

    #[test]
    fn test_lookup_by_file_name() {
        assert_eq!(
            AssetId::from_file_name("boss.png"),
            Some(AssetId::Hazard(HazardKind::Major))
        );
        assert_eq!(
            AssetId::from_file_name("background4.png"),
            Some(AssetId::Background(3))
        );
        assert_eq!(AssetId::from_file_name("dragon.png"), None);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(AssetId::Character(Character::Mage).file_name(), "mage.png");
        assert_eq!(AssetId::Hazard(HazardKind::Minor).file_name(), "goblin.png");
        assert_eq!(AssetId::Background(0).file_name(), "background1.png");
    }
}
