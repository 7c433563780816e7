//! Lives pool and post-hit invincibility

use serde::{Deserialize, Serialize};

/// Result of taking a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    Damaged { remaining: u8 },
    /// No lives left; the run is over
    Defeated,
}

/// Lives bounded by `[0, max]` plus the invincibility countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lives {
    count: u8,
    max: u8,
    invincible_frames: u32,
}

impl Lives {
    pub fn new(starting: u8, max: u8) -> Self {
        Self {
            count: starting.min(max),
            max,
            invincible_frames: 0,
        }
    }

    #[inline]
    pub fn count(&self) -> u8 {
        self.count
    }

    #[inline]
    pub fn max(&self) -> u8 {
        self.max
    }

    #[inline]
    pub fn invincible_frames(&self) -> u32 {
        self.invincible_frames
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_frames > 0
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.count == 0
    }

    /// Count the invincibility window down by one frame.
    ///
    /// Returns true if the player was invincible for this frame.
    pub fn tick_invincibility(&mut self) -> bool {
        if self.invincible_frames == 0 {
            return false;
        }
        self.invincible_frames -= 1;
        true
    }

    /// Lose a life and start the invincibility window
    pub fn take_hit(&mut self, invincibility: u32) -> HitOutcome {
        self.count = self.count.saturating_sub(1);
        self.invincible_frames = invincibility;
        if self.count == 0 {
            HitOutcome::Defeated
        } else {
            HitOutcome::Damaged {
                remaining: self.count,
            }
        }
    }

    /// Gain a life unless already at the maximum
    pub fn restore(&mut self) -> bool {
        if self.count >= self.max {
            return false;
        }
        self.count += 1;
        true
    }
}
