//! Actors: the player and everything that scrolls past it
//!
//! Goblins, bosses and items share one shape of behavior (scroll left at a
//! constant speed, draw at their rectangle), so they are a single [`Mover`]
//! tagged by [`MoverKind`].

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::error::StartError;
use crate::tuning::Tuning;

/// Playable characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Character {
    Assassin,
    Cleric,
    Warrior,
    Mage,
    Idol,
}

impl Character {
    pub const ALL: [Character; 5] = [
        Character::Assassin,
        Character::Cleric,
        Character::Warrior,
        Character::Mage,
        Character::Idol,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Character::Assassin => "assassin",
            Character::Cleric => "cleric",
            Character::Warrior => "warrior",
            Character::Mage => "mage",
            Character::Idol => "idol",
        }
    }

    /// Shrink applied to each side of the sprite rectangle for hit tests
    pub fn hitbox_padding(&self) -> f32 {
        match self {
            Character::Assassin => ASSASSIN_HITBOX_PADDING,
            _ => HITBOX_PADDING,
        }
    }
}

impl FromStr for Character {
    type Err = StartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Character::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StartError::UnknownCharacter(s.to_string()))
    }
}

/// The auto-running player. Only moves vertically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub character: Character,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive is down)
    pub vel_y: f32,
    /// Remaining jumps before the next landing
    pub jump_charges: u8,
    pub grounded: bool,
}

impl Player {
    /// Spawn standing on the floor at the start column
    pub fn new(character: Character, tuning: &Tuning) -> Self {
        Self {
            character,
            pos: Vec2::new(tuning.player_start_x, tuning.player_floor_y()),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vel_y: 0.0,
            jump_charges: MAX_JUMP_CHARGES,
            grounded: false,
        }
    }

    /// Integrate gravity for one frame and clamp to the floor.
    ///
    /// Returns true on the frame the player lands. Jump charges are refilled
    /// only on that edge, not while standing.
    pub fn advance(&mut self, tuning: &Tuning) -> bool {
        let floor = tuning.player_floor_y();
        self.vel_y += tuning.gravity;
        self.pos.y += self.vel_y;

        if self.pos.y >= floor {
            self.pos.y = floor;
            self.vel_y = 0.0;
            let landed = !self.grounded;
            if landed {
                self.jump_charges = MAX_JUMP_CHARGES;
            }
            self.grounded = true;
            landed
        } else {
            self.grounded = false;
            false
        }
    }

    /// Spend a jump charge. No-op when none are left.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.jump_charges == 0 {
            return false;
        }
        self.jump_charges -= 1;
        self.vel_y = tuning.jump_impulse;
        true
    }

    /// Slam down. Only works while airborne.
    pub fn fast_fall(&mut self, tuning: &Tuning) -> bool {
        if self.grounded {
            return false;
        }
        self.vel_y = tuning.fast_fall_speed;
        true
    }

    /// Sprite rectangle
    pub fn rect(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Rectangle used for hazard and item tests
    pub fn hitbox(&self) -> Aabb {
        self.rect().shrink(self.character.hitbox_padding())
    }

    /// Blink while invincible. Purely visual.
    pub fn is_visible(&self, frame: u64, invincible: bool) -> bool {
        !(invincible && frame % BLINK_PERIOD < BLINK_HIDDEN)
    }
}

/// Hazard variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Goblin
    Minor,
    /// Boss
    Major,
}

impl HazardKind {
    pub fn size(&self) -> Vec2 {
        match self {
            HazardKind::Minor => Vec2::splat(MINOR_SIZE),
            HazardKind::Major => Vec2::splat(MAJOR_SIZE),
        }
    }
}

/// What a mover is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoverKind {
    Hazard(HazardKind),
    /// Restores one life when picked up
    Item,
}

impl MoverKind {
    pub fn size(&self) -> Vec2 {
        match self {
            MoverKind::Hazard(kind) => kind.size(),
            MoverKind::Item => Vec2::splat(ITEM_SIZE),
        }
    }
}

/// A hazard or item scrolling leftward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub id: u32,
    pub kind: MoverKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity (negative is left)
    pub vel_x: f32,
    /// Set once the mover has passed behind the player
    pub scored: bool,
}

impl Mover {
    pub fn new(id: u32, kind: MoverKind, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            size: kind.size(),
            vel_x: -speed,
            scored: false,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos.x += self.vel_x;
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Fully past the left edge of the field
    #[inline]
    pub fn is_off_field(&self) -> bool {
        self.right() <= 0.0
    }

    pub fn hazard_kind(&self) -> Option<HazardKind> {
        match self.kind {
            MoverKind::Hazard(kind) => Some(kind),
            MoverKind::Item => None,
        }
    }
}
