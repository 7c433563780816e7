//! Sprite instances for the presentation shell

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::assets::AssetId;
use crate::sim::{GameState, Mover, MoverKind};

/// Draw layers, back to front
pub mod layer {
    pub const BACKGROUND: u32 = 0;
    pub const ITEM: u32 = 1;
    pub const HAZARD: u32 = 2;
    pub const PLAYER: u32 = 3;
}

/// One textured quad, laid out for direct upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left corner in field pixels
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// Atlas slot, see [`AssetId::atlas_index`]
    pub sprite: u32,
    pub layer: u32,
}

impl SpriteInstance {
    pub fn new(asset: AssetId, pos: Vec2, size: Vec2, layer: u32) -> Self {
        Self {
            position: pos.to_array(),
            size: size.to_array(),
            sprite: asset.atlas_index(),
            layer,
        }
    }

    fn from_mover(mover: &Mover) -> Self {
        let (asset, layer) = match mover.kind {
            MoverKind::Hazard(kind) => (AssetId::Hazard(kind), layer::HAZARD),
            MoverKind::Item => (AssetId::Item, layer::ITEM),
        };
        Self::new(asset, mover.pos, mover.size, layer)
    }
}

/// Everything to draw this frame, back to front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub sprites: Vec<SpriteInstance>,
}

impl DrawList {
    /// Build from the run. With `blink` off the player stays drawn while invincible.
    pub fn build(state: &GameState, blink: bool) -> Self {
        let mut sprites = Vec::with_capacity(2 + state.hazards.len() + state.items.len());
        let field = Vec2::new(state.tuning.field_width, state.tuning.field_height);

        sprites.push(SpriteInstance::new(
            AssetId::Background(state.background()),
            Vec2::ZERO,
            field,
            layer::BACKGROUND,
        ));
        sprites.extend(state.items.iter().map(SpriteInstance::from_mover));
        sprites.extend(state.hazards.iter().map(SpriteInstance::from_mover));

        if !blink || state.player_visible() {
            let player = &state.player;
            sprites.push(SpriteInstance::new(
                AssetId::Character(player.character),
                player.pos,
                player.size,
                layer::PLAYER,
            ));
        }

        Self { sprites }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Raw instance bytes for a GPU buffer or a JS typed array
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Character, HazardKind};
    use crate::tuning::Tuning;

    fn state_with_movers() -> GameState {
        let mut state = GameState::new(3, Character::Cleric, Tuning::default());
        let speed = state.tuning.scroll_speed;
        let id = state.next_entity_id();
        state.hazards.push(Mover::new(
            id,
            MoverKind::Hazard(HazardKind::Major),
            Vec2::new(900.0, 570.0),
            speed,
        ));
        let id = state.next_entity_id();
        state
            .items
            .push(Mover::new(id, MoverKind::Item, Vec2::new(700.0, 500.0), speed));
        state
    }

    #[test]
    fn test_layer_order() {
        let list = DrawList::build(&state_with_movers(), true);
        let layers: Vec<u32> = list.sprites.iter().map(|s| s.layer).collect();
        assert_eq!(
            layers,
            vec![layer::BACKGROUND, layer::ITEM, layer::HAZARD, layer::PLAYER]
        );
        assert_eq!(
            list.sprites[2].sprite,
            AssetId::Hazard(HazardKind::Major).atlas_index()
        );
        assert_eq!(list.sprites[2].position, [900.0, 570.0]);
    }

    #[test]
    fn test_player_hidden_while_blinking() {
        let has_player = |list: &DrawList| list.sprites.iter().any(|s| s.layer == layer::PLAYER);
        let mut state = state_with_movers();
        state.lives.take_hit(state.tuning.invincibility_frames);
        state.frame = 20;
        let blinking = DrawList::build(&state, true);
        assert!(!has_player(&blinking));

        // Reduced motion keeps the sprite on screen
        let steady = DrawList::build(&state, false);
        assert!(has_player(&steady));

        state.frame = 25;
        let shown = DrawList::build(&state, true);
        assert!(has_player(&shown));
    }

    #[test]
    fn test_background_follows_level() {
        let mut state = state_with_movers();
        state.level = 3;
        let list = DrawList::build(&state, true);
        assert_eq!(list.sprites[0].sprite, AssetId::Background(2).atlas_index());
        assert_eq!(
            list.sprites[0].size,
            [state.tuning.field_width, state.tuning.field_height]
        );
    }

    #[test]
    fn test_bytes_cover_every_instance() {
        let list = DrawList::build(&state_with_movers(), true);
        assert_eq!(
            list.as_bytes().len(),
            list.len() * std::mem::size_of::<SpriteInstance>()
        );
    }
}
