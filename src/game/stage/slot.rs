// A character's visual presence on stage

use super::identity::CharacterIdentity;
use crate::engine::assets::SpriteHandle;
use crate::engine::host::{Layer, VisualId};
use glam::{Vec2, Vec4};

/// Horizontal flip applied to mirrored characters
pub const MIRRORED_SCALE: Vec2 = Vec2::new(-1.0, 1.0);

/// Stable key for a slot. Never reused within a controller, so a fade can
/// tell that the slot it was animating is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey(pub(crate) u64);

/// One character's sprite on stage
#[derive(Debug, Clone)]
pub struct StageSlot {
    pub(crate) key: SlotKey,
    pub(crate) identity: CharacterIdentity,
    pub(crate) visual: VisualId,
    pub(crate) sprite: SpriteHandle,
    pub(crate) position: Vec2,
    pub(crate) mirrored: bool,
    /// RGB tint plus opacity in `w`
    pub(crate) tint: Vec4,
    pub(crate) layer: Layer,
}

impl StageSlot {
    pub(crate) fn new(
        key: SlotKey,
        identity: CharacterIdentity,
        visual: VisualId,
        sprite: SpriteHandle,
        x_position: f32,
        mirrored: bool,
    ) -> Self {
        Self {
            key,
            identity,
            visual,
            sprite,
            position: Vec2::new(x_position, 0.0),
            mirrored,
            tint: Vec4::new(1.0, 1.0, 1.0, 0.0),
            layer: Layer::Background,
        }
    }

    pub fn key(&self) -> SlotKey {
        self.key
    }

    pub fn identity(&self) -> CharacterIdentity {
        self.identity
    }

    /// Host object backing this slot
    pub fn visual(&self) -> VisualId {
        self.visual
    }

    pub fn sprite(&self) -> SpriteHandle {
        self.sprite
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Scale applied to the visual at creation
    pub fn scale(&self) -> Vec2 {
        if self.mirrored {
            MIRRORED_SCALE
        } else {
            Vec2::ONE
        }
    }

    pub fn tint(&self) -> Vec4 {
        self.tint
    }

    /// Current alpha in [0, 1]
    pub fn opacity(&self) -> f32 {
        self.tint.w
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn is_highlighted(&self) -> bool {
        self.layer == Layer::Foreground
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slot_starts_hidden_in_background() {
        let slot = StageSlot::new(
            SlotKey(0),
            CharacterIdentity::new("Alice"),
            VisualId(7),
            SpriteHandle::from_path("alice/neutral"),
            -200.0,
            false,
        );

        assert_eq!(slot.position(), Vec2::new(-200.0, 0.0));
        assert_eq!(slot.opacity(), 0.0);
        assert_eq!(slot.layer(), Layer::Background);
        assert!(!slot.is_highlighted());
        assert_eq!(slot.scale(), Vec2::ONE);
    }

    #[test]
    fn test_mirrored_scale() {
        let slot = StageSlot::new(
            SlotKey(1),
            CharacterIdentity::new("Bob"),
            VisualId(0),
            SpriteHandle::from_path("bob/neutral"),
            150.0,
            true,
        );

        assert!(slot.is_mirrored());
        assert_eq!(slot.scale(), Vec2::new(-1.0, 1.0));
    }
}
