// Visual host interface
//
// The stage controller never draws anything itself. Everything visible goes
// through a `StageHost`: a scene graph with two parenting surfaces
// (background and foreground) that can spawn, restyle and destroy sprite
// objects, and that reports how long the current frame took.

use super::assets::SpriteHandle;
use glam::{Vec2, Vec4};

/// Which parenting surface a visual lives under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layer {
    /// Dimmed characters, drawn first
    #[default]
    Background,
    /// The highlighted speaker, drawn on top
    Foreground,
}

/// Host-side handle to a parenting surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

/// Host-side handle to a spawned sprite object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualId(pub u64);

/// Rendering/UI framework operations consumed by the stage
pub trait StageHost {
    /// Surface handle for a layer
    fn surface(&self, layer: Layer) -> SurfaceId;

    /// Instantiate a new sprite object as a child of `parent`
    fn spawn(&mut self, parent: SurfaceId) -> VisualId;

    /// Destroy a sprite object and release its resources
    fn destroy(&mut self, visual: VisualId);

    /// Move a sprite object under a different surface
    fn reparent(&mut self, visual: VisualId, parent: SurfaceId);

    /// Set the displayed image
    fn set_sprite(&mut self, visual: VisualId, sprite: SpriteHandle, preserve_aspect: bool);

    /// Set the RGBA tint; alpha is the object's opacity
    fn set_color(&mut self, visual: VisualId, color: Vec4);

    /// Set the local position
    fn set_position(&mut self, visual: VisualId, position: Vec2);

    /// Set the local scale; a negative x mirrors horizontally
    fn set_scale(&mut self, visual: VisualId, scale: Vec2);

    /// Seconds elapsed during the current frame
    fn delta_time(&self) -> f32;
}
