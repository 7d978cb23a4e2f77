// In-memory stage host
//
// Keeps the scene graph as plain data. The demo binary uses it behind a
// window title, and the stage tests inspect it to check what the controller
// told the host to do.

use super::assets::SpriteHandle;
use super::game_loop::FrameClock;
use super::host::{Layer, StageHost, SurfaceId, VisualId};
use glam::{Vec2, Vec4};
use log::{trace, warn};
use std::collections::HashMap;

const BACKGROUND_SURFACE: SurfaceId = SurfaceId(0);
const FOREGROUND_SURFACE: SurfaceId = SurfaceId(1);

/// Recorded state of one spawned object
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessVisual {
    pub parent: SurfaceId,
    pub sprite: Option<SpriteHandle>,
    pub preserve_aspect: bool,
    pub color: Vec4,
    pub position: Vec2,
    pub scale: Vec2,
}

impl HeadlessVisual {
    fn new(parent: SurfaceId) -> Self {
        Self {
            parent,
            sprite: None,
            preserve_aspect: false,
            color: Vec4::ONE,
            position: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}

/// Stage host that records everything in memory
#[derive(Debug)]
pub struct HeadlessHost {
    visuals: HashMap<VisualId, HeadlessVisual>,
    next_visual: u64,
    spawned: usize,
    destroyed: usize,
    clock: FrameClock,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self {
            visuals: HashMap::new(),
            next_visual: 0,
            spawned: 0,
            destroyed: 0,
            clock: FrameClock::new(),
        }
    }

    /// Start a frame with an explicit delta (tests, scripted runs)
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.clock.advance(dt)
    }

    /// Start a frame from the wall clock
    pub fn begin_frame(&mut self) -> f32 {
        self.clock.begin_frame()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// Look up a live visual
    pub fn visual(&self, id: VisualId) -> Option<&HeadlessVisual> {
        self.visuals.get(&id)
    }

    /// Which layer a live visual is parented to
    pub fn layer_of(&self, id: VisualId) -> Option<Layer> {
        self.visuals.get(&id).map(|v| {
            if v.parent == FOREGROUND_SURFACE {
                Layer::Foreground
            } else {
                Layer::Background
            }
        })
    }

    /// Number of live visuals
    pub fn live_count(&self) -> usize {
        self.visuals.len()
    }

    /// Total visuals ever spawned
    pub fn spawned_count(&self) -> usize {
        self.spawned
    }

    /// Total visuals destroyed
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    fn visual_mut(&mut self, id: VisualId) -> Option<&mut HeadlessVisual> {
        let visual = self.visuals.get_mut(&id);
        if visual.is_none() {
            warn!("Headless host: no visual {:?}", id);
        }
        visual
    }
}

impl StageHost for HeadlessHost {
    fn surface(&self, layer: Layer) -> SurfaceId {
        match layer {
            Layer::Background => BACKGROUND_SURFACE,
            Layer::Foreground => FOREGROUND_SURFACE,
        }
    }

    fn spawn(&mut self, parent: SurfaceId) -> VisualId {
        let id = VisualId(self.next_visual);
        self.next_visual += 1;
        self.spawned += 1;
        self.visuals.insert(id, HeadlessVisual::new(parent));
        trace!("Spawned {:?} under {:?}", id, parent);
        id
    }

    fn destroy(&mut self, visual: VisualId) {
        if self.visuals.remove(&visual).is_some() {
            self.destroyed += 1;
            trace!("Destroyed {:?}", visual);
        } else {
            warn!("Headless host: destroy of unknown visual {:?}", visual);
        }
    }

    fn reparent(&mut self, visual: VisualId, parent: SurfaceId) {
        if let Some(v) = self.visual_mut(visual) {
            v.parent = parent;
        }
    }

    fn set_sprite(&mut self, visual: VisualId, sprite: SpriteHandle, preserve_aspect: bool) {
        if let Some(v) = self.visual_mut(visual) {
            v.sprite = Some(sprite);
            v.preserve_aspect = preserve_aspect;
        }
    }

    fn set_color(&mut self, visual: VisualId, color: Vec4) {
        if let Some(v) = self.visual_mut(visual) {
            v.color = color;
        }
    }

    fn set_position(&mut self, visual: VisualId, position: Vec2) {
        if let Some(v) = self.visual_mut(visual) {
            v.position = position;
        }
    }

    fn set_scale(&mut self, visual: VisualId, scale: Vec2) {
        if let Some(v) = self.visual_mut(visual) {
            v.scale = scale;
        }
    }

    fn delta_time(&self) -> f32 {
        self.clock.delta_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spawn_and_destroy() {
        let mut host = HeadlessHost::new();
        let background = host.surface(Layer::Background);

        let a = host.spawn(background);
        let b = host.spawn(background);
        assert_ne!(a, b);
        assert_eq!(host.live_count(), 2);

        host.destroy(a);
        assert!(host.visual(a).is_none());
        assert_eq!(host.live_count(), 1);
        assert_eq!(host.spawned_count(), 2);
        assert_eq!(host.destroyed_count(), 1);
    }

    #[test]
    fn test_reparent_changes_layer() {
        let mut host = HeadlessHost::new();
        let id = host.spawn(host.surface(Layer::Background));
        assert_eq!(host.layer_of(id), Some(Layer::Background));

        host.reparent(id, host.surface(Layer::Foreground));
        assert_eq!(host.layer_of(id), Some(Layer::Foreground));
    }

    #[test]
    fn test_records_styling() {
        let mut host = HeadlessHost::new();
        let id = host.spawn(host.surface(Layer::Background));
        let sprite = SpriteHandle::from_path("alice/neutral");

        host.set_sprite(id, sprite, true);
        host.set_color(id, Vec4::new(0.5, 0.5, 0.5, 0.25));
        host.set_position(id, Vec2::new(-200.0, 0.0));
        host.set_scale(id, Vec2::new(-1.0, 1.0));

        let visual = host.visual(id).unwrap();
        assert_eq!(visual.sprite, Some(sprite));
        assert!(visual.preserve_aspect);
        assert_relative_eq!(visual.color.w, 0.25);
        assert_eq!(visual.position, Vec2::new(-200.0, 0.0));
        assert_eq!(visual.scale.x, -1.0);
    }

    #[test]
    fn test_delta_time_follows_clock() {
        let mut host = HeadlessHost::new();
        assert_eq!(host.delta_time(), 0.0);

        host.advance(0.05);
        assert_relative_eq!(host.delta_time(), 0.05);
    }
}
