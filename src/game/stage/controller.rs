// Stage controller: who is on stage, how they get on and off, who is lit

use super::config::{OverlapPolicy, StageConfig};
use super::fade::{Fade, FadeDirection, FadeStep};
use super::identity::CharacterIdentity;
use super::sequencer::Sequencer;
use super::slot::{SlotKey, StageSlot};
use super::StageError;
use crate::engine::assets::SpriteHandle;
use crate::engine::host::{Layer, StageHost, SurfaceId};
use log::{debug, warn};

/// Options for `StageController::enter_character_with`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnterOptions {
    /// Fade-in duration in seconds; `None` uses the config default
    pub fade_time: Option<f32>,
    /// Hold the sequencer until the fade-in completes
    pub wait_for_finish: bool,
    /// Flip the sprite horizontally
    pub mirrored: bool,
}

impl EnterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fade_time(mut self, seconds: f32) -> Self {
        self.fade_time = Some(seconds);
        self
    }

    pub fn wait_for_finish(mut self, wait: bool) -> Self {
        self.wait_for_finish = wait;
        self
    }

    pub fn mirrored(mut self, mirrored: bool) -> Self {
        self.mirrored = mirrored;
        self
    }
}

/// Options for `StageController::exit_character_with`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExitOptions {
    /// Fade-out duration in seconds; `None` uses the config default
    pub fade_time: Option<f32>,
    /// Hold the sequencer until the fade-out completes
    pub wait_for_finish: bool,
}

impl ExitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fade_time(mut self, seconds: f32) -> Self {
        self.fade_time = Some(seconds);
        self
    }

    pub fn wait_for_finish(mut self, wait: bool) -> Self {
        self.wait_for_finish = wait;
        self
    }
}

/// Manages the characters on stage for one scene.
///
/// Owns the visual host and the sequencer for the lifetime of the scene.
/// Every `enter_character`/`exit_character` call results in exactly one
/// `Sequencer::next_node`, either inside the call or from the `tick` that
/// finishes the fade. `highlight_speaker` never advances the sequencer.
pub struct StageController<H: StageHost, S: Sequencer> {
    host: H,
    sequencer: S,
    config: StageConfig,
    slots: Vec<StageSlot>,
    fades: Vec<Fade>,
    next_key: u64,
}

impl<H: StageHost, S: Sequencer> StageController<H, S> {
    pub fn new(host: H, sequencer: S, config: StageConfig) -> Self {
        Self {
            host,
            sequencer,
            config,
            slots: Vec::new(),
            fades: Vec::new(),
            next_key: 0,
        }
    }

    /// Tear the scene down: destroys every remaining visual and hands back
    /// the host and sequencer. Fades still in flight are dropped without
    /// advancing the sequencer.
    pub fn into_parts(mut self) -> (H, S) {
        if !self.fades.is_empty() {
            debug!("Dropping {} in-flight fade(s) at teardown", self.fades.len());
        }
        for slot in self.slots.drain(..) {
            self.host.destroy(slot.visual);
        }
        (self.host, self.sequencer)
    }

    /// Bring a character on stage with the configured fade time
    pub fn enter_character(&mut self, identity: CharacterIdentity, sprite: SpriteHandle, x_position: f32) {
        self.enter_character_with(identity, sprite, x_position, EnterOptions::default());
    }

    /// Bring a character on stage.
    ///
    /// A character that is already on stage is left alone: the request is
    /// logged, the sequencer still advances, nothing else happens.
    pub fn enter_character_with(
        &mut self,
        identity: CharacterIdentity,
        sprite: SpriteHandle,
        x_position: f32,
        options: EnterOptions,
    ) {
        if self.contains(identity) {
            warn!("{} is already on stage, ignoring enter", identity);
            self.sequencer.next_node();
            return;
        }

        let key = SlotKey(self.next_key);
        self.next_key += 1;

        let parent = self.host.surface(Layer::Background);
        let visual = self.host.spawn(parent);
        let slot = StageSlot::new(key, identity, visual, sprite, x_position, options.mirrored);

        self.host.set_scale(visual, slot.scale());
        self.host.set_sprite(visual, sprite, true);
        self.host.set_position(visual, slot.position());
        self.host.set_color(visual, slot.tint());
        self.slots.push(slot);

        let fade_time = options.fade_time.unwrap_or(self.config.default_fade_time);
        debug!("{} enters at x={} (fade {}s)", identity, x_position, fade_time);

        self.start_fade(key, FadeDirection::In, fade_time, options.wait_for_finish);
    }

    /// Take a character off stage with the configured fade time
    pub fn exit_character(&mut self, identity: CharacterIdentity, sprite: SpriteHandle) {
        self.exit_character_with(identity, sprite, ExitOptions::default());
    }

    /// Take a character off stage.
    ///
    /// The sprite is swapped immediately so the exit can show a different
    /// expression. The slot stays on stage until its fade-out completes.
    pub fn exit_character_with(
        &mut self,
        identity: CharacterIdentity,
        sprite: SpriteHandle,
        options: ExitOptions,
    ) {
        let Some(index) = self.slot_index(identity) else {
            warn!("{} is not on stage, ignoring exit", identity);
            self.sequencer.next_node();
            return;
        };

        let key = self.slots[index].key;
        self.apply_sprite(index, sprite);

        let fade_time = options.fade_time.unwrap_or(self.config.default_fade_time);
        debug!("{} exits (fade {}s)", identity, fade_time);

        self.start_fade(key, FadeDirection::Out, fade_time, options.wait_for_finish);
    }

    /// Look up a character's slot
    pub fn find_slot(&self, identity: CharacterIdentity) -> Option<&StageSlot> {
        self.slots.iter().find(|slot| slot.identity == identity)
    }

    /// Look up a slot by key
    pub fn slot(&self, key: SlotKey) -> Option<&StageSlot> {
        self.slots.iter().find(|slot| slot.key == key)
    }

    /// Replace a slot's sprite, preserving aspect ratio
    pub fn set_sprite(&mut self, key: SlotKey, sprite: SpriteHandle) -> Result<(), StageError> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.key == key)
            .ok_or(StageError::UnknownSlot(key))?;
        self.apply_sprite(index, sprite);
        Ok(())
    }

    /// Dim everyone, then bring `identity` to the foreground at full brightness.
    ///
    /// Fails without touching the stage if `identity` has no slot.
    pub fn highlight_speaker(&mut self, identity: CharacterIdentity) -> Result<(), StageError> {
        let speaker = self
            .slot_index(identity)
            .ok_or(StageError::NotOnStage(identity))?;

        let background = self.host.surface(Layer::Background);
        for slot in &mut self.slots {
            slot.layer = Layer::Background;
            slot.tint = self.config.dimmed_tint;
            self.host.reparent(slot.visual, background);
            self.host.set_color(slot.visual, slot.tint);
        }

        let foreground = self.host.surface(Layer::Foreground);
        let slot = &mut self.slots[speaker];
        slot.layer = Layer::Foreground;
        slot.tint = self.config.highlight_tint;
        self.host.reparent(slot.visual, foreground);
        self.host.set_color(slot.visual, slot.tint);

        debug!("Highlighted {}", identity);
        Ok(())
    }

    /// Surface other collaborators should parent background elements to
    pub fn background_surface(&self) -> SurfaceId {
        self.host.surface(Layer::Background)
    }

    /// Advance every in-flight fade by one frame
    pub fn tick(&mut self) {
        if self.fades.is_empty() {
            return;
        }

        let dt = self.host.delta_time();
        let zero_duration = self.config.zero_duration;
        let fades = std::mem::take(&mut self.fades);
        let mut running = Vec::with_capacity(fades.len());

        for mut fade in fades {
            let step = if self.slot(fade.slot()).is_some() {
                fade.advance(dt, zero_duration)
            } else {
                // Slot removed under us (racing fade-out)
                FadeStep::Finished { final_opacity: None }
            };

            if self.apply_step(fade.slot(), step) {
                self.finish_fade(fade);
            } else {
                running.push(fade);
            }
        }

        running.append(&mut self.fades);
        self.fades = running;
    }

    pub fn slots(&self) -> &[StageSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, identity: CharacterIdentity) -> bool {
        self.find_slot(identity).is_some()
    }

    /// Whether any fade is animating this character
    pub fn is_fading(&self, identity: CharacterIdentity) -> bool {
        self.find_slot(identity)
            .is_some_and(|slot| self.fades.iter().any(|fade| fade.slot() == slot.key))
    }

    /// Number of fades in flight
    pub fn active_fades(&self) -> usize {
        self.fades.len()
    }

    /// The currently highlighted character, if any
    pub fn speaker(&self) -> Option<CharacterIdentity> {
        self.slots
            .iter()
            .find(|slot| slot.is_highlighted())
            .map(|slot| slot.identity)
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn sequencer(&self) -> &S {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut S {
        &mut self.sequencer
    }

    fn slot_index(&self, identity: CharacterIdentity) -> Option<usize> {
        self.slots.iter().position(|slot| slot.identity == identity)
    }

    fn apply_sprite(&mut self, index: usize, sprite: SpriteHandle) {
        let slot = &mut self.slots[index];
        slot.sprite = sprite;
        self.host.set_sprite(slot.visual, sprite, true);
    }

    fn start_fade(&mut self, key: SlotKey, direction: FadeDirection, duration: f32, wait_for_finish: bool) {
        if self.config.overlap == OverlapPolicy::Supersede {
            self.supersede_fades(key);
        }

        if !wait_for_finish {
            self.sequencer.next_node();
        }

        let mut fade = Fade::new(key, direction, duration, wait_for_finish);
        let step = fade.begin(self.config.zero_duration);
        if self.apply_step(key, step) {
            self.finish_fade(fade);
        } else {
            self.fades.push(fade);
        }
    }

    /// Drop in-flight fades on `key`, paying any advance they still owed
    fn supersede_fades(&mut self, key: SlotKey) {
        let mut owed = 0;
        self.fades.retain(|fade| {
            if fade.slot() != key {
                return true;
            }
            if fade.waits_for_finish() {
                owed += 1;
            }
            false
        });

        if owed > 0 {
            debug!("Superseded fade on {:?} owed {} advance(s)", key, owed);
        }
        for _ in 0..owed {
            self.sequencer.next_node();
        }
    }

    /// Write a step's opacity; returns true once the fade is over
    fn apply_step(&mut self, key: SlotKey, step: FadeStep) -> bool {
        match step {
            FadeStep::Running { opacity } => {
                self.write_opacity(key, opacity);
                false
            }
            FadeStep::Finished { final_opacity } => {
                if let Some(opacity) = final_opacity {
                    self.write_opacity(key, opacity);
                }
                true
            }
        }
    }

    fn write_opacity(&mut self, key: SlotKey, opacity: f32) {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.key == key) {
            slot.tint.w = opacity;
            self.host.set_color(slot.visual, slot.tint);
        }
    }

    fn finish_fade(&mut self, fade: Fade) {
        if fade.direction() == FadeDirection::Out {
            if let Some(index) = self.slots.iter().position(|slot| slot.key == fade.slot()) {
                let slot = self.slots.remove(index);
                self.host.destroy(slot.visual);
                debug!("{} left the stage", slot.identity);
            }
        }

        if fade.waits_for_finish() {
            self.sequencer.next_node();
        }
    }
}
