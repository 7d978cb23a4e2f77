// Opacity fades
//
// A fade is plain data advanced once per frame by the controller, so any
// number of them can be in flight at once. The first step runs when the
// fade starts (elapsed = 0); every later step adds the frame delta first.
// The fade keeps writing `elapsed / duration` while elapsed is below the
// duration and finishes on the first step where it isn't, without writing
// a final value, so a fade-in can end a hair under full opacity.

use super::config::ZeroDurationPolicy;
use super::slot::SlotKey;
use crate::core::math::{fade_fraction, lerp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FadeDirection {
    In,
    Out,
}

impl FadeDirection {
    /// Opacity at a given fraction of the fade
    pub fn opacity_at(&self, fraction: f32) -> f32 {
        match self {
            Self::In => lerp(0.0, 1.0, fraction),
            Self::Out => lerp(1.0, 0.0, fraction),
        }
    }

    /// Opacity once the fade is over
    pub fn end_opacity(&self) -> f32 {
        match self {
            Self::In => 1.0,
            Self::Out => 0.0,
        }
    }
}

/// Result of stepping a fade
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeStep {
    /// Still running; write this opacity
    Running { opacity: f32 },
    /// Done; write `final_opacity` if there is one
    Finished { final_opacity: Option<f32> },
}

impl FadeStep {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}

/// An in-flight fade on one slot
#[derive(Debug, Clone)]
pub struct Fade {
    slot: SlotKey,
    direction: FadeDirection,
    duration: f32,
    elapsed: f32,
    wait_for_finish: bool,
}

impl Fade {
    pub fn new(slot: SlotKey, direction: FadeDirection, duration: f32, wait_for_finish: bool) -> Self {
        Self {
            slot,
            direction,
            duration,
            elapsed: 0.0,
            wait_for_finish,
        }
    }

    pub fn slot(&self) -> SlotKey {
        self.slot
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether the sequencer advance is deferred until this fade ends
    pub fn waits_for_finish(&self) -> bool {
        self.wait_for_finish
    }

    /// First step, taken when the fade starts
    pub fn begin(&mut self, zero_duration: ZeroDurationPolicy) -> FadeStep {
        self.evaluate(zero_duration)
    }

    /// One frame step
    pub fn advance(&mut self, dt: f32, zero_duration: ZeroDurationPolicy) -> FadeStep {
        self.elapsed += dt;
        self.evaluate(zero_duration)
    }

    fn evaluate(&self, zero_duration: ZeroDurationPolicy) -> FadeStep {
        if self.elapsed < self.duration {
            let fraction = fade_fraction(self.elapsed, self.duration);
            return FadeStep::Running {
                opacity: self.direction.opacity_at(fraction),
            };
        }

        let final_opacity = match zero_duration {
            ZeroDurationPolicy::Snap if self.duration <= 0.0 => Some(self.direction.end_opacity()),
            _ => None,
        };
        FadeStep::Finished { final_opacity }
    }
}
