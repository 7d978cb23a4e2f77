// Stage configuration

use glam::Vec4;

/// Default fade-in/fade-out duration in seconds
pub const DEFAULT_FADE_TIME: f32 = 0.5;

/// What a fade with a non-positive duration does to opacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroDurationPolicy {
    /// Write the end opacity before completing (1 for fade-in, 0 for fade-out)
    #[default]
    Snap,
    /// Complete without writing: a zero-length fade-in leaves the character invisible
    Preserve,
}

/// What happens when a fade starts on a slot that is already fading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Drop the in-flight fade; if it still owed the sequencer an advance, send it now
    #[default]
    Supersede,
    /// Keep both; whichever steps last in a frame decides the opacity
    Race,
}

/// Tunables for a `StageController`
#[derive(Debug, Clone, PartialEq)]
pub struct StageConfig {
    /// Fade duration used by `EnterOptions::default()`/`ExitOptions::default()`
    pub default_fade_time: f32,
    /// Tint for characters that aren't speaking
    pub dimmed_tint: Vec4,
    /// Tint for the current speaker
    pub highlight_tint: Vec4,
    pub zero_duration: ZeroDurationPolicy,
    pub overlap: OverlapPolicy,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            default_fade_time: DEFAULT_FADE_TIME,
            dimmed_tint: Vec4::new(0.75, 0.75, 0.75, 1.0),
            highlight_tint: Vec4::ONE,
            zero_duration: ZeroDurationPolicy::default(),
            overlap: OverlapPolicy::default(),
        }
    }
}

impl StageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproduce the unguarded legacy behaviour: zero-length fade-ins stay
    /// invisible and overlapping fades race
    pub fn legacy() -> Self {
        Self::new()
            .with_zero_duration(ZeroDurationPolicy::Preserve)
            .with_overlap(OverlapPolicy::Race)
    }

    pub fn with_default_fade_time(mut self, seconds: f32) -> Self {
        self.default_fade_time = seconds.max(0.0);
        self
    }

    /// Set the dimmed tint from a gray level; alpha stays at 1
    pub fn with_dim_level(mut self, gray: f32) -> Self {
        let gray = gray.clamp(0.0, 1.0);
        self.dimmed_tint = Vec4::new(gray, gray, gray, 1.0);
        self
    }

    pub fn with_zero_duration(mut self, policy: ZeroDurationPolicy) -> Self {
        self.zero_duration = policy;
        self
    }

    pub fn with_overlap(mut self, policy: OverlapPolicy) -> Self {
        self.overlap = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StageConfig::default();
        assert_eq!(config.default_fade_time, 0.5);
        assert_eq!(config.dimmed_tint, Vec4::new(0.75, 0.75, 0.75, 1.0));
        assert_eq!(config.highlight_tint, Vec4::ONE);
        assert_eq!(config.zero_duration, ZeroDurationPolicy::Snap);
        assert_eq!(config.overlap, OverlapPolicy::Supersede);
    }

    #[test]
    fn test_legacy_preset() {
        let config = StageConfig::legacy();
        assert_eq!(config.zero_duration, ZeroDurationPolicy::Preserve);
        assert_eq!(config.overlap, OverlapPolicy::Race);
    }

    #[test]
    fn test_builders_clamp() {
        let config = StageConfig::new()
            .with_default_fade_time(-1.0)
            .with_dim_level(1.5);
        assert_eq!(config.default_fade_time, 0.0);
        assert_eq!(config.dimmed_tint, Vec4::ONE);
    }
}
