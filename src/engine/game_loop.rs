/// Frame timing for the stage
///
/// Stage fades are stepped once per rendered frame with whatever time the
/// frame actually took, so this is a variable-timestep clock rather than
/// a fixed-step accumulator. Long wall-clock stalls (window drags,
/// breakpoints) are capped so a single frame can't skip a whole fade;
/// explicit deltas passed to `advance` are taken as given.
use std::time::{Duration, Instant};

/// Largest wall-clock delta a single frame may report, in seconds
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Per-frame timing state
#[derive(Debug)]
pub struct FrameClock {
    /// Time of last frame
    last_frame_time: Instant,

    /// Whether time is frozen
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<f32>,

    /// Current frame number
    frame_count: u64,

    /// Scene time accumulated across unpaused frames
    scene_time: f32,

    /// Current FPS (updated periodically)
    current_fps: f32,

    /// Delta time of the current frame
    delta_time: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame_time: Instant::now(),
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            scene_time: 0.0,
            current_fps: 0.0,
            delta_time: 0.0,
        }
    }

    /// Begin a new frame from the wall clock, returns the frame delta in seconds
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time.as_secs_f32().min(MAX_FRAME_DELTA))
    }

    /// Begin a new frame with an explicit delta, returns the delta actually applied.
    ///
    /// Negative and non-finite deltas count as 0.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.frame_count += 1;

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.frame_times.push(dt);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.delta_time = if self.paused { 0.0 } else { dt };
        self.scene_time += self.delta_time;
        self.delta_time
    }

    /// Delta time of the current frame (0 while paused)
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Scene time in seconds, excluding paused frames
    pub fn scene_time(&self) -> f32 {
        self.scene_time
    }

    /// Scene time as a Duration
    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f32(self.scene_time)
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check if time is frozen
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze scene time; fades hold their current opacity
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Stage clock paused");
        }
    }

    /// Resume scene time
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Don't let the paused gap land on the next frame
            self.last_frame_time = Instant::now();
            log::info!("Stage clock resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: f32 = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as f32;

        self.current_fps = if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
