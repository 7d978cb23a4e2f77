// Engine modules: frame timing, sprite assets, the visual host seam

pub mod assets;
pub mod game_loop;
pub mod headless;
pub mod host;

pub use game_loop::FrameClock;
pub use headless::{HeadlessHost, HeadlessVisual};
pub use host::{Layer, StageHost, SurfaceId, VisualId};
