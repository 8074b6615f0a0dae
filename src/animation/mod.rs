pub mod easing;
pub mod playback;
pub mod timeline;

pub use playback::{PlaybackClock, PlaybackState};
pub use timeline::{Phase, PhaseAction, Pivot, Timeline};
