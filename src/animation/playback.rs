// src/animation/playback.rs
//
// Playback state and the cycle clock.
// Pausing freezes elapsed time by re-anchoring the cycle start each held
// frame, so resuming continues exactly where the animation left off.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn pause(&mut self) {
        *self = PlaybackState::Paused;
    }

    pub fn play(&mut self) {
        *self = PlaybackState::Playing;
    }

    pub fn toggle(&mut self) {
        *self = match self {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused => PlaybackState::Playing,
        };
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, PlaybackState::Paused)
    }
}

#[derive(Debug, Default)]
pub struct PlaybackClock {
    start_time: f32,
    current_time: Option<f32>, // None: re-anchor the cycle on the next advance
    prev_elapsed: f32,
    elapsed: f32,
    dt: f32,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `timestamp` and return elapsed time since cycle start.
    pub fn advance(&mut self, timestamp: f32) -> f32 {
        if self.current_time.is_none() {
            self.start_time = timestamp;
        }
        self.current_time = Some(timestamp);
        self.elapsed = timestamp - self.start_time;
        self.dt = self.elapsed - self.prev_elapsed;
        self.prev_elapsed = self.elapsed;
        self.elapsed
    }

    /// Keep elapsed time frozen while paused: the cycle start is pushed
    /// forward so that `timestamp - start_time` stays constant.
    pub fn hold(&mut self, timestamp: f32) {
        self.start_time = timestamp - self.elapsed;
        self.current_time = Some(timestamp);
    }

    /// Invalidate the current-time marker. The next `advance` re-anchors the
    /// cycle start, restarting elapsed time near zero; this is the entire
    /// looping mechanism.
    pub fn restart_cycle(&mut self) {
        self.current_time = None;
        self.prev_elapsed = 0.0;
    }

    pub fn get_elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn get_delta(&self) -> f32 {
        self.dt
    }
}
