// src/config/config_types.rs
//
// Config types for the app

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    pub texture_width: u32,
    pub texture_height: u32,
    pub texture_samples: u32,
}

#[derive(Debug, Deserialize)]
pub struct StyleConfig {
    pub box_size: f32,
    pub gap: f32,
    pub background: [f32; 3],
}

impl StyleConfig {
    /// Distance from the window origin to each square's quadrant center.
    pub fn quadrant_offset(&self) -> f32 {
        self.gap + self.box_size / 2.0
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaybackConfig {
    pub start_paused: bool,
}
