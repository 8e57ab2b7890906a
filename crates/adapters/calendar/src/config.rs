//! Calendar configuration.

use serde::Deserialize;

/// Default colour for lit image pixels.
pub const DEFAULT_IMAGE_COLOR: [u8; 3] = [0, 160, 60];

/// Events shown on the countdown page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub events: Vec<EventConfig>,
}

/// A single configured event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    pub name: String,
    /// RFC 3339 start instant.
    pub starts_at: String,
    /// Text-art picture: one string per pixel row, `#` lit, anything else
    /// transparent.
    #[serde(default)]
    pub image: Option<Vec<String>>,
    #[serde(default = "default_image_color")]
    pub image_color: [u8; 3],
}

fn default_image_color() -> [u8; 3] {
    DEFAULT_IMAGE_COLOR
}
