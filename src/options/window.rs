use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Window", inline)]
#[serde(default)]
/// Window size, title and frame pacing.
pub struct WindowOptions {
    /// Inner width in logical pixels.
    #[schemars(title = "Width", range(min = 64, max = 7680))]
    pub width: u32,
    /// Inner height in logical pixels.
    #[schemars(title = "Height", range(min = 64, max = 4320))]
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Redraw rate cap; 0 redraws as fast as presentation allows.
    #[schemars(title = "Target FPS", range(min = 0, max = 480))]
    pub target_fps: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "mirrorball".into(),
            target_fps: 0,
        }
    }
}
