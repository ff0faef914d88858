use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Main camera projection, start pose and control sensitivities.
pub struct CameraOptions {
    /// Vertical field of view as a fraction of π.
    #[schemars(title = "Field of View (×π)", range(min = 0.05, max = 0.9), extend("step" = 0.01))]
    pub fovy_fraction_of_pi: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Initial eye position.
    #[schemars(skip)]
    pub start_position: [f32; 3],
    /// Initial look direction (need not be normalised).
    #[schemars(skip)]
    pub start_direction: [f32; 3],
    /// Radians turned per pixel of drag.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// Distance moved per wheel unit (a wheel line is 120 units).
    #[schemars(title = "Move Speed", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub move_speed: f32,
}

impl CameraOptions {
    /// Vertical field of view in radians.
    #[must_use]
    pub fn fov_y(&self) -> f32 {
        self.fovy_fraction_of_pi * std::f32::consts::PI
    }
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy_fraction_of_pi: 0.25,
            znear: 1.0,
            zfar: 1000.0,
            start_position: [25.0, 2.0, -14.5],
            start_direction: [-25.0, -2.0, 14.5],
            rotate_speed: 0.01,
            move_speed: 0.01,
        }
    }
}
