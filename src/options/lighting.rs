use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// The scene's two point lights. Vectors are `[x, y, z, w]` with `w = 1`
/// for a position and `w = 0` for a direction.
pub struct LightingOptions {
    /// Key light position.
    #[schemars(skip)]
    pub light1_vec: [f32; 4],
    /// Key light ambient colour.
    pub light1_ambient: [f32; 4],
    /// Key light diffuse colour.
    pub light1_diffuse: [f32; 4],
    /// Key light specular colour.
    pub light1_specular: [f32; 4],
    /// Fire light position.
    #[schemars(skip)]
    pub light2_vec: [f32; 4],
    /// Fire light ambient colour.
    pub light2_ambient: [f32; 4],
    /// Fire light diffuse colour before flicker.
    pub light2_diffuse: [f32; 4],
    /// Fire light specular colour.
    pub light2_specular: [f32; 4],
    /// Fractional depth of the fire light's flicker.
    #[schemars(title = "Fire Flicker", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub fire_flicker: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            light1_vec: [-250.0, 130.0, 145.0, 1.0],
            light1_ambient: [0.3, 0.3, 0.3, 1.0],
            light1_diffuse: [0.8, 0.8, 0.8, 1.0],
            light1_specular: [1.0, 1.0, 1.0, 1.0],
            light2_vec: [-2.5, 0.0, 2.0, 1.0],
            light2_ambient: [0.05, 0.02, 0.0, 1.0],
            light2_diffuse: [1.0, 0.55, 0.2, 1.0],
            light2_specular: [1.0, 0.6, 0.3, 1.0],
            fire_flicker: 0.25,
        }
    }
}
