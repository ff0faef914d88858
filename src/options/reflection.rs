use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Reflection", inline)]
#[serde(default)]
/// Dynamic cube-map capture settings.
pub struct ReflectionOptions {
    /// Edge length of each cube face in texels.
    #[schemars(title = "Cube Map Size", range(min = 16, max = 2048))]
    pub cube_map_size: u32,
    /// Probe near plane.
    #[schemars(skip)]
    pub probe_znear: f32,
    /// Probe far plane.
    #[schemars(skip)]
    pub probe_zfar: f32,
}

impl Default for ReflectionOptions {
    fn default() -> Self {
        Self {
            cube_map_size: 256,
            probe_znear: 1.0,
            probe_zfar: 1000.0,
        }
    }
}
