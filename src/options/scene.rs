use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Interaction and timing settings.
pub struct SceneOptions {
    /// Distance the sphere moves per key press.
    #[schemars(title = "Sphere Step", range(min = 0.01, max = 5.0), extend("step" = 0.01))]
    pub sphere_step: f32,
    /// Seconds before frame statistics start being collected.
    #[schemars(skip)]
    pub clock_deferred_start: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            sphere_step: 0.5,
            clock_deferred_start: 3.0,
        }
    }
}
