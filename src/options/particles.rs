use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Particles", inline)]
#[serde(default)]
/// Fire particle system.
pub struct ParticleOptions {
    /// Number of particles.
    #[schemars(title = "Count", range(min = 0, max = 100_000))]
    pub count: u32,
    /// Lifetimes per second.
    #[schemars(title = "Speed", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub speed: f32,
    /// Distance travelled over a full lifetime at unit velocity.
    #[schemars(title = "Spread", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub spread: f32,
    /// Half-width of a newborn particle quad.
    #[schemars(title = "Size", range(min = 0.0, max = 2.0), extend("step" = 0.01))]
    pub size: f32,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            count: 1000,
            speed: 0.5,
            spread: 1.5,
            size: 0.12,
        }
    }
}
