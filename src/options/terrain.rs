use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Terrain", inline)]
#[serde(default)]
/// Heightmap grid and grass shell parameters.
pub struct TerrainOptions {
    /// Grid rows (Z).
    #[schemars(range(min = 2, max = 1024))]
    pub rows: u32,
    /// Grid columns (X).
    #[schemars(range(min = 2, max = 1024))]
    pub cols: u32,
    /// World height of a full-red heightmap texel.
    #[schemars(title = "Height Scale", range(min = 0.0, max = 20.0), extend("step" = 0.1))]
    pub height_scale: f32,
    /// Height of the outermost grass shell.
    #[schemars(title = "Grass Height", range(min = 0.0, max = 2.0), extend("step" = 0.01))]
    pub grass_height: f32,
    /// Wind direction in xyz, sway frequency in w.
    #[schemars(skip)]
    pub wind_dir: [f32; 4],
    /// Number of grass shells, including the ground.
    #[schemars(title = "Grass Layers", range(min = 1, max = 64))]
    pub grass_layers: u32,
    /// Blades per texture repeat along each axis.
    #[schemars(title = "Grass Density", range(min = 1.0, max = 1000.0), extend("step" = 1.0))]
    pub grass_density: f32,
}

impl Default for TerrainOptions {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
            height_scale: 1.5,
            grass_height: 0.15,
            wind_dir: [1.0, 0.0, 0.6, 1.5],
            grass_layers: 16,
            grass_density: 200.0,
        }
    }
}
