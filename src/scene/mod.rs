//! The fixed scene: which objects exist, where they are, how they are lit,
//! and the per-view uniform data derived from all of that each frame.

/// Two-light setup with the flickering fire light.
pub mod lights;
/// Specular colours shared by the models.
pub mod material;
/// Object list, draw order and world matrices.
pub mod objects;
/// Per-(view, object) uniform slots.
pub mod uniforms;

use glam::{Vec3, Vec4};

pub use lights::{Lights, PointLight};
pub use material::Material;
pub use objects::{SceneObject, View};
pub use uniforms::{ObjectUniform, UniformArena, UniformSlots};

use crate::options::Options;

// ---------------------------------------------------------------------------
// FrameState
// ---------------------------------------------------------------------------

/// Everything time- or interaction-dependent that feeds the uniforms of one
/// frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    /// Game time in seconds.
    pub time: f32,
    /// User offset of the reflective sphere.
    pub sphere_translation: Vec3,
    /// Lights evaluated at `time`.
    pub lights: Lights,
    /// Wind direction (xyz) and sway frequency (w).
    pub wind_dir: Vec4,
    /// Height of the outermost grass shell.
    pub grass_height: f32,
}

impl FrameState {
    /// Evaluate the frame inputs at game time `time`.
    #[must_use]
    pub fn new(options: &Options, time: f32, sphere_translation: Vec3) -> Self {
        Self {
            time,
            sphere_translation,
            lights: Lights::from_options(&options.lighting).at_time(time),
            wind_dir: Vec4::from_array(options.terrain.wind_dir),
            grass_height: options.terrain.grass_height,
        }
    }
}
