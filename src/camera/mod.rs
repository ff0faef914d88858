//! Cameras for the main view and the cube-map probes.
//!
//! Everything is left-handed: +X right, +Y up, +Z into the screen, with a
//! 0..1 depth range.

/// Free-look camera and perspective projection.
pub mod first_person;
/// Six-face probe rig for dynamic cube-map capture.
pub mod probe;

pub use first_person::{FirstPersonCamera, Projection, MAIN_PITCH_LIMIT};
pub use probe::{CubeFace, ProbeRig};
