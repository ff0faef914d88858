//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a mouse
//! gesture, or a programmatic call, is represented as a `SceneCommand`.
//! Consumers construct commands and pass them to
//! [`SceneEngine::execute`](super::SceneEngine::execute).

use glam::Vec3;

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(SceneCommand::TogglePause);
/// engine.execute(SceneCommand::MoveCamera { delta: 120.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCommand {
    /// Turn and pitch the main camera by a drag displacement in pixels.
    RotateCamera {
        /// Horizontal drag.
        dx: f32,
        /// Vertical drag, positive downwards.
        dy: f32,
    },
    /// Move the main camera along its look direction by wheel units.
    MoveCamera {
        /// Signed wheel units.
        delta: f32,
    },
    /// Offset the sphere, and the probe rig with it.
    MoveSphere(Vec3),
    /// Return the sphere and probe rig to the origin.
    ResetSphere,
    /// Stop or restart game time.
    TogglePause,
    /// Log elapsed times and the frame timing report.
    ReportTiming,
}
