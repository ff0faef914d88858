use serde::{Deserialize, Serialize};

/// Scene actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML files stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_pause = "KeyP"
/// move_sphere_up = "KeyW"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Sphere +Y.
    MoveSphereUp,
    /// Sphere -Y.
    MoveSphereDown,
    /// Sphere -X.
    MoveSphereLeft,
    /// Sphere +X.
    MoveSphereRight,
    /// Sphere +Z.
    MoveSphereForward,
    /// Sphere -Z.
    MoveSphereBack,
    /// Sphere and probes back to the origin.
    ResetSphere,
    /// Stop or restart game time.
    TogglePause,
    /// Log the frame timing report.
    ReportTiming,
}
