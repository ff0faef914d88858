//! Converts raw platform events into scene commands.
//!
//! The `InputProcessor` owns the transient input state (last cursor
//! position, whether the left button is held) and the key-binding map. It
//! is the only thing that sits between raw window events and
//! [`SceneEngine::execute`](crate::engine::SceneEngine::execute).

use glam::Vec3;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use crate::engine::SceneCommand;
use crate::options::KeybindingOptions;

/// Converts raw window events into [`SceneCommand`]s.
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// if let Some(cmd) = input_processor.handle_key_press("KeyW") {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InputProcessor {
    /// Last cursor position, once one has been seen.
    last_cursor: Option<(f32, f32)>,
    /// Whether the left mouse button is currently held.
    dragging: bool,
    /// Distance the sphere moves per key press.
    sphere_step: f32,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a processor with the given bindings and sphere step.
    #[must_use]
    pub fn new(key_bindings: KeybindingOptions, sphere_step: f32) -> Self {
        Self {
            last_cursor: None,
            dragging: false,
            sphere_step,
            key_bindings,
        }
    }

    /// Whether the left button is held.
    #[must_use]
    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Replace the bindings and sphere step, e.g. after reloading options.
    pub fn reconfigure(&mut self, key_bindings: KeybindingOptions, sphere_step: f32) {
        self.key_bindings = key_bindings;
        self.sphere_step = sphere_step;
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<SceneCommand> {
        let action = self.key_bindings.lookup(key)?;
        Some(self.command_for(action))
    }

    fn command_for(&self, action: KeyAction) -> SceneCommand {
        let step = self.sphere_step;
        match action {
            KeyAction::MoveSphereUp => SceneCommand::MoveSphere(Vec3::Y * step),
            KeyAction::MoveSphereDown => SceneCommand::MoveSphere(Vec3::NEG_Y * step),
            KeyAction::MoveSphereLeft => SceneCommand::MoveSphere(Vec3::NEG_X * step),
            KeyAction::MoveSphereRight => SceneCommand::MoveSphere(Vec3::X * step),
            KeyAction::MoveSphereForward => SceneCommand::MoveSphere(Vec3::Z * step),
            KeyAction::MoveSphereBack => SceneCommand::MoveSphere(Vec3::NEG_Z * step),
            KeyAction::ResetSphere => SceneCommand::ResetSphere,
            KeyAction::TogglePause => SceneCommand::TogglePause,
            KeyAction::ReportTiming => SceneCommand::ReportTiming,
        }
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<SceneCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let previous = self.last_cursor.replace((x, y));
                let (px, py) = previous?;
                let (dx, dy) = (x - px, y - py);
                (self.dragging && (dx != 0.0 || dy != 0.0))
                    .then_some(SceneCommand::RotateCamera { dx, dy })
            }
            InputEvent::MouseButton { button, pressed } => {
                if button == MouseButton::Left {
                    self.dragging = pressed;
                }
                None
            }
            InputEvent::Scroll { delta } => {
                (delta != 0.0).then_some(SceneCommand::MoveCamera { delta })
            }
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(KeybindingOptions::default(), 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton, pressed: bool) -> InputEvent {
        InputEvent::MouseButton { button, pressed }
    }

    #[test]
    fn left_drag_rotates_by_pixel_displacement() {
        let mut input = InputProcessor::default();
        assert_eq!(input.handle_event(InputEvent::CursorMoved { x: 10.0, y: 10.0 }), None);
        assert_eq!(input.handle_event(press(MouseButton::Left, true)), None);
        assert_eq!(
            input.handle_event(InputEvent::CursorMoved { x: 14.0, y: 7.0 }),
            Some(SceneCommand::RotateCamera { dx: 4.0, dy: -3.0 })
        );
        assert_eq!(input.handle_event(press(MouseButton::Left, false)), None);
        assert_eq!(input.handle_event(InputEvent::CursorMoved { x: 20.0, y: 7.0 }), None);
    }

    #[test]
    fn other_buttons_do_not_drag() {
        let mut input = InputProcessor::default();
        let _ = input.handle_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        let _ = input.handle_event(press(MouseButton::Right, true));
        assert!(!input.dragging());
        assert_eq!(input.handle_event(InputEvent::CursorMoved { x: 5.0, y: 5.0 }), None);
    }

    #[test]
    fn first_cursor_sample_after_press_only_anchors() {
        let mut input = InputProcessor::default();
        let _ = input.handle_event(press(MouseButton::Left, true));
        assert_eq!(input.handle_event(InputEvent::CursorMoved { x: 50.0, y: 50.0 }), None);
    }

    #[test]
    fn scroll_moves_the_camera() {
        let mut input = InputProcessor::default();
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta: 120.0 }),
            Some(SceneCommand::MoveCamera { delta: 120.0 })
        );
        assert_eq!(input.handle_event(InputEvent::Scroll { delta: 0.0 }), None);
    }

    #[test]
    fn sphere_keys_scale_by_the_step() {
        let input = InputProcessor::new(KeybindingOptions::default(), 0.25);
        assert_eq!(
            input.handle_key_press("KeyW"),
            Some(SceneCommand::MoveSphere(Vec3::new(0.0, 0.25, 0.0)))
        );
        assert_eq!(
            input.handle_key_press("KeyA"),
            Some(SceneCommand::MoveSphere(Vec3::new(-0.25, 0.0, 0.0)))
        );
        assert_eq!(
            input.handle_key_press("KeyE"),
            Some(SceneCommand::MoveSphere(Vec3::new(0.0, 0.0, -0.25)))
        );
    }

    #[test]
    fn every_action_maps_to_its_own_command() {
        let input = InputProcessor::new(KeybindingOptions::default(), 1.0);
        let cases = [
            (KeyAction::MoveSphereUp, SceneCommand::MoveSphere(Vec3::Y)),
            (KeyAction::MoveSphereDown, SceneCommand::MoveSphere(Vec3::NEG_Y)),
            (KeyAction::MoveSphereLeft, SceneCommand::MoveSphere(Vec3::NEG_X)),
            (KeyAction::MoveSphereRight, SceneCommand::MoveSphere(Vec3::X)),
            (KeyAction::MoveSphereForward, SceneCommand::MoveSphere(Vec3::Z)),
            (KeyAction::MoveSphereBack, SceneCommand::MoveSphere(Vec3::NEG_Z)),
            (KeyAction::ResetSphere, SceneCommand::ResetSphere),
            (KeyAction::TogglePause, SceneCommand::TogglePause),
            (KeyAction::ReportTiming, SceneCommand::ReportTiming),
        ];
        for (action, expected) in cases {
            assert_eq!(input.command_for(action), expected, "{action:?}");
        }
    }

    #[test]
    fn discrete_keys_map_to_their_commands() {
        let input = InputProcessor::default();
        assert_eq!(input.handle_key_press("Space"), Some(SceneCommand::ResetSphere));
        assert_eq!(input.handle_key_press("KeyP"), Some(SceneCommand::TogglePause));
        assert_eq!(input.handle_key_press("KeyT"), Some(SceneCommand::ReportTiming));
        assert_eq!(input.handle_key_press("KeyZ"), None);
    }
}
