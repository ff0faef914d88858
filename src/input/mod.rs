//! Input handling: event types, bindable key actions, and the input
//! processor that converts raw window events into scene commands.

/// Platform-agnostic input events.
pub mod event;
/// Actions that keys can be bound to.
pub mod keyboard;
/// Converts raw events into scene commands.
pub mod processor;

pub use event::{InputEvent, MouseButton, WHEEL_DELTA};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
