//! Shared utilities: the game clock and frame pacing.

/// Pausable game clock and frame limiter.
pub mod clock;

pub use clock::{FramePacer, GameClock, TimingReport};
