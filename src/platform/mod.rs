//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (keys, clicks, touches → commands)
//! - Time/ticks (fixed timestep accumulator)

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{Binding, InputEvent, InputQueue};
