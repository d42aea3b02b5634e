//! Skyflap - A one-button gate runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, scoring)
//! - `renderer`: Presentation behind a `Renderer` trait (sprite or shape fallback)
//! - `platform`: Input translation and fixed-timestep frame clock
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Simulation steps per second the per-tick constants are tuned for
    pub const TICK_RATE: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (canvas pixels)
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Entity defaults - sprite box is the collision box
    pub const ENTITY_X: f32 = 50.0;
    pub const ENTITY_WIDTH: f32 = 34.0;
    pub const ENTITY_HEIGHT: f32 = 24.0;
    pub const ENTITY_RADIUS: f32 = 15.0;

    /// Velocity added per tick (pixels/tick²)
    pub const GRAVITY: f32 = 0.8;
    /// Velocity set by a flap (pixels/tick, negative = up)
    pub const LIFT: f32 = -12.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const GAP_HEIGHT: f32 = 150.0;
    pub const MIN_OBSTACLE_HEIGHT: f32 = 100.0;
    /// Pixels per tick
    pub const SCROLL_SPEED: f32 = 2.0;
    /// Ticks between spawns (2 seconds at 60 Hz)
    pub const SPAWN_INTERVAL: u64 = 120;
}
