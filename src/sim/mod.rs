//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, constants tuned per tick
//! - Seeded RNG only (owned by the state)
//! - Stable iteration order (obstacles kept in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use state::{CrashCause, Entity, GameEvent, GamePhase, GameState, Obstacle};
pub use tick::{Command, detect_collision, spawn_pair, tick};
