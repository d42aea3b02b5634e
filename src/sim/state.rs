//! Game state and core simulation types
//!
//! Everything the step function reads or writes lives here. Rendering gets a
//! shared reference to [`GameState`] and nothing else.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh session, waiting for the first start input
    AwaitingStart,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a restart
    GameOver,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Ground,
    Obstacle { id: u32 },
}

/// Things that happened during a tick (for logging and presentation cues)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Flapped,
    Spawned { pair_id: u32 },
    Scored { pair_id: u32, score: u32 },
    Crashed(CrashCause),
}

/// The player-controlled falling entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Centre position; `x` never changes, the world scrolls instead
    pub pos: Vec2,
    /// Vertical velocity (positive = downward)
    pub vel_y: f32,
    pub width: f32,
    pub height: f32,
    /// Circle radius for the shape renderer
    pub radius: f32,
}

impl Entity {
    /// Entity at its start position: fixed x, vertically centred, at rest
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.entity_x, tuning.playfield_height / 2.0),
            vel_y: 0.0,
            width: tuning.entity_width,
            height: tuning.entity_height,
            radius: tuning.entity_radius,
        }
    }

    /// Collision box
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.width, self.height)
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }
}

/// One half of an obstacle pair (a rectangular gate)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Shared by the top and bottom half of one spawn
    pub pair_id: u32,
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub height: f32,
    pub is_top: bool,
    /// Only meaningful on bottom halves; scoring never looks at the top half
    pub scored: bool,
}

impl Obstacle {
    /// Collision box (width is shared by every obstacle)
    pub fn bounds(&self, width: f32) -> Rect {
        Rect::new(self.x, self.y, width, self.height)
    }

    #[inline]
    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Obstacle height source, seeded from `seed`
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Obstacle pairs passed this run
    pub score: u32,
    /// Best score this session (kept across restarts, never persisted)
    pub best_score: u32,
    /// Playing ticks since the run started
    pub tick_count: u64,
    pub entity: Entity,
    /// Obstacle halves, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Why the last run ended
    pub crash: Option<CrashCause>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state waiting for the first start input
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::AwaitingStart,
            score: 0,
            best_score: 0,
            tick_count: 0,
            entity: Entity::spawn(tuning),
            obstacles: Vec::new(),
            crash: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Restore the start-of-run state and enter `Playing`
    ///
    /// Seed, RNG stream and session best survive, so consecutive runs see
    /// different (but reproducible) obstacle layouts.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.entity = Entity::spawn(tuning);
        self.obstacles.clear();
        self.score = 0;
        self.tick_count = 0;
        self.crash = None;
        self.phase = GamePhase::Playing;
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Bottom halves in spawn order (one per pair)
    pub fn bottom_halves(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| !o.is_top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let tuning = Tuning::default();
        let state = GameState::new(7, &tuning);
        assert_eq!(state.phase, GamePhase::AwaitingStart);
        assert_eq!(state.score, 0);
        assert_eq!(state.tick_count, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.entity.pos, Vec2::new(50.0, 300.0));
        assert_eq!(state.entity.vel_y, 0.0);
    }

    #[test]
    fn test_reset_keeps_session_best() {
        let tuning = Tuning::default();
        let mut state = GameState::new(7, &tuning);
        state.phase = GamePhase::GameOver;
        state.score = 4;
        state.best_score = 9;
        state.tick_count = 500;
        state.entity.pos.y = 480.0;
        state.entity.vel_y = 6.0;
        state.crash = Some(CrashCause::Ground);
        let id = state.next_obstacle_id();
        state.obstacles.push(Obstacle {
            id,
            pair_id: id,
            x: 10.0,
            y: 0.0,
            height: 100.0,
            is_top: true,
            scored: false,
        });

        state.reset(&tuning);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 9);
        assert_eq!(state.tick_count, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.crash.is_none());
        assert_eq!(state.entity, Entity::spawn(&tuning));
    }

    #[test]
    fn test_entity_bounds_follow_position() {
        let tuning = Tuning::default();
        let mut entity = Entity::spawn(&tuning);
        entity.pos.y = 100.0;
        let bounds = entity.bounds();
        assert_eq!(bounds.top, 88.0);
        assert_eq!(bounds.bottom(), 112.0);
        assert_eq!(bounds.left, 33.0);
    }

    #[test]
    fn test_obstacle_ids_are_unique() {
        let mut state = GameState::new(1, &Tuning::default());
        let a = state.next_obstacle_id();
        let b = state.next_obstacle_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(42, &Tuning::default());
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 42);
        assert_eq!(back.rng, state.rng);
        assert_eq!(back.entity, state.entity);
    }
}
