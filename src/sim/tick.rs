//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Order within a
//! playing tick: physics, spawn, scroll, collision, scoring, command.

use rand::Rng;

use super::state::{CrashCause, GameEvent, GamePhase, GameState, Obstacle};
use crate::tuning::Tuning;

/// Abstract input command for a single tick (deterministic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    None,
    /// Upward impulse (ignored unless playing)
    Flap,
    /// Begin a run from AwaitingStart or GameOver (no-op while playing)
    Start,
}

impl Command {
    /// Decode a command tag; anything unrecognised is `None`
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "flap" => Command::Flap,
            "start" => Command::Start,
            _ => Command::None,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, command: Command, tuning: &Tuning) {
    state.events.clear();

    if !state.is_playing() {
        // Flap and None are ignored outside of a run
        if command == Command::Start {
            state.reset(tuning);
            state.events.push(GameEvent::Started);
            log::info!("Run started (seed {})", state.seed);
        }
        return;
    }

    integrate(state, tuning);

    state.tick_count += 1;
    if state.tick_count.is_multiple_of(tuning.spawn_interval) {
        spawn_pair(state, tuning);
    }

    advance_obstacles(state, tuning);

    // A crash ends the tick: no points and no flap on the same tick
    if let Some(cause) = detect_collision(state, tuning) {
        end_run(state, cause);
        return;
    }

    update_score(state, tuning);

    match command {
        Command::Flap => {
            state.entity.vel_y = tuning.lift;
            state.events.push(GameEvent::Flapped);
        }
        // Restart-while-alive is not allowed
        Command::Start | Command::None => {}
    }
}

/// Gravity integration with a solid ceiling
fn integrate(state: &mut GameState, tuning: &Tuning) {
    let entity = &mut state.entity;
    entity.vel_y += tuning.gravity;
    entity.pos.y += entity.vel_y;

    let half_h = entity.half_height();
    if entity.pos.y - half_h < 0.0 {
        entity.pos.y = half_h;
        entity.vel_y = 0.0;
    }
}

/// Spawn one top/bottom obstacle pair at the right edge of the playfield
///
/// Returns the pair ID, or `None` when the tuning leaves no room for a
/// bottom half of at least `min_obstacle_height` (see
/// [`Tuning::bottom_height_range`]).
pub fn spawn_pair(state: &mut GameState, tuning: &Tuning) -> Option<u32> {
    let Some((min_h, max_h)) = tuning.bottom_height_range() else {
        log::debug!(
            "Skipping obstacle spawn: no room for a {} px bottom half and a {} px gap",
            tuning.min_obstacle_height,
            tuning.gap_height
        );
        return None;
    };

    let bottom_h = state.rng.random_range(min_h..=max_h);
    // Clamp float rounding at the top of the range
    let top_h = (tuning.playfield_height - bottom_h - tuning.gap_height).max(0.0);

    let pair_id = state.next_obstacle_id();
    let x = tuning.playfield_width;

    // Bottom first, scoring only looks at bottom halves
    let bottom_id = state.next_obstacle_id();
    state.obstacles.push(Obstacle {
        id: bottom_id,
        pair_id,
        x,
        y: tuning.playfield_height - bottom_h,
        height: bottom_h,
        is_top: false,
        scored: false,
    });
    let top_id = state.next_obstacle_id();
    state.obstacles.push(Obstacle {
        id: top_id,
        pair_id,
        x,
        y: 0.0,
        height: top_h,
        is_top: true,
        scored: false,
    });

    state.events.push(GameEvent::Spawned { pair_id });
    log::debug!(
        "Spawned pair {} at tick {} (top {:.1}, bottom {:.1})",
        pair_id,
        state.tick_count,
        top_h,
        bottom_h
    );
    Some(pair_id)
}

/// Scroll obstacles left and drop the ones fully past the left edge
fn advance_obstacles(state: &mut GameState, tuning: &Tuning) {
    let width = tuning.obstacle_width;
    for obstacle in &mut state.obstacles {
        obstacle.x -= tuning.scroll_speed;
    }
    state.obstacles.retain(|o| o.right(width) >= 0.0);
}

/// Ground contact or strict overlap with any obstacle half
pub fn detect_collision(state: &GameState, tuning: &Tuning) -> Option<CrashCause> {
    let bounds = state.entity.bounds();

    if bounds.touches_floor(tuning.ground_y()) {
        return Some(CrashCause::Ground);
    }

    state
        .obstacles
        .iter()
        .find(|o| bounds.overlaps(&o.bounds(tuning.obstacle_width)))
        .map(|o| CrashCause::Obstacle { id: o.id })
}

fn end_run(state: &mut GameState, cause: CrashCause) {
    state.phase = GamePhase::GameOver;
    state.crash = Some(cause);
    state.best_score = state.best_score.max(state.score);
    state.events.push(GameEvent::Crashed(cause));
    log::info!(
        "Game over after {} ticks: {:?}, score {} (best {})",
        state.tick_count,
        cause,
        state.score,
        state.best_score
    );
}

/// Award a point for each bottom half the entity has fully passed
fn update_score(state: &mut GameState, tuning: &Tuning) {
    let entity_x = state.entity.pos.x;
    for obstacle in &mut state.obstacles {
        if obstacle.is_top || obstacle.scored {
            continue;
        }
        if entity_x > obstacle.right(tuning.obstacle_width) {
            obstacle.scored = true;
            state.score += 1;
            state.events.push(GameEvent::Scored {
                pair_id: obstacle.pair_id,
                score: state.score,
            });
            log::trace!("Passed pair {}, score {}", obstacle.pair_id, state.score);
        }
    }
    state.best_score = state.best_score.max(state.score);
}
