//! Idle/demo mode controller
//!
//! Reads a state snapshot and picks the command a competent player would send.
//! Never mutates state; the driver feeds its output into [`super::tick`] like
//! any other input.

use super::state::{GameState, Obstacle};
use super::tick::Command;
use crate::tuning::Tuning;

/// Clearance kept between the entity's bottom edge and the bottom of the gap
const FLAP_MARGIN: f32 = 20.0;

/// Bottom half of the nearest pair the entity has not yet cleared
pub fn next_pair<'a>(state: &'a GameState, tuning: &Tuning) -> Option<&'a Obstacle> {
    let entity_left = state.entity.pos.x - state.entity.width / 2.0;
    state
        .bottom_halves()
        .filter(|o| o.right(tuning.obstacle_width) >= entity_left)
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
}

/// Height below which the entity should flap
///
/// Aims low in the gap: a full flap rises further than half the gap.
pub fn flap_line(state: &GameState, tuning: &Tuning) -> f32 {
    match next_pair(state, tuning) {
        Some(bottom) => bottom.y - state.entity.half_height() - FLAP_MARGIN,
        None => tuning.ground_y() / 2.0,
    }
}

/// Choose the command for the next tick
pub fn decide(state: &GameState, tuning: &Tuning) -> Command {
    if !state.is_playing() {
        return Command::Start;
    }

    let entity = &state.entity;
    let next_vel = entity.vel_y + tuning.gravity;
    let next_y = entity.pos.y + next_vel;

    // The flap lands after this tick's integration and moves us next tick
    let after_flap_top = next_y + tuning.lift + tuning.gravity - entity.half_height();
    if after_flap_top < 0.0 {
        return Command::None;
    }

    if next_vel > 0.0 && next_y > flap_line(state, tuning) {
        Command::Flap
    } else {
        Command::None
    }
}
