//! Presentation layer
//!
//! One [`Renderer`] interface, two implementations picked once at startup:
//! [`SpriteRenderer`] when the image assets loaded, [`ShapeRenderer`] as the
//! flat-color fallback. Renderers only ever see `&GameState`.

pub mod commands;
pub mod painter;

pub use commands::{CommandList, DrawCommand};
pub use painter::{Color, ImageId, Painter, TextAlign, css_color};

use glam::Vec2;

use crate::sim::{Entity, GamePhase, GameState, Obstacle, Rect};
use crate::tuning::Tuning;

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const SKY: Color = [0.439, 0.773, 0.808, 1.0];
    pub const GROUND: Color = [0.871, 0.847, 0.584, 1.0];
    pub const GROUND_EDGE: Color = [0.329, 0.227, 0.110, 1.0];
    pub const OBSTACLE: Color = [0.0, 0.502, 0.0, 1.0];
    pub const OBSTACLE_CAP: Color = [0.0, 0.392, 0.0, 1.0];
    pub const OUTLINE: Color = [0.0, 0.0, 0.0, 1.0];
    pub const ENTITY: Color = [1.0, 1.0, 0.0, 1.0];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const GAME_OVER: Color = [1.0, 0.0, 0.0, 1.0];
}

/// Obstacle cap: slightly wider than the body, on the gap side
const CAP_HEIGHT: f32 = 15.0;
const CAP_OVERHANG: f32 = 3.0;
const OUTLINE_WIDTH: f32 = 3.0;

const HUD_TEXT_SIZE: f32 = 30.0;
const TITLE_TEXT_SIZE: f32 = 50.0;
const BODY_TEXT_SIZE: f32 = 25.0;

/// Draws a full frame from a state snapshot
pub trait Renderer {
    fn name(&self) -> &'static str;

    /// Sky and ground
    fn draw_backdrop(&self, tuning: &Tuning, painter: &mut dyn Painter);

    fn draw_entity(&self, entity: &Entity, painter: &mut dyn Painter);

    /// Whole frame: backdrop, obstacles, entity, then HUD or overlay
    fn render(&self, state: &GameState, tuning: &Tuning, painter: &mut dyn Painter) {
        painter.clear(tuning.playfield_width, tuning.playfield_height);
        self.draw_backdrop(tuning, painter);
        draw_obstacles(&state.obstacles, tuning.obstacle_width, painter);
        self.draw_entity(&state.entity, painter);
        draw_overlay(state, tuning, painter);
    }
}

/// Image-based renderer (background and entity sprites)
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteRenderer;

impl Renderer for SpriteRenderer {
    fn name(&self) -> &'static str {
        "sprite"
    }

    fn draw_backdrop(&self, tuning: &Tuning, painter: &mut dyn Painter) {
        let full = Rect::new(0.0, 0.0, tuning.playfield_width, tuning.playfield_height);
        // Solid fill shows through transparent regions of the image
        painter.fill_rect(full, colors::SKY);
        painter.draw_image(ImageId::Background, full);
    }

    fn draw_entity(&self, entity: &Entity, painter: &mut dyn Painter) {
        painter.draw_image(ImageId::Entity, entity.bounds());
    }
}

/// Flat-color fallback when images are unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeRenderer;

impl Renderer for ShapeRenderer {
    fn name(&self) -> &'static str {
        "shape"
    }

    fn draw_backdrop(&self, tuning: &Tuning, painter: &mut dyn Painter) {
        painter.fill_rect(
            Rect::new(0.0, 0.0, tuning.playfield_width, tuning.playfield_height),
            colors::SKY,
        );
        let ground = Rect::new(
            0.0,
            tuning.ground_y(),
            tuning.playfield_width,
            tuning.ground_height,
        );
        painter.fill_rect(ground, colors::GROUND);
        painter.fill_rect(
            Rect::new(0.0, tuning.ground_y(), tuning.playfield_width, 4.0),
            colors::GROUND_EDGE,
        );
    }

    fn draw_entity(&self, entity: &Entity, painter: &mut dyn Painter) {
        painter.fill_circle(entity.pos, entity.radius, colors::ENTITY);
    }
}

/// Pick the renderer for the assets that are available
pub fn select_renderer(images_ready: bool) -> Box<dyn Renderer> {
    if images_ready {
        Box::new(SpriteRenderer)
    } else {
        Box::new(ShapeRenderer)
    }
}

/// Obstacle bodies with an outlined cap facing the gap
pub fn draw_obstacles(obstacles: &[Obstacle], width: f32, painter: &mut dyn Painter) {
    for obstacle in obstacles {
        let body = obstacle.bounds(width);
        painter.fill_rect(body, colors::OBSTACLE);
        painter.stroke_rect(body, colors::OUTLINE, OUTLINE_WIDTH);

        let cap_top = if obstacle.is_top {
            body.bottom() - CAP_HEIGHT
        } else {
            body.top
        };
        let cap = Rect::new(
            body.left - CAP_OVERHANG,
            cap_top,
            width + CAP_OVERHANG * 2.0,
            CAP_HEIGHT.min(body.height),
        );
        painter.fill_rect(cap, colors::OBSTACLE_CAP);
        painter.stroke_rect(cap, colors::OUTLINE, OUTLINE_WIDTH);
    }
}

/// Score HUD while playing, prompts otherwise
pub fn draw_overlay(state: &GameState, tuning: &Tuning, painter: &mut dyn Painter) {
    let center_x = tuning.playfield_width / 2.0;
    let center_y = tuning.playfield_height / 2.0;

    match state.phase {
        GamePhase::Playing => {
            painter.fill_text(
                &format!("Score: {}", state.score),
                Vec2::new(10.0, 30.0),
                HUD_TEXT_SIZE,
                colors::TEXT,
                TextAlign::Left,
            );
        }
        GamePhase::AwaitingStart => {
            painter.fill_text(
                "Press SPACE or click to start",
                Vec2::new(center_x, center_y + 65.0),
                BODY_TEXT_SIZE,
                colors::TEXT,
                TextAlign::Center,
            );
        }
        GamePhase::GameOver => {
            painter.fill_text(
                "GAME OVER",
                Vec2::new(center_x, center_y - 25.0),
                TITLE_TEXT_SIZE,
                colors::GAME_OVER,
                TextAlign::Center,
            );
            painter.fill_text(
                &format!("Final score: {}", state.score),
                Vec2::new(center_x, center_y + 25.0),
                BODY_TEXT_SIZE,
                colors::TEXT,
                TextAlign::Center,
            );
            painter.fill_text(
                "Press SPACE to restart",
                Vec2::new(center_x, center_y + 65.0),
                BODY_TEXT_SIZE,
                colors::TEXT,
                TextAlign::Center,
            );
            if state.best_score > 0 {
                painter.fill_text(
                    &format!("Best: {}", state.best_score),
                    Vec2::new(center_x, center_y + 105.0),
                    BODY_TEXT_SIZE,
                    colors::TEXT,
                    TextAlign::Center,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Command, spawn_pair, tick};

    fn frame(renderer: &dyn Renderer, state: &GameState, tuning: &Tuning) -> CommandList {
        let mut list = CommandList::new();
        renderer.render(state, tuning, &mut list);
        list
    }

    #[test]
    fn test_select_renderer() {
        assert_eq!(select_renderer(true).name(), "sprite");
        assert_eq!(select_renderer(false).name(), "shape");
    }

    #[test]
    fn test_sprite_renderer_uses_images() {
        let tuning = Tuning::default();
        let state = GameState::new(1, &tuning);
        let list = frame(&SpriteRenderer, &state, &tuning);

        assert_eq!(list.image_count(ImageId::Background), 1);
        assert_eq!(list.image_count(ImageId::Entity), 1);
        assert!(
            !list
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::FillCircle { .. }))
        );
    }

    #[test]
    fn test_shape_renderer_draws_circle() {
        let tuning = Tuning::default();
        let state = GameState::new(1, &tuning);
        let list = frame(&ShapeRenderer, &state, &tuning);

        assert_eq!(list.image_count(ImageId::Background), 0);
        assert_eq!(list.image_count(ImageId::Entity), 0);
        assert!(list.commands.contains(&DrawCommand::FillCircle {
            center: state.entity.pos,
            radius: tuning.entity_radius,
            color: colors::ENTITY,
        }));
    }

    #[test]
    fn test_frame_starts_with_clear() {
        let tuning = Tuning::default();
        let state = GameState::new(1, &tuning);
        let list = frame(&ShapeRenderer, &state, &tuning);
        assert_eq!(
            list.commands[0],
            DrawCommand::Clear {
                width: 400.0,
                height: 600.0
            }
        );
    }

    #[test]
    fn test_obstacle_caps_face_gap() {
        let tuning = Tuning::default();
        let mut state = GameState::new(3, &tuning);
        spawn_pair(&mut state, &tuning).unwrap();

        let mut list = CommandList::new();
        draw_obstacles(&state.obstacles, tuning.obstacle_width, &mut list);

        let caps: Vec<Rect> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color } if *color == colors::OBSTACLE_CAP => {
                    Some(*rect)
                }
                _ => None,
            })
            .collect();
        assert_eq!(caps.len(), 2);

        let bottom = &state.obstacles[0];
        let top = &state.obstacles[1];
        assert_eq!(caps[0].top, bottom.y);
        assert!((caps[1].bottom() - top.height).abs() < 1e-3);
        assert_eq!(caps[0].width, tuning.obstacle_width + 6.0);
    }

    #[test]
    fn test_overlay_text_per_phase() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);

        let list = frame(&ShapeRenderer, &state, &tuning);
        assert_eq!(list.texts(), vec!["Press SPACE or click to start"]);

        tick(&mut state, Command::Start, &tuning);
        let list = frame(&ShapeRenderer, &state, &tuning);
        assert_eq!(list.texts(), vec!["Score: 0"]);

        state.score = 3;
        state.entity.pos.y = tuning.ground_y();
        tick(&mut state, Command::None, &tuning);
        assert_eq!(state.phase, GamePhase::GameOver);
        let list = frame(&ShapeRenderer, &state, &tuning);
        assert_eq!(
            list.texts(),
            vec![
                "GAME OVER",
                "Final score: 3",
                "Press SPACE to restart",
                "Best: 3"
            ]
        );
    }
}
