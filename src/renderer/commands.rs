//! Recording painter
//!
//! Captures a frame as a list of draw commands instead of pixels.

use glam::Vec2;

use super::painter::{Color, ImageId, Painter, TextAlign};
use crate::sim::Rect;

/// One recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Image {
        image: ImageId,
        rect: Rect,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
        align: TextAlign,
    },
}

/// Painter that records into a `Vec<DrawCommand>`
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text drawn this frame, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of images drawn
    pub fn image_count(&self, id: ImageId) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { image, .. } if *image == id))
            .count()
    }
}

impl Painter for CommandList {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn draw_image(&mut self, image: ImageId, rect: Rect) {
        self.commands.push(DrawCommand::Image { image, rect });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
            color,
            align,
        });
    }
}
