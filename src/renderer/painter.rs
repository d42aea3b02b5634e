//! Drawing backend abstraction
//!
//! Renderers describe a frame in terms of a handful of canvas-like primitives.
//! The browser build implements them on a 2D canvas context; tests and the
//! native driver record them.

use glam::Vec2;

use crate::sim::Rect;

/// Linear RGBA, 0..1
pub type Color = [f32; 4];

/// Images a renderer may ask for (only used when they finished loading)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    Background,
    Entity,
}

impl ImageId {
    /// Asset path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            ImageId::Background => "assets/background.jpg",
            ImageId::Entity => "assets/bird.png",
        }
    }
}

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Canvas-style drawing primitives
pub trait Painter {
    /// Wipe the whole surface
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Draw a loaded image stretched into `rect`
    fn draw_image(&mut self, image: ImageId, rect: Rect);
    /// Draw text with its baseline at `pos.y`
    fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, align: TextAlign);
}

/// CSS color string for canvas fill/stroke styles
pub fn css_color(color: Color) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color() {
        assert_eq!(css_color([1.0, 0.0, 0.0, 1.0]), "rgba(255, 0, 0, 1)");
        assert_eq!(css_color([0.0, 0.5, 2.0, 0.5]), "rgba(0, 128, 255, 0.5)");
    }
}
