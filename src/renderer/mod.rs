//! 2D rendering module
//!
//! Scenes draw through the [`Surface`] trait. The browser build backs it with
//! a canvas 2D context; tests back it with a recorder.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use draw::{draw_breakout, draw_pong};

use glam::Vec2;

use crate::sim::Rect;

/// sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    pub const TRANSPARENT: Self = Self::rgb(0, 0, 0).with_alpha(0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string, `#rrggbb` when opaque
    pub fn css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a.max(0.0))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub family: &'static str,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    /// CSS font shorthand
    pub fn font(&self) -> String {
        format!("{}px {}", self.size_px, self.family)
    }
}

/// Immediate-mode drawing target
pub trait Surface {
    /// Erase the whole surface
    fn clear(&mut self);
    /// Glow applied to subsequent fills; a zero blur turns it off
    fn set_glow(&mut self, color: Color, blur: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_rect(&mut self, rect: &Rect, color: Color);
    /// `pos` is the text baseline anchor
    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_colors() {
        assert_eq!(Color::rgb(0x00, 0xff, 0xcc).css(), "#00ffcc");
        assert_eq!(
            Color::rgb(0, 255, 204).with_alpha(0.25).css(),
            "rgba(0, 255, 204, 0.25)"
        );
        assert_eq!(Color::TRANSPARENT.css(), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn test_font_shorthand() {
        let style = TextStyle {
            size_px: 20.0,
            family: "Orbitron, sans-serif",
            color: Color::WHITE,
            align: TextAlign::Left,
        };
        assert_eq!(style.font(), "20px Orbitron, sans-serif");
    }
}
