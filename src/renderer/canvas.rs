//! Canvas 2D backend

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, Surface, TextStyle};
use crate::sim::Rect;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D canvas context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Resize the backing store; returns the new size in pixels
    pub fn resize(&mut self, width: u32, height: u32) -> Vec2 {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.size()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn set_glow(&mut self, color: Color, blur: f32) {
        self.ctx.set_shadow_color(&color.css());
        self.ctx.set_shadow_blur(blur as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_err()
        {
            // Negative radius
            return;
        }
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.ctx.set_font(&style.font());
        self.ctx.set_text_align(style.align.as_str());
        self.ctx.set_fill_style_str(&style.color.css());
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
