//! Canvas 2D backend
//!
//! Plays a scene's draw commands onto a `CanvasRenderingContext2d`.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{self, DrawCommand};
use crate::settings::Settings;
use crate::sim::GameState;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Grab the 2D context of a canvas
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the backing store to the displayed size; returns the new size
    pub fn fit_to_display(&self) -> (f32, f32) {
        let rect = self.canvas.get_bounding_client_rect();
        self.canvas.set_width(rect.width() as u32);
        self.canvas.set_height(rect.height() as u32);
        (rect.width() as f32, rect.height() as f32)
    }

    /// Draw the current frame
    pub fn render(&self, state: &GameState, settings: &Settings) {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        for command in scene::build(state, settings) {
            self.draw(&command, w, h);
        }
    }

    fn draw(&self, command: &DrawCommand, w: f64, h: f64) {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear { color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(0.0, 0.0, w, h);
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
                alpha,
                glow,
            } => {
                ctx.set_fill_style_str(color);
                ctx.set_global_alpha(*alpha as f64);
                if *glow > 0.0 {
                    ctx.set_shadow_blur(*glow as f64);
                    ctx.set_shadow_color(color);
                }
                ctx.begin_path();
                let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                ctx.fill();
                ctx.set_shadow_blur(0.0);
                ctx.set_global_alpha(1.0);
            }
            DrawCommand::Text {
                pos,
                text,
                font,
                color,
            } => {
                ctx.set_fill_style_str(color);
                ctx.set_font(font);
                ctx.set_text_align("center");
                let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
            }
        }
    }
}
