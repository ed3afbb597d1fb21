// canvas.rs - HTML canvas backend
//
// Looks up the canvas and its 2D context, and draws through it.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::error::MountError;
use crate::render::{Rgba, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

/// Find `#id` and open a 2D context on it
pub fn acquire(window: &Window, id: &str) -> Result<CanvasSurface, MountError> {
    let document = window.document().ok_or(MountError::NoDocument)?;
    let canvas = document
        .get_element_by_id(id)
        .ok_or_else(|| MountError::MissingCanvas(id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| MountError::NotACanvas(id.to_string()))?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or(MountError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| MountError::NoContext)?;
    Ok(CanvasSurface { canvas, ctx })
}

/// Current window.innerWidth / innerHeight
pub fn viewport(window: &Window) -> (f64, f64) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

impl Surface for CanvasSurface {
    fn resize(&mut self, w: f64, h: f64) {
        self.canvas.set_width(w.max(0.0) as u32);
        self.canvas.set_height(h.max(0.0) as u32);
    }

    fn clear(&mut self, w: f64, h: f64) {
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, radius, 0.0, TAU);
        #[allow(deprecated)]
        self.ctx.set_fill_style(&JsValue::from_str(&color.css()));
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        #[allow(deprecated)]
        self.ctx.set_stroke_style(&JsValue::from_str(&color.css()));
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }
}
