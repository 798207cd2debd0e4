//! `RasterSurface` over a 2D canvas context.

use std::f64::consts::TAU;

use particle_field_core::{CircleCommand, RasterSurface};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    /// Sets the backing store size in device pixels.
    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl RasterSurface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_circle(&mut self, circle: &CircleCommand) {
        self.ctx.begin_path();
        // arc only throws for a negative radius.
        if self
            .ctx
            .arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&circle.color.to_css());
        self.ctx.set_global_alpha(circle.alpha);
        self.ctx.set_shadow_blur(circle.glow.blur);
        self.ctx.set_shadow_color(&circle.glow.color.to_css());
        self.ctx.fill();
    }
}
