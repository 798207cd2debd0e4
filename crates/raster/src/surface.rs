//! CPU raster surface: an opaque RGB buffer that particles composite onto.

use particle_field_core::{CircleCommand, Color, FieldError, RasterSurface};

use crate::pixel::{blend_over, coverage, glow_falloff, to_rgba8, GLOW_PEAK};

/// Row-major opaque pixel buffer with a solid background.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    background: Color,
    data: Vec<[f64; 3]>,
}

impl PixelSurface {
    /// Allocates a surface filled with `background` (its alpha is ignored).
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero or
    /// the area overflows `usize`.
    pub fn new(width: usize, height: usize, background: Color) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(FieldError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            background,
            data: vec![rgb(background); len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[f64; 3]> {
        (x < self.width && y < self.height).then(|| self.data[y * self.width + x])
    }

    /// RGBA8 bytes, `width * height * 4` long.
    pub fn to_rgba8(&self) -> Vec<u8> {
        to_rgba8(&self.data)
    }

    /// Half-open pixel range `[lo, hi)` along one axis touched by a disc
    /// reaching `reach` from `center`.
    fn span(center: f64, reach: f64, len: usize) -> (usize, usize) {
        let lo = (center - reach).floor().max(0.0);
        let hi = (center + reach).ceil().min(len as f64);
        if hi <= lo {
            return (0, 0);
        }
        (lo as usize, hi as usize)
    }
}

fn rgb(c: Color) -> [f64; 3] {
    [c.r, c.g, c.b]
}

impl RasterSurface for PixelSurface {
    fn clear(&mut self) {
        self.data.fill(rgb(self.background));
    }

    fn fill_circle(&mut self, circle: &CircleCommand) {
        if !circle.center.is_finite() || circle.radius.is_nan() || circle.radius <= 0.0 {
            return;
        }
        let fill_alpha = circle.alpha * circle.color.a;
        let glow_alpha = circle.alpha * circle.glow.color.a * GLOW_PEAK;
        let reach = circle.radius + circle.glow.blur.max(0.0) + 0.5;
        let (x0, x1) = Self::span(circle.center.x, reach, self.width);
        let (y0, y1) = Self::span(circle.center.y, reach, self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f64 + 0.5 - circle.center.x;
                let dy = y as f64 + 0.5 - circle.center.y;
                let d = (dx * dx + dy * dy).sqrt();

                let px = &mut self.data[y * self.width + x];
                let glow = glow_falloff(d, circle.radius, circle.glow.blur);
                if glow > 0.0 {
                    *px = blend_over(*px, circle.glow.color, glow_alpha * glow);
                }
                let body = coverage(d, circle.radius);
                if body > 0.0 {
                    *px = blend_over(*px, circle.color, fill_alpha * body);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_field_core::{DVec2, Glow};

    const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    fn circle(x: f64, y: f64, radius: f64, blur: f64) -> CircleCommand {
        let color = Color::rgb8(255, 255, 255);
        CircleCommand {
            center: DVec2::new(x, y),
            radius,
            color,
            alpha: 0.4,
            glow: Glow { blur, color },
        }
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(PixelSurface::new(0, 10, BLACK).is_err());
        assert!(PixelSurface::new(10, 0, BLACK).is_err());
        assert!(PixelSurface::new(usize::MAX, 2, BLACK).is_err());
    }

    #[test]
    fn new_fills_background() {
        let s = PixelSurface::new(4, 3, Color::rgb8(255, 0, 0)).unwrap();
        assert_eq!(s.pixel(3, 2), Some([1.0, 0.0, 0.0]));
        assert_eq!(s.pixel(4, 0), None);
    }

    #[test]
    fn circle_center_gets_fill_alpha_over_glow() {
        let mut s = PixelSurface::new(32, 32, BLACK).unwrap();
        s.fill_circle(&circle(16.0, 16.0, 3.0, 0.0));
        let [r, _, _] = s.pixel(15, 15).unwrap();
        assert!((r - 0.4).abs() < 1e-9, "center value {r}");
    }

    #[test]
    fn glow_lights_pixels_beyond_radius() {
        let mut s = PixelSurface::new(64, 64, BLACK).unwrap();
        s.fill_circle(&circle(32.0, 32.0, 2.0, 15.0));
        let near = s.pixel(38, 31).unwrap()[0];
        let far = s.pixel(46, 31).unwrap()[0];
        let outside = s.pixel(60, 31).unwrap()[0];
        assert!(near > far && far > 0.0, "near {near}, far {far}");
        assert_eq!(outside, 0.0);
    }

    #[test]
    fn off_surface_and_non_finite_circles_are_ignored() {
        let mut s = PixelSurface::new(16, 16, BLACK).unwrap();
        s.fill_circle(&circle(-500.0, -500.0, 3.0, 15.0));
        s.fill_circle(&circle(f64::NAN, 8.0, 3.0, 15.0));
        s.fill_circle(&circle(8.0, 8.0, 0.0, 15.0));
        assert!(s.to_rgba8().chunks(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn clear_restores_background() {
        let mut s = PixelSurface::new(16, 16, BLACK).unwrap();
        s.fill_circle(&circle(8.0, 8.0, 3.0, 15.0));
        s.clear();
        assert!(s.to_rgba8().chunks(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn translucent_palette_colors_fade_the_fill() {
        let mut s = PixelSurface::new(16, 16, BLACK).unwrap();
        let mut c = circle(8.0, 8.0, 3.0, 0.0);
        c.color.a = 0.5;
        s.fill_circle(&c);
        let [r, _, _] = s.pixel(7, 7).unwrap();
        assert!((r - 0.2).abs() < 1e-9, "center value {r}");
    }

    #[test]
    fn to_rgba8_has_four_bytes_per_pixel() {
        let s = PixelSurface::new(8, 4, BLACK).unwrap();
        assert_eq!(s.to_rgba8().len(), 8 * 4 * 4);
    }
}
