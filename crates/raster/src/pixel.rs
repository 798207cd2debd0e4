//! Per-pixel compositing math shared by the CPU surface.
//!
//! Everything here is pure: blend a straight-alpha color over an opaque
//! destination, shape the circle edge and glow, and quantize to 8 bits.

use particle_field_core::Color;

/// Glow opacity relative to the fill alpha at the circle edge.
pub const GLOW_PEAK: f64 = 0.5;

/// Source-over blend of `src` at opacity `alpha` onto an opaque `dst`.
pub fn blend_over(dst: [f64; 3], src: Color, alpha: f64) -> [f64; 3] {
    let a = alpha.clamp(0.0, 1.0);
    [
        src.r * a + dst[0] * (1.0 - a),
        src.g * a + dst[1] * (1.0 - a),
        src.b * a + dst[2] * (1.0 - a),
    ]
}

/// Fraction of a pixel at `distance` from the center covered by a circle of
/// `radius`, with a one-pixel antialiased edge.
pub fn coverage(distance: f64, radius: f64) -> f64 {
    (radius + 0.5 - distance).clamp(0.0, 1.0)
}

/// Glow strength at `distance` from the center, in [0, 1].
///
/// Gaussian in the gap past the circle edge, with `blur / 2` as the width;
/// zero beyond `radius + blur` and everywhere when `blur` is not positive.
pub fn glow_falloff(distance: f64, radius: f64, blur: f64) -> f64 {
    if blur <= 0.0 || distance > radius + blur {
        return 0.0;
    }
    let gap = (distance - radius).max(0.0) / (blur / 2.0);
    (-gap * gap).exp()
}

/// Quantizes an opaque color buffer to RGBA8 with alpha 255.
pub fn to_rgba8(data: &[[f64; 3]]) -> Vec<u8> {
    data.iter()
        .flat_map(|px| {
            let [r, g, b] = px.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
            [r, g, b, 255u8]
        })
        .collect()
}
