#![deny(unsafe_code)]
//! CPU rendering for the particle field.
//!
//! [`PixelSurface`] implements the core [`RasterSurface`] contract over an
//! in-memory buffer, so the same render adapter that drives the browser
//! canvas can produce still frames offline. [`render_seed`] replays a
//! [`Seed`] and draws the result in one call.

pub mod pixel;
pub mod surface;

#[cfg(feature = "png")]
pub mod snapshot;

use particle_field_core::{render, Color, FieldError, RasterSurface, Seed};

pub use surface::PixelSurface;

/// Page background behind the hero section.
pub const DEFAULT_BACKGROUND: Color = Color {
    r: 11.0 / 255.0,
    g: 15.0 / 255.0,
    b: 25.0 / 255.0,
    a: 1.0,
};

/// Replays `seed` and draws the resulting field onto a fresh surface.
pub fn render_seed(seed: &Seed, background: Color) -> Result<PixelSurface, FieldError> {
    let field = seed.replay()?;
    let mut surface = PixelSurface::new(seed.width, seed.height, background)?;
    surface.clear();
    render::draw(&field, &mut surface);
    log::debug!(
        "rendered {} particles after {} steps",
        field.len(),
        seed.steps
    );
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_seed_matches_seed_dimensions() {
        let seed = Seed::new(120, 80, 42);
        let surface = render_seed(&seed, DEFAULT_BACKGROUND).unwrap();
        assert_eq!(surface.width(), 120);
        assert_eq!(surface.height(), 80);
    }

    #[test]
    fn render_seed_draws_something_over_background() {
        let mut seed = Seed::new(400, 300, 7);
        seed.steps = 10;
        let surface = render_seed(&seed, DEFAULT_BACKGROUND).unwrap();
        let bg = PixelSurface::new(400, 300, DEFAULT_BACKGROUND).unwrap();
        assert_ne!(surface.to_rgba8(), bg.to_rgba8());
    }

    #[test]
    fn render_seed_is_deterministic() {
        let mut seed = Seed::new(200, 200, 3);
        seed.steps = 30;
        seed.pointer = [100.0, 100.0];
        let a = render_seed(&seed, DEFAULT_BACKGROUND).unwrap();
        let b = render_seed(&seed, DEFAULT_BACKGROUND).unwrap();
        assert_eq!(a.to_rgba8(), b.to_rgba8());
    }

    #[test]
    fn render_seed_rejects_zero_size() {
        let seed = Seed::new(0, 10, 1);
        assert!(matches!(
            render_seed(&seed, DEFAULT_BACKGROUND),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn render_seed_surfaces_palette_errors() {
        let mut seed = Seed::new(10, 10, 1);
        seed.params = json!({"colors": ["nope"]});
        assert!(matches!(
            render_seed(&seed, DEFAULT_BACKGROUND),
            Err(FieldError::InvalidColor(_))
        ));
    }
}
