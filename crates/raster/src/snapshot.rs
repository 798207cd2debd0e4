//! PNG output of a [`PixelSurface`].
//!
//! Feature-gated behind `png` (default on) so builds that only need the
//! in-memory surface do not pull in the `image` crate.

use particle_field_core::FieldError;
use std::path::Path;

use crate::surface::PixelSurface;

/// Writes the surface as an RGBA PNG.
///
/// Returns `FieldError::InvalidDimensions` if the surface dimensions overflow
/// `u32`, or `FieldError::Io` on write failure.
pub fn write_png(surface: &PixelSurface, path: &Path) -> Result<(), FieldError> {
    let w = u32::try_from(surface.width()).map_err(|_| FieldError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| FieldError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, surface.to_rgba8())
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))?;
    log::info!("wrote {}x{} snapshot to {}", w, h, path.display());
    Ok(())
}
