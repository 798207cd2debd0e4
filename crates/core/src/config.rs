//! Construction-time options for a particle field.
//!
//! Options arrive as a JSON params object (from the CLI, a replay seed, or
//! the browser host) and are read with the forgiving helpers in
//! [`crate::params`]: missing or mistyped keys fall back to defaults.

use glam::DVec2;
use serde_json::{json, Value};

use crate::error::FieldError;
use crate::palette::Palette;
use crate::params::{param_f64, param_string, param_string_list};

/// Area, in square units, that one particle accounts for.
pub const DEFAULT_DENSITY: f64 = 15_000.0;
/// Upper bound on the particle count, whatever the plane size.
pub const MAX_PARTICLES: usize = 50_000;
/// Palette used when params name none.
pub const DEFAULT_PALETTE: &str = "hero";

/// Tunable options recognized when a field is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    /// Divisor `K` in `count = round(width * height / K)`.
    pub density: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
        }
    }
}

impl FieldConfig {
    /// Reads `density` from a JSON object.
    ///
    /// Non-positive or non-finite densities are ignored in favor of the
    /// default, since they would make the particle count meaningless.
    pub fn from_json(params: &Value) -> Self {
        let density = param_f64(params, "density", DEFAULT_DENSITY);
        if density.is_finite() && density > 0.0 {
            Self { density }
        } else {
            log::warn!("ignoring density {density}, using {DEFAULT_DENSITY}");
            Self::default()
        }
    }

    /// Particle count for a plane of the given size.
    ///
    /// Degenerate sizes (non-positive or non-finite) produce no particles.
    /// Counts above [`MAX_PARTICLES`] are clamped to it.
    pub fn particle_count(&self, bounds: DVec2) -> usize {
        if !bounds.is_finite() || bounds.x <= 0.0 || bounds.y <= 0.0 {
            return 0;
        }
        let count = (bounds.x * bounds.y / self.density).round();
        if count > MAX_PARTICLES as f64 {
            log::warn!(
                "{}x{} plane wants {count} particles, clamping to {MAX_PARTICLES}",
                bounds.x,
                bounds.y
            );
            return MAX_PARTICLES;
        }
        count as usize
    }

    pub fn to_json(&self) -> Value {
        json!({ "density": self.density })
    }
}

/// Resolves the palette named by params.
///
/// An explicit `colors` array of CSS strings wins over a `palette` name;
/// with neither, the hero palette is used.
pub fn palette_from_json(params: &Value) -> Result<Palette, FieldError> {
    if let Some(colors) = param_string_list(params, "colors") {
        return Palette::parse(colors.as_slice());
    }
    Palette::from_name(&param_string(params, "palette", DEFAULT_PALETTE))
}
