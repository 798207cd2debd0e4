//! Error types for the particle field core.
//!
//! The simulation itself never fails. Errors only arise while building the
//! inputs to a field (colors, palettes, replay seeds) or while writing output.

use thiserror::Error;

/// Errors produced while configuring or rendering a particle field.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Width or height was zero when creating a raster surface or seed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A palette name did not match any built-in palette.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// Writing a snapshot or reading a replay file failed.
    #[error("i/o error: {0}")]
    Io(String),
}
