//! Reproducible description of a rendered frame.
//!
//! A [`Seed`] captures everything needed to rebuild a field and replay it to
//! the same state: plane size, PRNG seed, params, step count, and where the
//! pointer sat while stepping.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::{palette_from_json, FieldConfig};
use crate::error::FieldError;
use crate::field::{Field, OFF_PLANE};

fn off_plane() -> [f64; 2] {
    OFF_PLANE.to_array()
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Replay specification. Two equal seeds replay bit-identical fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    #[serde(default)]
    pub steps: usize,
    #[serde(default = "off_plane")]
    pub pointer: [f64; 2],
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
}

impl Seed {
    /// Creates a seed with empty params, zero steps, and an off-plane pointer.
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            steps: 0,
            pointer: off_plane(),
            params: empty_params(),
        }
    }

    /// Rejects zero dimensions and areas that overflow `usize`.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(FieldError::InvalidDimensions)?;
        Ok(())
    }

    /// Builds the field described by this seed, before any steps.
    pub fn build(&self) -> Result<Field, FieldError> {
        self.validate()?;
        let palette = palette_from_json(&self.params)?;
        let config = FieldConfig::from_json(&self.params);
        Ok(Field::with_seed(
            self.width as f64,
            self.height as f64,
            palette,
            config,
            self.seed,
        ))
    }

    /// Builds the field and steps it `steps` times with the recorded pointer.
    pub fn replay(&self) -> Result<Field, FieldError> {
        let mut field = self.build()?;
        let pointer = DVec2::from_array(self.pointer);
        for _ in 0..self.steps {
            field.step_with(pointer);
        }
        Ok(field)
    }
}
