//! The bounded plane that owns every particle.
//!
//! A [`Field`] holds its particles in a plain `Vec`, addressed by index, plus
//! the last pointer position it was told about. It has one steady state:
//! built, it runs until dropped. `resize` and `set_palette` rebuild the whole
//! particle set, discarding in-flight motion.

use glam::DVec2;

use crate::config::FieldConfig;
use crate::palette::Palette;
use crate::particle::Particle;
use crate::prng::{RandomSource, Xorshift64};

/// Seed used by [`Field::new`].
pub const DEFAULT_SEED: u64 = 42;
/// Pointer position before any pointer signal arrives; far enough off-plane
/// that no particle feels it.
pub const OFF_PLANE: DVec2 = DVec2::new(-1000.0, -1000.0);

/// Owning aggregate of particles, bounds, pointer, and palette.
#[derive(Debug, Clone)]
pub struct Field<R = Xorshift64> {
    bounds: DVec2,
    particles: Vec<Particle>,
    pointer: DVec2,
    palette: Palette,
    config: FieldConfig,
    rng: R,
}

impl Field<Xorshift64> {
    /// Creates a field with the default config and seed.
    pub fn new(width: f64, height: f64, palette: Palette) -> Self {
        Self::with_seed(width, height, palette, FieldConfig::default(), DEFAULT_SEED)
    }

    /// Creates a field seeded from a [`Xorshift64`] with `seed`.
    pub fn with_seed(
        width: f64,
        height: f64,
        palette: Palette,
        config: FieldConfig,
        seed: u64,
    ) -> Self {
        Self::with_rng(width, height, palette, config, Xorshift64::new(seed))
    }
}

impl<R: RandomSource> Field<R> {
    /// Creates a field that draws every particle from `rng`.
    pub fn with_rng(width: f64, height: f64, palette: Palette, config: FieldConfig, rng: R) -> Self {
        let mut field = Self {
            bounds: DVec2::new(width, height),
            particles: Vec::new(),
            pointer: OFF_PLANE,
            palette,
            config,
            rng,
        };
        field.reseed();
        field
    }

    /// Advances every particle one step against the current pointer.
    pub fn step(&mut self) {
        let pointer = self.pointer;
        for particle in &mut self.particles {
            particle.update(pointer);
        }
    }

    /// Records `pointer` and then steps.
    pub fn step_with(&mut self, pointer: DVec2) {
        self.pointer = pointer;
        self.step();
    }

    /// Records the latest pointer position. No smoothing; last write wins.
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = DVec2::new(x, y);
    }

    /// Changes the plane size and rebuilds every particle.
    pub fn resize(&mut self, width: f64, height: f64) {
        let old = self.particles.len();
        self.bounds = DVec2::new(width, height);
        self.reseed();
        log::debug!(
            "resized field to {width}x{height}: {old} -> {} particles",
            self.particles.len()
        );
    }

    /// Swaps the palette and rebuilds every particle against it.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.reseed();
    }

    fn reseed(&mut self) {
        let count = self.config.particle_count(self.bounds);
        if count == 0 {
            log::warn!(
                "field of size {}x{} holds no particles",
                self.bounds.x,
                self.bounds.y
            );
        }
        let bounds = self.bounds;
        let palette_len = self.palette.len();
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| Particle::random(bounds, palette_len, &mut *rng))
            .collect();
        log::debug!("seeded {count} particles");
    }

    pub fn width(&self) -> f64 {
        self.bounds.x
    }

    pub fn height(&self) -> f64 {
        self.bounds.y
    }

    pub fn bounds(&self) -> DVec2 {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
