//! A single drifting point and its per-step kinematics.
//!
//! Each step a particle wanders along a slow circle, gets pushed away from
//! the pointer when it is within [`MAX_DISTANCE`], and otherwise eases back
//! toward the anchor it was born at.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::prng::RandomSource;

/// Radius around the pointer inside which particles are repelled.
pub const MAX_DISTANCE: f64 = 200.0;
/// Phase advance of the ambient drift per step.
pub const ANGLE_STEP: f64 = 0.01;
/// Fraction of the offset from the anchor removed per undisturbed step.
pub const RELAXATION: f64 = 1.0 / 20.0;

pub const DRIFT_SPEED_RANGE: (f64, f64) = (0.1, 0.6);
pub const REPULSION_STRENGTH_RANGE: (f64, f64) = (5.0, 35.0);
pub const RADIUS_RANGE: (f64, f64) = (1.0, 4.0);

/// One simulated point with its anchor and fixed physical constants.
///
/// Only `position` and `angle` change after construction; everything else is
/// exposed read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: DVec2,
    base_position: DVec2,
    angle: f64,
    drift_speed: f64,
    repulsion_strength: f64,
    radius: f64,
    color_index: usize,
}

/// Per-particle constants for [`Particle::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleTraits {
    pub drift_speed: f64,
    pub repulsion_strength: f64,
    pub radius: f64,
    pub color_index: usize,
}

impl Particle {
    /// Creates a particle anchored at `position` with the given phase.
    pub fn new(position: DVec2, angle: f64, traits: ParticleTraits) -> Self {
        Self {
            position,
            base_position: position,
            angle,
            drift_speed: traits.drift_speed,
            repulsion_strength: traits.repulsion_strength,
            radius: traits.radius,
            color_index: traits.color_index,
        }
    }

    /// Seeds a particle uniformly inside `bounds`.
    ///
    /// Draw order is x, y, radius, repulsion strength, color, angle, drift
    /// speed. Replays depend on it; do not reorder.
    pub fn random<R: RandomSource + ?Sized>(
        bounds: DVec2,
        palette_len: usize,
        rng: &mut R,
    ) -> Self {
        let x = rng.next_f64() * bounds.x;
        let y = rng.next_f64() * bounds.y;
        let radius = rng.next_range(RADIUS_RANGE.0, RADIUS_RANGE.1);
        let repulsion_strength =
            rng.next_range(REPULSION_STRENGTH_RANGE.0, REPULSION_STRENGTH_RANGE.1);
        let color_index = rng.next_index(palette_len);
        let angle = rng.next_f64() * TAU;
        let drift_speed = rng.next_range(DRIFT_SPEED_RANGE.0, DRIFT_SPEED_RANGE.1);
        Self::new(
            DVec2::new(x, y),
            angle,
            ParticleTraits {
                drift_speed,
                repulsion_strength,
                radius,
                color_index,
            },
        )
    }

    /// Advances the particle by one step against the given pointer.
    pub fn update(&mut self, pointer: DVec2) {
        self.angle += ANGLE_STEP;
        self.position += DVec2::new(self.angle.cos(), self.angle.sin()) * self.drift_speed;

        let distance = self.position.distance(pointer);
        if distance < MAX_DISTANCE {
            self.position -= repulsion(self.position, pointer, self.repulsion_strength);
        } else {
            // Also taken when the pointer is non-finite and distance is NaN.
            self.position -= (self.position - self.base_position) * RELAXATION;
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn base_position(&self) -> DVec2 {
        self.base_position
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn drift_speed(&self) -> f64 {
        self.drift_speed
    }

    pub fn repulsion_strength(&self) -> f64 {
        self.repulsion_strength
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }
}

/// Displacement toward the pointer that a particle at `position` sheds this
/// step; callers subtract it.
///
/// The magnitude is `(MAX_DISTANCE - d) / MAX_DISTANCE * strength`, zero at
/// and beyond `MAX_DISTANCE`. A zero distance has no direction, so it yields
/// no force at all.
pub fn repulsion(position: DVec2, pointer: DVec2, strength: f64) -> DVec2 {
    let delta = pointer - position;
    let distance = delta.length();
    if !(distance > 0.0 && distance < MAX_DISTANCE) {
        return DVec2::ZERO;
    }
    let force = (MAX_DISTANCE - distance) / MAX_DISTANCE;
    delta / distance * force * strength
}
