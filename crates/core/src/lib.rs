#![deny(unsafe_code)]
//! Core of the particle field: an interactive background of drifting points
//! that scatter away from the pointer.
//!
//! Provides [`Particle`] kinematics, the owning [`Field`], the stateless
//! [`render`] adapter onto any [`RasterSurface`], the frame [`Driver`],
//! CSS [`Color`]s and [`Palette`]s, the injectable [`RandomSource`] with its
//! default [`Xorshift64`], and replayable [`Seed`]s.

pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod field;
pub mod palette;
pub mod params;
pub mod particle;
pub mod prng;
pub mod render;
pub mod seed;

pub use color::Color;
pub use config::FieldConfig;
pub use driver::{Driver, FrameScheduler};
pub use error::FieldError;
pub use field::Field;
pub use palette::Palette;
pub use particle::{Particle, ParticleTraits};
pub use prng::{RandomSource, Xorshift64};
pub use render::{CircleCommand, Glow, RasterSurface, RecordingSurface};
pub use seed::Seed;

pub use glam::DVec2;
