//! Maps field state to draw calls on an external raster surface.
//!
//! The adapter holds no state and never mutates the field. Any surface that
//! can fill an alpha-blended circle with a blurred glow satisfies
//! [`RasterSurface`]: the browser canvas, the CPU pixel buffer, or the
//! in-memory [`RecordingSurface`] used by tests.

use glam::DVec2;
use serde::Serialize;

use crate::color::Color;
use crate::field::Field;
use crate::prng::RandomSource;

/// Uniform fill alpha for every particle.
pub const PARTICLE_ALPHA: f64 = 0.4;
/// Glow blur radius for every particle.
pub const GLOW_BLUR: f64 = 15.0;

/// Soft halo drawn around a filled circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Glow {
    pub blur: f64,
    pub color: Color,
}

/// One filled circle, fully resolved against the palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircleCommand {
    #[serde(serialize_with = "serialize_point")]
    pub center: DVec2,
    pub radius: f64,
    pub color: Color,
    pub alpha: f64,
    pub glow: Glow,
}

fn serialize_point<S: serde::Serializer>(p: &DVec2, s: S) -> Result<S::Ok, S::Error> {
    [p.x, p.y].serialize(s)
}

/// A raster target that particles can be drawn onto.
pub trait RasterSurface {
    /// Erases the previous frame.
    fn clear(&mut self);

    /// Fills one circle with alpha blending and glow.
    fn fill_circle(&mut self, circle: &CircleCommand);
}

/// Draw commands for every particle, in particle order.
pub fn commands<R: RandomSource>(field: &Field<R>) -> impl Iterator<Item = CircleCommand> + '_ {
    let palette = field.palette();
    field.particles().iter().map(move |p| {
        let color = palette.get(p.color_index());
        CircleCommand {
            center: p.position(),
            radius: p.radius(),
            color,
            alpha: PARTICLE_ALPHA,
            glow: Glow {
                blur: GLOW_BLUR,
                color,
            },
        }
    })
}

/// Issues one filled-circle command per particle onto `surface`.
pub fn draw<R: RandomSource, S: RasterSurface + ?Sized>(field: &Field<R>, surface: &mut S) {
    for circle in commands(field) {
        surface.fill_circle(&circle);
    }
}

/// Keeps every command it receives; `clear` drops them.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<CircleCommand>,
    clears: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands drawn since the last clear.
    pub fn commands(&self) -> &[CircleCommand] {
        &self.commands
    }

    /// How many times the surface was cleared.
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl RasterSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn fill_circle(&mut self, circle: &CircleCommand) {
        self.commands.push(*circle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    #[test]
    fn one_command_per_particle_in_order() {
        let field = Field::new(1000.0, 1000.0, Palette::hero());
        let mut surface = RecordingSurface::new();
        draw(&field, &mut surface);
        assert_eq!(surface.commands().len(), field.len());
        for (cmd, p) in surface.commands().iter().zip(field.particles()) {
            assert_eq!(cmd.center, p.position());
            assert_eq!(cmd.radius, p.radius());
            assert_eq!(cmd.color, field.palette().get(p.color_index()));
        }
    }

    #[test]
    fn commands_use_uniform_alpha_and_matching_glow() {
        let field = Field::new(800.0, 600.0, Palette::hero());
        for cmd in commands(&field) {
            assert_eq!(cmd.alpha, 0.4);
            assert_eq!(cmd.glow.blur, 15.0);
            assert_eq!(cmd.glow.color, cmd.color);
        }
    }

    #[test]
    fn drawing_does_not_mutate_field() {
        let field = Field::new(800.0, 600.0, Palette::hero());
        let before = field.particles().to_vec();
        let mut surface = RecordingSurface::new();
        draw(&field, &mut surface);
        draw(&field, &mut surface);
        assert_eq!(field.particles(), before.as_slice());
        assert_eq!(surface.commands().len(), 2 * field.len());
    }

    #[test]
    fn recording_surface_clear_drops_commands() {
        let field = Field::new(400.0, 400.0, Palette::hero());
        let mut surface = RecordingSurface::new();
        draw(&field, &mut surface);
        surface.clear();
        assert!(surface.commands().is_empty());
        assert_eq!(surface.clears(), 1);
    }

    #[test]
    fn draw_accepts_trait_objects() {
        let field = Field::new(400.0, 400.0, Palette::hero());
        let mut recording = RecordingSurface::new();
        let surface: &mut dyn RasterSurface = &mut recording;
        draw(&field, surface);
        assert_eq!(recording.commands().len(), field.len());
    }

    #[test]
    fn command_serializes_center_as_pair() {
        let field = Field::new(400.0, 400.0, Palette::hero());
        let cmd = commands(&field).next().unwrap();
        let v = serde_json::to_value(cmd).unwrap();
        assert_eq!(v["center"][0], cmd.center.x);
        assert_eq!(v["alpha"], 0.4);
        assert!(v["color"].as_str().unwrap().starts_with('#'));
    }
}
