//! Discrete palettes that particles index into.
//!
//! Each particle picks one color index at creation and keeps it for life, so
//! a palette here is an ordered list of stops rather than a gradient.

use crate::color::Color;
use crate::error::FieldError;

const HERO: &[&str] = &["#1e40af", "#3b82f6", "#60a5fa", "#0ea5e9"];
const PROJECTS: &[&str] = &[
    "rgba(59, 130, 246, 0.2)",
    "rgba(37, 99, 235, 0.15)",
    "rgba(29, 78, 216, 0.1)",
];
const CYAN: &[&str] = &["#0891b2", "#06b6d4", "#22d3ee", "#67e8f9"];
const MONOCHROME: &[&str] = &["#4b5563", "#9ca3af", "#e5e7eb"];

/// Names accepted by [`Palette::from_name`], in listing order.
const PALETTE_NAMES: &[&str] = &["hero", "projects", "cyan", "monochrome"];

/// An ordered, non-empty list of particle colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Requires at least one color.
    pub fn new(colors: Vec<Color>) -> Result<Self, FieldError> {
        if colors.is_empty() {
            return Err(FieldError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Parses CSS color strings (hex or `rgba()`), in order.
    pub fn parse<S: AsRef<str>>(colors: &[S]) -> Result<Self, FieldError> {
        let colors = colors
            .iter()
            .map(|c| Color::parse(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Looks up a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        let stops = match name {
            "hero" => HERO,
            "projects" => PROJECTS,
            "cyan" => CYAN,
            "monochrome" => MONOCHROME,
            _ => return Err(FieldError::UnknownPalette(name.to_string())),
        };
        Self::parse(stops)
    }

    /// Names of all built-in palettes.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    /// Four blue and cyan tones used behind the hero section.
    pub fn hero() -> Self {
        Self::parse(HERO).expect("hero palette colors are valid")
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, wrapping so stale indices never panic.
    pub fn get(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::hero()
    }
}
