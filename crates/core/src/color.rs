//! CSS-style colors for particle fills and glows.
//!
//! Palettes are authored the way a stylesheet would write them: `#rrggbb` hex
//! or `rgba(r, g, b, a)` functional notation. [`Color`] keeps components in
//! [0, 1] as `f64` and serializes back to the shortest CSS form.

use crate::error::FieldError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with straight (non-premultiplied) alpha, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Opaque color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, FieldError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FieldError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| FieldError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Self::rgb8(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        ))
    }

    /// Parses either hex notation or `rgb(r, g, b)` / `rgba(r, g, b, a)`.
    ///
    /// Channels in the functional form are 0..=255, alpha is 0..=1.
    pub fn parse(s: &str) -> Result<Self, FieldError> {
        let s = s.trim();
        let Some(args) = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Self::from_hex(s);
        };

        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(FieldError::InvalidColor(format!(
                "expected 3 or 4 components in {s:?}"
            )));
        }
        let channel = |p: &str| {
            p.parse::<u8>()
                .map_err(|e| FieldError::InvalidColor(format!("invalid channel {p:?}: {e}")))
        };
        let mut color = Self::rgb8(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
        if let Some(alpha) = parts.get(3) {
            let a = alpha
                .parse::<f64>()
                .map_err(|e| FieldError::InvalidColor(format!("invalid alpha {alpha:?}: {e}")))?;
            if !(0.0..=1.0).contains(&a) {
                return Err(FieldError::InvalidColor(format!(
                    "alpha {a} outside [0, 1]"
                )));
            }
            color.a = a;
        }
        Ok(color)
    }

    /// Hex form `#rrggbb`, ignoring alpha.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// CSS form: hex when opaque, `rgba(...)` otherwise.
    pub fn to_css(self) -> String {
        if self.a >= 1.0 {
            return self.to_hex();
        }
        let [r, g, b] = self.to_rgb8();
        format!("rgba({r}, {g}, {b}, {})", self.a)
    }

    /// Channels quantized to 8 bits with rounding.
    pub fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}
