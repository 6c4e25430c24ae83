use std::fmt;
use std::str::FromStr;

use crossterm::style::Color;
use thiserror::Error;

/// An 8 bit per channel color with alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    /// The same hue with a different opacity
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// Interpolate every channel, `p = 1` yields `self` and `p = 0` yields `other`.
    pub fn lerp(&self, other: &Rgba, p: f64) -> Rgba {
        assert!((0f64..=1f64).contains(&p), "lerp p lives in [0, 1]");

        // interpolate a channel
        let f = |a: u8, b: u8| ((a as f64) * p + (b as f64) * (1f64 - p)).round() as u8;

        Rgba {
            r: f(self.r, other.r),
            g: f(self.g, other.g),
            b: f(self.b, other.b),
            a: f(self.a, other.a),
        }
    }

    /// Composite this color on top of an opaque `background`. The result is opaque.
    pub fn over(&self, background: Rgba) -> Rgba {
        let p = self.a as f64 / u8::MAX as f64;

        self.lerp(&background, p).with_alpha(u8::MAX)
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Expected 6 or 8 hex digits, got {len}")]
    Length { len: usize },

    #[error("Invalid hex digits in \"{str}\"")]
    InvalidHex { str: String },
}

/// Parses `#rrggbb` or `#rrggbbaa`. The leading `#` is optional.
impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex { str: s.to_string() });
        }

        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorError::Length { len: digits.len() });
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidHex { str: s.to_string() })
        };

        let a = if digits.len() == 8 {
            channel(6)?
        } else {
            u8::MAX
        };

        Ok(Rgba::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgba { r, g, b, a } = self;

        write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}
