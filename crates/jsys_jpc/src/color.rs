//! RGBA colors and their `#rrggbb[aa]` text form.

use std::fmt;
use std::str::FromStr;

use binrw::{BinRead, BinWrite};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An RGBA color, stored on the wire as four bytes in R G B A order.
///
/// The JSON form is `#rrggbb` when the alpha channel is fully opaque and
/// `#rrggbbaa` otherwise. Parsing is permissive: hex digits in either case
/// and an optional leading `#` are accepted.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xFF {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

/// Error produced when a color string cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid color {0:?}, expected #rrggbb or #rrggbbaa")]
pub struct ColorParseError(String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(ColorParseError(s.to_owned()));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| ColorParseError(s.to_owned()))
        };
        match hex.len() {
            6 => Ok(Self::new(byte(0)?, byte(1)?, byte(2)?, 0xFF)),
            8 => Ok(Self::new(byte(0)?, byte(1)?, byte(2)?, byte(3)?)),
            _ => Err(ColorParseError(s.to_owned())),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
