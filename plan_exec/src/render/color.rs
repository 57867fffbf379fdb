//! RGBA colours

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use embedded_graphics::pixelcolor::Rgb888;
use std::{fmt, str::FromStr};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An 8 bit per channel RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorParseError {
    #[error("Expected a colour of the form #rgb, #rrggbb or #aarrggbb, or a colour name, got \"{0}\"")]
    InvalidFormat(String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Rgba {
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const GREEN: Rgba = Rgba::rgb(0, 255, 0);
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// An opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// The same colour with full alpha
    pub fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }

    /// The same colour with the given alpha
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// CSS style name of the colour, `#rrggbb`. Alpha is not included.
    pub fn name(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    /// Parse a colour from `#rgb`, `#rrggbb`, `#aarrggbb` or one of a few common names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ColorParseError::InvalidFormat(s.to_string());

        let hex = match s.strip_prefix('#') {
            Some(h) => h,
            None => {
                return match s.to_ascii_lowercase().as_str() {
                    "red" => Ok(Rgba::RED),
                    "green" | "lime" => Ok(Rgba::GREEN),
                    "blue" => Ok(Rgba::BLUE),
                    "black" => Ok(Rgba::BLACK),
                    "white" => Ok(Rgba::WHITE),
                    "yellow" => Ok(Rgba::rgb(255, 255, 0)),
                    "cyan" => Ok(Rgba::rgb(0, 255, 255)),
                    "magenta" => Ok(Rgba::rgb(255, 0, 255)),
                    "transparent" => Ok(Rgba::TRANSPARENT),
                    _ => Err(err()),
                }
            }
        };

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|n| n * 17)
                .map_err(|_| err())
        };

        match hex.len() {
            3 => Ok(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Rgba {
                a: byte(0)?,
                r: byte(2)?,
                g: byte(4)?,
                b: byte(6)?,
            }),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Rgba> for image::Rgba<u8> {
    fn from(c: Rgba) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

/// Drops the alpha channel.
impl From<Rgba> for Rgb888 {
    fn from(c: Rgba) -> Self {
        Rgb888::new(c.r, c.g, c.b)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("#00ff00".parse::<Rgba>(), Ok(Rgba::GREEN));
        assert_eq!("#0F0".parse::<Rgba>(), Ok(Rgba::GREEN));
        assert_eq!(
            "#80ff0000".parse::<Rgba>(),
            Ok(Rgba {
                r: 255,
                g: 0,
                b: 0,
                a: 128
            })
        );
        assert_eq!(" Blue ".parse::<Rgba>(), Ok(Rgba::BLUE));

        assert!("#12345".parse::<Rgba>().is_err());
        assert!("#gg0000".parse::<Rgba>().is_err());
        assert!("greenish".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_name() {
        assert_eq!(Rgba::rgb(18, 52, 171).name(), "#1234ab");
        assert_eq!(Rgba::GREEN.with_alpha(10).name(), "#00ff00");
        assert_eq!(Rgba::GREEN.with_alpha(10).opaque(), Rgba::GREEN);
    }
}
