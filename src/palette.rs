//! Named colors shared by every effect.

use crate::foundation::core::Rgba8Premul;
use serde::{Deserialize, Serialize};

/// One palette entry. `hex` is the packed `0xRRGGBB` value; `r`, `g` and `b` are derived
/// from it and always agree with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Packed `0xRRGGBB`.
    pub hex: u32,
}

impl PaletteColor {
    /// Build an entry from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub const fn from_hex(hex: u32) -> Self {
        let hex = hex & 0x00ff_ffff;
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
            hex,
        }
    }

    /// Opaque premultiplied color for the raster backend.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        Rgba8Premul::opaque(self.r, self.g, self.b)
    }
}

impl<'de> Deserialize<'de> for PaletteColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Packed(u32),
            Hex(String),
            Rgb { r: u8, g: u8, b: u8 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Packed(v) => {
                if v > 0x00ff_ffff {
                    return Err(serde::de::Error::custom(format!(
                        "packed color {v:#x} exceeds 0xffffff"
                    )));
                }
                Ok(Self::from_hex(v))
            }
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Rgb { r, g, b } => Ok(Self::from_hex(
                (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b),
            )),
        }
    }
}

fn parse_hex(s: &str) -> Result<PaletteColor, String> {
    let t = s.trim();
    let t = t
        .strip_prefix('#')
        .or_else(|| t.strip_prefix("0x"))
        .unwrap_or(t);
    if t.len() != 6 {
        return Err(format!("hex color '{s}' must have 6 digits"));
    }
    let v = u32::from_str_radix(t, 16).map_err(|e| format!("invalid hex color '{s}': {e}"))?;
    Ok(PaletteColor::from_hex(v))
}

/// The fixed color set consumed by the effects and the stage background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Stage clear color.
    pub background: PaletteColor,
    /// Horizontal wipe.
    pub middleground: PaletteColor,
    /// Unused by the built-in effects; kept so custom palettes stay complete.
    pub foreground: PaletteColor,
    /// Vertical wipe.
    pub highlight: PaletteColor,
    /// Third flash variant.
    pub accent: PaletteColor,
    /// Second flash variant and piston bars.
    pub white: PaletteColor,
    /// First flash variant.
    pub black: PaletteColor,
    /// Whether the palette is a dark theme.
    pub is_dark: bool,
}

impl Palette {
    /// The built-in light palette.
    pub const DEFAULT: Palette = Palette {
        background: PaletteColor::from_hex(0xb5b5b5),
        middleground: PaletteColor::from_hex(0x8da4aa),
        foreground: PaletteColor::from_hex(0xe34f0c),
        highlight: PaletteColor::from_hex(0xa38d74),
        accent: PaletteColor::from_hex(0xffc5d7),
        white: PaletteColor::from_hex(0xffffff),
        black: PaletteColor::from_hex(0x000000),
        is_dark: false,
    };

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<PaletteColor> {
        Some(match name {
            "background" => self.background,
            "middleground" => self.middleground,
            "foreground" => self.foreground,
            "highlight" => self.highlight,
            "accent" => self.accent,
            "white" => self.white,
            "black" => self.black,
            _ => return None,
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
#[path = "../tests/unit/palette.rs"]
mod tests;
