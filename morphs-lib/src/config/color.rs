use core::fmt;
use core::str::FromStr;
use palette::{Hsl, IntoColor, Lighten, Srgb};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An sRGB color, written as `#rrggbb` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub Srgb<u8>);

impl Color {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    /// Lowercase `#rrggbb` form.
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }

    /// A lighter version of this color, moving `factor` of the way towards white in HSL space.
    #[must_use]
    pub fn tint(self, factor: f32) -> Self {
        let hsl: Hsl = self.0.into_format::<f32>().into_color();
        let rgb: Srgb<f32> = hsl.lighten(factor).into_color();
        Self(rgb.into_format())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').ok_or_else(|| format!("color '{s}' must start with '#'"))?;
        if digits.len() != 6 {
            return Err(format!("color '{s}' must have the form #rrggbb"));
        }

        Srgb::<u8>::from_str(digits)
            .map(Self)
            .map_err(|e| format!("invalid color '{s}': {e}"))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
