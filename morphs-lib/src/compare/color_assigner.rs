use crate::config::Color;

/// How much lighter the tint of a record color is.
const TINT_FACTOR: f32 = 0.75;

const NEUTRAL: Color = Color::new(0x88, 0x88, 0x88);

/// The colors identifying one record across every comparison section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorToken {
    /// Position of the record in the full record list
    pub index: usize,
    pub base: Color,
    pub tint: Color,
}

/// Hands out record colors from a palette by record position.
///
/// The same position always yields the same token; the palette wraps around when there
/// are more records than colors.
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    palette: Vec<Color>,
}

impl ColorAssigner {
    #[must_use]
    pub fn new(palette: &[Color]) -> Self {
        Self {
            palette: palette.to_vec(),
        }
    }

    #[must_use]
    pub fn token_for(&self, position: usize) -> ColorToken {
        let base = if self.palette.is_empty() {
            NEUTRAL
        } else {
            self.palette.get(position % self.palette.len()).copied().unwrap_or(NEUTRAL)
        };

        ColorToken {
            index: position,
            base,
            tint: base.tint(TINT_FACTOR),
        }
    }

    /// Tokens for the first `count` positions.
    #[must_use]
    pub fn tokens(&self, count: usize) -> Vec<ColorToken> {
        (0..count).map(|position| self.token_for(position)).collect()
    }
}
