use std::str::FromStr;

use palette::{named, Srgb};

use crate::error::{Result, XpsError};

/// An opaque 8 bits per channel sRGB color.
pub type Color = Srgb<u8>;

/// Parses a CSS color name (`"black"`, `"turquoise"`...) or an hex code
/// (`"#cc0000"`, `"#333"`).
pub fn parse_color(text: &str) -> Result<Color> {
    let text = text.trim();
    if let Some(color) = named::from_str(&text.to_ascii_lowercase()) {
        return Ok(color);
    }
    Srgb::<u8>::from_str(text).map_err(|_| XpsError::InvalidColor(text.to_owned()))
}

#[derive(Debug, Clone, PartialEq)]
/// An ordered, non empty list of colors.
///
/// The first color is reserved for the experimental data and the envelope;
/// every other series cycles through the remaining colors.
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(XpsError::EmptyPalette);
        }
        Ok(Palette { colors })
    }

    /// Builds a palette from color names or hex codes.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let colors = names
            .iter()
            .map(|name| parse_color(name.as_ref()))
            .collect::<Result<Vec<Color>>>()?;
        Palette::new(colors)
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// The color used for experimental points and the envelope.
    pub fn reserved(&self) -> Color {
        self.colors[0]
    }

    /// The color of the `n`-th ordinary series.  A single color palette has
    /// nothing to cycle through and always returns its reserved color.
    pub fn cycle(&self, n: usize) -> Color {
        match self.colors.len() {
            1 => self.colors[0],
            len => self.colors[1 + n % (len - 1)],
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: vec![
                named::BLACK,
                named::RED,
                named::GREEN,
                named::BLUE,
                named::VIOLET,
                named::ORANGE,
                named::CYAN,
                named::MAGENTA,
                named::INDIGO,
                named::MAROON,
                named::TURQUOISE,
            ],
        }
    }
}
