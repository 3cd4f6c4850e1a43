use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sampler::QuantizedColor;

/// An 8-bit sRGB colour without alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS functional notation, e.g. `rgb(16,0,240)`.
    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// Lower-case `#rrggbb`; every channel keeps both digits.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// The `(rgb(...), #rrggbb)` pair handed to whatever displays the result.
pub fn to_display_strings(color: Rgb) -> (String, String) {
    (color.to_css(), color.to_hex())
}

/// Outcome of one extraction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DominantColor {
    /// Colour after the resolver policy was applied.
    pub color: Rgb,
    /// Most frequent quantized colour before resolving.
    pub candidate: QuantizedColor,
    /// Number of pixels that fell into `candidate`.
    pub count: u32,
    pub rgb: String,
    pub hex: String,
}

impl DominantColor {
    pub fn new(color: Rgb, candidate: QuantizedColor, count: u32) -> Self {
        let (rgb, hex) = to_display_strings(color);
        Self { color, candidate, count, rgb, hex }
    }
}
