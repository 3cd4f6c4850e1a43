//! Turns the winning quantized colour into the colour that is shown.

use palette::{FromColor, Hsl as PaletteHsl, Srgb};
use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// How far saturation is scaled when desaturating (70% of the way to gray).
pub const DEFAULT_SATURATION_FACTOR: f32 = 0.3;

/// Resolver policy.
///
/// With `desaturate` set the candidate is pulled towards gray in HSL space,
/// keeping hue and lightness. Without it the quantized candidate is returned
/// untouched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub desaturate: bool,
    pub saturation_factor: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            desaturate: true,
            saturation_factor: DEFAULT_SATURATION_FACTOR,
        }
    }
}

impl ResolverConfig {
    pub fn raw() -> Self {
        Self { desaturate: false, ..Self::default() }
    }
}

/// HSL with every component normalised to `0..=1` (hue in `0..1`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

#[inline]
fn to_u8(c: f32) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn rgb_to_hsl(color: Rgb) -> Hsl {
    let rgb: Srgb<f32> = Srgb::new(color.r, color.g, color.b).into_format();
    let hsl: PaletteHsl = PaletteHsl::from_color(rgb);
    Hsl {
        h: (hsl.hue.into_positive_degrees() / 360.0).rem_euclid(1.0),
        s: hsl.saturation,
        l: hsl.lightness,
    }
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let hsl: PaletteHsl = PaletteHsl::new(hsl.h * 360.0, hsl.s, hsl.l);
    let rgb: Srgb<f32> = Srgb::from_color(hsl);
    Rgb::new(to_u8(rgb.red), to_u8(rgb.green), to_u8(rgb.blue))
}

/// Scale the saturation of `color` by `factor`, keeping hue and lightness.
pub fn desaturate(color: Rgb, factor: f32) -> Rgb {
    let hsl = rgb_to_hsl(color);
    hsl_to_rgb(Hsl {
        s: (hsl.s * factor).clamp(0.0, 1.0),
        ..hsl
    })
}

pub fn resolve(candidate: Rgb, config: &ResolverConfig) -> Rgb {
    if config.desaturate {
        desaturate(candidate, config.saturation_factor)
    } else {
        candidate
    }
}
