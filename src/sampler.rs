//! Pixel sampling, quantization and frequency counting.
//!
//! Every channel is floored to a multiple of [`BUCKET_WIDTH`], so the whole
//! colour space collapses into 16³ buckets. Only fully opaque pixels whose
//! quantized brightness sits strictly between [`MIN_BRIGHTNESS`] and
//! [`MAX_BRIGHTNESS`] are counted.

use serde::Serialize;

use crate::buffer::PixelBuffer;
use crate::color::Rgb;

/// Width of a quantization bucket per channel.
pub const BUCKET_WIDTH: u8 = 16;

/// Exclusive lower bound on the mean of the quantized channels.
pub const MIN_BRIGHTNESS: u32 = 60;

/// Exclusive upper bound on the mean of the quantized channels.
pub const MAX_BRIGHTNESS: u32 = 200;

const LEVELS: usize = 256 / BUCKET_WIDTH as usize;

#[inline(always)]
pub fn quantize_channel(value: u8) -> u8 {
    (value / BUCKET_WIDTH) * BUCKET_WIDTH
}

/// A colour whose channels are all multiples of [`BUCKET_WIDTH`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct QuantizedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl QuantizedColor {
    pub fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: quantize_channel(r),
            g: quantize_channel(g),
            b: quantize_channel(b),
        }
    }

    /// `r * 65536 + g * 256 + b`
    pub fn packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Mean of the three channels lies in the open mid-range band.
    ///
    /// Compared on the channel sum so that a mean of exactly 60 or 200 is
    /// excluded without going through floating point.
    pub fn is_mid_brightness(self) -> bool {
        let sum = self.r as u32 + self.g as u32 + self.b as u32;
        sum > MIN_BRIGHTNESS * 3 && sum < MAX_BRIGHTNESS * 3
    }

    fn bucket(self) -> usize {
        let level = |c: u8| (c / BUCKET_WIDTH) as usize;
        (level(self.r) * LEVELS + level(self.g)) * LEVELS + level(self.b)
    }
}

impl From<QuantizedColor> for Rgb {
    fn from(q: QuantizedColor) -> Self {
        Rgb::new(q.r, q.g, q.b)
    }
}

/// Whether a pixel with this quantized colour and alpha is counted.
pub fn passes_filter(color: QuantizedColor, alpha: u8) -> bool {
    alpha == u8::MAX && color.is_mid_brightness()
}

/// Occurrence counts per quantized colour, with the running maximum.
#[derive(Clone, Debug)]
pub struct FrequencyTable {
    counts: Vec<u32>,
    qualifying: u32,
    distinct: usize,
    dominant: Option<(QuantizedColor, u32)>,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: vec![0; LEVELS * LEVELS * LEVELS],
            qualifying: 0,
            distinct: 0,
            dominant: None,
        }
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one qualifying pixel.
    ///
    /// The dominant colour only changes when a count strictly exceeds the
    /// current maximum, so the earliest colour to reach a tied count wins.
    pub fn record(&mut self, color: QuantizedColor) {
        let slot = &mut self.counts[color.bucket()];
        if *slot == 0 {
            self.distinct += 1;
        }
        *slot = slot.saturating_add(1);
        let count = *slot;
        self.qualifying = self.qualifying.saturating_add(1);

        let best = self.dominant.map_or(0, |(_, c)| c);
        if count > best {
            self.dominant = Some((color, count));
        }
    }

    pub fn count(&self, color: QuantizedColor) -> u32 {
        self.counts[color.bucket()]
    }

    /// Number of pixels that passed the filter.
    pub fn qualifying(&self) -> u32 {
        self.qualifying
    }

    /// Number of distinct quantized colours seen.
    pub fn distinct(&self) -> usize {
        self.distinct
    }

    pub fn dominant(&self) -> Option<(QuantizedColor, u32)> {
        self.dominant
    }
}

/// Scan `buffer` once and build its frequency table.
pub fn sample(buffer: &PixelBuffer<'_>) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for [r, g, b, a] in buffer.pixels() {
        let color = QuantizedColor::from_channels(r, g, b);
        if passes_filter(color, a) {
            table.record(color);
        }
    }

    log::debug!(
        "sampled {}x{}: {} of {} pixels qualified, {} distinct colors",
        buffer.width(),
        buffer.height(),
        table.qualifying(),
        buffer.len(),
        table.distinct()
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_of(pixels: &[[u8; 4]]) -> Vec<u8> {
        pixels.iter().flatten().copied().collect()
    }

    fn gray(level: u8) -> QuantizedColor {
        QuantizedColor { r: level, g: level, b: level }
    }

    #[test]
    fn test_quantize_all_channel_values() {
        for v in 0..=255u8 {
            let q = quantize_channel(v);
            assert_eq!(q % 16, 0);
            assert!(q <= v);
            assert!(v - q < 16);
            assert!(q <= 240);
        }
    }

    #[test]
    fn test_packed_key() {
        let q = QuantizedColor::from_channels(17, 0, 255);
        assert_eq!((q.r, q.g, q.b), (16, 0, 240));
        assert_eq!(q.packed(), 16 * 65536 + 240);
    }

    #[test]
    fn test_translucent_never_counted() {
        for a in 0..255u8 {
            assert!(!passes_filter(gray(96), a));
        }
        assert!(passes_filter(gray(96), 255));
    }

    #[test]
    fn test_brightness_bounds_are_strict() {
        // means of exactly 60 and 200 are out, 61 and 199 are in
        assert!(!QuantizedColor { r: 60, g: 60, b: 60 }.is_mid_brightness());
        assert!(QuantizedColor { r: 61, g: 61, b: 61 }.is_mid_brightness());
        assert!(QuantizedColor { r: 199, g: 199, b: 199 }.is_mid_brightness());
        assert!(!QuantizedColor { r: 200, g: 200, b: 200 }.is_mid_brightness());

        assert!(!gray(48).is_mid_brightness());
        assert!(gray(64).is_mid_brightness());
        assert!(gray(192).is_mid_brightness());
        assert!(!gray(208).is_mid_brightness());
    }

    #[test]
    fn test_two_by_two_scenario() {
        let data = buffer_of(&[
            [100, 100, 100, 255],
            [100, 100, 100, 255],
            [10, 10, 10, 255],
            [250, 250, 250, 255],
        ]);
        let buf = PixelBuffer::new(&data, 2, 2).unwrap();
        let table = sample(&buf);

        assert_eq!(table.dominant(), Some((gray(96), 2)));
        assert_eq!(table.qualifying(), 2);
        assert_eq!(table.distinct(), 1);
        assert_eq!(table.count(gray(0)), 0);
        assert_eq!(table.count(gray(240)), 0);
    }

    #[test]
    fn test_tie_goes_to_first_to_reach_max() {
        let red = [200, 50, 50, 255];
        let blue = [50, 50, 200, 255];
        // blue reaches 2 at index 2, red only at index 3
        let data = buffer_of(&[red, blue, blue, red]);
        let buf = PixelBuffer::new(&data, 4, 1).unwrap();
        let (winner, count) = sample(&buf).dominant().unwrap();
        assert_eq!(count, 2);
        assert_eq!(winner, QuantizedColor::from_channels(50, 50, 200));
    }

    #[test]
    fn test_all_black_has_no_candidate() {
        let data = buffer_of(&[[0, 0, 0, 255]; 9]);
        let buf = PixelBuffer::new(&data, 3, 3).unwrap();
        let table = sample(&buf);
        assert_eq!(table.dominant(), None);
        assert_eq!(table.qualifying(), 0);
    }

    #[test]
    fn test_empty_buffer_has_no_candidate() {
        let buf = PixelBuffer::new(&[], 0, 0).unwrap();
        assert!(sample(&buf).dominant().is_none());
    }

    #[test]
    fn test_noise_merges_into_one_bucket() {
        let data = buffer_of(&[
            [130, 70, 40, 255],
            [140, 75, 47, 255],
            [143, 79, 32, 255],
            [20, 200, 120, 255],
        ]);
        let buf = PixelBuffer::new(&data, 2, 2).unwrap();
        let table = sample(&buf);
        assert_eq!(table.dominant(), Some((QuantizedColor { r: 128, g: 64, b: 32 }, 3)));
        assert_eq!(table.distinct(), 2);
    }
}
