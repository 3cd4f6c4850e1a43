use image::{DynamicImage, GenericImageView, RgbaImage, imageops::FilterType};

use crate::error::{Error, Result};

/// Longest side an image may have before it is sampled.
pub const MAX_SIDE: u32 = 500;

/// Borrowed view over a flat, row-major RGBA buffer (`getImageData` layout).
#[derive(Clone, Copy, Debug)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap `data`, checking that it holds exactly `width * height` RGBA pixels.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4));
        if expected != Some(data.len()) {
            return Err(Error::BufferSize { len: data.len(), width, height });
        }
        Ok(Self { data, width, height })
    }

    pub fn from_image(img: &'a RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self { data: img.as_raw(), width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixel samples in scan order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + 'a {
        self.data
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// Decode an encoded image (PNG, JPEG, ...) in any format `image` understands.
pub fn decode_image(input: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(input)?)
}

/// Shrink `img` so neither side exceeds `max_side`, keeping the aspect ratio.
///
/// Scaled sides are truncated like canvas dimensions are, but never drop
/// below one pixel. Images that already fit are returned as-is.
pub fn fit_within(img: DynamicImage, max_side: u32) -> DynamicImage {
    let (orig_w, orig_h) = img.dimensions();
    if orig_w <= max_side && orig_h <= max_side {
        return img;
    }

    let scale = (max_side as f32 / orig_w as f32).min(max_side as f32 / orig_h as f32);
    let w = ((orig_w as f32) * scale).floor().clamp(1.0, max_side as f32) as u32;
    let h = ((orig_h as f32) * scale).floor().clamp(1.0, max_side as f32) as u32;
    log::debug!("downscaling {orig_w}x{orig_h} -> {w}x{h}");

    DynamicImage::ImageRgba8(image::imageops::resize(&img, w, h, FilterType::Triangle))
}
