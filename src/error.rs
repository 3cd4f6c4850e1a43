use thiserror::Error;

/// Errors produced while turning an image into a dominant color.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Pixel buffer of {len} bytes does not match a {width}x{height} RGBA image")]
    BufferSize { len: usize, width: u32, height: u32 },

    #[error("No dominant color found")]
    NoDominantColor,
}

pub type Result<T> = std::result::Result<T, Error>;
