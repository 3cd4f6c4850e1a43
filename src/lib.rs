use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

pub mod buffer;
pub mod color;
pub mod error;
pub mod resolver;
pub mod sampler;

pub use buffer::{MAX_SIDE, PixelBuffer, decode_image, fit_within};
pub use color::{DominantColor, Rgb, to_display_strings};
pub use error::Error;
pub use resolver::{Hsl, ResolverConfig, desaturate, hsl_to_rgb, resolve, rgb_to_hsl};
pub use sampler::{FrequencyTable, QuantizedColor, quantize_channel, sample};

// ------------------------------------------------------------
// Core pipeline
// ------------------------------------------------------------

/// Most frequent qualifying colour of `buffer`, resolved according to
/// `config`. `None` when no pixel passes the filter.
pub fn extract_dominant_color(buffer: &PixelBuffer<'_>, config: &ResolverConfig) -> Option<Rgb> {
    analyze(buffer, config).ok().map(|found| found.color)
}

/// Like [`extract_dominant_color`], but also reports the quantized candidate
/// and how many pixels voted for it.
pub fn analyze(buffer: &PixelBuffer<'_>, config: &ResolverConfig) -> error::Result<DominantColor> {
    let (candidate, count) = sample(buffer).dominant().ok_or(Error::NoDominantColor)?;
    let color = resolve(candidate.into(), config);
    log::trace!("candidate {:?} x{count} resolved to {color}", candidate);
    Ok(DominantColor::new(color, candidate, count))
}

/// Decode `input`, shrink it to fit within [`MAX_SIDE`] and extract its
/// dominant colour.
pub fn dominant_color_from_bytes(input: &[u8], config: &ResolverConfig) -> error::Result<DominantColor> {
    dominant_color_from_bytes_with_max_side(input, MAX_SIDE, config)
}

pub fn dominant_color_from_bytes_with_max_side(
    input: &[u8],
    max_side: u32,
    config: &ResolverConfig,
) -> error::Result<DominantColor> {
    let img = fit_within(decode_image(input)?, max_side);
    let rgba = img.to_rgba8();
    analyze(&PixelBuffer::from_image(&rgba), config)
}

// ------------------------------------------------------------
// JavaScript bindings
// ------------------------------------------------------------

fn policy(desaturate: bool) -> ResolverConfig {
    if desaturate {
        ResolverConfig::default()
    } else {
        ResolverConfig::raw()
    }
}

fn to_js(found: &DominantColor) -> Result<JsValue, JsValue> {
    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("r"), &JsValue::from(found.color.r))?;
    Reflect::set(&result, &JsValue::from_str("g"), &JsValue::from(found.color.g))?;
    Reflect::set(&result, &JsValue::from_str("b"), &JsValue::from(found.color.b))?;
    Reflect::set(&result, &JsValue::from_str("rgb"), &JsValue::from_str(&found.rgb))?;
    Reflect::set(&result, &JsValue::from_str("hex"), &JsValue::from_str(&found.hex))?;
    Reflect::set(&result, &JsValue::from_str("count"), &JsValue::from(found.count))?;
    Ok(result.into())
}

fn into_js(outcome: error::Result<DominantColor>) -> Result<JsValue, JsValue> {
    match outcome {
        Ok(found) => to_js(&found),
        Err(Error::NoDominantColor) => Ok(JsValue::NULL),
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

/// Extract the dominant colour from canvas pixels (`getImageData().data`).
///
/// Returns `{ r, g, b, rgb, hex, count }`, or `null` when no pixel is opaque
/// and of mid-range brightness. Throws if `data` is not `4 * width * height`
/// bytes long.
#[wasm_bindgen(js_name = extractDominantColor)]
pub fn extract_dominant_color_js(
    data: &[u8],
    width: u32,
    height: u32,
    desaturate: bool,
) -> Result<JsValue, JsValue> {
    let buffer = PixelBuffer::new(data, width, height)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    into_js(analyze(&buffer, &policy(desaturate)))
}

/// Decode an uploaded file, fit it within 500×500 and extract its dominant
/// colour. Throws `Unable to decode image: ...` when the bytes are not an
/// image; returns `null` when no dominant colour exists.
#[wasm_bindgen(js_name = dominantColorFromImage)]
pub fn dominant_color_from_image_js(input: Vec<u8>, desaturate: bool) -> Result<JsValue, JsValue> {
    into_js(dominant_color_from_bytes(&input, &policy(desaturate)))
}
