use std::sync::Arc;

use crate::foundation::core::Size;
use crate::foundation::error::{JokeframeError, JokeframeResult};

/// A decoded source photo, stored as premultiplied RGBA8.
///
/// Cloning is cheap: the pixel buffer is shared. A new upload produces a new value rather than
/// mutating this one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8, `width * height * 4` bytes.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap already-premultiplied RGBA8 pixels.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> JokeframeResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| JokeframeError::validation("source image size overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(JokeframeError::validation(format!(
                "source image expects {expected} bytes for {width}x{height}, got {}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Pixel size as a kurbo [`Size`].
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Decode encoded image bytes (any format `image` understands) and convert to premultiplied
/// RGBA8.
///
/// This is the only slow step of an edit and touches no session state, so hosts may run it off
/// the UI thread and hand the result back to the session.
pub fn decode_source_image(bytes: &[u8]) -> JokeframeResult<SourceImage> {
    if bytes.is_empty() {
        return Err(JokeframeError::decode("image bytes are empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| JokeframeError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    let (width, height, rgba8_premul) = fit_raster_limit(width, height, rgba8_premul)?;

    tracing::debug!(width, height, "decoded source image");
    Ok(SourceImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Longest source side the CPU backend can sample from.
pub(crate) const MAX_SOURCE_SIDE: u32 = u16::MAX as u32;

/// Shrink premultiplied pixels so neither side exceeds [`MAX_SOURCE_SIDE`], keeping the aspect
/// ratio. The output canvas is far smaller, so nothing visible is lost.
fn fit_raster_limit(
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
) -> JokeframeResult<(u32, u32, Vec<u8>)> {
    let longest = width.max(height);
    if longest <= MAX_SOURCE_SIDE {
        return Ok((width, height, rgba8_premul));
    }

    let scale = f64::from(MAX_SOURCE_SIDE) / f64::from(longest);
    let fit = |v: u32| ((f64::from(v) * scale).round() as u32).clamp(1, MAX_SOURCE_SIDE);
    let (new_w, new_h) = (fit(width), fit(height));
    tracing::debug!(width, height, new_w, new_h, "downscaling oversized source image");

    let img = image::RgbaImage::from_raw(width, height, rgba8_premul)
        .ok_or_else(|| JokeframeError::decode("decoded pixel buffer does not match its size"))?;
    let resized = image::imageops::resize(&img, new_w, new_h, image::imageops::FilterType::Triangle);
    Ok((new_w, new_h, resized.into_raw()))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
