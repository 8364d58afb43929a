use std::io::Cursor;

use crate::foundation::error::{JokeframeError, JokeframeResult};
use crate::render::cpu::unpremultiply_rgba8;

/// Suggested file name for the exported composite.
pub const DOWNLOAD_FILE_NAME: &str = "joke-photo.png";

/// Output pixels of one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels.
    pub data: Vec<u8>,
    /// Whether `data` holds premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Fully transparent frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
            premultiplied: true,
        }
    }

    /// Premultiplied RGBA at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if self.premultiplied {
            unpremultiply_rgba8(&self.data)
        } else {
            self.data.clone()
        }
    }
}

/// Encode a frame as PNG.
///
/// Output is a pure function of the pixels, so identical frames encode to identical bytes.
pub fn encode_png(frame: &FrameRGBA) -> JokeframeResult<Vec<u8>> {
    let straight = frame.to_straight_rgba8();
    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight).ok_or_else(|| {
        JokeframeError::encode(format!(
            "frame buffer does not match {}x{}",
            frame.width, frame.height
        ))
    })?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| JokeframeError::encode(format!("png encode failed: {e}")))?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
