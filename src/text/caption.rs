use crate::foundation::core::{Canvas, Point, Rgb8};

/// Smallest caption size the editor offers.
pub const MIN_FONT_SIZE_PX: u32 = 16;
/// Largest caption size the editor offers.
pub const MAX_FONT_SIZE_PX: u32 = 48;
/// Caption size of a fresh session.
pub const DEFAULT_FONT_SIZE_PX: u32 = 24;

/// Clamp a requested caption size into the supported range.
pub fn clamp_font_size(px: u32) -> u32 {
    px.clamp(MIN_FONT_SIZE_PX, MAX_FONT_SIZE_PX)
}

/// Caption appearance a fresh session starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionStyle {
    /// Fill color of the caption glyphs.
    pub color: Rgb8,
    /// Font size in pixels, within the supported range.
    pub font_size_px: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            color: Rgb8::WHITE,
            font_size_px: DEFAULT_FONT_SIZE_PX,
        }
    }
}

/// The one text overlay drawn above the photo.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Caption {
    /// Raw caption text; blank means no caption.
    pub text: String,
    /// Glyph fill color.
    pub color: Rgb8,
    /// Font size in pixels.
    pub font_size_px: u32,
    /// Middle of the caption block, in canvas pixels.
    pub position: Point,
}

impl Caption {
    /// Empty caption with `style`, centered on `frame`.
    pub fn new(style: CaptionStyle, frame: Canvas) -> Self {
        Self {
            text: String::new(),
            color: style.color,
            font_size_px: clamp_font_size(style.font_size_px),
            position: frame.center(),
        }
    }

    /// True when there is no visible text.
    pub fn is_blank(&self) -> bool {
        crate::text::wrap::is_blank(&self.text)
    }
}

impl Default for Caption {
    fn default() -> Self {
        Self::new(CaptionStyle::default(), Canvas::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/caption.rs"]
mod tests;
