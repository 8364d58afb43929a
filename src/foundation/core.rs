use crate::foundation::error::{JokeframeError, JokeframeResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Output frame dimensions. Every rect and caption position lives in this space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Canvas of `width` by `height` pixels.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The whole canvas as a rect at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Canvas center.
    pub fn center(self) -> Point {
        self.rect().center()
    }

    /// Raster dimensions as `u16`, the limit of the CPU backend.
    pub fn raster_dims(self) -> JokeframeResult<(u16, u16)> {
        if self.is_empty() {
            return Err(JokeframeError::degenerate(format!(
                "canvas {}x{} has zero area",
                self.width, self.height
            )));
        }
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| JokeframeError::validation("canvas width exceeds 65535"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| JokeframeError::validation("canvas height exceeds 65535"))?;
        Ok((w, h))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(600, 700)
    }
}

/// Straight (non-premultiplied) RGB8 color, as picked by the host color widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// Opaque white, the default caption color.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> JokeframeResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return Err(JokeframeError::validation(format!(
                "hex color must be #RRGGBB, got \"{s}\""
            )));
        }

        fn hex_byte(pair: &str) -> JokeframeResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| JokeframeError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        Ok(Self {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
        })
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgb8 {
    fn default() -> Self {
        Self::WHITE
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
