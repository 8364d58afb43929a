#![allow(dead_code)]

use jokeframe::{CaptionFace, Point};

/// Deterministic caption face: every character advances `0.75 * size`, every non-space
/// character is a solid block.
#[derive(Debug, Default)]
pub struct BlockFace;

impl CaptionFace for BlockFace {
    fn measure(&mut self, text: &str, size_px: f32) -> f64 {
        text.chars().count() as f64 * 0.75 * f64::from(size_px)
    }

    fn fill_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        size_px: f32,
        anchor: Point,
    ) {
        let size = f64::from(size_px);
        let advance = 0.75 * size;
        let mut x = anchor.x - self.measure(text, size_px) / 2.0;
        for ch in text.chars() {
            if !ch.is_whitespace() {
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    x + advance * 0.1,
                    anchor.y - size * 0.35,
                    x + advance * 0.9,
                    anchor.y + size * 0.35,
                ));
            }
            x += advance;
        }
    }
}

pub fn png_bytes(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| image::Rgba(pixel(x, y)));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 3 % 256) as u8, (y * 5 % 256) as u8, 128])
    });
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Jpeg).unwrap();
    out.into_inner()
}
