pub(crate) mod fit;

/// Gap added below every caption line.
pub const LINE_GAP_PX: f64 = 10.0;

/// Caption line advance for a font size.
pub fn line_height_for(font_size_px: u32) -> f64 {
    f64::from(font_size_px) + LINE_GAP_PX
}
