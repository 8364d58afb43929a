use crate::foundation::core::{Canvas, Rect, Size};
use crate::foundation::error::{JokeframeError, JokeframeResult};

/// How the source photo is placed on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Stretch the photo over the whole canvas; the mask is built against the full frame.
    #[default]
    Fill,
    /// Legacy layout: aspect-preserving photo in the upper part of the canvas, leaving room
    /// below for the wrapped caption. The mask is built against the photo rect.
    Inset,
}

/// Widest the photo gets in inset mode.
pub const INSET_MAX_WIDTH: f64 = 400.0;
/// Fixed top offset of the photo in inset mode.
pub const INSET_TOP: f64 = 20.0;
/// Space kept between the photo area and its neighbors in inset mode.
pub const INSET_GUTTER: f64 = 40.0;
/// Lower photo area bound as a fraction of canvas height.
pub const INSET_MIN_AREA: f64 = 0.3;
/// Upper photo area bound as a fraction of canvas height.
pub const INSET_MAX_AREA: f64 = 0.8;

/// Vertical space a wrapped caption claims: `lines * (font_size + 10)`.
pub fn reserved_text_height(line_count: usize, font_size_px: u32) -> f64 {
    (line_count as f64) * super::line_height_for(font_size_px)
}

/// Compute where the source photo is drawn.
///
/// `reserved_text_height` only matters in [`LayoutMode::Inset`]; pass `0.0` when the caption is
/// blank.
pub fn compute_draw_rect(
    source: Size,
    frame: Canvas,
    mode: LayoutMode,
    reserved_text_height: f64,
) -> JokeframeResult<Rect> {
    if !(source.width > 0.0 && source.height > 0.0)
        || !source.width.is_finite()
        || !source.height.is_finite()
    {
        return Err(JokeframeError::degenerate(format!(
            "source image {}x{} has zero area",
            source.width, source.height
        )));
    }
    if frame.is_empty() {
        return Err(JokeframeError::degenerate(format!(
            "frame {}x{} has zero area",
            frame.width, frame.height
        )));
    }

    let bounds = frame.rect();
    match mode {
        LayoutMode::Fill => Ok(bounds),
        LayoutMode::Inset => {
            let canvas_h = bounds.height();
            let area_h = inset_image_area_height(canvas_h, reserved_text_height);
            let max_h = (area_h - INSET_GUTTER).max(0.0);

            let (w, h) = if source.width > source.height {
                (INSET_MAX_WIDTH, source.height * INSET_MAX_WIDTH / source.width)
            } else {
                (source.width * max_h / source.height, max_h)
            };
            let x = (bounds.width() - w) / 2.0;
            let rect = Rect::new(x, INSET_TOP, x + w, INSET_TOP + h);
            Ok(clamp_rect(rect, bounds))
        }
    }
}

/// Height of the band reserved for the photo in inset mode.
pub fn inset_image_area_height(canvas_h: f64, reserved_text_height: f64) -> f64 {
    let lo = canvas_h * INSET_MIN_AREA;
    let hi = canvas_h * INSET_MAX_AREA;
    if reserved_text_height > 0.0 {
        (canvas_h - reserved_text_height - INSET_GUTTER).clamp(lo, hi)
    } else {
        hi
    }
}

fn clamp_rect(r: Rect, bounds: Rect) -> Rect {
    let x0 = r.x0.clamp(bounds.x0, bounds.x1);
    let y0 = r.y0.clamp(bounds.y0, bounds.y1);
    let x1 = r.x1.clamp(x0, bounds.x1);
    let y1 = r.y1.clamp(y0, bounds.y1);
    Rect::new(x0, y0, x1, y1)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
