//! Live feedback while a caption is being dragged.
//!
//! The overlay never re-runs the compositor: it draws a dashed ring and a handle over the last
//! committed frame.

use std::f64::consts::TAU;

use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{JokeframeError, JokeframeResult};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::{bezpath_to_cpu, premul_over_in_place};

const DASH_COUNT: usize = 24;
const DASH_FILL: f64 = 0.55;
const RING_WIDTH: f64 = 2.0;
const HANDLE_RADIUS: f64 = 6.0;
const HANDLE_OUTLINE: f64 = 1.5;

/// Dashes of a ring of `radius` around `center`, as filled annular segments.
pub(crate) fn dashed_ring(center: Point, radius: f64, width: f64) -> BezPath {
    let inner = (radius - width / 2.0).max(0.0);
    let outer = radius + width / 2.0;
    let step = TAU / DASH_COUNT as f64;
    let sweep = step * DASH_FILL;
    // Enough vertices per dash that the chord error stays under a pixel for big radii.
    let segs = ((outer * sweep / 4.0).ceil() as usize).max(2);

    let at = |r: f64, a: f64| Point::new(center.x + r * a.cos(), center.y + r * a.sin());

    let mut path = BezPath::new();
    for i in 0..DASH_COUNT {
        let a0 = (i as f64) * step;
        path.move_to(at(outer, a0));
        for s in 1..=segs {
            path.line_to(at(outer, a0 + sweep * (s as f64) / (segs as f64)));
        }
        for s in (0..=segs).rev() {
            path.line_to(at(inner, a0 + sweep * (s as f64) / (segs as f64)));
        }
        path.close_path();
    }
    path
}

/// The committed frame with a drag indicator at `candidate`.
pub fn draw_drag_overlay(
    backdrop: &FrameRGBA,
    candidate: Point,
    radius: f64,
) -> JokeframeResult<FrameRGBA> {
    if !backdrop.premultiplied {
        return Err(JokeframeError::validation(
            "drag overlay expects a premultiplied backdrop",
        ));
    }
    let w16: u16 = backdrop
        .width
        .try_into()
        .map_err(|_| JokeframeError::validation("overlay width exceeds u16"))?;
    let h16: u16 = backdrop
        .height
        .try_into()
        .map_err(|_| JokeframeError::validation("overlay height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 204));
    ctx.fill_path(&bezpath_to_cpu(&dashed_ring(candidate, radius, RING_WIDTH)));

    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 160));
    ctx.fill_path(&bezpath_to_cpu(&disc(candidate, HANDLE_RADIUS + HANDLE_OUTLINE)));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    ctx.fill_path(&bezpath_to_cpu(&disc(candidate, HANDLE_RADIUS)));

    let mut layer = vello_cpu::Pixmap::new(w16, h16);
    ctx.flush();
    ctx.render_to_pixmap(&mut layer);

    let mut out = backdrop.clone();
    premul_over_in_place(&mut out.data, layer.data_as_u8_slice())?;
    Ok(out)
}

fn disc(center: Point, radius: f64) -> BezPath {
    kurbo::Shape::to_path(&kurbo::Circle::new(center, radius), 0.1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
