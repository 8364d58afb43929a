use crate::assets::decode::SourceImage;
use crate::foundation::core::{Affine, Canvas, Point, Rect, Size, Vec2};
use crate::foundation::error::JokeframeResult;
use crate::layout::fit::{LayoutMode, compute_draw_rect};
use crate::mask::shapes::{ClipMask, ShapeKind, build_mask};
use crate::render::backend::{FrameRGBA, encode_png};
use crate::render::cpu::{
    affine_to_cpu, bezpath_to_cpu, blur_rgba8_premul, image_paint, mask_apply_alpha_in_place,
    premul_over_in_place,
};
use crate::text::caption::Caption;
use crate::text::face::CaptionFace;
use crate::text::wrap::{WrappedText, wrap};

/// Drop shadow drawn beneath every caption line.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShadowStyle {
    /// Shadow displacement from the caption, in canvas pixels.
    pub offset: Vec2,
    /// Canvas-style blur amount; the gaussian sigma is half of it.
    pub blur: f64,
    /// Straight alpha of the black shadow color.
    pub alpha: u8,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            offset: Vec2::new(2.0, 2.0),
            blur: 4.0,
            alpha: 204,
        }
    }
}

impl ShadowStyle {
    fn sigma(self) -> f32 {
        (self.blur / 2.0) as f32
    }

    fn radius(self) -> u32 {
        if self.blur <= 0.0 || !self.blur.is_finite() {
            0
        } else {
            (f64::from(self.sigma()) * 3.0).ceil() as u32
        }
    }
}

/// Compositor settings shared by every render of a session.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositorOpts {
    /// Caption lines wrap at `frame.width - caption_inset`.
    pub caption_inset: f64,
    /// Caption drop shadow.
    pub shadow: ShadowStyle,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            caption_inset: 40.0,
            shadow: ShadowStyle::default(),
        }
    }
}

/// One caption line and the point its em box is centered on.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    /// Line text, as wrapped.
    pub text: String,
    /// Horizontal center and vertical middle of the line.
    pub anchor: Point,
}

/// Geometry of one composite, computed before any pixel is touched.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositionPlan {
    /// Output canvas.
    pub frame: Canvas,
    /// Where the photo is drawn.
    pub draw_rect: Rect,
    /// Frame shape the photo is clipped to.
    pub mask: ClipMask,
    /// Caption lines in drawing order.
    pub lines: Vec<PlacedLine>,
    /// Advance between consecutive lines.
    pub line_height: f64,
    /// Caption font size.
    pub font_size_px: u32,
}

/// One committed composite.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Geometry the frame was drawn from.
    pub plan: CompositionPlan,
    /// Premultiplied output pixels.
    pub frame: FrameRGBA,
    /// PNG encoding of `frame`.
    pub png: Vec<u8>,
}

/// Stack wrapped lines vertically around `center`.
pub fn place_lines(wrapped: &WrappedText, center: Point) -> Vec<PlacedLine> {
    let n = wrapped.line_count();
    if n == 0 {
        return Vec::new();
    }
    let first_y = center.y - ((n - 1) as f64) * wrapped.line_height / 2.0;
    wrapped
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| PlacedLine {
            text: line.clone(),
            anchor: Point::new(center.x, first_y + (i as f64) * wrapped.line_height),
        })
        .collect()
}

/// Lay out one composite: draw rect, mask and caption lines.
pub fn plan_composition(
    source: Size,
    shape: ShapeKind,
    caption: &Caption,
    frame: Canvas,
    mode: LayoutMode,
    opts: &CompositorOpts,
    face: &mut dyn CaptionFace,
) -> JokeframeResult<CompositionPlan> {
    let size_px = caption.font_size_px as f32;
    let max_width = f64::from(frame.width) - opts.caption_inset;
    let wrapped = wrap(&caption.text, max_width, caption.font_size_px, |s| {
        face.measure(s, size_px)
    });

    let draw_rect = compute_draw_rect(source, frame, mode, wrapped.height())?;
    let mask_area = match mode {
        LayoutMode::Fill => frame.rect(),
        LayoutMode::Inset => draw_rect,
    };

    Ok(CompositionPlan {
        frame,
        draw_rect,
        mask: build_mask(shape, mask_area),
        lines: place_lines(&wrapped, caption.position),
        line_height: wrapped.line_height,
        font_size_px: caption.font_size_px,
    })
}

/// CPU compositor for photo, frame mask and caption.
#[derive(Debug, Default)]
pub struct CompositionRenderer {
    opts: CompositorOpts,
}

impl CompositionRenderer {
    /// Renderer with the given settings.
    pub fn new(opts: CompositorOpts) -> Self {
        Self { opts }
    }

    /// Current settings.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Composite and encode.
    #[tracing::instrument(
        skip(self, source, caption, face),
        fields(src_w = source.width, src_h = source.height, lines = tracing::field::Empty)
    )]
    pub fn render(
        &mut self,
        source: &SourceImage,
        shape: ShapeKind,
        caption: &Caption,
        frame: Canvas,
        mode: LayoutMode,
        face: &mut dyn CaptionFace,
    ) -> JokeframeResult<RenderResult> {
        let (plan, pixels) = self.render_frame(source, shape, caption, frame, mode, face)?;
        tracing::Span::current().record("lines", plan.lines.len());
        let png = encode_png(&pixels)?;
        tracing::debug!(bytes = png.len(), "composite encoded");
        Ok(RenderResult {
            plan,
            frame: pixels,
            png,
        })
    }

    /// Composite without encoding.
    pub fn render_frame(
        &mut self,
        source: &SourceImage,
        shape: ShapeKind,
        caption: &Caption,
        frame: Canvas,
        mode: LayoutMode,
        face: &mut dyn CaptionFace,
    ) -> JokeframeResult<(CompositionPlan, FrameRGBA)> {
        let (w16, h16) = frame.raster_dims()?;
        let plan = plan_composition(
            source.size(),
            shape,
            caption,
            frame,
            mode,
            &self.opts,
            face,
        )?;

        let mut out = FrameRGBA::transparent(frame.width, frame.height);

        let mut photo = self.photo_layer(source, &plan, w16, h16)?;
        if let Some(path) = plan.mask.path() {
            let mut ctx = vello_cpu::RenderContext::new(w16, h16);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
            ctx.fill_path(&bezpath_to_cpu(path));
            let mut coverage = vello_cpu::Pixmap::new(w16, h16);
            ctx.flush();
            ctx.render_to_pixmap(&mut coverage);
            mask_apply_alpha_in_place(photo.data_as_u8_slice_mut(), coverage.data_as_u8_slice())?;
        }
        premul_over_in_place(&mut out.data, photo.data_as_u8_slice())?;

        if !plan.lines.is_empty() {
            let shadow_style = self.opts.shadow;
            let shadow = caption_layer(
                &plan,
                face,
                w16,
                h16,
                vello_cpu::peniko::Color::from_rgba8(0, 0, 0, shadow_style.alpha),
                shadow_style.offset,
            );
            let blurred = blur_rgba8_premul(
                shadow.data_as_u8_slice(),
                frame.width,
                frame.height,
                shadow_style.radius(),
                shadow_style.sigma(),
            )?;
            premul_over_in_place(&mut out.data, &blurred)?;

            let c = caption.color;
            let text = caption_layer(
                &plan,
                face,
                w16,
                h16,
                vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255),
                Vec2::ZERO,
            );
            premul_over_in_place(&mut out.data, text.data_as_u8_slice())?;
        }

        Ok((plan, out))
    }

    fn photo_layer(
        &self,
        source: &SourceImage,
        plan: &CompositionPlan,
        w16: u16,
        h16: u16,
    ) -> JokeframeResult<vello_cpu::Pixmap> {
        let mut layer = vello_cpu::Pixmap::new(w16, h16);
        let dst = plan.draw_rect;
        if dst.width() <= 0.0 || dst.height() <= 0.0 {
            return Ok(layer);
        }

        let src = source.size();
        let transform = Affine::translate(dst.origin().to_vec2())
            * Affine::scale_non_uniform(dst.width() / src.width, dst.height() / src.height);

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(image_paint(source)?);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, src.width, src.height));
        ctx.flush();
        ctx.render_to_pixmap(&mut layer);
        Ok(layer)
    }
}

fn caption_layer(
    plan: &CompositionPlan,
    face: &mut dyn CaptionFace,
    w16: u16,
    h16: u16,
    color: vello_cpu::peniko::Color,
    offset: Vec2,
) -> vello_cpu::Pixmap {
    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_paint(color);
    let size_px = plan.font_size_px as f32;
    for line in &plan.lines {
        face.fill_line(&mut ctx, &line.text, size_px, line.anchor + offset);
    }
    let mut layer = vello_cpu::Pixmap::new(w16, h16);
    ctx.flush();
    ctx.render_to_pixmap(&mut layer);
    layer
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
