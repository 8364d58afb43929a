use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{JokeframeError, JokeframeResult};
use crate::render::cpu::affine_to_cpu;

/// Glyph metrics and glyph drawing for caption lines.
///
/// The compositor only needs two things from the host's text stack: how wide a string is, and
/// how to fill it. Implementations draw with whatever paint is currently set on the context.
pub trait CaptionFace {
    /// Advance width of `text` at `size_px`, including trailing whitespace.
    fn measure(&mut self, text: &str, size_px: f32) -> f64;

    /// Fill `text` horizontally centered on `anchor.x`, with the middle of its em box on
    /// `anchor.y`.
    fn fill_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        size_px: f32,
        anchor: Point,
    );
}

impl<F: CaptionFace + ?Sized> CaptionFace for Box<F> {
    fn measure(&mut self, text: &str, size_px: f32) -> f64 {
        (**self).measure(text, size_px)
    }

    fn fill_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        size_px: f32,
        anchor: Point,
    ) {
        (**self).fill_line(ctx, text, size_px, anchor)
    }
}

/// Parley brush for caption layouts. Color comes from the render context paint instead.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CaptionBrush;

/// A [`CaptionFace`] backed by a single TTF/OTF font, shaped with Parley.
pub struct FontFace {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<CaptionBrush>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl FontFace {
    /// Register font bytes and keep them for glyph drawing.
    pub fn from_bytes(font_bytes: Vec<u8>) -> JokeframeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            JokeframeError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| JokeframeError::validation("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        tracing::debug!(family = %family_name, "caption font registered");
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    /// Family name the font registered under.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout_line(&mut self, text: &str, size_px: f32) -> parley::Layout<CaptionBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(CaptionBrush));

        let mut layout: parley::Layout<CaptionBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl CaptionFace for FontFace {
    fn measure(&mut self, text: &str, size_px: f32) -> f64 {
        f64::from(self.layout_line(text, size_px).full_width())
    }

    fn fill_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        size_px: f32,
        anchor: Point,
    ) {
        let layout = self.layout_line(text, size_px);
        let Some(first) = layout.lines().next() else {
            return;
        };
        let m = first.metrics();
        let width = f64::from(layout.full_width());
        let middle_to_baseline = (f64::from(m.ascent) - f64::from(m.descent)) / 2.0;
        let origin = Affine::translate((
            anchor.x - width / 2.0,
            anchor.y + middle_to_baseline - f64::from(m.baseline),
        ));

        ctx.set_transform(affine_to_cpu(origin));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/face.rs"]
mod tests;
