use std::time::Instant;

use crate::assets::decode::{SourceImage, decode_source_image};
use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::JokeframeResult;
use crate::interaction::drag::{CaptionDrag, DisplayMapping, clamp_position};
use crate::layout::fit::LayoutMode;
use crate::mask::shapes::ShapeKind;
use crate::render::backend::FrameRGBA;
use crate::render::compositor::{CompositionRenderer, RenderResult};
use crate::render::overlay::draw_drag_overlay;
use crate::session::opts::{EditDoc, SessionOpts};
use crate::session::scheduler::RenderScheduler;
use crate::text::caption::{Caption, clamp_font_size};
use crate::text::face::CaptionFace;

/// Handle for one asynchronous image load. Only the most recent ticket is honored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// All state of one photo edit.
///
/// Every method is a serialized event: the host calls them one at a time from a single thread
/// (or behind its own lock). Changes other than caption text and in-progress drags re-render
/// immediately; text edits wait for [`EditSession::tick`] to pass the debounce deadline.
pub struct EditSession {
    opts: SessionOpts,
    face: Box<dyn CaptionFace>,
    renderer: CompositionRenderer,
    scheduler: RenderScheduler,
    drag: CaptionDrag,
    mapping: DisplayMapping,

    source: Option<SourceImage>,
    shape: ShapeKind,
    layout_mode: LayoutMode,
    caption: Caption,
    last: Option<RenderResult>,

    load_generation: u64,
    pending_load: Option<u64>,
    render_count: u64,
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("shape", &self.shape)
            .field("layout_mode", &self.layout_mode)
            .field("caption", &self.caption)
            .field("has_source", &self.source.is_some())
            .field("has_render", &self.last.is_some())
            .field("dragging", &self.drag.is_dragging())
            .field("render_count", &self.render_count)
            .finish_non_exhaustive()
    }
}

impl EditSession {
    /// Session with default options.
    pub fn new(face: Box<dyn CaptionFace>) -> Self {
        Self::build(SessionOpts::default(), face)
    }

    /// Session with validated custom options.
    pub fn with_opts(opts: SessionOpts, face: Box<dyn CaptionFace>) -> JokeframeResult<Self> {
        opts.validate()?;
        Ok(Self::build(opts, face))
    }

    fn build(opts: SessionOpts, face: Box<dyn CaptionFace>) -> Self {
        Self {
            renderer: CompositionRenderer::new(opts.compositor),
            scheduler: RenderScheduler::new(opts.debounce()),
            drag: CaptionDrag::new(opts.hit_radius, opts.clamp_margin),
            mapping: DisplayMapping::identity(opts.canvas),
            source: None,
            shape: ShapeKind::default(),
            layout_mode: opts.layout_mode,
            caption: Caption::new(opts.caption, opts.canvas),
            last: None,
            load_generation: 0,
            pending_load: None,
            render_count: 0,
            face,
            opts,
        }
    }

    /// Options the session was built with.
    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    /// Current frame shape.
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Current photo layout.
    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    /// Current caption, including uncommitted text edits.
    pub fn caption(&self) -> &Caption {
        &self.caption
    }

    /// The loaded photo.
    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Whether there is a committed composite to show or download.
    pub fn has_render(&self) -> bool {
        self.last.is_some()
    }

    /// Plan, pixels and PNG of the committed composite.
    pub fn last_render(&self) -> Option<&RenderResult> {
        self.last.as_ref()
    }

    /// The committed composite.
    pub fn preview(&self) -> Option<&FrameRGBA> {
        self.last.as_ref().map(|r| &r.frame)
    }

    /// PNG bytes of the committed composite.
    pub fn png(&self) -> Option<&[u8]> {
        self.last.as_ref().map(|r| r.png.as_slice())
    }

    /// Number of composites produced so far.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// True while the caption is grabbed.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Where the caption would land if the drag ended now.
    pub fn drag_candidate(&self) -> Option<Point> {
        self.drag.candidate()
    }

    /// When the pending text edit will render, if one is waiting.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Set how host pointer coordinates map to canvas pixels.
    pub fn set_display_mapping(&mut self, mapping: DisplayMapping) {
        self.mapping = mapping;
    }

    /// Decode `bytes` and make them the session photo. A decode failure leaves the previous
    /// photo and composite in place.
    #[tracing::instrument(skip_all, fields(len = bytes.len()))]
    pub fn load_image(&mut self, bytes: &[u8]) -> JokeframeResult<()> {
        let ticket = self.begin_image_load();
        self.complete_image_load(ticket, decode_source_image(bytes))
            .map(|_| ())
    }

    /// Start a load whose decode happens elsewhere. Supersedes any earlier ticket.
    pub fn begin_image_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        self.pending_load = Some(self.load_generation);
        LoadTicket(self.load_generation)
    }

    /// Finish a load started with [`EditSession::begin_image_load`].
    ///
    /// Returns `Ok(false)` when the ticket was superseded by a newer load or a reset; the
    /// result is dropped in that case.
    #[tracing::instrument(skip(self, ticket, decoded), fields(ticket = ticket.0))]
    pub fn complete_image_load(
        &mut self,
        ticket: LoadTicket,
        decoded: JokeframeResult<SourceImage>,
    ) -> JokeframeResult<bool> {
        if self.pending_load != Some(ticket.0) {
            tracing::warn!(
                ticket = ticket.0,
                current = ?self.pending_load,
                "discarding stale image load"
            );
            return Ok(false);
        }
        self.pending_load = None;

        let image = decoded?;
        let previous = self.source.replace(image);
        self.drag.cancel();
        if let Err(e) = self.commit() {
            self.source = previous;
            return Err(e);
        }
        Ok(true)
    }

    /// Change the frame shape and render.
    pub fn set_shape(&mut self, shape: ShapeKind) -> JokeframeResult<()> {
        if self.shape == shape {
            return Ok(());
        }
        self.commit_change(|s| s.shape = shape)
    }

    /// Like [`EditSession::set_shape`] for a host-provided id; unknown ids pick Square.
    pub fn set_shape_id(&mut self, id: &str) -> JokeframeResult<()> {
        self.set_shape(ShapeKind::from_id(id))
    }

    /// Change the photo layout and render.
    pub fn set_layout_mode(&mut self, mode: LayoutMode) -> JokeframeResult<()> {
        if self.layout_mode == mode {
            return Ok(());
        }
        self.commit_change(|s| s.layout_mode = mode)
    }

    /// Edit the caption text. Renders once typing pauses; see [`EditSession::tick`].
    pub fn set_caption_text(&mut self, text: impl Into<String>) -> Instant {
        self.set_caption_text_at(text, Instant::now())
    }

    /// [`EditSession::set_caption_text`] with an explicit clock. Returns the new deadline.
    pub fn set_caption_text_at(&mut self, text: impl Into<String>, now: Instant) -> Instant {
        self.caption.text = text.into();
        if self.caption.is_blank() {
            self.drag.cancel();
        }
        self.scheduler.text_edited(now)
    }

    /// Change the caption color and render.
    pub fn set_caption_color(&mut self, color: Rgb8) -> JokeframeResult<()> {
        if self.caption.color == color {
            return Ok(());
        }
        self.commit_change(|s| s.caption.color = color)
    }

    /// Set the caption size; values outside 16..=48 are clamped.
    pub fn set_caption_size(&mut self, font_size_px: u32) -> JokeframeResult<()> {
        let px = clamp_font_size(font_size_px);
        if self.caption.font_size_px == px {
            return Ok(());
        }
        self.commit_change(|s| s.caption.font_size_px = px)
    }

    /// Move the caption directly, clamped to the frame margin.
    pub fn set_caption_position(&mut self, position: Point) -> JokeframeResult<()> {
        let p = clamp_position(position, self.opts.canvas, self.opts.clamp_margin);
        if self.caption.position == p {
            return Ok(());
        }
        self.commit_change(|s| s.caption.position = p)
    }

    /// Apply a whole edit document with a single render.
    pub fn apply_doc(&mut self, doc: &EditDoc) -> JokeframeResult<()> {
        self.drag.cancel();
        self.commit_change(|s| {
            s.shape = doc.shape;
            if let Some(mode) = doc.layout {
                s.layout_mode = mode;
            }
            s.caption.text = doc.text.clone();
            if let Some(color) = doc.color {
                s.caption.color = color;
            }
            if let Some(px) = doc.size {
                s.caption.font_size_px = clamp_font_size(px);
            }
            if let Some(p) = doc.position {
                s.caption.position = clamp_position(p, s.opts.canvas, s.opts.clamp_margin);
            }
        })
    }

    /// Press at host display coordinates. Returns whether a caption drag started.
    pub fn pointer_down(&mut self, display: Point) -> bool {
        let at = self.mapping.to_canvas(display);
        self.drag.pointer_down(at, &self.caption)
    }

    /// Pointer motion. Only the drag candidate moves; nothing is rendered.
    pub fn pointer_move(&mut self, display: Point) -> Option<Point> {
        let at = self.mapping.to_canvas(display);
        self.drag.pointer_move(at, self.opts.canvas)
    }

    /// Release. A finished drag commits its position and renders once.
    pub fn pointer_up(&mut self) -> JokeframeResult<Option<Point>> {
        let committed = self.drag.pointer_up();
        self.commit_drag(committed)
    }

    /// The pointer left the canvas; ends any drag like a release.
    pub fn pointer_leave(&mut self) -> JokeframeResult<Option<Point>> {
        let committed = self.drag.pointer_leave();
        self.commit_drag(committed)
    }

    fn commit_drag(&mut self, committed: Option<Point>) -> JokeframeResult<Option<Point>> {
        let Some(p) = committed else {
            return Ok(None);
        };
        self.commit_change(|s| s.caption.position = p)?;
        Ok(Some(p))
    }

    /// The committed composite with the drag indicator on top, while a drag is active.
    pub fn overlay_preview(&self) -> JokeframeResult<Option<FrameRGBA>> {
        match (self.drag.candidate(), self.preview()) {
            (Some(candidate), Some(frame)) => Ok(Some(draw_drag_overlay(
                frame,
                candidate,
                self.drag.hit_radius(),
            )?)),
            _ => Ok(None),
        }
    }

    /// Advance time to `now`. Returns true if an expired text edit was rendered.
    ///
    /// A failed render leaves the edit scheduled, so the next tick tries again.
    pub fn tick(&mut self, now: Instant) -> JokeframeResult<bool> {
        if !self.scheduler.is_due(now) {
            return Ok(false);
        }
        tracing::debug!("text debounce expired");
        self.commit()?;
        Ok(true)
    }

    /// Back to a fresh session: no photo, no composite, default shape and caption.
    pub fn reset(&mut self) {
        self.scheduler.cancel();
        self.drag.cancel();
        self.pending_load = None;
        self.source = None;
        self.last = None;
        self.shape = ShapeKind::default();
        self.layout_mode = self.opts.layout_mode;
        self.caption = Caption::new(self.opts.caption, self.opts.canvas);
        tracing::debug!("session reset");
    }

    /// End the session, cancelling pending work and releasing buffers.
    pub fn teardown(mut self) {
        self.reset();
        tracing::debug!(renders = self.render_count, "session torn down");
    }

    /// Apply `change` and render. A failed render puts shape, layout and caption back, so the
    /// inputs keep matching the committed composite.
    fn commit_change(&mut self, change: impl FnOnce(&mut Self)) -> JokeframeResult<()> {
        let shape = self.shape;
        let layout_mode = self.layout_mode;
        let caption = self.caption.clone();
        change(self);
        if let Err(e) = self.commit() {
            tracing::warn!(error = %e, "render failed, edit rolled back");
            self.shape = shape;
            self.layout_mode = layout_mode;
            self.caption = caption;
            return Err(e);
        }
        Ok(())
    }

    /// Render the current inputs. A pending text edit is absorbed only once its text is on
    /// screen; after a failure it stays scheduled.
    fn commit(&mut self) -> JokeframeResult<()> {
        let Some(source) = self.source.as_ref() else {
            self.scheduler.coalesce();
            return Ok(());
        };
        let result = self.renderer.render(
            source,
            self.shape,
            &self.caption,
            self.opts.canvas,
            self.layout_mode,
            &mut *self.face,
        )?;
        self.scheduler.coalesce();
        self.last = Some(result);
        self.render_count += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/edit_session.rs"]
mod tests;
