//! Jokeframe composites a photo, a frame-shaped clipping mask and a word-wrapped caption into one
//! PNG, and lets a host drag the caption around with live feedback.
//!
//! The public API is session-oriented:
//!
//! - Create an [`EditSession`] with a [`CaptionFace`] (usually a [`FontFace`])
//! - Feed it image bytes, shape, caption and pointer events
//! - Read back [`EditSession::preview`] / [`EditSession::png`]
//!
//! The pieces the session is built from ([`build_mask`], [`compute_draw_rect`], [`wrap`],
//! [`CompositionRenderer`]) are exported for hosts that want to drive them directly.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod interaction;
pub(crate) mod layout;
pub(crate) mod mask;
/// CPU compositing and PNG output.
pub mod render;
/// Edit session, debounce scheduling and configuration.
pub mod session;
pub(crate) mod text;

pub use crate::assets::decode::{SourceImage, decode_source_image};
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Point, Rect, Rgb8, Size, Vec2,
};
pub use crate::foundation::error::{JokeframeError, JokeframeResult};

pub use crate::interaction::drag::{
    CaptionDrag, DEFAULT_CLAMP_MARGIN, DEFAULT_HIT_RADIUS, DisplayMapping, DragPhase,
    clamp_position,
};
pub use crate::layout::fit::{
    LayoutMode, compute_draw_rect, inset_image_area_height, reserved_text_height,
};
pub use crate::layout::{LINE_GAP_PX, line_height_for};
pub use crate::mask::shapes::{ClipMask, ShapeKind, build_mask};
pub use crate::render::backend::{DOWNLOAD_FILE_NAME, FrameRGBA, encode_png};
pub use crate::render::compositor::{
    CompositionPlan, CompositionRenderer, CompositorOpts, PlacedLine, RenderResult, ShadowStyle,
    place_lines, plan_composition,
};
pub use crate::render::overlay::draw_drag_overlay;
pub use crate::session::edit_session::{EditSession, LoadTicket};
pub use crate::session::opts::{EditDoc, SessionOpts};
pub use crate::session::scheduler::{DEFAULT_DEBOUNCE, RenderScheduler};
pub use crate::text::caption::{
    Caption, CaptionStyle, DEFAULT_FONT_SIZE_PX, MAX_FONT_SIZE_PX, MIN_FONT_SIZE_PX,
    clamp_font_size,
};
pub use crate::text::face::{CaptionBrush, CaptionFace, FontFace};
pub use crate::text::wrap::{WrappedText, is_blank, wrap};

/// The raster backend [`CaptionFace::fill_line`] draws into.
pub use vello_cpu;
