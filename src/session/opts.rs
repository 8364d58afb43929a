use std::time::Duration;

use crate::foundation::core::{Canvas, Point, Rgb8};
use crate::foundation::error::{JokeframeError, JokeframeResult};
use crate::interaction::drag::{DEFAULT_CLAMP_MARGIN, DEFAULT_HIT_RADIUS};
use crate::layout::fit::LayoutMode;
use crate::mask::shapes::ShapeKind;
use crate::render::compositor::CompositorOpts;
use crate::session::scheduler::DEFAULT_DEBOUNCE;
use crate::text::caption::CaptionStyle;

/// Session configuration. Every field has a default, so a partial JSON object is enough.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionOpts {
    /// Output canvas.
    pub canvas: Canvas,
    /// Initial photo layout.
    pub layout_mode: LayoutMode,
    /// Quiet window before a text edit renders.
    pub debounce_ms: u64,
    /// Caption grab radius in canvas pixels.
    pub hit_radius: f64,
    /// Minimum caption distance from the frame edge.
    pub clamp_margin: f64,
    /// Compositor settings.
    pub compositor: CompositorOpts,
    /// Caption appearance of a fresh session.
    pub caption: CaptionStyle,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            layout_mode: LayoutMode::default(),
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            hit_radius: DEFAULT_HIT_RADIUS,
            clamp_margin: DEFAULT_CLAMP_MARGIN,
            compositor: CompositorOpts::default(),
            caption: CaptionStyle::default(),
        }
    }
}

impl SessionOpts {
    /// Debounce window as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Reject a zero or oversized canvas and non-finite or negative distances.
    pub fn validate(&self) -> JokeframeResult<()> {
        self.canvas.raster_dims()?;
        if !(self.hit_radius.is_finite() && self.hit_radius >= 0.0) {
            return Err(JokeframeError::validation("hit_radius must be finite and >= 0"));
        }
        if !(self.clamp_margin.is_finite() && self.clamp_margin >= 0.0) {
            return Err(JokeframeError::validation(
                "clamp_margin must be finite and >= 0",
            ));
        }
        let inset = self.compositor.caption_inset;
        if !(inset.is_finite() && inset >= 0.0) {
            return Err(JokeframeError::validation(
                "caption_inset must be finite and >= 0",
            ));
        }
        if !(self.compositor.shadow.blur.is_finite() && self.compositor.shadow.blur >= 0.0) {
            return Err(JokeframeError::validation("shadow blur must be finite and >= 0"));
        }
        Ok(())
    }
}

/// One edit, described as data. Used by the CLI to drive a session from a JSON file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditDoc {
    /// Frame shape.
    pub shape: ShapeKind,
    /// Photo layout; unset keeps the session's.
    pub layout: Option<LayoutMode>,
    /// Caption text.
    pub text: String,
    /// Caption color; unset keeps the session's.
    pub color: Option<Rgb8>,
    /// Caption size, clamped; unset keeps the session's.
    pub size: Option<u32>,
    /// Caption position, clamped; unset keeps the session's.
    pub position: Option<Point>,
    /// Options for a session created from this document.
    pub opts: SessionOpts,
}

impl EditDoc {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> JokeframeResult<Self> {
        let doc: Self = serde_json::from_str(s)
            .map_err(|e| JokeframeError::validation(format!("parse edit document: {e}")))?;
        doc.opts.validate()?;
        Ok(doc)
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> JokeframeResult<String> {
        Ok(serde_json::to_string_pretty(self).map_err(anyhow::Error::from)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
