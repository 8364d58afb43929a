use crate::foundation::core::{Canvas, Point, Rect};
use crate::text::caption::Caption;

/// Distance from the caption position that still grabs it.
pub const DEFAULT_HIT_RADIUS: f64 = 50.0;
/// Minimum distance between the caption position and a frame edge.
pub const DEFAULT_CLAMP_MARGIN: f64 = 30.0;

/// Maps host display coordinates (a scaled, possibly offset canvas element) to canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayMapping {
    /// Where the canvas is shown, in display units.
    pub display: Rect,
    /// Canvas the display rect shows.
    pub canvas: Canvas,
}

impl DisplayMapping {
    /// Display space equals canvas space.
    pub fn identity(canvas: Canvas) -> Self {
        Self {
            display: canvas.rect(),
            canvas,
        }
    }

    /// Convert a display point to canvas pixels.
    pub fn to_canvas(&self, p: Point) -> Point {
        let sx = if self.display.width() > 0.0 {
            f64::from(self.canvas.width) / self.display.width()
        } else {
            1.0
        };
        let sy = if self.display.height() > 0.0 {
            f64::from(self.canvas.height) / self.display.height()
        } else {
            1.0
        };
        Point::new(
            (p.x - self.display.x0) * sx,
            (p.y - self.display.y0) * sy,
        )
    }
}

/// Keep `p` at least `margin` away from every frame edge.
///
/// A frame narrower than `2 * margin` pins that axis to its center.
pub fn clamp_position(p: Point, frame: Canvas, margin: f64) -> Point {
    fn axis(v: f64, len: f64, margin: f64) -> f64 {
        let (lo, hi) = (margin, len - margin);
        if lo > hi {
            len / 2.0
        } else if v.is_nan() {
            lo
        } else {
            v.clamp(lo, hi)
        }
    }
    Point::new(
        axis(p.x, f64::from(frame.width), margin),
        axis(p.y, f64::from(frame.height), margin),
    )
}

/// Where a caption drag currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragPhase {
    /// No drag in progress.
    #[default]
    Idle,
    /// The caption is grabbed.
    Dragging {
        /// Clamped position the caption moves to on release.
        candidate: Point,
    },
}

/// Idle/Dragging state machine for moving the caption.
///
/// Moves only update a candidate; the caption itself changes once, when the drag ends.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionDrag {
    phase: DragPhase,
    hit_radius: f64,
    margin: f64,
}

impl Default for CaptionDrag {
    fn default() -> Self {
        Self::new(DEFAULT_HIT_RADIUS, DEFAULT_CLAMP_MARGIN)
    }
}

impl CaptionDrag {
    /// Idle drag with the given grab radius and edge margin.
    pub fn new(hit_radius: f64, margin: f64) -> Self {
        Self {
            phase: DragPhase::Idle,
            hit_radius,
            margin,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Grab radius in canvas pixels.
    pub fn hit_radius(&self) -> f64 {
        self.hit_radius
    }

    /// Edge margin candidates are clamped to.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// True between a grabbing press and its release.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Position the caption would move to if released now.
    pub fn candidate(&self) -> Option<Point> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Dragging { candidate } => Some(candidate),
        }
    }

    /// True when a press at `at` would grab `caption`.
    pub fn hits(&self, at: Point, caption: &Caption) -> bool {
        !caption.is_blank() && at.distance(caption.position) <= self.hit_radius
    }

    /// Start a drag if the press lands on the caption. Returns whether a drag started.
    pub fn pointer_down(&mut self, at: Point, caption: &Caption) -> bool {
        if self.is_dragging() || !self.hits(at, caption) {
            return false;
        }
        self.phase = DragPhase::Dragging {
            candidate: caption.position,
        };
        tracing::debug!(x = at.x, y = at.y, "caption drag started");
        true
    }

    /// Follow the pointer. Returns the clamped candidate while dragging.
    pub fn pointer_move(&mut self, at: Point, frame: Canvas) -> Option<Point> {
        let DragPhase::Dragging { candidate } = &mut self.phase else {
            return None;
        };
        *candidate = clamp_position(at, frame, self.margin);
        Some(*candidate)
    }

    /// End the drag. Returns the position to commit, if a drag was active.
    pub fn pointer_up(&mut self) -> Option<Point> {
        let committed = self.candidate();
        self.phase = DragPhase::Idle;
        if let Some(p) = committed {
            tracing::debug!(x = p.x, y = p.y, "caption drag committed");
        }
        committed
    }

    /// Leaving the canvas ends the drag exactly like a release.
    pub fn pointer_leave(&mut self) -> Option<Point> {
        self.pointer_up()
    }

    /// Drop any drag without committing.
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/drag.rs"]
mod tests;
