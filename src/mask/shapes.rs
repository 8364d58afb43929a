//! Clip-path generation for the frame shape catalog.
//!
//! Every shape is a pure function of the target rect: center and half extents in, closed path
//! out. Dispatch is a plain `match` so each shape can be tested without a renderer.

use std::f64::consts::PI;

use kurbo::Shape;

use crate::foundation::core::{BezPath, Point, Rect};

/// Frame shapes offered by the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    /// Circle inscribed in the shorter side.
    #[default]
    Circle,
    /// The whole area; also the fallback for unknown ids.
    Square,
    /// Apex at the top center, base along the bottom edge.
    Triangle,
    /// Regular hexagon on the inscribed circle.
    Hexagon,
    /// Five-pointed star on the inscribed circle.
    Star,
    /// Heart of four cubic segments, centered on the area.
    Heart,
    /// Rhombus touching the area's edge midpoints.
    Diamond,
    /// No clipping; the image is drawn as-is.
    None,
}

impl ShapeKind {
    /// Catalog order used by shape pickers.
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Hexagon,
        ShapeKind::Star,
        ShapeKind::Heart,
        ShapeKind::Diamond,
        ShapeKind::None,
    ];

    /// Stable lowercase id.
    pub fn id(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Star => "star",
            ShapeKind::Heart => "heart",
            ShapeKind::Diamond => "diamond",
            ShapeKind::None => "none",
        }
    }

    /// Display name for pickers.
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Circle => "Circle",
            ShapeKind::Square => "Square",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Hexagon => "Hexagon",
            ShapeKind::Star => "Star",
            ShapeKind::Heart => "Heart",
            ShapeKind::Diamond => "Diamond",
            ShapeKind::None => "No Frame",
        }
    }

    /// Resolve a shape id. Unknown ids fall back to [`ShapeKind::Square`].
    pub fn from_id(id: &str) -> Self {
        let norm = id.trim().to_ascii_lowercase();
        match norm.as_str() {
            "circle" => ShapeKind::Circle,
            "square" => ShapeKind::Square,
            "triangle" => ShapeKind::Triangle,
            "hexagon" => ShapeKind::Hexagon,
            "star" => ShapeKind::Star,
            "heart" => ShapeKind::Heart,
            "diamond" => ShapeKind::Diamond,
            "none" => ShapeKind::None,
            _ => {
                tracing::debug!(id, "unknown shape id, using square");
                ShapeKind::Square
            }
        }
    }
}

impl From<String> for ShapeKind {
    fn from(value: String) -> Self {
        Self::from_id(&value)
    }
}

impl From<ShapeKind> for String {
    fn from(value: ShapeKind) -> Self {
        value.id().to_owned()
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Region that restricts drawing of the source image.
#[derive(Clone, Debug, PartialEq)]
pub enum ClipMask {
    /// Draw everything.
    Identity,
    /// Draw only inside this closed path (nonzero fill).
    Path(BezPath),
}

impl ClipMask {
    /// True when nothing is clipped.
    pub fn is_identity(&self) -> bool {
        matches!(self, ClipMask::Identity)
    }

    /// The clip path, if any.
    pub fn path(&self) -> Option<&BezPath> {
        match self {
            ClipMask::Identity => None,
            ClipMask::Path(p) => Some(p),
        }
    }

    /// SVG path data for previews; `None` for the identity mask.
    pub fn to_svg(&self) -> Option<String> {
        self.path().map(BezPath::to_svg)
    }
}

const RECT_TOLERANCE: f64 = 0.1;
const STAR_INNER_RATIO: f64 = 0.4;

/// Build the clip path for `shape` inside `area`.
pub fn build_mask(shape: ShapeKind, area: Rect) -> ClipMask {
    let area = area.abs();
    let c = area.center();
    let radius = area.width().min(area.height()) / 2.0;

    let path = match shape {
        ShapeKind::None => return ClipMask::Identity,
        ShapeKind::Circle => circle(c, radius),
        ShapeKind::Square => area.to_path(RECT_TOLERANCE),
        ShapeKind::Triangle => polygon(&[
            Point::new(c.x, area.y0),
            Point::new(area.x0, area.y1),
            Point::new(area.x1, area.y1),
        ]),
        ShapeKind::Hexagon => {
            let pts: Vec<Point> = (0..6)
                .map(|i| polar(c, radius, f64::from(i) * PI / 3.0))
                .collect();
            polygon(&pts)
        }
        ShapeKind::Star => {
            let inner = radius * STAR_INNER_RATIO;
            let pts: Vec<Point> = (0..10)
                .map(|i| {
                    let r = if i % 2 == 0 { radius } else { inner };
                    polar(c, r, f64::from(i) * PI / 5.0)
                })
                .collect();
            polygon(&pts)
        }
        ShapeKind::Heart => heart(c, radius),
        ShapeKind::Diamond => polygon(&[
            Point::new(c.x, area.y0),
            Point::new(area.x1, c.y),
            Point::new(c.x, area.y1),
            Point::new(area.x0, c.y),
        ]),
    };
    ClipMask::Path(path)
}

fn polar(c: Point, r: f64, angle: f64) -> Point {
    Point::new(c.x + r * angle.cos(), c.y + r * angle.sin())
}

// Quarter-circle cubic handle length.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Full sweep starting at angle 0, as four quarter arcs. Endpoints sit on the axis extremes so
/// the path never leaves the circle's bounding square.
fn circle(c: Point, r: f64) -> BezPath {
    let k = r * KAPPA;
    let mut p = BezPath::new();
    p.move_to((c.x + r, c.y));
    p.curve_to((c.x + r, c.y + k), (c.x + k, c.y + r), (c.x, c.y + r));
    p.curve_to((c.x - k, c.y + r), (c.x - r, c.y + k), (c.x - r, c.y));
    p.curve_to((c.x - r, c.y - k), (c.x - k, c.y - r), (c.x, c.y - r));
    p.curve_to((c.x + k, c.y - r), (c.x + r, c.y - k), (c.x + r, c.y));
    p.close_path();
    p
}

fn polygon(pts: &[Point]) -> BezPath {
    let mut p = BezPath::new();
    let mut it = pts.iter();
    if let Some(&first) = it.next() {
        p.move_to(first);
        for &pt in it {
            p.line_to(pt);
        }
        p.close_path();
    }
    p
}

// The heart template spans y in [cy + size/8, cy + 3*size/2]; shift it so that span is
// centered on the area.
const HEART_CENTER_SHIFT: f64 = 13.0 / 16.0;

fn heart(c: Point, size: f64) -> BezPath {
    let cx = c.x;
    let cy = c.y - size * HEART_CENTER_SHIFT;
    let pt = |dx: f64, dy: f64| Point::new(cx + dx * size, cy + dy * size);

    let mut p = BezPath::new();
    p.move_to(pt(0.0, 0.5));
    p.curve_to(pt(0.0, 0.0), pt(-1.0, 0.0), pt(-1.0, 0.5));
    p.curve_to(pt(-1.0, 1.0), pt(0.0, 1.5), pt(0.0, 1.5));
    p.curve_to(pt(0.0, 1.0), pt(1.0, 1.0), pt(1.0, 0.5));
    p.curve_to(pt(1.0, 0.0), pt(0.0, 0.0), pt(0.0, 0.5));
    p.close_path();
    p
}

#[cfg(test)]
#[path = "../../tests/unit/mask/shapes.rs"]
mod tests;
