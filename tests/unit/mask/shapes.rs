use super::*;
use kurbo::PathEl;

const EPS: f64 = 1e-9;

fn frame_area() -> Rect {
    Rect::new(0.0, 0.0, 600.0, 700.0)
}

fn inside(area: Rect, bbox: Rect) -> bool {
    bbox.x0 >= area.x0 - EPS
        && bbox.y0 >= area.y0 - EPS
        && bbox.x1 <= area.x1 + EPS
        && bbox.y1 <= area.y1 + EPS
}

fn vertices(p: &BezPath) -> Vec<Point> {
    p.elements()
        .iter()
        .filter_map(|el| match *el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
            PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => Some(p),
            PathEl::ClosePath => None,
        })
        .collect()
}

#[test]
fn none_is_identity() {
    let m = build_mask(ShapeKind::None, frame_area());
    assert!(m.is_identity());
    assert!(m.to_svg().is_none());
}

#[test]
fn every_shape_stays_inside_area_and_is_closed() {
    let areas = [
        frame_area(),
        Rect::new(100.0, 20.0, 500.0, 220.0),
        Rect::new(10.0, 10.0, 90.0, 300.0),
    ];
    for area in areas {
        for shape in ShapeKind::ALL {
            let ClipMask::Path(p) = build_mask(shape, area) else {
                assert_eq!(shape, ShapeKind::None);
                continue;
            };
            assert!(
                inside(area, p.bounding_box()),
                "{shape} bbox {:?} escapes {area:?}",
                p.bounding_box()
            );
            assert_eq!(p.elements().last(), Some(&PathEl::ClosePath), "{shape}");
            let first = match p.elements()[0] {
                PathEl::MoveTo(pt) => pt,
                ref other => panic!("{shape} starts with {other:?}"),
            };
            if shape == ShapeKind::Heart {
                let last = *vertices(&p).last().unwrap();
                assert!((last - first).hypot() < EPS);
            }
        }
    }
}

#[test]
fn circle_uses_min_half_extent() {
    let p = build_mask(ShapeKind::Circle, frame_area());
    let bbox = p.path().unwrap().bounding_box();
    assert!((bbox.center().x - 300.0).abs() < 1e-6);
    assert!((bbox.center().y - 350.0).abs() < 1e-6);
    assert!((bbox.width() - 600.0).abs() < 1e-6);
    assert!((bbox.height() - 600.0).abs() < 1e-6);
}

#[test]
fn square_is_the_area() {
    let area = Rect::new(5.0, 6.0, 105.0, 56.0);
    let p = build_mask(ShapeKind::Square, area);
    assert_eq!(p.path().unwrap().bounding_box(), area);
}

#[test]
fn triangle_apex_top_center_base_bottom_corners() {
    let area = Rect::new(0.0, 0.0, 100.0, 80.0);
    let v = vertices(build_mask(ShapeKind::Triangle, area).path().unwrap());
    assert_eq!(
        v,
        vec![
            Point::new(50.0, 0.0),
            Point::new(0.0, 80.0),
            Point::new(100.0, 80.0)
        ]
    );
}

#[test]
fn hexagon_vertices_are_on_radius_at_sixty_degrees() {
    let area = Rect::new(0.0, 0.0, 200.0, 100.0);
    let v = vertices(build_mask(ShapeKind::Hexagon, area).path().unwrap());
    assert_eq!(v.len(), 6);
    let c = Point::new(100.0, 50.0);
    for (i, p) in v.iter().enumerate() {
        assert!(((*p - c).hypot() - 50.0).abs() < 1e-9);
        let angle = (p.y - c.y).atan2(p.x - c.x).rem_euclid(2.0 * PI);
        let want = (i as f64) * PI / 3.0;
        assert!((angle - want).abs() < 1e-9, "vertex {i}: {angle} vs {want}");
    }
}

#[test]
fn star_alternates_outer_and_inner_radius() {
    let area = frame_area();
    let v = vertices(build_mask(ShapeKind::Star, area).path().unwrap());
    assert_eq!(v.len(), 10);
    let c = area.center();
    for (i, p) in v.iter().enumerate() {
        let r = (*p - c).hypot();
        let want = if i % 2 == 0 { 300.0 } else { 120.0 };
        assert!((r - want).abs() < 1e-9, "vertex {i} radius {r}");
    }
}

#[test]
fn diamond_uses_edge_midpoints() {
    let area = Rect::new(10.0, 20.0, 110.0, 220.0);
    let v = vertices(build_mask(ShapeKind::Diamond, area).path().unwrap());
    assert_eq!(
        v,
        vec![
            Point::new(60.0, 20.0),
            Point::new(110.0, 120.0),
            Point::new(60.0, 220.0),
            Point::new(10.0, 120.0)
        ]
    );
}

#[test]
fn heart_is_four_cubics_centered_on_area() {
    let area = frame_area();
    let p = build_mask(ShapeKind::Heart, area);
    let p = p.path().unwrap();
    let cubics = p
        .elements()
        .iter()
        .filter(|el| matches!(el, PathEl::CurveTo(..)))
        .count();
    assert_eq!(cubics, 4);
    let bbox = p.bounding_box();
    assert!((bbox.center().x - 300.0).abs() < 1e-6);
    assert!((bbox.center().y - 350.0).abs() < 1e-6);
    assert!((bbox.width() - 600.0).abs() < 1e-6);
}

#[test]
fn unknown_ids_fall_back_to_square() {
    assert_eq!(ShapeKind::from_id("star"), ShapeKind::Star);
    assert_eq!(ShapeKind::from_id(" Heart "), ShapeKind::Heart);
    assert_eq!(ShapeKind::from_id("pentagon"), ShapeKind::Square);
    let parsed: ShapeKind = serde_json::from_str("\"blob\"").unwrap();
    assert_eq!(parsed, ShapeKind::Square);
    assert_eq!(serde_json::to_string(&ShapeKind::None).unwrap(), "\"none\"");
}

#[test]
fn catalog_ids_round_trip() {
    for shape in ShapeKind::ALL {
        assert_eq!(ShapeKind::from_id(shape.id()), shape);
        assert!(!shape.label().is_empty());
    }
    assert_eq!(ShapeKind::default(), ShapeKind::Circle);
}

#[test]
fn svg_export_starts_with_move() {
    let svg = build_mask(ShapeKind::Diamond, Rect::new(0.0, 0.0, 10.0, 10.0))
        .to_svg()
        .unwrap();
    assert!(svg.starts_with('M'));
    assert!(svg.ends_with('Z'));
}
