use super::*;

#[test]
fn ring_stays_near_its_radius() {
    let c = Point::new(100.0, 80.0);
    let ring = dashed_ring(c, 50.0, 2.0);
    let mut subpaths = 0;
    for el in ring.elements() {
        match *el {
            kurbo::PathEl::MoveTo(p) | kurbo::PathEl::LineTo(p) => {
                let d = p.distance(c);
                assert!((49.0 - 1e-9..=51.0 + 1e-9).contains(&d), "{d}");
                if matches!(el, kurbo::PathEl::MoveTo(_)) {
                    subpaths += 1;
                }
            }
            kurbo::PathEl::ClosePath => {}
            _ => panic!("ring uses straight segments only"),
        }
    }
    assert_eq!(subpaths, DASH_COUNT);
}

#[test]
fn overlay_leaves_backdrop_untouched_and_marks_the_handle() {
    let mut backdrop = FrameRGBA::transparent(200, 160);
    for px in backdrop.data.chunks_exact_mut(4) {
        px.copy_from_slice(&[0, 0, 128, 255]);
    }

    let out = draw_drag_overlay(&backdrop, Point::new(100.0, 80.0), 50.0).unwrap();
    assert_eq!(backdrop.pixel(100, 80), Some([0, 0, 128, 255]));

    assert_eq!(out.pixel(100, 80), Some([255, 255, 255, 255]));
    // Far from ring and handle.
    assert_eq!(out.pixel(5, 5), Some([0, 0, 128, 255]));
    assert_eq!(out.pixel(100, 55), Some([0, 0, 128, 255]));
    // On the first dash, which starts at angle 0.
    let dash = out.pixel(150, 81).unwrap();
    assert!(dash[0] > 100, "{dash:?}");
}

#[test]
fn straight_backdrops_are_rejected() {
    let mut backdrop = FrameRGBA::transparent(4, 4);
    backdrop.premultiplied = false;
    assert!(draw_drag_overlay(&backdrop, Point::ZERO, 50.0).is_err());
}
