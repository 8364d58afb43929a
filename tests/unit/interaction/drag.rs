use super::*;

fn hello() -> Caption {
    let mut c = Caption::default();
    c.text = "Hello".to_owned();
    c
}

#[test]
fn press_within_radius_starts_a_drag() {
    let mut d = CaptionDrag::default();
    assert!(d.pointer_down(Point::new(330.0, 390.0), &hello()));
    assert_eq!(d.candidate(), Some(Point::new(300.0, 350.0)));
}

#[test]
fn press_outside_radius_never_drags() {
    let cap = hello();
    for at in [
        Point::new(351.0, 350.0),
        Point::new(300.0, 400.5),
        Point::new(0.0, 0.0),
        Point::new(340.0, 390.0),
    ] {
        let mut d = CaptionDrag::default();
        assert!(!d.pointer_down(at, &cap), "{at:?}");
        assert_eq!(d.phase(), DragPhase::Idle);
        assert_eq!(d.pointer_move(Point::new(10.0, 10.0), Canvas::default()), None);
        assert_eq!(d.pointer_up(), None);
    }
}

#[test]
fn blank_caption_is_not_draggable() {
    let mut d = CaptionDrag::default();
    let mut cap = hello();
    cap.text = "   ".to_owned();
    assert!(!d.pointer_down(cap.position, &cap));
}

#[test]
fn drag_to_corner_commits_clamped_position() {
    let mut d = CaptionDrag::default();
    let frame = Canvas::default();
    assert!(d.pointer_down(Point::new(300.0, 350.0), &hello()));
    assert_eq!(
        d.pointer_move(Point::new(10.0, 10.0), frame),
        Some(Point::new(30.0, 30.0))
    );
    assert_eq!(
        d.pointer_move(Point::new(1000.0, 350.0), frame),
        Some(Point::new(570.0, 350.0))
    );
    assert_eq!(
        d.pointer_move(Point::new(10.0, 10.0), frame),
        Some(Point::new(30.0, 30.0))
    );
    assert_eq!(d.pointer_up(), Some(Point::new(30.0, 30.0)));
    assert!(!d.is_dragging());
    assert_eq!(d.pointer_up(), None);
}

#[test]
fn leaving_the_canvas_commits() {
    let mut d = CaptionDrag::default();
    assert!(d.pointer_down(Point::new(300.0, 350.0), &hello()));
    d.pointer_move(Point::new(200.0, 690.0), Canvas::default());
    assert_eq!(d.pointer_leave(), Some(Point::new(200.0, 670.0)));
}

#[test]
fn cancel_drops_the_candidate() {
    let mut d = CaptionDrag::default();
    assert!(d.pointer_down(Point::new(300.0, 350.0), &hello()));
    d.cancel();
    assert_eq!(d.pointer_up(), None);
}

#[test]
fn clamp_handles_tiny_frames() {
    assert_eq!(
        clamp_position(Point::new(5.0, 5.0), Canvas::new(40, 100), 30.0),
        Point::new(20.0, 30.0)
    );
    assert_eq!(
        clamp_position(Point::new(f64::NAN, 50.0), Canvas::new(100, 100), 30.0),
        Point::new(30.0, 50.0)
    );
}

#[test]
fn display_mapping_scales_and_offsets() {
    let m = DisplayMapping {
        display: Rect::new(10.0, 20.0, 310.0, 370.0),
        canvas: Canvas::default(),
    };
    assert_eq!(m.to_canvas(Point::new(10.0, 20.0)), Point::ZERO);
    assert_eq!(m.to_canvas(Point::new(160.0, 195.0)), Point::new(300.0, 350.0));

    let id = DisplayMapping::identity(Canvas::default());
    assert_eq!(id.to_canvas(Point::new(12.0, 34.0)), Point::new(12.0, 34.0));
}
