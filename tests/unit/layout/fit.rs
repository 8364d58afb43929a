use super::*;

fn frame() -> Canvas {
    Canvas::new(600, 700)
}

#[test]
fn fill_covers_the_frame_regardless_of_aspect() {
    for src in [Size::new(800.0, 400.0), Size::new(10.0, 3000.0)] {
        let r = compute_draw_rect(src, frame(), LayoutMode::Fill, 0.0).unwrap();
        assert_eq!(r, Rect::new(0.0, 0.0, 600.0, 700.0));
    }
}

#[test]
fn zero_source_fails_fast() {
    for mode in [LayoutMode::Fill, LayoutMode::Inset] {
        let err = compute_draw_rect(Size::new(0.0, 10.0), frame(), mode, 0.0).unwrap_err();
        assert!(matches!(err, JokeframeError::DegenerateGeometry(_)));
        let err = compute_draw_rect(Size::new(10.0, 0.0), frame(), mode, 0.0).unwrap_err();
        assert!(matches!(err, JokeframeError::DegenerateGeometry(_)));
    }
}

#[test]
fn zero_frame_fails_fast() {
    let err =
        compute_draw_rect(Size::new(10.0, 10.0), Canvas::new(600, 0), LayoutMode::Fill, 0.0)
            .unwrap_err();
    assert!(matches!(err, JokeframeError::DegenerateGeometry(_)));
}

#[test]
fn inset_landscape_hits_max_width() {
    let r = compute_draw_rect(Size::new(800.0, 400.0), frame(), LayoutMode::Inset, 0.0).unwrap();
    assert_eq!(r, Rect::new(100.0, 20.0, 500.0, 220.0));
}

#[test]
fn inset_portrait_hits_max_height_without_caption() {
    // 80% of 700 = 560, minus the 40px gutter.
    let r = compute_draw_rect(Size::new(300.0, 600.0), frame(), LayoutMode::Inset, 0.0).unwrap();
    assert_eq!(r.height(), 520.0);
    assert_eq!(r.width(), 260.0);
    assert_eq!(r.x0, 170.0);
    assert_eq!(r.y0, 20.0);
}

#[test]
fn inset_caption_shrinks_photo_down_to_floor() {
    // 3 lines at 24px reserve 102px: 700 - 102 - 40 = 558 band, 518 photo.
    let reserved = reserved_text_height(3, 24);
    assert_eq!(reserved, 102.0);
    let r =
        compute_draw_rect(Size::new(100.0, 100.0), frame(), LayoutMode::Inset, reserved).unwrap();
    assert_eq!(r.height(), 518.0);

    // A huge caption bottoms out at 30% of the canvas.
    let r = compute_draw_rect(Size::new(100.0, 100.0), frame(), LayoutMode::Inset, 10_000.0)
        .unwrap();
    assert_eq!(r.height(), 700.0 * 0.3 - 40.0);
}

#[test]
fn inset_band_is_capped_at_eighty_percent() {
    assert_eq!(inset_image_area_height(700.0, 0.0), 560.0);
    assert_eq!(inset_image_area_height(700.0, 34.0), 560.0);
    assert_eq!(inset_image_area_height(700.0, 200.0), 460.0);
    assert_eq!(inset_image_area_height(700.0, 600.0), 210.0);
}

#[test]
fn inset_rect_stays_inside_small_frames() {
    let tiny = Canvas::new(100, 100);
    let r = compute_draw_rect(Size::new(800.0, 400.0), tiny, LayoutMode::Inset, 0.0).unwrap();
    assert!(r.x0 >= 0.0 && r.y0 >= 0.0);
    assert!(r.x1 <= 100.0 && r.y1 <= 100.0);
}

#[test]
fn layout_mode_serde_ids() {
    assert_eq!(serde_json::to_string(&LayoutMode::Inset).unwrap(), "\"inset\"");
    let m: LayoutMode = serde_json::from_str("\"fill\"").unwrap();
    assert_eq!(m, LayoutMode::Fill);
}
