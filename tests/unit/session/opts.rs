use super::*;

#[test]
fn defaults_reproduce_the_editor() {
    let o = SessionOpts::default();
    assert_eq!(o.canvas, Canvas::new(600, 700));
    assert_eq!(o.layout_mode, LayoutMode::Fill);
    assert_eq!(o.debounce(), Duration::from_millis(300));
    assert_eq!(o.hit_radius, 50.0);
    assert_eq!(o.clamp_margin, 30.0);
    assert_eq!(o.compositor.caption_inset, 40.0);
    assert_eq!(o.caption.font_size_px, 24);
    assert!(o.validate().is_ok());
}

#[test]
fn partial_json_fills_in_defaults() {
    let o: SessionOpts =
        serde_json::from_str(r#"{"canvas":{"width":300,"height":200},"debounce_ms":10}"#).unwrap();
    assert_eq!(o.canvas, Canvas::new(300, 200));
    assert_eq!(o.debounce_ms, 10);
    assert_eq!(o.hit_radius, 50.0);
}

#[test]
fn invalid_opts_are_rejected() {
    let mut o = SessionOpts::default();
    o.hit_radius = -1.0;
    assert!(matches!(o.validate(), Err(JokeframeError::Validation(_))));

    let mut o = SessionOpts::default();
    o.canvas = Canvas::new(0, 10);
    assert!(o.validate().is_err());
}

#[test]
fn edit_doc_parses() {
    let doc = EditDoc::from_json_str(
        r##"{
            "shape": "heart",
            "layout": "inset",
            "text": "Why did the chicken",
            "color": "#112233",
            "size": 30,
            "position": {"x": 100.0, "y": 120.0}
        }"##,
    )
    .unwrap();
    assert_eq!(doc.shape, ShapeKind::Heart);
    assert_eq!(doc.layout, Some(LayoutMode::Inset));
    assert_eq!(doc.color, Some(Rgb8::new(0x11, 0x22, 0x33)));
    assert_eq!(doc.size, Some(30));
    assert_eq!(doc.position, Some(Point::new(100.0, 120.0)));
    assert_eq!(doc.opts, SessionOpts::default());

    let again = EditDoc::from_json_str(&doc.to_json_pretty().unwrap()).unwrap();
    assert_eq!(again, doc);
}

#[test]
fn edit_doc_rejects_unknown_fields_and_bad_colors() {
    assert!(EditDoc::from_json_str(r#"{"shpae":"circle"}"#).is_err());
    assert!(EditDoc::from_json_str(r#"{"color":"red"}"#).is_err());
}

#[test]
fn unknown_shape_in_doc_falls_back_to_square() {
    let doc = EditDoc::from_json_str(r#"{"shape":"octagon"}"#).unwrap();
    assert_eq!(doc.shape, ShapeKind::Square);
}
