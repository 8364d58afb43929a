use super::*;
use crate::text::block_face::BlockFace;

#[test]
fn garbage_font_bytes_are_rejected() {
    let err = FontFace::from_bytes(b"not a font".to_vec()).unwrap_err();
    assert!(matches!(err, JokeframeError::Validation(_)));
}

#[test]
fn boxed_faces_forward_to_the_inner_face() {
    let mut face: Box<dyn CaptionFace> = Box::new(BlockFace::default());
    assert_eq!(face.measure("abcd", 20.0), 60.0);

    let mut ctx = vello_cpu::RenderContext::new(64, 32);
    face.fill_line(&mut ctx, "ab", 20.0, Point::new(32.0, 16.0));
    assert_eq!(face.measure("", 20.0), 0.0);
}

const DEJAVU_BOLD: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/fonts/DejaVuSans-Bold.ttf"
);

fn dejavu() -> FontFace {
    FontFace::from_bytes(std::fs::read(DEJAVU_BOLD).unwrap()).unwrap()
}

#[test]
fn font_face_registers_its_family() {
    assert_eq!(dejavu().family_name(), "DejaVu Sans");
}

#[test]
fn font_face_measures_with_trailing_space_and_scales_with_size() {
    let mut face = dejavu();
    let small = face.measure("Hello", 24.0);
    let large = face.measure("Hello", 48.0);
    assert!(small > 0.0);
    assert!((large - 2.0 * small).abs() < 1.0, "{small} vs {large}");
    assert!(face.measure("Hello ", 24.0) > small);
    assert_eq!(face.measure("", 24.0), 0.0);
}

#[test]
fn font_face_centers_ink_on_the_anchor() {
    let mut face = dejavu();
    let mut ctx = vello_cpu::RenderContext::new(600, 700);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    face.fill_line(&mut ctx, "Hello", 48.0, Point::new(300.0, 350.0));
    let mut pixmap = vello_cpu::Pixmap::new(600, 700);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    let (mut x0, mut y0, mut x1, mut y1) = (u32::MAX, u32::MAX, 0, 0);
    for (i, px) in pixmap.data_as_u8_slice().chunks_exact(4).enumerate() {
        if px[3] > 127 {
            let (x, y) = ((i % 600) as u32, (i / 600) as u32);
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }
    }
    assert!(x0 <= x1, "nothing was drawn");

    let ink_w = f64::from(x1 - x0);
    let advance = face.measure("Hello", 48.0);
    assert!(ink_w > advance * 0.7 && ink_w <= advance, "{ink_w} vs {advance}");

    let cx = f64::from(x0 + x1) / 2.0;
    let cy = f64::from(y0 + y1) / 2.0;
    assert!((cx - 300.0).abs() <= 12.0, "ink center x {cx}");
    assert!((cy - 350.0).abs() <= 8.0, "ink center y {cy}");
}
