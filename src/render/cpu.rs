//! Raster helpers shared by the compositor and the drag overlay.
//!
//! All buffers are tightly packed premultiplied RGBA8, row-major.

use std::sync::Arc;

use crate::assets::decode::SourceImage;
use crate::foundation::core::{Affine, BezPath};
use crate::foundation::error::{JokeframeError, JokeframeResult};

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> JokeframeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| JokeframeError::validation("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| JokeframeError::validation("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(JokeframeError::validation("pixmap byte len mismatch"));
    }
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
    for px in bytes.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

/// Image paint for a decoded source photo.
pub(crate) fn image_paint(source: &SourceImage) -> JokeframeResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&source.rgba8_premul, source.width, source.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn mul_div255_u8(a: u16, b: u16) -> u8 {
    (((a * b) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Scale every pixel of `layer` by the alpha of the matching `mask` pixel.
pub(crate) fn mask_apply_alpha_in_place(layer: &mut [u8], mask: &[u8]) -> JokeframeResult<()> {
    if layer.len() != mask.len() || !layer.len().is_multiple_of(4) {
        return Err(JokeframeError::validation(
            "mask_apply expects equal-length rgba8 buffers",
        ));
    }
    for (d, m) in layer.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let w16 = u16::from(m[3]);
        for c in d.iter_mut() {
            *c = mul_div255_u8(u16::from(*c), w16);
        }
    }
    Ok(())
}

/// Source-over of premultiplied `src` onto premultiplied `dst`.
pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> JokeframeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(JokeframeError::validation(
            "premul_over expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = s[3];
        if sa == 0 {
            continue;
        }
        if sa == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255u16 - u16::from(sa);
        for c in 0..4 {
            d[c] = add_sat_u8(s[c], mul_div255_u8(u16::from(d[c]), inv));
        }
    }
    Ok(())
}

/// Convert premultiplied RGBA8 to straight alpha for encoders.
pub(crate) fn unpremultiply_rgba8(premul: &[u8]) -> Vec<u8> {
    let mut out = premul.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in px.iter_mut().take(3) {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

/// Separable gaussian blur over premultiplied RGBA8, with edge clamping.
///
/// Softens the caption shadow layer before it is merged under the text. Weights are q16 fixed
/// point, so the same inputs give the same bytes on every platform.
pub(crate) fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> JokeframeResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| JokeframeError::validation("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(JokeframeError::validation(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Normalized taps for `-radius..=radius`, summing to exactly `1 << 16`.
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> JokeframeResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(JokeframeError::validation("blur sigma must be finite and > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push rounding drift into the center tap so the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

/// Row pass of the shadow blur; samples past the edge repeat the edge pixel.
fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += (kw as u64) * (src[idx + c] as u64);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

/// Column pass of the shadow blur, run on the row pass output.
fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += (kw as u64) * (src[idx + c] as u64);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

// Round a q16 accumulator back to a channel value.
fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
