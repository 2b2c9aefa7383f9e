use image::{GrayImage, Luma, Rgb, RgbImage};

/// Blend `color` over `dst` with coverage in `0.0..=1.0`.
pub fn blend_pixel(dst: &mut Rgb<u8>, color: Rgb<u8>, coverage: f32) {
    let a = coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    if a >= 1.0 {
        *dst = color;
        return;
    }
    let inv = 1.0 - a;
    for i in 0..3 {
        dst.0[i] = (color.0[i] as f32 * a + dst.0[i] as f32 * inv).round() as u8;
    }
}

/// True if the pixel centered at (px, py) lies inside the rounded rectangle
/// spanning `[0, w] x [0, h]` with corner radius `r` (already clamped).
fn rounded_rect_contains(px: f32, py: f32, w: f32, h: f32, r: f32) -> bool {
    let cx = px.clamp(r, w - r);
    let cy = py.clamp(r, h - r);
    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy <= r * r
}

/// Single-channel mask of `w x h`: 255 inside a rounded rectangle covering the
/// whole image, 0 outside.
///
/// - A pixel is inside when its center is inside the shape (no anti-aliasing).
/// - `radius` is clamped to half the shorter side; 0 gives a fully opaque mask.
/// - Any positive radius leaves the four extreme corner pixels at 0, even when
///   it is too small to exclude their centers.
pub fn rounded_rect_mask(w: u32, h: u32, radius: f32) -> GrayImage {
    let (fw, fh) = (w as f32, h as f32);
    let r = radius.max(0.0).min(fw.min(fh) / 2.0);
    let (last_x, last_y) = (w.saturating_sub(1), h.saturating_sub(1));
    GrayImage::from_fn(w, h, |x, y| {
        let corner = (x == 0 || x == last_x) && (y == 0 || y == last_y);
        if r > 0.0 && corner {
            return Luma([0]);
        }
        if rounded_rect_contains(x as f32 + 0.5, y as f32 + 0.5, fw, fh, r) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Paste `src` onto `canvas` with its top-left at (x, y), using `mask` as
/// per-pixel alpha.
///
/// Offsets may be negative; anything falling off the canvas is clipped. Only
/// pixels inside `src`'s box whose mask value is non-zero are touched.
pub fn paste_masked(canvas: &mut RgbImage, src: &RgbImage, mask: &GrayImage, x: i64, y: i64) {
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);
    let w = src.width().min(mask.width());
    let h = src.height().min(mask.height());
    for sy in 0..h {
        let dy = y + sy as i64;
        if dy < 0 || dy >= ch {
            continue;
        }
        for sx in 0..w {
            let dx = x + sx as i64;
            if dx < 0 || dx >= cw {
                continue;
            }
            let a = mask.get_pixel(sx, sy)[0];
            if a == 0 {
                continue;
            }
            let px = *src.get_pixel(sx, sy);
            let dst = canvas.get_pixel_mut(dx as u32, dy as u32);
            if a == 255 {
                *dst = px;
            } else {
                blend_pixel(dst, px, a as f32 / 255.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_extremes() {
        let mut p = Rgb([10, 20, 30]);
        blend_pixel(&mut p, Rgb([200, 200, 200]), 0.0);
        assert_eq!(p, Rgb([10, 20, 30]));
        blend_pixel(&mut p, Rgb([200, 200, 200]), 1.0);
        assert_eq!(p, Rgb([200, 200, 200]));
        let mut q = Rgb([0, 0, 0]);
        blend_pixel(&mut q, Rgb([255, 255, 255]), 0.5);
        assert_eq!(q, Rgb([128, 128, 128]));
    }

    #[test]
    fn radius_larger_than_image_is_clamped() {
        let m = rounded_rect_mask(10, 10, 1000.0);
        // circle of radius 5 centred in the image
        assert_eq!(m.get_pixel(5, 5)[0], 255);
        assert_eq!(m.get_pixel(0, 0)[0], 0);
        assert_eq!(m.get_pixel(0, 5)[0], 255);
    }
}
