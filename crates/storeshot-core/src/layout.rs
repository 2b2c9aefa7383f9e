//! Pure placement math for the title block and the embedded screenshot.

use crate::font::TextMeasure;

/// One title line positioned on the canvas (top-left of its box).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Uniform factor fitting `src` inside `max` with aspect preserved.
/// May exceed 1.0 when the source is smaller than the bounds.
pub fn fit_scale(src_w: u32, src_h: u32, max_w: f32, max_h: f32) -> f64 {
    let sx = max_w as f64 / src_w as f64;
    let sy = max_h as f64 / src_h as f64;
    sx.min(sy)
}

/// Truncated output size for `src` scaled by [`fit_scale`].
///
/// The binding axis gets exactly `floor(bound)` so rounding in the ratio never
/// costs a pixel; each side is at least 1. Source sides must be non-zero.
pub fn fit_size(src_w: u32, src_h: u32, max_w: f32, max_h: f32) -> (u32, u32) {
    let sx = max_w as f64 / src_w as f64;
    let sy = max_h as f64 / src_h as f64;
    let bound_w = max_w.floor() as u32;
    let bound_h = max_h.floor() as u32;
    let (w, h) = if sx < sy {
        (bound_w, (src_h as f64 * sx) as u32)
    } else if sy < sx {
        ((src_w as f64 * sy) as u32, bound_h)
    } else {
        (bound_w, bound_h)
    };
    (w.max(1), h.max(1))
}

/// Positions wrapped lines: each centered horizontally, the first at
/// `top_padding`, then advancing by `font_size + line_spacing`.
///
/// The advance uses the nominal point size, not measured line metrics.
pub fn title_lines<M: TextMeasure + ?Sized>(
    lines: &[String],
    measure: &M,
    canvas_width: u32,
    top_padding: f32,
    font_size: u32,
    line_spacing: f32,
) -> Vec<PlacedLine> {
    let mut y = top_padding;
    let mut placed = Vec::with_capacity(lines.len());
    for line in lines {
        let w = measure.text_width(line);
        placed.push(PlacedLine {
            text: line.clone(),
            x: (canvas_width as f32 - w) / 2.0,
            y,
        });
        y += font_size as f32 + line_spacing;
    }
    placed
}

/// Top-left of the screenshot: floor-centered horizontally (may be negative
/// when wider than the canvas), fixed vertical offset.
pub fn device_origin(canvas_width: u32, shot_width: u32, top: f32) -> (i64, i64) {
    let x = (canvas_width as i64 - shot_width as i64).div_euclid(2);
    (x, top.floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_floors_toward_negative() {
        assert_eq!(device_origin(100, 50, 10.0), (25, 10));
        assert_eq!(device_origin(100, 51, 10.7), (24, 10));
        assert_eq!(device_origin(100, 103, 0.0), (-2, 0));
    }

    #[test]
    fn scale_can_exceed_one() {
        assert_eq!(fit_scale(100, 200, 400.0, 400.0), 2.0);
        assert_eq!(fit_size(100, 200, 400.0, 400.0), (200, 400));
    }
}
