use image::{DynamicImage, Rgb, RgbImage};
use std::path::PathBuf;
use storeshot_core::prelude::*;
use storeshot_core::FontSource;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn fixture_font() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSansMono-Bold.ttf")
}

fn load(size: u32) -> TitleFont {
    pick_font(&[PathBuf::from("/definitely/not/here.ttf"), fixture_font()], size)
}

/// (min_x, max_x, min_y, max_y) of every non-black pixel.
fn ink_bounds(img: &RgbImage) -> Option<(u32, u32, u32, u32)> {
    let mut b: Option<(u32, u32, u32, u32)> = None;
    for (x, y, p) in img.enumerate_pixels() {
        if *p == BLACK {
            continue;
        }
        b = Some(match b {
            None => (x, x, y, y),
            Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
        });
    }
    b
}

#[test]
fn first_existing_candidate_is_used() {
    let font = load(64);
    assert!(!font.is_builtin());
    assert_eq!(font.source(), &FontSource::File(fixture_font()));
    assert_eq!(font.size(), 64);
}

#[test]
fn size_is_pixels_per_em() {
    // monospace advance is 1233/2048 em
    let per_char = 1233.0 / 2048.0;
    for size in [32_u32, 64, 128] {
        let w = load(size).text_width("H");
        let expected = per_char * size as f32;
        assert!((w - expected).abs() < 0.5, "size {size}: {w} vs {expected}");
    }
}

#[test]
fn width_adds_up_across_characters() {
    let font = load(64);
    let one = font.text_width("H");
    let five = font.text_width("Hello");
    assert!((five - 5.0 * one).abs() < 0.5, "{five} vs {}", 5.0 * one);
    assert_eq!(font.text_width(""), 0.0);
}

#[test]
fn ink_stays_inside_the_measured_box() {
    let font = load(64);
    let (x, y) = (100.5_f32, 40.0_f32);
    let text = "Hello World";
    let w = font.text_width(text);
    let mut canvas = RgbImage::from_pixel(1000, 200, BLACK);
    font.draw(&mut canvas, x, y, text, WHITE);

    let (x0, x1, y0, y1) = ink_bounds(&canvas).expect("text drew nothing");
    assert!(x0 as f32 >= x.floor() - 1.0, "ink starts at {x0}, box at {x}");
    assert!(x1 as f32 <= (x + w).ceil() + 1.0, "ink ends at {x1}, box ends at {}", x + w);
    // no descenders: the glyphs sit between the top edge and one em below it
    assert!(y0 as f32 >= y, "ink top {y0} above line top {y}");
    assert!((y1 as f32) < y + 64.0, "ink bottom {y1}");
}

#[test]
fn wrapped_lines_fit_measured_widths() {
    let font = load(64);
    let phrases = [
        "Challenge your friends in real time",
        "Défiez vos amis en temps réel",
        "Supercalifragilisticexpialidocious words overflow",
    ];
    for max_width in [200.0_f32, 480.0, 900.0] {
        for phrase in phrases {
            let lines = wrap_text(phrase, &font, max_width);
            assert!(!lines.is_empty());
            for line in &lines {
                let fits = font.text_width(line) <= max_width;
                let single = line.split_whitespace().count() == 1;
                assert!(fits || single, "{line:?} overflows {max_width}");
            }
            for pair in lines.windows(2) {
                let joined = format!("{} {}", pair[0], pair[1].split_whitespace().next().unwrap_or(""));
                assert!(font.text_width(&joined) > max_width, "{joined:?} should have fit on one line");
            }
        }
    }
}

#[test]
fn title_renders_centered_in_the_title_band() {
    let cfg = OverlayConfig::builder()
        .canvas(1000, 1200)
        .background(Color::BLACK)
        .text_color(Color::WHITE)
        .text_max_width(900.0)
        .top_padding(50.0)
        .device_bounds(200.0, 400.0)
        .device_top(600.0)
        .build();
    let font = load(64);
    let shot = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 20, BLACK));
    let canvas = render_canvas(&cfg, &font, "Hello", &shot);

    let (x0, x1, y0, y1) = ink_bounds(&canvas).expect("title drew nothing");
    let w = font.text_width("Hello");
    let left = (1000.0 - w) / 2.0;
    assert!(x0 as f32 >= left.floor() - 1.0);
    assert!(x1 as f32 <= (left + w).ceil() + 1.0);
    // centered: left and right margins differ by at most a glyph's side bearing
    let (margin_l, margin_r) = (x0 as f32, 999.0 - x1 as f32);
    assert!((margin_l - margin_r).abs() < 12.0, "{margin_l} vs {margin_r}");
    assert!(y0 >= 50 && y1 < 50 + 64);
}
