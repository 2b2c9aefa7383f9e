use image::{GrayImage, Luma, Rgb, RgbImage};
use storeshot_core::compositing::{paste_masked, rounded_rect_mask};

#[test]
fn corners_are_transparent_when_rounded() {
    for radius in [0.5_f32, 1.0, 1.5, 2.0, 8.0, 40.0, 1000.0] {
        let m = rounded_rect_mask(120, 240, radius);
        assert_eq!(m.dimensions(), (120, 240));
        for (x, y) in [(0, 0), (119, 0), (0, 239), (119, 239)] {
            assert_eq!(m.get_pixel(x, y)[0], 0, "radius {radius} corner ({x},{y})");
        }
        assert_eq!(m.get_pixel(60, 120)[0], 255);
    }
}

#[test]
fn tiny_radius_only_drops_the_corner_pixels() {
    let m = rounded_rect_mask(100, 100, 1.0);
    let transparent = m.pixels().filter(|p| p[0] == 0).count();
    assert_eq!(transparent, 4);
    assert_eq!(m.get_pixel(1, 0)[0], 255);
    assert_eq!(m.get_pixel(0, 1)[0], 255);
}

#[test]
fn edges_between_corners_are_opaque() {
    let m = rounded_rect_mask(100, 200, 20.0);
    for (x, y) in [(50, 0), (50, 199), (0, 100), (99, 100), (20, 0), (0, 20)] {
        assert_eq!(m.get_pixel(x, y)[0], 255, "({x},{y})");
    }
}

#[test]
fn zero_radius_is_fully_opaque() {
    let m = rounded_rect_mask(16, 9, 0.0);
    assert!(m.pixels().all(|p| p[0] == 255));
}

#[test]
fn mask_is_binary_and_symmetric() {
    let m = rounded_rect_mask(64, 48, 13.5);
    for y in 0..48 {
        for x in 0..64 {
            let v = m.get_pixel(x, y)[0];
            assert!(v == 0 || v == 255);
            assert_eq!(v, m.get_pixel(63 - x, y)[0]);
            assert_eq!(v, m.get_pixel(x, 47 - y)[0]);
        }
    }
}

#[test]
fn paste_never_leaves_the_source_box() {
    let bg = Rgb([1, 2, 3]);
    let mut canvas = RgbImage::from_pixel(50, 50, bg);
    let src = RgbImage::from_pixel(20, 10, Rgb([200, 100, 50]));
    let mask = rounded_rect_mask(20, 10, 4.0);
    paste_masked(&mut canvas, &src, &mask, 15, 30);
    for (x, y, p) in canvas.enumerate_pixels() {
        let inside = (15..35).contains(&x) && (30..40).contains(&y);
        if !inside {
            assert_eq!(*p, bg, "({x},{y}) painted outside the box");
        }
    }
    assert_eq!(*canvas.get_pixel(15, 30), bg);
    assert_eq!(*canvas.get_pixel(34, 39), bg);
    assert_eq!(*canvas.get_pixel(25, 35), Rgb([200, 100, 50]));
}

#[test]
fn paste_clips_at_canvas_edges() {
    let bg = Rgb([0, 0, 0]);
    let mut canvas = RgbImage::from_pixel(20, 20, bg);
    let src = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
    let mask = GrayImage::from_pixel(10, 10, Luma([255]));
    paste_masked(&mut canvas, &src, &mask, -5, -5);
    paste_masked(&mut canvas, &src, &mask, 15, 15);
    let painted = canvas.pixels().filter(|p| p.0 == [255, 255, 255]).count();
    assert_eq!(painted, 25 + 25);
    assert_eq!(canvas.get_pixel(4, 4).0, [255, 255, 255]);
    assert_eq!(canvas.get_pixel(5, 5).0, [0, 0, 0]);
    assert_eq!(canvas.get_pixel(19, 19).0, [255, 255, 255]);
}

#[test]
fn partial_mask_blends() {
    let mut canvas = RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]));
    let src = RgbImage::from_pixel(1, 1, Rgb([255, 255, 255]));
    let mask = GrayImage::from_pixel(1, 1, Luma([51]));
    paste_masked(&mut canvas, &src, &mask, 0, 0);
    assert_eq!(canvas.get_pixel(0, 0).0, [51, 51, 51]);
}
