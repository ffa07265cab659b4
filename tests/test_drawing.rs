mod common;

use common::*;
use shapesketch::drawing::CANVAS_SIZE;

#[test]
fn test_empty_sketch_rasterizes_blank() {
    let sketch = Sketch::new();
    let bitmap = sketch.rasterize(CANVAS_SIZE, 3.0);

    assert_eq!(bitmap.width(), CANVAS_SIZE);
    assert_eq!(bitmap.height(), CANVAS_SIZE);
    assert!(bitmap.is_blank());
}

#[test]
fn test_stroke_leaves_ink() {
    let bitmap = drawn_bitmap();

    assert!(!bitmap.is_blank());
    assert_eq!(bitmap.image().get_pixel(150, 150).0, [0, 0, 0, 255]);
    // Far corner stays white
    assert_eq!(bitmap.image().get_pixel(10, 290).0, [255, 255, 255, 255]);
}

#[test]
fn test_single_click_leaves_a_dot() {
    let mut sketch = Sketch::new();
    sketch.push(Stroke::new(vec![(100.0, 120.0)]));
    let bitmap = sketch.rasterize(CANVAS_SIZE, 3.0);

    assert!(!bitmap.is_blank());
    assert_eq!(bitmap.image().get_pixel(100, 120).0, [0, 0, 0, 255]);
}

#[test]
fn test_empty_strokes_are_ignored() {
    let mut sketch = Sketch::new();
    sketch.push(Stroke::default());

    assert!(sketch.is_empty());
    assert!(sketch.rasterize(CANVAS_SIZE, 3.0).is_blank());
}

#[test]
fn test_clear_resets_canvas() {
    let mut sketch = Sketch::new();
    sketch.push(Stroke::new(vec![(0.0, 0.0), (299.0, 0.0)]));
    sketch.push(Stroke::new(vec![(0.0, 10.0), (0.0, 200.0)]));
    assert_eq!(sketch.strokes().len(), 2);

    sketch.clear();

    assert!(sketch.is_empty());
    assert!(sketch.rasterize(CANVAS_SIZE, 3.0).is_blank());
}

#[test]
fn test_strokes_off_the_edge_are_clipped() {
    let mut sketch = Sketch::new();
    sketch.push(Stroke::new(vec![(-40.0, 150.0), (400.0, 150.0)]));
    let bitmap = sketch.rasterize(CANVAS_SIZE, 3.0);

    assert_eq!(bitmap.width(), CANVAS_SIZE);
    assert_eq!(bitmap.image().get_pixel(0, 150).0, [0, 0, 0, 255]);
    assert_eq!(bitmap.image().get_pixel(299, 150).0, [0, 0, 0, 255]);
}

#[test]
fn test_transparent_pixel_is_not_blank() {
    let mut image = image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 255]));
    image.put_pixel(2, 2, image::Rgba([255, 255, 255, 0]));

    assert!(!DrawingBitmap::new(image).is_blank());
}

fn ink_rows_in_column(bitmap: &DrawingBitmap, x: u32) -> u32 {
    (0..bitmap.height())
        .filter(|&y| bitmap.image().get_pixel(x, y).0 == [0, 0, 0, 255])
        .count() as u32
}

#[test]
fn test_line_thickness_matches_stroke_width() {
    for width in [1.0, 3.0, 5.0] {
        let mut sketch = Sketch::new();
        sketch.push(Stroke::new(vec![(50.0, 150.0), (250.0, 150.0)]));
        let bitmap = sketch.rasterize(CANVAS_SIZE, width);

        assert_eq!(ink_rows_in_column(&bitmap, 150), width as u32, "width {width}");
    }
}

#[test]
fn test_resize_stretches_to_canvas() {
    let mut image = image::RgbaImage::from_pixel(150, 100, image::Rgba([255, 255, 255, 255]));
    for x in 0..150 {
        image.put_pixel(x, 50, image::Rgba([0, 0, 0, 255]));
    }

    let bitmap = DrawingBitmap::from_image_resized(&image::DynamicImage::ImageRgba8(image), CANVAS_SIZE);

    assert_eq!((bitmap.width(), bitmap.height()), (CANVAS_SIZE, CANVAS_SIZE));
    assert!(!bitmap.is_blank());
}

#[test]
fn test_resize_keeps_canvas_sized_images() {
    let source = drawn_bitmap().to_dynamic();

    let bitmap = DrawingBitmap::from_image_resized(&source, CANVAS_SIZE);

    assert_eq!(bitmap, drawn_bitmap());
}

#[test]
fn test_resize_converts_rgb_input() {
    let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        640,
        480,
        image::Rgb([255, 255, 255]),
    ));

    let bitmap = DrawingBitmap::from_image_resized(&image, CANVAS_SIZE);

    assert_eq!(bitmap.width(), CANVAS_SIZE);
    assert!(bitmap.is_blank());
}
