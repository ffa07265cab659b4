use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;

/// Side length of the square drawing surface, matching the model input
pub const CANVAS_SIZE: u32 = 300;

pub const DEFAULT_STROKE_WIDTH: f32 = 3.0;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A single freehand stroke in canvas coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    pub points: Vec<(f32, f32)>,
}

impl Stroke {
    pub fn new(points: Vec<(f32, f32)>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs; a single-point stroke yields one degenerate segment
    pub fn segments(&self) -> impl Iterator<Item = ((f32, f32), (f32, f32))> + '_ {
        let single = (self.points.len() == 1).then(|| (self.points[0], self.points[0]));
        single
            .into_iter()
            .chain(self.points.windows(2).map(|w| (w[0], w[1])))
    }
}

/// Vector form of the user's drawing, kept in the session until cleared
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sketch {
    strokes: Vec<Stroke>,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stroke: Stroke) {
        if !stroke.is_empty() {
            self.strokes.push(stroke);
        }
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Render the strokes black-on-white into a square bitmap
    pub fn rasterize(&self, size: u32, stroke_width: f32) -> DrawingBitmap {
        let mut image = RgbaImage::from_pixel(size, size, BACKGROUND);
        // A disc of radius r is 2r + 1 pixels across
        let radius = (((stroke_width - 1.0) / 2.0).round() as i32).max(0);

        for stroke in &self.strokes {
            for (from, to) in stroke.segments() {
                stamp_segment(&mut image, from, to, radius);
            }
        }

        DrawingBitmap::new(image)
    }
}

/// Stamp filled discs along a segment, one per pixel step, to give it width
fn stamp_segment(image: &mut RgbaImage, from: (f32, f32), to: (f32, f32), radius: i32) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (from.0 + dx * t).round() as i32;
        let y = (from.1 + dy * t).round() as i32;
        draw_filled_circle_mut(image, (x, y), radius, INK);
    }
}

/// Captured canvas pixels, discarded after the classify action
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingBitmap {
    image: RgbaImage,
}

impl DrawingBitmap {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self::new(image.to_rgba8())
    }

    /// Stretch an arbitrary image onto a `size` x `size` bitmap; images that
    /// already fit are taken as they are
    pub fn from_image_resized(image: &DynamicImage, size: u32) -> Self {
        if image.width() == size && image.height() == size {
            Self::from_dynamic(image)
        } else {
            Self::from_dynamic(&image.resize_exact(size, size, FilterType::CatmullRom))
        }
    }

    /// A blank bitmap of the given size (every channel 255)
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, BACKGROUND))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn to_dynamic(&self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.image.clone())
    }

    /// True when nothing was drawn: every channel of every pixel is 255
    pub fn is_blank(&self) -> bool {
        self.image.as_raw().iter().all(|&v| v == 255)
    }
}
