use image::{DynamicImage, Rgb32FImage};
use rten_tensor::NdTensor;

use crate::drawing::DrawingBitmap;

pub const INPUT_CHANNELS: usize = 3;

/// Convert image to RGB with channel values scaled from [0, 255] to [0, 1]
pub fn to_normalized_rgb(img: &DynamicImage) -> Rgb32FImage {
    // Float images are already in [0, 1] and pass through unchanged
    img.to_rgb32f()
}

/// Lay the normalized image out as a single-item (1, H, W, 3) batch
pub fn to_input_tensor(img: &DynamicImage) -> NdTensor<f32, 4> {
    let rgb = to_normalized_rgb(img);
    let (width, height) = rgb.dimensions();
    NdTensor::from_data(
        [1, height as usize, width as usize, INPUT_CHANNELS],
        rgb.into_raw(),
    )
}

/// Preprocess a captured canvas bitmap for inference
pub fn preprocess_bitmap(bitmap: &DrawingBitmap) -> NdTensor<f32, 4> {
    to_input_tensor(&bitmap.to_dynamic())
}
