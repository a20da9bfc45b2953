use crate::error::ClassifierError;
use image::imageops::FilterType;
use ndarray::{Array, Ix4};

pub const INPUT_SIZE: u32 = 128;

// Pillow's default for RGB resizes, which the model was trained with.
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Decodes raw image bytes into a `[1, 128, 128, 3]` NHWC tensor scaled to [0, 1].
pub fn preprocess(image_data: &[u8]) -> Result<Array<f32, Ix4>, ClassifierError> {
    if image_data.is_empty() {
        return Err(ClassifierError::InvalidImage("empty upload".to_string()));
    }

    let image_reader = image::ImageReader::new(std::io::Cursor::new(image_data))
        .with_guessed_format()
        .map_err(|e| ClassifierError::InvalidImage(format!("Error reading image: {}", e)))?;

    let original_img = image_reader.decode()?;
    let rgb = original_img.to_rgb8();
    let img = image::imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, RESIZE_FILTER);

    let size = INPUT_SIZE as usize;
    let mut input = Array::zeros((1, size, size, 3));
    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let (x, y) = (x as usize, y as usize);
        input[[0, y, x, 0]] = (r as f32) / 255.;
        input[[0, y, x, 1]] = (g as f32) / 255.;
        input[[0, y, x, 2]] = (b as f32) / 255.;
    }

    Ok(input)
}
