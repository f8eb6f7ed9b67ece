//! Image saving utilities.

use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use ndarray::Array3;

use crate::error::{Error, Result};

use super::RGB_CHANNELS;

/// Save an 8-bit capture-order pixel buffer to disk.
///
/// The buffer is assumed to hold blue-green-red samples shaped
/// (height, width, channel). It is reordered to the encoder's red-green-blue
/// layout and written to `path`: as JPEG at the given quality for
/// `.jpg`/`.jpeg`, otherwise in the format matching the extension.
///
/// # Errors
///
/// Returns an error if the buffer shape is degenerate or the file cannot be
/// written.
pub fn save_image<P: AsRef<Path>>(path: P, pixels: &Array3<u8>, quality: u8) -> Result<()> {
    let path = path.as_ref();

    let img = to_encoder_layout(pixels).ok_or_else(|| Error::InvalidParameter {
        name: "pixels".to_string(),
        reason: "buffer dimensions do not fit an encodable image".to_string(),
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => {
            let mut output = std::fs::File::create(path)?;
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut output, quality);
            image::DynamicImage::ImageRgb8(img)
                .write_with_encoder(encoder)
                .map_err(|source| Error::ImageSave {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        _ => {
            img.save(path).map_err(|source| Error::ImageSave {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

/// Reorder a blue-green-red buffer into the encoder's RGB layout.
#[allow(clippy::cast_possible_truncation)]
fn to_encoder_layout(pixels: &Array3<u8>) -> Option<RgbImage> {
    let (height, width, channels) = pixels.dim();
    if channels != RGB_CHANNELS || height == 0 || width == 0 {
        return None;
    }

    let width_u32 = u32::try_from(width).ok()?;
    let height_u32 = u32::try_from(height).ok()?;

    let mut img = ImageBuffer::new(width_u32, height_u32);
    for y in 0..height {
        for x in 0..width {
            img.put_pixel(
                x as u32,
                y as u32,
                Rgb([pixels[[y, x, 2]], pixels[[y, x, 1]], pixels[[y, x, 0]]]),
            );
        }
    }

    Some(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_layout_reverses_channels() {
        let pixels = Array3::from_shape_vec((1, 1, 3), vec![30, 20, 10]).unwrap();
        let img = to_encoder_layout(&pixels).unwrap();

        assert_eq!(img.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_encoder_layout_rejects_degenerate_shapes() {
        assert!(to_encoder_layout(&Array3::zeros((0, 4, 3))).is_none());
        assert!(to_encoder_layout(&Array3::zeros((4, 0, 3))).is_none());
        assert!(to_encoder_layout(&Array3::zeros((4, 4, 1))).is_none());
    }
}
