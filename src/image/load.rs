//! Image loading utilities.

use std::path::Path;

use image::DynamicImage;
use ndarray::Array3;

use crate::error::{Error, Result};

use super::{ChannelOrder, PixelImage, RGB_CHANNELS};

/// Load an image from disk as an 8-bit capture-order pixel buffer.
///
/// The image is:
/// 1. Decoded from the specified path (format inferred from content)
/// 2. Converted to 8-bit RGB if necessary
/// 3. Reordered to the capture convention (blue-green-red)
/// 4. Returned as a (height, width, channel) buffer tagged [`ChannelOrder::Bgr`]
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded. Dataset callers
/// treat that error as "no image" and skip the file.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<PixelImage> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(to_capture_order(&img))
}

/// Convert a decoded `DynamicImage` to a capture-order pixel buffer.
fn to_capture_order(img: &DynamicImage) -> PixelImage {
    let rgb = img.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    let mut pixels = Array3::<u8>::zeros((height, width, RGB_CHANNELS));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        // Decoder output is red-green-blue; the capture convention is the reverse.
        pixels[[y, x, 0]] = pixel[2];
        pixels[[y, x, 1]] = pixel[1];
        pixels[[y, x, 2]] = pixel[0];
    }

    PixelImage {
        pixels,
        order: ChannelOrder::Bgr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_order_shape() {
        let img = DynamicImage::new_rgb8(20, 10);
        let buf = to_capture_order(&img);

        assert_eq!(buf.pixels.dim(), (10, 20, 3));
        assert_eq!(buf.order, ChannelOrder::Bgr);
    }

    #[test]
    fn test_channels_are_reversed() {
        let mut rgb = image::RgbImage::new(1, 1);
        rgb.put_pixel(0, 0, image::Rgb([10, 20, 30]));

        let buf = to_capture_order(&DynamicImage::ImageRgb8(rgb));

        assert_eq!(buf.pixels[[0, 0, 0]], 30);
        assert_eq!(buf.pixels[[0, 0, 1]], 20);
        assert_eq!(buf.pixels[[0, 0, 2]], 10);
    }
}
