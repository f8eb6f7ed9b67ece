//! Aspect-preserving resize with constant-color letterbox padding.

use image::imageops::{self, FilterType};
use image::RgbImage;
use ndarray::Array3;

use crate::image::{PixelImage, RGB_CHANNELS};

/// Scale `image` so its longer side equals `target_size`, then pad the
/// remaining canvas with `pad_color`.
///
/// The scaled dimensions are `round(ratio * side)` for
/// `ratio = target_size / max(height, width)`. Padding is split evenly
/// between opposite sides; an odd remainder goes to the bottom/right edge.
/// `pad_color` is interpreted in the buffer's current channel order.
///
/// Returns `None` when `image` is `None`, or when the buffer cannot be
/// resampled (zero-sized input, a side that scales to zero); the latter is
/// logged so dataset callers can skip the file.
///
/// # Panics
///
/// Panics if `target_size` is zero.
#[allow(clippy::cast_possible_truncation)]
pub fn resize_and_pad(
    image: Option<PixelImage>,
    target_size: u32,
    pad_color: [u8; 3],
) -> Option<PixelImage> {
    assert!(target_size > 0, "target_size must be positive");

    let image = image?;
    let (height, width) = (image.height(), image.width());

    let Some((new_height, new_width)) = scaled_dims(height, width, target_size) else {
        tracing::warn!("cannot scale {width}x{height} image to fit {target_size}");
        return None;
    };

    let resized = if (new_height as usize, new_width as usize) == (height, width) {
        // Already at the scaled size; skip the resample so the content
        // passes through untouched.
        to_buffer(&image.pixels)
    } else {
        to_buffer(&image.pixels)
            .map(|buf| imageops::resize(&buf, new_width, new_height, FilterType::Triangle))
    };
    let Some(resized) = resized else {
        tracing::warn!("cannot resample {width}x{height} buffer");
        return None;
    };

    let (top, _) = split_pad(target_size - new_height);
    let (left, _) = split_pad(target_size - new_width);

    let target = target_size as usize;
    let mut canvas =
        Array3::from_shape_fn((target, target, RGB_CHANNELS), |(_, _, c)| pad_color[c]);
    for (x, y, pixel) in resized.enumerate_pixels() {
        let row = top as usize + y as usize;
        let col = left as usize + x as usize;
        for c in 0..RGB_CHANNELS {
            canvas[[row, col, c]] = pixel[c];
        }
    }

    Some(PixelImage {
        pixels: canvas,
        order: image.order,
    })
}

/// Dimensions after scaling the longer side to exactly `target_size`.
///
/// Returns `None` for zero-sized inputs or when a side rounds to zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn scaled_dims(height: usize, width: usize, target_size: u32) -> Option<(u32, u32)> {
    let longest = height.max(width);
    if longest == 0 {
        return None;
    }

    let ratio = f64::from(target_size) / longest as f64;
    let new_height = (ratio * height as f64).round() as u32;
    let new_width = (ratio * width as f64).round() as u32;
    if new_height == 0 || new_width == 0 {
        return None;
    }

    Some((new_height, new_width))
}

/// Split a total padding amount into (leading, trailing) halves; the odd
/// pixel goes to the trailing side.
const fn split_pad(total: u32) -> (u32, u32) {
    let leading = total / 2;
    (leading, total - leading)
}

/// View a (height, width, channel) buffer as an image-crate container.
///
/// The resampler is channel-agnostic, so the buffer's ordering does not
/// matter here.
fn to_buffer(pixels: &Array3<u8>) -> Option<RgbImage> {
    let (height, width, channels) = pixels.dim();
    if channels != RGB_CHANNELS {
        return None;
    }

    let width_u32 = u32::try_from(width).ok()?;
    let height_u32 = u32::try_from(height).ok()?;

    RgbImage::from_raw(width_u32, height_u32, pixels.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ChannelOrder;

    fn solid(height: usize, width: usize, value: u8) -> PixelImage {
        PixelImage {
            pixels: Array3::from_elem((height, width, 3), value),
            order: ChannelOrder::Bgr,
        }
    }

    #[test]
    fn test_scaled_dims_long_side_hits_target() {
        assert_eq!(scaled_dims(200, 100, 416), Some((416, 208)));
        assert_eq!(scaled_dims(100, 300, 416), Some((139, 416)));
        assert_eq!(scaled_dims(416, 416, 416), Some((416, 416)));
    }

    #[test]
    fn test_scaled_dims_rejects_degenerate() {
        assert_eq!(scaled_dims(0, 0, 416), None);
        assert_eq!(scaled_dims(0, 10, 416), None);
        // short side rounds to zero
        assert_eq!(scaled_dims(1, 10_000, 32), None);
    }

    #[test]
    fn test_split_pad_odd_remainder_trails() {
        assert_eq!(split_pad(208), (104, 104));
        assert_eq!(split_pad(3), (1, 2));
        assert_eq!(split_pad(0), (0, 0));
    }

    #[test]
    fn test_portrait_letterbox() {
        let out = resize_and_pad(Some(solid(200, 100, 80)), 416, [0, 0, 0]).unwrap();

        assert_eq!(out.pixels.dim(), (416, 416, 3));
        // content spans columns 104..312, padding on either side
        assert_eq!(out.pixels[[0, 103, 0]], 0);
        assert_eq!(out.pixels[[0, 104, 0]], 80);
        assert_eq!(out.pixels[[415, 311, 0]], 80);
        assert_eq!(out.pixels[[415, 312, 0]], 0);
    }

    #[test]
    fn test_odd_padding_goes_to_trailing_edge() {
        // 5x2 input is already at scale for target 5: pad = 3 -> 1 left, 2 right
        let out = resize_and_pad(Some(solid(5, 2, 7)), 5, [9, 9, 9]).unwrap();

        assert_eq!(out.pixels.dim(), (5, 5, 3));
        assert_eq!(out.pixels[[0, 0, 0]], 9);
        assert_eq!(out.pixels[[0, 1, 0]], 7);
        assert_eq!(out.pixels[[0, 2, 0]], 7);
        assert_eq!(out.pixels[[0, 3, 0]], 9);
        assert_eq!(out.pixels[[0, 4, 0]], 9);
    }

    #[test]
    fn test_pad_color_follows_channel_order() {
        let out = resize_and_pad(Some(solid(4, 2, 1)), 4, [10, 20, 30]).unwrap();

        assert_eq!(out.pixels[[0, 0, 0]], 10);
        assert_eq!(out.pixels[[0, 0, 1]], 20);
        assert_eq!(out.pixels[[0, 0, 2]], 30);
    }

    #[test]
    fn test_square_input_passes_through() {
        let input = solid(16, 16, 50);
        let out = resize_and_pad(Some(input.clone()), 16, [0, 0, 0]).unwrap();

        assert_eq!(out, input);
    }

    #[test]
    fn test_absent_input_stays_absent() {
        assert!(resize_and_pad(None, 416, [0, 0, 0]).is_none());
    }

    #[test]
    fn test_zero_sized_input_is_skipped() {
        let empty = PixelImage {
            pixels: Array3::zeros((0, 10, 3)),
            order: ChannelOrder::Bgr,
        };

        assert!(resize_and_pad(Some(empty), 416, [0, 0, 0]).is_none());
    }

    #[test]
    #[should_panic(expected = "target_size must be positive")]
    fn test_zero_target_panics() {
        resize_and_pad(None, 0, [0, 0, 0]);
    }
}
