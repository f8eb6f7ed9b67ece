//! Channel-order correction between capture and display conventions.

use crate::image::PixelImage;

/// Swap an image between blue-green-red and red-green-blue ordering.
///
/// The first and last channel of every pixel are exchanged and the buffer's
/// order tag flipped; values and dimensions are untouched. Applying the
/// correction twice restores the input. Returns `None` when `image` is
/// `None`.
pub fn color_correct(image: Option<PixelImage>) -> Option<PixelImage> {
    let PixelImage { mut pixels, order } = image?;

    let (height, width, _) = pixels.dim();
    for y in 0..height {
        for x in 0..width {
            pixels.swap([y, x, 0], [y, x, 2]);
        }
    }

    Some(PixelImage {
        pixels,
        order: order.swapped(),
    })
}
