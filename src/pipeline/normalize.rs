//! Sample normalization to the unit range.

use crate::image::{PixelImage, TensorImage};

/// Convert 8-bit samples to 32-bit floats in [0.0, 1.0].
///
/// Every sample is divided by 255.0. The input is assumed to come from an
/// 8-bit decode, so no clamping is applied. Returns `None` when `image` is
/// `None`.
pub fn normalize(image: Option<PixelImage>) -> Option<TensorImage> {
    let image = image?;
    Some(image.pixels.mapv(|sample| f32::from(sample) / 255.0))
}
