//! Per-image letterbox preprocessing pipeline.

mod color;
mod normalize;
mod resize;

pub use color::color_correct;
pub use normalize::normalize;
pub use resize::resize_and_pad;

use crate::error::{Error, Result};
use crate::image::{PixelImage, TensorImage};

/// Default side length of the square output canvas.
pub const DEFAULT_TARGET_SIZE: u32 = 416;

/// Configuration for the preprocessing pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Side length of the square output canvas.
    pub target_size: u32,

    /// Border fill color, in capture (blue-green-red) order.
    pub pad_color: [u8; 3],

    /// Output JPEG quality (1-100).
    pub quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            pad_color: [0, 0, 0],
            quality: 95,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.target_size == 0 {
            return Err(Error::InvalidParameter {
                name: "target_size".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if !(1..=100).contains(&self.quality) {
            return Err(Error::InvalidParameter {
                name: "quality".to_string(),
                reason: "must be between 1 and 100".to_string(),
            });
        }

        Ok(())
    }
}

/// Run the full per-image transform: letterbox to `target_size`, correct the
/// channel order, normalize to [0.0, 1.0].
///
/// `None` flows through untouched: an absent input produces an absent output,
/// and a step that fails (a buffer the resampler rejects) ends processing for
/// that image. There is no partial result to recover.
///
/// # Panics
///
/// Panics if `target_size` is zero.
pub fn process(
    image: Option<PixelImage>,
    target_size: u32,
    pad_color: [u8; 3],
) -> Option<TensorImage> {
    let resized = resize_and_pad(image, target_size, pad_color);
    let corrected = color_correct(resized);
    normalize(corrected)
}
