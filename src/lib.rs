//! # imgprep
//!
//! Batch letterbox preprocessing for detection datasets.
//!
//! Walks a directory tree of images, scales each one onto a fixed square
//! canvas without distorting its aspect ratio, corrects the channel order
//! from the capture convention to display order, normalizes samples to
//! [0.0, 1.0], and writes the results to a mirrored output tree. Files that
//! cannot be decoded or transformed are skipped, never fatal.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use imgprep::{process_folder, Config};
//!
//! # fn main() -> imgprep::Result<()> {
//! let config = Config::default();
//! let summary = process_folder(
//!     Path::new("data/WIDER_train/images"),
//!     Path::new("processed/WIDER_train/images"),
//!     &config,
//! )?;
//! println!("{} images processed", summary.processed);
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod error;
pub mod image;
pub mod pipeline;

pub use dataset::{process_folder, FolderSummary};
pub use error::{Error, Result};
pub use pipeline::{process, Config};
