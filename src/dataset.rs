//! Batch traversal: mirror a directory tree of images through the pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use ndarray::Array3;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::image::{load_image, save_image, TensorImage};
use crate::pipeline::{process, Config};

/// File extensions recognized as images, lowercase.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Outcome counts for one folder traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    /// Images decoded, transformed, and written.
    pub processed: usize,
    /// Images skipped because decoding, transforming, or writing failed.
    pub skipped: usize,
}

/// Process every image under `input_root`, writing results to the mirrored
/// location under `output_root`.
///
/// Subdirectory structure is recreated on the output side; creating an
/// already-existing directory is not an error. Files that fail to decode,
/// transform, or write are logged and skipped; one bad file never stops the
/// traversal, and no output is written for it.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the output root cannot
/// be created. Per-file failures are reported via [`FolderSummary::skipped`],
/// not as errors.
pub fn process_folder(
    input_root: &Path,
    output_root: &Path,
    config: &Config,
) -> Result<FolderSummary> {
    config.validate()?;

    fs::create_dir_all(output_root).map_err(|source| Error::OutputDir {
        path: output_root.to_path_buf(),
        source,
    })?;

    let files: Vec<PathBuf> = WalkDir::new(input_root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file() && is_image_file(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect();

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Processing [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let mut summary = FolderSummary::default();
    for path in files {
        if process_file(&path, input_root, output_root, config) {
            summary.processed += 1;
        } else {
            summary.skipped += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    tracing::info!(
        "{}: {} processed, {} skipped",
        input_root.display(),
        summary.processed,
        summary.skipped
    );

    Ok(summary)
}

/// Run one file through decode, transform, and encode.
///
/// Returns `false` when the file was skipped for any reason.
fn process_file(path: &Path, input_root: &Path, output_root: &Path, config: &Config) -> bool {
    let Some(output_path) = mirrored_path(path, input_root, output_root) else {
        tracing::warn!("{} is outside the input root, skipping", path.display());
        return false;
    };

    // A failed decode is the expected "no image" case, not an error.
    let decoded = load_image(path).map_err(|err| tracing::debug!("{err}")).ok();

    let Some(tensor) = process(decoded, config.target_size, config.pad_color) else {
        tracing::debug!("skipping {}", path.display());
        return false;
    };

    if let Some(parent) = output_path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            tracing::warn!("cannot create {}: {err}", parent.display());
            return false;
        }
    }

    let stored = to_storage(&tensor);
    if let Err(err) = save_image(&output_path, &stored, config.quality) {
        tracing::warn!("{err}");
        return false;
    }

    true
}

/// Mirror `path` from `input_root` into `output_root`.
fn mirrored_path(path: &Path, input_root: &Path, output_root: &Path) -> Option<PathBuf> {
    let relative = path.strip_prefix(input_root).ok()?;
    Some(output_root.join(relative))
}

/// Whether a path looks like an image file this tool handles.
fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Rescale a normalized tensor to 8-bit samples in capture order for encoding.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_storage(tensor: &TensorImage) -> Array3<u8> {
    let (height, width, channels) = tensor.dim();
    Array3::from_shape_fn((height, width, channels), |(y, x, c)| {
        // display order back to the capture convention
        let sample = tensor[[y, x, channels - 1 - c]];
        (sample * 255.0).round().clamp(0.0, 255.0) as u8
    })
}
