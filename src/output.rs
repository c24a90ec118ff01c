//! Saving the edited image to disk.

use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::EditError;

/// Default output filename, written to the working directory and
/// unconditionally overwritten on each successful edit.
pub const DEFAULT_OUTPUT: &str = "edited_image.jpg";

/// Resolve the output path: use the explicit path or the fixed default.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>) -> PathBuf {
    explicit.map_or_else(|| PathBuf::from(DEFAULT_OUTPUT), PathBuf::from)
}

/// Save an edited RGB image, overwriting any prior file of that name.
///
/// The encoder is chosen from the path extension; paths without a recognized
/// extension are written as JPEG.
///
/// # Errors
///
/// Returns an error if the image cannot be encoded or written.
pub fn save_image(image: &RgbImage, output_path: &Path) -> Result<(), EditError> {
    let format = image::ImageFormat::from_path(output_path).unwrap_or(image::ImageFormat::Jpeg);
    image
        .save_with_format(output_path, format)
        .map_err(|e| EditError::Config(format!("Failed to save {}: {e}", output_path.display())))
}
