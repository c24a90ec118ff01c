//! The edit session and the request adaptation boundary.
//!
//! [`EditSession`] holds the user's current inputs (selected image path,
//! instruction, parameter knobs) as explicit state. [`submit`] is the
//! adapter between those inputs and one pipeline call: it validates,
//! decodes the source image to RGB, forwards the three knobs unchanged,
//! and wraps the first returned image.

use std::io::Cursor;
use std::path::PathBuf;

use image::RgbImage;

use crate::error::EditError;
use crate::params;
use crate::ports::image_editor::{EditRequest, ImageEditor};

/// User inputs for one edit, collected by the UI or CLI.
#[derive(Debug, Clone)]
pub struct EditSession {
    /// Path of the currently selected source image, if any.
    pub image_path: Option<PathBuf>,
    /// Natural-language edit instruction.
    pub instruction: String,
    /// Number of inference steps (1-100).
    pub steps: u32,
    /// Image guidance scale (0.0-5.0).
    pub image_guidance: f64,
    /// Text guidance scale (0.0-20.0).
    pub text_guidance: f64,
}

impl Default for EditSession {
    fn default() -> Self {
        Self {
            image_path: None,
            instruction: String::new(),
            steps: params::STEPS_DEFAULT,
            image_guidance: params::IMAGE_GUIDANCE_DEFAULT,
            text_guidance: params::TEXT_GUIDANCE_DEFAULT,
        }
    }
}

/// A successfully edited image. Ownership moves to the caller for display
/// and persistence.
#[derive(Debug)]
pub struct EditOutcome {
    /// The edited image, decoded to RGB.
    pub image: RgbImage,
}

/// Submit one edit request to the pipeline.
///
/// Validation runs in order, first failure wins: a missing image yields
/// [`EditError::MissingImage`] and an empty or whitespace-only instruction
/// yields [`EditError::EmptyInstruction`]; in both cases no pipeline call is
/// made. Every failure past validation is a [`EditError::Pipeline`] carrying
/// the underlying diagnostic.
///
/// The three numeric knobs are forwarded to the pipeline exactly as given.
///
/// # Errors
///
/// Returns `MissingImage`, `EmptyInstruction`, or `Pipeline` as described
/// above.
///
/// # Panics
///
/// Panics if a parameter is outside its documented range; bounded input
/// controls make that state unreachable, so it is a caller bug.
pub async fn submit(
    editor: &dyn ImageEditor,
    session: &EditSession,
) -> Result<EditOutcome, EditError> {
    let Some(ref image_path) = session.image_path else {
        return Err(EditError::MissingImage);
    };
    if session.instruction.trim().is_empty() {
        return Err(EditError::EmptyInstruction);
    }
    params::assert_in_range(session.steps, session.image_guidance, session.text_guidance);

    let source = image::open(image_path)
        .map_err(|e| {
            EditError::Pipeline(format!("Failed to decode {}: {e}", image_path.display()))
        })?
        .to_rgb8();

    let mut png = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(source)
        .write_to(&mut png, image::ImageFormat::Png)
        .map_err(|e| EditError::Pipeline(format!("Failed to encode source image: {e}")))?;

    let request = EditRequest {
        image: png.into_inner(),
        instruction: session.instruction.clone(),
        steps: session.steps,
        image_guidance: session.image_guidance,
        text_guidance: session.text_guidance,
    };

    let response = editor.edit(&request).await?;

    let first = response
        .images
        .into_iter()
        .next()
        .ok_or_else(|| EditError::Pipeline("Pipeline returned no images".into()))?;

    let image = image::load_from_memory(&first.data)
        .map_err(|e| EditError::Pipeline(format!("Failed to decode edited image: {e}")))?
        .to_rgb8();

    Ok(EditOutcome { image })
}
