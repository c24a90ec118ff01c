//! Generation parameter ranges, defaults, and validation.
//!
//! The three knobs are forwarded verbatim to the diffusion pipeline as
//! "number of inference steps", "image guidance scale" and "guidance scale".
//! Bounded UI controls and CLI validation keep values inside the documented
//! ranges before a request is built; [`assert_in_range`] is the adapter's
//! defensive re-check, where an out-of-range value is a programming error.

use std::ops::RangeInclusive;

/// Valid range for the number of inference steps.
pub const STEPS_RANGE: RangeInclusive<u32> = 1..=100;
/// Default number of inference steps.
pub const STEPS_DEFAULT: u32 = 10;

/// Valid range for the image guidance scale (fidelity to the source image).
pub const IMAGE_GUIDANCE_RANGE: RangeInclusive<f64> = 0.0..=5.0;
/// Default image guidance scale.
pub const IMAGE_GUIDANCE_DEFAULT: f64 = 1.0;

/// Valid range for the text guidance scale (fidelity to the instruction).
pub const TEXT_GUIDANCE_RANGE: RangeInclusive<f64> = 0.0..=20.0;
/// Default text guidance scale.
pub const TEXT_GUIDANCE_DEFAULT: f64 = 7.5;

/// Validate the number of inference steps.
///
/// # Errors
///
/// Returns an error if the value is outside 1-100.
pub fn validate_steps(steps: u32) -> Result<(), String> {
    if STEPS_RANGE.contains(&steps) {
        Ok(())
    } else {
        Err(format!("Unsupported steps value '{steps}'. Valid: 1-100"))
    }
}

/// Validate the image guidance scale.
///
/// # Errors
///
/// Returns an error if the value is outside 0.0-5.0.
pub fn validate_image_guidance(scale: f64) -> Result<(), String> {
    if IMAGE_GUIDANCE_RANGE.contains(&scale) {
        Ok(())
    } else {
        Err(format!("Unsupported image guidance scale '{scale}'. Valid: 0.0-5.0"))
    }
}

/// Validate the text guidance scale.
///
/// # Errors
///
/// Returns an error if the value is outside 0.0-20.0.
pub fn validate_text_guidance(scale: f64) -> Result<(), String> {
    if TEXT_GUIDANCE_RANGE.contains(&scale) {
        Ok(())
    } else {
        Err(format!("Unsupported text guidance scale '{scale}'. Valid: 0.0-20.0"))
    }
}

/// Defensive re-validation at the adaptation boundary.
///
/// The calling layer constrains input via bounded controls, so a violation
/// here is a bug in the caller, not a recoverable condition. No clamping is
/// applied.
///
/// # Panics
///
/// Panics if any parameter is outside its documented range.
pub fn assert_in_range(steps: u32, image_guidance: f64, text_guidance: f64) {
    assert!(
        validate_steps(steps).is_ok(),
        "steps {steps} outside {STEPS_RANGE:?}; caller must enforce the range"
    );
    assert!(
        validate_image_guidance(image_guidance).is_ok(),
        "image guidance {image_guidance} outside {IMAGE_GUIDANCE_RANGE:?}; \
         caller must enforce the range"
    );
    assert!(
        validate_text_guidance(text_guidance).is_ok(),
        "text guidance {text_guidance} outside {TEXT_GUIDANCE_RANGE:?}; \
         caller must enforce the range"
    );
}
