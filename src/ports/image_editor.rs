//! Image editor port for instruction-driven image-to-image pipelines.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// A request to edit one image.
///
/// The three numeric knobs are passed through to the pipeline unchanged;
/// no interpretation or scaling happens on this side of the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditRequest {
    /// Source image, PNG-encoded RGB bytes.
    #[serde(with = "base64_bytes")]
    pub image: Vec<u8>,
    /// Natural-language edit instruction (non-empty).
    pub instruction: String,
    /// Number of inference steps (1-100).
    pub steps: u32,
    /// Image guidance scale: fidelity to the source image (0.0-5.0).
    pub image_guidance: f64,
    /// Guidance scale: fidelity to the instruction text (0.0-20.0).
    pub text_guidance: f64,
}

/// A single edited image as returned by a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditedImage {
    /// Raw image bytes.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// MIME type of the image (e.g., `"image/jpeg"`).
    pub mime_type: String,
}

/// Response containing edited images. The adapter consumes the first one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditResponse {
    /// The edited images.
    pub images: Vec<EditedImage>,
}

/// Boxed future type returned by [`ImageEditor::edit`].
pub type EditFuture<'a> =
    Pin<Box<dyn Future<Output = Result<EditResponse, EditError>> + Send + 'a>>;

/// Edits images according to a natural-language instruction via an external
/// diffusion pipeline.
pub trait ImageEditor: Send + Sync {
    /// Run one edit for the given request.
    fn edit(&self, request: &EditRequest) -> EditFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as base64 string.
    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    /// Deserialize base64 string to bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_request_serialization() {
        let request = EditRequest {
            image: vec![0x89, 0x50, 0x4E, 0x47], // PNG magic bytes
            instruction: "turn the cat into a tiger".into(),
            steps: 10,
            image_guidance: 1.0,
            text_guidance: 7.5,
        };
        let json = serde_json::to_string(&request).unwrap();
        let deserialized: EditRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.image, vec![0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(deserialized.instruction, "turn the cat into a tiger");
        assert_eq!(deserialized.steps, 10);
        assert!((deserialized.image_guidance - 1.0).abs() < f64::EPSILON);
        assert!((deserialized.text_guidance - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn edited_image_base64_round_trip() {
        let image = EditedImage {
            data: vec![0xFF, 0xD8, 0xFF, 0xE0], // JPEG magic bytes
            mime_type: "image/jpeg".into(),
        };
        let json = serde_json::to_string(&image).unwrap();
        assert!(json.contains("\"/9j/4A==\""), "data should be base64 in cassettes: {json}");
        let deserialized: EditedImage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.data, vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(deserialized.mime_type, "image/jpeg");
    }

    #[test]
    fn edit_response_serialization() {
        let response = EditResponse {
            images: vec![EditedImage { data: vec![1, 2, 3], mime_type: "image/png".into() }],
        };
        let json = serde_json::to_string(&response).unwrap();
        let deserialized: EditResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.images.len(), 1);
        assert_eq!(deserialized.images[0].data, vec![1, 2, 3]);
    }
}
