//! Live adapter for a locally running Stable Diffusion WebUI instance.
//!
//! Uses the `img2img` endpoint. The loaded checkpoint is expected to be an
//! instruct-pix2pix model; `cfg_scale` carries the text guidance and
//! `image_cfg_scale` the image guidance.

use base64::Engine;
use reqwest::Client;
use serde::Deserialize;

use crate::error::EditError;
use crate::ports::image_editor::{EditFuture, EditRequest, EditResponse, EditedImage, ImageEditor};

/// Live editor backed by a Stable Diffusion WebUI server.
pub struct SdWebuiEditor {
    client: Client,
    base_url: String,
}

impl SdWebuiEditor {
    /// Create a new editor for the WebUI at the given base URL.
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self { client: Client::new(), base_url }
    }
}

impl ImageEditor for SdWebuiEditor {
    fn edit(&self, request: &EditRequest) -> EditFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{}/sdapi/v1/img2img", self.base_url.trim_end_matches('/'));

            let image_b64 = base64::engine::general_purpose::STANDARD.encode(&request.image);
            let body = serde_json::json!({
                "init_images": [image_b64],
                "prompt": request.instruction,
                "steps": request.steps,
                "image_cfg_scale": request.image_guidance,
                "cfg_scale": request.text_guidance,
            });

            let response = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| EditError::Pipeline(format!("Request to {url} failed: {e}")))?;

            let status = response.status();
            let response_text = response
                .text()
                .await
                .map_err(|e| EditError::Pipeline(format!("Failed to read response body: {e}")))?;

            if !status.is_success() {
                return Err(EditError::Pipeline(format!(
                    "API error ({status}): {response_text}",
                    status = status.as_u16()
                )));
            }

            let parsed: SdWebuiResponse = serde_json::from_str(&response_text)
                .map_err(|e| EditError::Pipeline(format!("Failed to parse response: {e}")))?;

            let mut images = Vec::new();
            for item in parsed.images {
                let data = base64::engine::general_purpose::STANDARD
                    .decode(&item)
                    .map_err(|e| EditError::Pipeline(format!("Failed to decode base64: {e}")))?;
                images.push(EditedImage { data, mime_type: "image/png".into() });
            }

            if images.is_empty() {
                let truncated = if response_text.len() > 500 {
                    format!("{}...", &response_text[..500])
                } else {
                    response_text.clone()
                };
                return Err(EditError::Pipeline(format!("No images in response. Body: {truncated}")));
            }

            Ok(EditResponse { images })
        })
    }
}

// --- WebUI API response types ---

#[derive(Deserialize)]
struct SdWebuiResponse {
    images: Vec<String>,
}
