//! Live adapter for the Hugging Face hosted inference API.

use base64::Engine;
use reqwest::Client;

use crate::error::EditError;
use crate::ports::image_editor::{EditFuture, EditRequest, EditResponse, EditedImage, ImageEditor};

const HF_API_BASE: &str = "https://api-inference.huggingface.co/models";

/// The pretrained instruction-following edit pipeline this program drives.
pub const MODEL_ID: &str = "timbrooks/instruct-pix2pix";

/// Live editor backed by the Hugging Face inference API.
pub struct HuggingFaceEditor {
    client: Client,
    api_token: String,
}

impl HuggingFaceEditor {
    /// Create a new Hugging Face editor with the given API token.
    #[must_use]
    pub fn new(api_token: String) -> Self {
        Self { client: Client::new(), api_token }
    }
}

impl ImageEditor for HuggingFaceEditor {
    fn edit(&self, request: &EditRequest) -> EditFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{HF_API_BASE}/{MODEL_ID}");

            let image_b64 = base64::engine::general_purpose::STANDARD.encode(&request.image);
            let body = serde_json::json!({
                "inputs": image_b64,
                "parameters": {
                    "prompt": request.instruction,
                    "num_inference_steps": request.steps,
                    "image_guidance_scale": request.image_guidance,
                    "guidance_scale": request.text_guidance,
                }
            });

            let response = self
                .client
                .post(&url)
                .header("Authorization", format!("Bearer {}", self.api_token))
                .json(&body)
                .send()
                .await
                .map_err(|e| EditError::Pipeline(format!("Request to {MODEL_ID} failed: {e}")))?;

            let status = response.status();
            let mime_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("image/jpeg")
                .to_string();

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(EditError::Pipeline(format!(
                    "API error ({status}): {message}",
                    status = status.as_u16()
                )));
            }

            // The inference API returns the edited image as raw bytes.
            let data = response
                .bytes()
                .await
                .map_err(|e| EditError::Pipeline(format!("Failed to read response body: {e}")))?
                .to_vec();

            if data.is_empty() {
                return Err(EditError::Pipeline("Empty response from inference API".into()));
            }

            Ok(EditResponse { images: vec![EditedImage { data, mime_type }] })
        })
    }
}
