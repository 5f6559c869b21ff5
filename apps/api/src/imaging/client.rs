use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::imaging::prompt::{ImagePrompt, ImageType};

const STABILITY_API_BASE: &str = "https://api.stability.ai/v1/generation";
pub const ENGINE: &str = "stable-diffusion-xl-1024-v1-0";
const CFG_SCALE: f32 = 7.0;
const STEPS: u32 = 30;
const SEED: u32 = 42;
const STYLE_PRESET: &str = "photographic";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Image service returned no artifacts")]
    NoArtifacts,
}

/// Anything that can render an image prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(
        &self,
        prompt: &ImagePrompt,
        image_type: ImageType,
    ) -> Result<Vec<ImageArtifact>, ImageError>;
}

#[derive(Debug, Serialize)]
struct TextToImageRequest<'a> {
    text_prompts: [TextPrompt<'a>; 2],
    cfg_scale: f32,
    width: u32,
    height: u32,
    samples: u32,
    steps: u32,
    seed: u32,
    style_preset: &'a str,
}

#[derive(Debug, Serialize)]
struct TextPrompt<'a> {
    text: &'a str,
    weight: f32,
}

#[derive(Debug, Deserialize)]
struct TextToImageResponse {
    #[serde(default)]
    artifacts: Vec<ImageArtifact>,
}

/// One rendered image, base64-encoded PNG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageArtifact {
    pub base64: String,
    #[serde(default)]
    pub seed: u64,
    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Stability text-to-image client. One attempt per call, bounded by the timeout.
#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    api_key: String,
}

impl ImageClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, ImageError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
        })
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate_image(
        &self,
        prompt: &ImagePrompt,
        image_type: ImageType,
    ) -> Result<Vec<ImageArtifact>, ImageError> {
        let (width, height) = image_type.generation_size();
        let body = TextToImageRequest {
            text_prompts: [
                TextPrompt {
                    text: &prompt.prompt,
                    weight: 1.0,
                },
                TextPrompt {
                    text: prompt.negative_prompt,
                    weight: -1.0,
                },
            ],
            cfg_scale: CFG_SCALE,
            width,
            height,
            samples: 1,
            steps: STEPS,
            seed: SEED,
            style_preset: STYLE_PRESET,
        };

        let response = self
            .client
            .post(format!("{STABILITY_API_BASE}/{ENGINE}/text-to-image"))
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|e| e.message)
                .unwrap_or(text);
            return Err(ImageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: TextToImageResponse = response.json().await?;
        debug!(artifacts = parsed.artifacts.len(), "Image generation succeeded");
        if parsed.artifacts.is_empty() {
            return Err(ImageError::NoArtifacts);
        }
        Ok(parsed.artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parses_artifacts() {
        let json = r#"{"artifacts":[{"base64":"iVBORw0KGgo=","seed":42,"finishReason":"SUCCESS"}]}"#;
        let parsed: TextToImageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.artifacts.len(), 1);
        assert_eq!(parsed.artifacts[0].finish_reason.as_deref(), Some("SUCCESS"));
    }

    #[test]
    fn test_request_carries_negative_prompt_weight() {
        let prompt = ImagePrompt {
            prompt: "poster".into(),
            negative_prompt: "blurry",
        };
        let body = TextToImageRequest {
            text_prompts: [
                TextPrompt {
                    text: &prompt.prompt,
                    weight: 1.0,
                },
                TextPrompt {
                    text: prompt.negative_prompt,
                    weight: -1.0,
                },
            ],
            cfg_scale: CFG_SCALE,
            width: 1024,
            height: 1024,
            samples: 1,
            steps: STEPS,
            seed: SEED,
            style_preset: STYLE_PRESET,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["text_prompts"][1]["weight"], -1.0);
        assert_eq!(value["style_preset"], "photographic");
    }
}
