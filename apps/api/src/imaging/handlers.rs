use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;
use crate::imaging::client::ImageArtifact;
use crate::imaging::prompt::{
    build_prompt, template, Dimensions, ImagePrompt, ImageRequest, ImageType, TemplateDescriptor,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ImageOutcome {
    Model { images: Vec<ImageArtifact> },
    Template { template: TemplateDescriptor },
}

#[derive(Debug, Serialize)]
pub struct ImageData {
    pub image_type: ImageType,
    pub dimensions: Dimensions,
    #[serde(flatten)]
    pub prompt: ImagePrompt,
    #[serde(flatten)]
    pub outcome: ImageOutcome,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub status: &'static str,
    pub data: ImageData,
}

/// POST /api/v1/generate-image
///
/// Never fails on the image service: a missing key or any upstream error
/// yields the branded template descriptor instead.
pub async fn handle_generate_image(
    State(state): State<AppState>,
    body: Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Json<ImageResponse>, AppError> {
    let Json(request) = body?;
    let brand = state.config.brand_name.as_str();
    let prompt = build_prompt(&request, brand);

    let outcome = match &state.images {
        Some(images) => match images.generate_image(&prompt, request.image_type).await {
            Ok(images) => ImageOutcome::Model { images },
            Err(e) => {
                warn!(error = %e, "Image generation failed; returning template");
                ImageOutcome::Template {
                    template: template(&request, brand),
                }
            }
        },
        None => ImageOutcome::Template {
            template: template(&request, brand),
        },
    };

    Ok(Json(ImageResponse {
        status: "success",
        data: ImageData {
            image_type: request.image_type,
            dimensions: request.image_type.dimensions(),
            prompt,
            outcome,
        },
    }))
}
