//! Image captioning API
//!
//! Accepts a multipart upload, validates it, and asks the model for a
//! caption. The response carries the caption and an 800x500 preview.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::services::images::{UploadedImage, DEFAULT_CAPTION_PROMPT, MAX_IMAGE_BYTES};
use crate::state::RouterState;

/// Caption response
#[derive(Debug, Serialize)]
pub struct CaptionResponse {
    /// Caption returned by the model
    pub caption: String,
    /// PNG data URL of the resized preview
    pub preview: String,
    /// Original image width
    pub width: u32,
    /// Original image height
    pub height: u32,
}

/// Caption an already-read upload
///
/// Shared by the multipart endpoint and tests.
pub async fn caption_image_internal(
    state: &RouterState,
    bytes: Vec<u8>,
    prompt: Option<String>,
) -> Result<Json<CaptionResponse>, AppError> {
    let prompt = prompt
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CAPTION_PROMPT.to_string());
    crate::api::utils::validate_prompt("Prompt", &prompt, state.max_prompt_length)?;

    // Decoding and resizing are CPU-bound
    let (image, preview) = tokio::task::spawn_blocking(move || {
        let image = UploadedImage::from_bytes(bytes)?;
        let preview = image.preview_data_url()?;
        Ok::<_, AppError>((image, preview))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Image task failed: {}", e)))??;

    let (width, height) = image.dimensions();
    info!(
        mime_type = image.mime_type(),
        width = width,
        height = height,
        "Generating caption"
    );

    let caption = state
        .gemini
        .generate_with_image(&prompt, image.mime_type(), image.bytes())
        .await
        .map_err(|e| {
            error!(error = %e, "Caption generation failed");
            e
        })?;

    Ok(Json(CaptionResponse {
        caption,
        preview,
        width,
        height,
    }))
}

/// Map a multipart read failure, keeping the body limit as a 413
fn multipart_error(
    err: MultipartError,
    context: &str,
    otherwise: fn(String) -> AppError,
) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(error = %err, "Upload exceeded the body limit");
        return AppError::PayloadTooLarge(format!(
            "Image is too large (max {} bytes)",
            MAX_IMAGE_BYTES
        ));
    }
    otherwise(format!("{}: {}", context, err))
}

/// POST /api/caption - Caption an uploaded image
///
/// Accepts multipart form data with:
/// - image: a jpg, jpeg or png file
/// - prompt: optional instruction (defaults to a short caption request)
pub async fn caption_image(
    State(state): State<RouterState>,
    mut multipart: Multipart,
) -> Result<Json<CaptionResponse>, AppError> {
    let mut image: Option<Vec<u8>> = None;
    let mut prompt: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Failed to read multipart field", AppError::InvalidInput))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => {
                let data = field.bytes().await.map_err(|e| {
                    multipart_error(e, "Failed to read image data", AppError::InvalidImage)
                })?;
                info!(bytes = data.len(), "Received image upload");
                image = Some(data.to_vec());
            }
            "prompt" => {
                let text = field.text().await.map_err(|e| {
                    multipart_error(e, "Failed to read prompt field", AppError::InvalidInput)
                })?;
                prompt = Some(text);
            }
            _ => {
                warn!("Unknown multipart field: {}", field_name);
            }
        }
    }

    let bytes = image.ok_or_else(|| AppError::InvalidImage("No image uploaded".to_string()))?;
    caption_image_internal(&state, bytes, prompt).await
}
