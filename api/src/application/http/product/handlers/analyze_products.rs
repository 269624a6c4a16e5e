use axum::extract::{Multipart, State};
use bytes::Bytes;
use productlens_core::domain::product::{
    entities::Product,
    ports::ProductService,
    presentation::format_file_size,
    value_objects::{AnalysisOutcome, AnalyzeProductsInput, ProductImage},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

pub const MAX_IMAGES: usize = 10;
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

const IMAGES_FIELD: &str = "images";

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AnalysisFailure {
    pub error: String,
    pub filename: String,
    pub details: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum AnalysisResult {
    Product(Box<Product>),
    Failure(AnalysisFailure),
}

impl From<AnalysisOutcome> for AnalysisResult {
    fn from(outcome: AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::Analyzed(product) => AnalysisResult::Product(Box::new(product)),
            AnalysisOutcome::Failed { filename, reason } => {
                AnalysisResult::Failure(AnalysisFailure {
                    error: "Failed to analyze image".to_string(),
                    filename,
                    details: reason,
                })
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AnalyzeProductsResponse {
    /// One entry per uploaded image, in upload order
    pub results: Vec<AnalysisResult>,
}

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "product",
    summary = "Analyze product images",
    description = "Accepts up to 10 images (field `images`, 10MB each). Every image is analyzed and stored independently; failures are reported inline.",
    request_body(content_type = "multipart/form-data", description = "One or more `images` file fields"),
    responses(
        (status = 200, body = AnalyzeProductsResponse),
        (status = 400, description = "No images, too many images, a file too large or not an image")
    ),
)]
pub async fn analyze_products(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeProductsResponse>, ApiError> {
    let mut images: Vec<ProductImage> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some(IMAGES_FIELD) {
            continue;
        }

        if images.len() == MAX_IMAGES {
            return Err(ApiError::BadRequest(format!(
                "Too many images. At most {} images can be analyzed at once",
                MAX_IMAGES
            )));
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("image-{}", images.len() + 1));
        let mime_type = field.content_type().unwrap_or_default().to_string();

        if !mime_type.starts_with("image/") {
            warn!(filename = %filename, mime_type = %mime_type, "Rejected non-image upload");
            return Err(ApiError::BadRequest(format!(
                "{} is not an image. Only image files are allowed",
                filename
            )));
        }

        let data: Bytes = field.bytes().await.map_err(|e| {
            error!(filename = %filename, "Failed to read image bytes: {}", e);
            ApiError::BadRequest(format!("Failed to read image: {}", e))
        })?;

        if data.len() > MAX_IMAGE_SIZE {
            return Err(ApiError::BadRequest(format!(
                "{} is too large. Max size is {}",
                filename,
                format_file_size(MAX_IMAGE_SIZE as u64)
            )));
        }

        images.push(ProductImage {
            filename,
            mime_type,
            data,
        });
    }

    if images.is_empty() {
        return Err(ApiError::BadRequest("No images provided".to_string()));
    }

    let outcomes = state
        .service
        .analyze_products(AnalyzeProductsInput { images })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeProductsResponse {
        results: outcomes.into_iter().map(AnalysisResult::from).collect(),
    }))
}
