use axum::extract::{Path, State};
use productlens_core::domain::product::ports::ProductService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    product::validators::parse_product_id,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeleteProductResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/{product_id}",
    tag = "product",
    summary = "Delete product",
    description = "Permanently removes a product. Its identifier is never reused.",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, body = DeleteProductResponse),
        (status = 400, description = "Product ID is not an integer"),
        (status = 404, description = "Product not found")
    ),
)]
pub async fn delete_product(
    Path(product_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<DeleteProductResponse>, ApiError> {
    let product_id = parse_product_id(&product_id)?;

    state
        .service
        .delete_product(product_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteProductResponse {
        message: "Product deleted successfully".to_string(),
    }))
}
