use axum::extract::{Path, State};
use productlens_core::domain::product::{entities::Product, ports::ProductService};

use crate::application::http::{
    product::validators::parse_product_id,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/{product_id}",
    tag = "product",
    summary = "Get product",
    description = "Retrieves one analyzed product by its identifier.",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, body = Product),
        (status = 400, description = "Product ID is not an integer"),
        (status = 404, description = "Product not found")
    ),
)]
pub async fn get_product(
    Path(product_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<Product>, ApiError> {
    let product_id = parse_product_id(&product_id)?;

    let product = state
        .service
        .get_product(product_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(product))
}
