use axum::extract::State;
use productlens_core::domain::product::{
    entities::Product,
    ports::ProductService,
    presentation::{ComparisonEntry, build_comparison},
    value_objects::CompareProductsInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    product::validators::CompareProductsValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CompareProductsResponse {
    pub products: Vec<Product>,
    /// Side-by-side view of `products`, same order
    pub comparison: Vec<ComparisonEntry>,
}

#[utoipa::path(
    post,
    path = "/compare",
    tag = "product",
    summary = "Compare products",
    description = "Resolves the requested products, skipping unknown ids, and builds a side-by-side comparison.",
    request_body = CompareProductsValidator,
    responses(
        (status = 200, body = CompareProductsResponse),
        (status = 400, description = "Fewer than 2 ids supplied or fewer than 2 products found")
    ),
)]
pub async fn compare_products(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CompareProductsValidator>,
) -> Result<Response<CompareProductsResponse>, ApiError> {
    let products = state
        .service
        .compare_products(CompareProductsInput {
            product_ids: payload.product_ids,
        })
        .await
        .map_err(ApiError::from)?;

    let comparison = build_comparison(&products);

    Ok(Response::OK(CompareProductsResponse {
        products,
        comparison,
    }))
}
