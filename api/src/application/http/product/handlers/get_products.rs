use axum::extract::State;
use productlens_core::domain::product::{entities::Product, ports::ProductService};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "",
    tag = "product",
    summary = "List products",
    description = "Returns every analyzed product, most recently created first.",
    responses(
        (status = 200, body = Vec<Product>)
    ),
)]
pub async fn get_products(State(state): State<AppState>) -> Result<Response<Vec<Product>>, ApiError> {
    let products = state
        .service
        .list_products()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(products))
}
