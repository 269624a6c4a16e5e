use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    analyze_products::{__path_analyze_products, MAX_IMAGE_SIZE, MAX_IMAGES, analyze_products},
    compare_products::{__path_compare_products, compare_products},
    delete_product::{__path_delete_product, delete_product},
    get_product::{__path_get_product, get_product},
    get_products::{__path_get_products, get_products},
};
use crate::application::http::server::app_state::AppState;

// room for the multipart framing around a full batch
const ANALYZE_BODY_LIMIT: usize = MAX_IMAGES * MAX_IMAGE_SIZE + 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(
    get_products,
    get_product,
    analyze_products,
    compare_products,
    delete_product
))]
pub struct ProductApiDoc;

pub fn product_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/products", state.args.server.root_path),
            get(get_products),
        )
        .route(
            &format!("{}/api/products/analyze", state.args.server.root_path),
            post(analyze_products).layer(DefaultBodyLimit::max(ANALYZE_BODY_LIMIT)),
        )
        .route(
            &format!("{}/api/products/compare", state.args.server.root_path),
            post(compare_products),
        )
        .route(
            &format!("{}/api/products/{{product_id}}", state.args.server.root_path),
            get(get_product).delete(delete_product),
        )
}
