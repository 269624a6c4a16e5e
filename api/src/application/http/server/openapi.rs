use crate::application::http::product::router::ProductApiDoc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ProductLens API"
    ),
    nest(
        (path = "/api/products", api = ProductApiDoc),
    )
)]
pub struct ApiDoc;
