use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::server::api_entities::api_error::ApiError;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CompareProductsValidator {
    #[serde(rename = "productIds")]
    #[validate(length(min = 2, message = "At least 2 product IDs are required for comparison"))]
    pub product_ids: Vec<i32>,
}

pub fn parse_product_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::BadRequest("Invalid product ID".to_string()))
}
