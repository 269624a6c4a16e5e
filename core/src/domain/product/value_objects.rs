use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::product::entities::{Product, ProductIngredient, UserSentiment};

/// Structured reply expected from the analysis model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalysis {
    pub product_name: String,
    pub category: String,
    pub brand: String,
    pub key_ingredients: Vec<ProductIngredient>,
    pub usage_instructions: String,
    pub warnings: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_left: Option<String>,
    pub recommended_for: String,
    pub not_recommended_for: String,
    pub user_sentiment: UserSentiment,
}

/// A product before storage has assigned its id and creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertProduct {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub ingredients: Vec<ProductIngredient>,
    pub usage_instructions: String,
    pub warnings: String,
    pub expiry_date: Option<String>,
    pub time_left: Option<String>,
    pub recommended_for: String,
    pub not_recommended_for: String,
    pub user_sentiment: UserSentiment,
    #[validate(url(message = "imageUrl must be a valid URL"))]
    pub image_url: Option<String>,
}

impl From<ProductAnalysis> for InsertProduct {
    fn from(analysis: ProductAnalysis) -> Self {
        Self {
            name: analysis.product_name,
            brand: analysis.brand,
            category: analysis.category,
            ingredients: analysis.key_ingredients,
            usage_instructions: analysis.usage_instructions,
            warnings: analysis.warnings,
            expiry_date: analysis.expiry_date.filter(|s| !s.is_empty()),
            time_left: analysis.time_left.filter(|s| !s.is_empty()),
            recommended_for: analysis.recommended_for,
            not_recommended_for: analysis.not_recommended_for,
            user_sentiment: analysis.user_sentiment,
            // uploaded images are not retained
            image_url: None,
        }
    }
}

/// One uploaded image, already checked against the upload constraints.
#[derive(Debug, Clone)]
pub struct ProductImage {
    pub filename: String,
    pub mime_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct AnalyzeProductsInput {
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Clone)]
pub struct CompareProductsInput {
    pub product_ids: Vec<i32>,
}

/// Per-file outcome of an analysis batch.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Analyzed(Product),
    Failed { filename: String, reason: String },
}

impl AnalysisOutcome {
    pub fn is_analyzed(&self) -> bool {
        matches!(self, AnalysisOutcome::Analyzed(_))
    }
}
