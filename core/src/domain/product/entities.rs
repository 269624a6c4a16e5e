use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::product::value_objects::InsertProduct;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
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
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(id: i32, insert: InsertProduct, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: insert.name,
            brand: insert.brand,
            category: insert.category,
            ingredients: insert.ingredients,
            usage_instructions: insert.usage_instructions,
            warnings: insert.warnings,
            expiry_date: insert.expiry_date,
            time_left: insert.time_left,
            recommended_for: insert.recommended_for,
            not_recommended_for: insert.not_recommended_for,
            user_sentiment: insert.user_sentiment,
            image_url: insert.image_url,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductIngredient {
    pub name: String,
    pub function: String,
    pub benefits: String,
    pub side_effects: String,
    #[serde(default)]
    pub safety_rating: SafetyRating,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SafetyRating {
    #[default]
    Safe,
    Caution,
    Warning,
}

impl SafetyRating {
    pub const ALL: [SafetyRating; 3] = [SafetyRating::Safe, SafetyRating::Caution, SafetyRating::Warning];

    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyRating::Safe => "safe",
            SafetyRating::Caution => "caution",
            SafetyRating::Warning => "warning",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        SafetyRating::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSentiment {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub review_summary: String,
}
