use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::product::entities::{Product, ProductIngredient, SafetyRating};

/// Ingredients shown per product before collapsing into a "+N more" count
pub const INGREDIENT_PREVIEW_LEN: usize = 3;

/// Shelf life that counts as a full bar
pub const FULL_SHELF_LIFE_MONTHS: f64 = 24.0;

static TIME_LEFT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(month|year)").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OverallSafety {
    Excellent,
    Good,
    Fair,
}

impl SafetyRating {
    pub fn score(&self) -> u32 {
        match self {
            SafetyRating::Safe => 5,
            SafetyRating::Caution => 3,
            SafetyRating::Warning => 1,
        }
    }
}

impl OverallSafety {
    /// Grades the mean ingredient score. A product without ingredients grades `Fair`.
    pub fn from_ingredients(ingredients: &[ProductIngredient]) -> Self {
        if ingredients.is_empty() {
            return OverallSafety::Fair;
        }

        let total: u32 = ingredients.iter().map(|i| i.safety_rating.score()).sum();
        let average = f64::from(total) / ingredients.len() as f64;

        if average >= 4.5 {
            OverallSafety::Excellent
        } else if average >= 3.5 {
            OverallSafety::Good
        } else {
            OverallSafety::Fair
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientPreview {
    pub name: String,
    pub safety_rating: SafetyRating,
}

/// Remaining shelf life as a 0-100 share of [`FULL_SHELF_LIFE_MONTHS`].
///
/// Reads the first `<n> month(s)` or `<n> year(s)` in `timeLeft`; anything
/// else, or no `timeLeft` at all, is 0.
pub fn time_left_percentage(product: &Product) -> f64 {
    let Some(time_left) = product.time_left.as_deref() else {
        return 0.0;
    };
    let Some(captures) = TIME_LEFT.as_ref().and_then(|re| re.captures(time_left)) else {
        return 0.0;
    };
    let Ok(value) = captures[1].parse::<f64>() else {
        return 0.0;
    };

    let months = if captures[2].eq_ignore_ascii_case("year") {
        value * 12.0
    } else {
        value
    };

    (months / FULL_SHELF_LIFE_MONTHS * 100.0).min(100.0)
}

/// One column of the side-by-side comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub product_id: i32,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub key_ingredients: Vec<IngredientPreview>,
    pub more_ingredients: usize,
    pub expiry_status: Option<String>,
    pub time_left_percentage: f64,
    pub overall_safety: OverallSafety,
    pub usage_instructions: String,
    pub warnings: String,
    pub recommended_for: String,
    pub review_summary: String,
}

impl From<&Product> for ComparisonEntry {
    fn from(product: &Product) -> Self {
        let key_ingredients = product
            .ingredients
            .iter()
            .take(INGREDIENT_PREVIEW_LEN)
            .map(|i| IngredientPreview {
                name: i.name.clone(),
                safety_rating: i.safety_rating,
            })
            .collect();

        Self {
            product_id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            key_ingredients,
            more_ingredients: product
                .ingredients
                .len()
                .saturating_sub(INGREDIENT_PREVIEW_LEN),
            expiry_status: product.time_left.clone(),
            time_left_percentage: time_left_percentage(product),
            overall_safety: OverallSafety::from_ingredients(&product.ingredients),
            usage_instructions: product.usage_instructions.clone(),
            warnings: product.warnings.clone(),
            recommended_for: product.recommended_for.clone(),
            review_summary: product.user_sentiment.review_summary.clone(),
        }
    }
}

pub fn build_comparison(products: &[Product]) -> Vec<ComparisonEntry> {
    products.iter().map(ComparisonEntry::from).collect()
}

/// Formats a byte count the way upload limits are shown to users, e.g. `10 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}
