use chrono::TimeZone;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};

use crate::domain::{
    common::entities::app_errors::CoreError,
    product::{entities::Product, value_objects::InsertProduct},
};
use crate::entity::products::{ActiveModel as ProductActiveModel, Model as ProductModel};

impl TryFrom<ProductModel> for Product {
    type Error = CoreError;

    fn try_from(model: ProductModel) -> Result<Self, Self::Error> {
        let ingredients = serde_json::from_value(model.ingredients).map_err(|e| {
            tracing::error!(product_id = model.id, "Corrupt ingredients column: {}", e);
            CoreError::InternalServerError
        })?;
        let user_sentiment = serde_json::from_value(model.user_sentiment).map_err(|e| {
            tracing::error!(product_id = model.id, "Corrupt user_sentiment column: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(Product {
            id: model.id,
            name: model.name,
            brand: model.brand,
            category: model.category,
            ingredients,
            usage_instructions: model.usage_instructions,
            warnings: model.warnings,
            expiry_date: model.expiry_date,
            time_left: model.time_left,
            recommended_for: model.recommended_for,
            not_recommended_for: model.not_recommended_for,
            user_sentiment,
            image_url: model.image_url,
            created_at: Utc.from_utc_datetime(&model.created_at),
        })
    }
}

impl TryFrom<InsertProduct> for ProductActiveModel {
    type Error = CoreError;

    fn try_from(product: InsertProduct) -> Result<Self, Self::Error> {
        let to_json = |value: serde_json::Result<serde_json::Value>| {
            value.map_err(|e| {
                tracing::error!("Failed to encode product JSON column: {}", e);
                CoreError::InternalServerError
            })
        };

        Ok(ProductActiveModel {
            id: NotSet,
            name: Set(product.name),
            brand: Set(product.brand),
            category: Set(product.category),
            ingredients: Set(to_json(serde_json::to_value(&product.ingredients))?),
            usage_instructions: Set(product.usage_instructions),
            warnings: Set(product.warnings),
            expiry_date: Set(product.expiry_date),
            time_left: Set(product.time_left),
            recommended_for: Set(product.recommended_for),
            not_recommended_for: Set(product.not_recommended_for),
            user_sentiment: Set(to_json(serde_json::to_value(&product.user_sentiment))?),
            image_url: Set(product.image_url),
            created_at: Set(Utc::now().naive_utc()),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::product::entities::SafetyRating;

    fn model(ingredients: serde_json::Value) -> ProductModel {
        ProductModel {
            id: 3,
            name: "Lip Balm".to_string(),
            brand: "Acme".to_string(),
            category: "Lipcare".to_string(),
            ingredients,
            usage_instructions: "Apply as needed".to_string(),
            warnings: "None".to_string(),
            expiry_date: None,
            time_left: Some("2 years".to_string()),
            recommended_for: "Dry lips".to_string(),
            not_recommended_for: "Lanolin allergies".to_string(),
            user_sentiment: json!({ "pros": ["Cheap"], "cons": [], "reviewSummary": "Fine" }),
            image_url: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn decodes_json_columns() {
        let product = Product::try_from(model(json!([{
            "name": "Lanolin",
            "function": "Emollient",
            "benefits": "Softens",
            "sideEffects": "Allergy in rare cases",
            "safetyRating": "caution"
        }])))
        .unwrap();

        assert_eq!(product.id, 3);
        assert_eq!(product.ingredients[0].safety_rating, SafetyRating::Caution);
        assert_eq!(product.user_sentiment.review_summary, "Fine");
    }

    #[test]
    fn corrupt_json_column_is_an_internal_error() {
        let err = Product::try_from(model(json!({ "not": "a list" }))).unwrap_err();
        assert!(matches!(err, CoreError::InternalServerError));
    }
}
