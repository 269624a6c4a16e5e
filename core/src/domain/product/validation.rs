use serde_json::{Map, Value};
use validator::Validate;

use crate::domain::{
    common::entities::app_errors::{CoreError, FieldViolation},
    product::{
        entities::{ProductIngredient, SafetyRating, UserSentiment},
        value_objects::{InsertProduct, ProductAnalysis},
    },
};

/// Checks a decoded model reply against the [`ProductAnalysis`] shape.
///
/// Every offending field is reported, not just the first one. Unknown fields
/// are ignored, `null` optional fields count as absent and a missing
/// `safetyRating` defaults to `safe`.
pub fn validate_analysis(payload: &Value) -> Result<ProductAnalysis, CoreError> {
    let Some(object) = payload.as_object() else {
        return Err(CoreError::validation("$", "expected an object"));
    };

    let mut checker = ShapeChecker::default();

    let product_name = checker.required_string(object, "", "productName");
    let category = checker.required_string(object, "", "category");
    let brand = checker.required_string(object, "", "brand");
    let key_ingredients = checker.ingredients(object);
    let usage_instructions = checker.required_string(object, "", "usageInstructions");
    let warnings = checker.required_string(object, "", "warnings");
    let expiry_date = checker.optional_string(object, "", "expiryDate");
    let time_left = checker.optional_string(object, "", "timeLeft");
    let recommended_for = checker.required_string(object, "", "recommendedFor");
    let not_recommended_for = checker.required_string(object, "", "notRecommendedFor");
    let user_sentiment = checker.user_sentiment(object);

    if !checker.violations.is_empty() {
        return Err(CoreError::Validation(checker.violations));
    }

    Ok(ProductAnalysis {
        product_name: product_name.unwrap_or_default(),
        category: category.unwrap_or_default(),
        brand: brand.unwrap_or_default(),
        key_ingredients: key_ingredients.unwrap_or_default(),
        usage_instructions: usage_instructions.unwrap_or_default(),
        warnings: warnings.unwrap_or_default(),
        expiry_date,
        time_left,
        recommended_for: recommended_for.unwrap_or_default(),
        not_recommended_for: not_recommended_for.unwrap_or_default(),
        user_sentiment: user_sentiment.unwrap_or_default(),
    })
}

/// Parses raw model text and validates it; malformed JSON is an upstream failure.
pub fn parse_analysis(raw: &str) -> Result<ProductAnalysis, CoreError> {
    if raw.trim().is_empty() {
        return Err(CoreError::ExternalServiceError(
            "Empty response from LLM".to_string(),
        ));
    }

    let value: Value = serde_json::from_str(raw).map_err(|e| {
        tracing::error!("Failed to parse LLM response: {}", e);
        CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
    })?;

    validate_analysis(&value)
}

pub fn validate_insert(product: &InsertProduct) -> Result<(), CoreError> {
    product.validate().map_err(CoreError::from)
}

#[derive(Default)]
struct ShapeChecker {
    violations: Vec<FieldViolation>,
}

impl ShapeChecker {
    fn reject(&mut self, path: String, message: &str) {
        self.violations.push(FieldViolation::new(path, message));
    }

    fn required_string(
        &mut self,
        object: &Map<String, Value>,
        prefix: &str,
        key: &str,
    ) -> Option<String> {
        let path = join(prefix, key);
        match object.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            None | Some(Value::Null) => {
                self.reject(path, "is required");
                None
            }
            Some(_) => {
                self.reject(path, "expected a string");
                None
            }
        }
    }

    fn optional_string(
        &mut self,
        object: &Map<String, Value>,
        prefix: &str,
        key: &str,
    ) -> Option<String> {
        match object.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            None | Some(Value::Null) => None,
            Some(_) => {
                self.reject(join(prefix, key), "expected a string");
                None
            }
        }
    }

    fn string_list(
        &mut self,
        object: &Map<String, Value>,
        prefix: &str,
        key: &str,
    ) -> Option<Vec<String>> {
        let path = join(prefix, key);
        let items = match object.get(key) {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => {
                self.reject(path, "is required");
                return None;
            }
            Some(_) => {
                self.reject(path, "expected an array");
                return None;
            }
        };

        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => values.push(s.to_string()),
                None => self.reject(format!("{}[{}]", path, index), "expected a string"),
            }
        }
        Some(values)
    }

    fn ingredients(&mut self, object: &Map<String, Value>) -> Option<Vec<ProductIngredient>> {
        let items = match object.get("keyIngredients") {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => {
                self.reject("keyIngredients".to_string(), "is required");
                return None;
            }
            Some(_) => {
                self.reject("keyIngredients".to_string(), "expected an array");
                return None;
            }
        };

        let mut ingredients = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let prefix = format!("keyIngredients[{}]", index);
            let Some(entry) = item.as_object() else {
                self.reject(prefix, "expected an object");
                continue;
            };

            let name = self.required_string(entry, &prefix, "name");
            let function = self.required_string(entry, &prefix, "function");
            let benefits = self.required_string(entry, &prefix, "benefits");
            let side_effects = self.required_string(entry, &prefix, "sideEffects");
            let safety_rating = self.safety_rating(entry, &prefix);

            if let (Some(name), Some(function), Some(benefits), Some(side_effects), Some(rating)) =
                (name, function, benefits, side_effects, safety_rating)
            {
                ingredients.push(ProductIngredient {
                    name,
                    function,
                    benefits,
                    side_effects,
                    safety_rating: rating,
                });
            }
        }
        Some(ingredients)
    }

    fn safety_rating(&mut self, entry: &Map<String, Value>, prefix: &str) -> Option<SafetyRating> {
        let path = join(prefix, "safetyRating");
        match entry.get("safetyRating") {
            None | Some(Value::Null) => Some(SafetyRating::default()),
            Some(Value::String(s)) => match SafetyRating::parse(s) {
                Some(rating) => Some(rating),
                None => {
                    self.reject(path, "expected one of: safe, caution, warning");
                    None
                }
            },
            Some(_) => {
                self.reject(path, "expected one of: safe, caution, warning");
                None
            }
        }
    }

    fn user_sentiment(&mut self, object: &Map<String, Value>) -> Option<UserSentiment> {
        let sentiment = match object.get("userSentiment") {
            Some(Value::Object(sentiment)) => sentiment,
            None | Some(Value::Null) => {
                self.reject("userSentiment".to_string(), "is required");
                return None;
            }
            Some(_) => {
                self.reject("userSentiment".to_string(), "expected an object");
                return None;
            }
        };

        let pros = self.string_list(sentiment, "userSentiment", "pros");
        let cons = self.string_list(sentiment, "userSentiment", "cons");
        let review_summary = self.required_string(sentiment, "userSentiment", "reviewSummary");

        Some(UserSentiment {
            pros: pros?,
            cons: cons?,
            review_summary: review_summary?,
        })
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_payload() -> Value {
        json!({
            "productName": "Hydrating Cleanser",
            "category": "Skincare",
            "brand": "CeraVe",
            "keyIngredients": [
                {
                    "name": "Ceramides",
                    "function": "Barrier repair",
                    "benefits": "Restores the skin barrier",
                    "sideEffects": "None known",
                    "safetyRating": "safe"
                },
                {
                    "name": "Fragrance",
                    "function": "Scent",
                    "benefits": "Pleasant smell",
                    "sideEffects": "Can irritate sensitive skin"
                }
            ],
            "usageInstructions": "Massage onto wet skin and rinse.",
            "warnings": "For external use only.",
            "expiryDate": "2026-01",
            "recommendedFor": "Dry skin",
            "notRecommendedFor": "Fragrance allergies",
            "userSentiment": {
                "pros": ["Gentle"],
                "cons": ["Does not remove makeup"],
                "reviewSummary": "Well liked for daily use."
            },
            "confidence": 0.93
        })
    }

    fn fields(err: CoreError) -> Vec<String> {
        match err {
            CoreError::Validation(violations) => violations.into_iter().map(|v| v.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_payload_and_defaults_rating() {
        let analysis = validate_analysis(&valid_payload()).unwrap();

        assert_eq!(analysis.product_name, "Hydrating Cleanser");
        assert_eq!(analysis.key_ingredients.len(), 2);
        assert_eq!(analysis.key_ingredients[1].safety_rating, SafetyRating::Safe);
        assert_eq!(analysis.expiry_date.as_deref(), Some("2026-01"));
        assert_eq!(analysis.time_left, None);
    }

    #[test]
    fn missing_user_sentiment_is_rejected() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("userSentiment");

        assert_eq!(fields(validate_analysis(&payload).unwrap_err()), vec!["userSentiment"]);
    }

    #[test]
    fn reports_every_offending_field() {
        let mut payload = valid_payload();
        let object = payload.as_object_mut().unwrap();
        object.remove("brand");
        object.insert("warnings".into(), json!(42));
        object["keyIngredients"][0]["safetyRating"] = json!("dangerous");
        object["userSentiment"]["pros"] = json!(["ok", 3]);

        assert_eq!(
            fields(validate_analysis(&payload).unwrap_err()),
            vec![
                "brand",
                "keyIngredients[0].safetyRating",
                "warnings",
                "userSentiment.pros[1]",
            ]
        );
    }

    #[test]
    fn null_optionals_are_absent() {
        let mut payload = valid_payload();
        payload["expiryDate"] = Value::Null;
        payload["timeLeft"] = Value::Null;

        let analysis = validate_analysis(&payload).unwrap();
        assert_eq!(analysis.expiry_date, None);
        assert_eq!(analysis.time_left, None);
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert_eq!(fields(validate_analysis(&json!([1, 2])).unwrap_err()), vec!["$"]);
    }

    #[test]
    fn unparseable_text_is_an_upstream_failure() {
        assert!(matches!(
            parse_analysis("not json").unwrap_err(),
            CoreError::ExternalServiceError(_)
        ));
        assert!(matches!(
            parse_analysis("  ").unwrap_err(),
            CoreError::ExternalServiceError(_)
        ));
    }

    #[test]
    fn insert_rejects_malformed_image_url() {
        let analysis = validate_analysis(&valid_payload()).unwrap();
        let mut insert = InsertProduct::from(analysis);
        assert!(validate_insert(&insert).is_ok());

        insert.image_url = Some("not a url".to_string());
        assert_eq!(fields(validate_insert(&insert).unwrap_err()).len(), 1);
    }
}
