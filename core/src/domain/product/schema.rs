use chrono::NaiveDate;
use serde_json::json;

/// Returns the JSON schema constraining the model's product analysis reply
pub fn get_product_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "productName": { "type": "string" },
            "category": { "type": "string" },
            "brand": { "type": "string" },
            "keyIngredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "function": { "type": "string" },
                        "benefits": { "type": "string" },
                        "sideEffects": { "type": "string" },
                        "safetyRating": {
                            "type": "string",
                            "enum": ["safe", "caution", "warning"]
                        }
                    },
                    "required": ["name", "function", "benefits", "sideEffects", "safetyRating"]
                }
            },
            "usageInstructions": { "type": "string" },
            "warnings": { "type": "string" },
            "expiryDate": { "type": "string" },
            "timeLeft": { "type": "string" },
            "recommendedFor": { "type": "string" },
            "notRecommendedFor": { "type": "string" },
            "userSentiment": {
                "type": "object",
                "properties": {
                    "pros": { "type": "array", "items": { "type": "string" } },
                    "cons": { "type": "array", "items": { "type": "string" } },
                    "reviewSummary": { "type": "string" }
                },
                "required": ["pros", "cons", "reviewSummary"]
            }
        },
        "required": [
            "productName", "category", "brand", "keyIngredients", "usageInstructions",
            "warnings", "recommendedFor", "notRecommendedFor", "userSentiment"
        ]
    })
}

/// Instruction sent alongside every package image. `today` anchors the time-left estimate.
pub fn build_analysis_prompt(today: NaiveDate) -> String {
    format!(
        "You are an expert consumer product analyst with access to scientific and market knowledge.

A user has provided an image of a product package. Extract any text from the image and analyze it.

Based on the text and visual information, do the following:

1. Identify the product name, type, and brand.
2. List all ingredients and describe:
   - What each ingredient is
   - Its benefits
   - Known side effects or health risks
   - Safety rating (safe, caution, warning)
3. Extract:
   - Usage instructions
   - Health warnings
   - Expiry date (if any)
4. Estimate how much time is left to use it (assume today is {})
5. Determine who should or shouldn't use this product
6. Simulate a realistic review summary

Return everything in the exact JSON format specified in the schema.",
        today.format("%-m/%-d/%Y")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let prompt = build_analysis_prompt(today);
        assert!(prompt.contains("assume today is 3/7/2025"));
        assert!(prompt.contains("Safety rating (safe, caution, warning)"));
    }

    #[test]
    fn schema_requires_sentiment_but_not_expiry() {
        let schema = get_product_analysis_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(required.contains(&"userSentiment"));
        assert!(!required.contains(&"expiryDate"));
        assert!(!required.contains(&"timeLeft"));
    }
}
