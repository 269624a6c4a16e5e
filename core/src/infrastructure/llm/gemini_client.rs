use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    product::ports::LLMClient,
};

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: Option<String>,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiResponse {
    /// Text of the first candidate, with multi-part replies joined.
    fn into_text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();

        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiLLMClient {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                CoreError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key: config
                .gemini_api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            model_name: config.gemini_model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let api_key = self.api_key.as_deref().ok_or_else(missing_api_key)?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model_name, api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // the url carries the api key
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        gemini_response
            .into_text()
            .ok_or_else(|| CoreError::ExternalServiceError("Empty response from LLM".to_string()))
    }
}

fn missing_api_key() -> CoreError {
    CoreError::Configuration(
        "GEMINI_API_KEY is not configured. Set GEMINI_API_KEY (or GOOGLE_AI_API_KEY) to an API key from https://ai.google.dev/".to_string(),
    )
}

fn image_request(
    system_instruction: String,
    prompt: String,
    image_data: &[u8],
    mime_type: String,
    response_schema: serde_json::Value,
) -> GeminiRequest {
    GeminiRequest {
        system_instruction: Some(Content {
            parts: vec![Part::Text {
                text: system_instruction,
            }],
        }),
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type,
                        data: general_purpose::STANDARD.encode(image_data),
                    },
                },
                Part::Text { text: prompt },
            ],
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema,
        }),
    }
}

impl LLMClient for GeminiLLMClient {
    fn ensure_configured(&self) -> Result<(), CoreError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(missing_api_key())
        }
    }

    async fn generate_with_image(
        &self,
        system_instruction: String,
        prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        self.ensure_configured()?;

        let request = image_request(
            system_instruction,
            prompt,
            &image_data,
            mime_type,
            response_schema,
        );

        self.call_gemini_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_carries_image_schema_and_instruction() {
        let request = image_request(
            "You are an analyst".to_string(),
            "Analyze".to_string(),
            b"png-bytes",
            "image/png".to_string(),
            json!({ "type": "object" }),
        );

        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body["system_instruction"]["parts"][0]["text"],
            "You are an analyst"
        );
        assert_eq!(
            body["contents"][0]["parts"][0]["inline_data"]["mime_type"],
            "image/png"
        );
        assert_eq!(
            body["contents"][0]["parts"][0]["inline_data"]["data"],
            general_purpose::STANDARD.encode(b"png-bytes")
        );
        assert_eq!(body["contents"][0]["parts"][1]["text"], "Analyze");
        assert_eq!(
            body["generation_config"]["response_mime_type"],
            "application/json"
        );
        assert_eq!(body["generation_config"]["response_schema"]["type"], "object");
    }

    #[test]
    fn reply_text_is_extracted_from_first_candidate() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();

        assert_eq!(response.into_text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn blocked_or_empty_reply_has_no_text() {
        let blocked: GeminiResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();
        assert_eq!(blocked.into_text(), None);

        let empty: GeminiResponse =
            serde_json::from_value(json!({ "candidates": [{ "content": { "parts": [{ "text": " " }] } }] }))
                .unwrap();
        assert_eq!(empty.into_text(), None);
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GeminiLLMClient::new(&LLMConfig {
            gemini_api_key: Some("   ".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            ..LLMConfig::default()
        })
        .unwrap();

        assert!(!client.is_configured());
        let err = client
            .generate_with_image(
                String::new(),
                String::new(),
                vec![1, 2, 3],
                "image/jpeg".to_string(),
                json!({}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }
}
