//! Google Gemini API adapter

use async_trait::async_trait;
use news_classifier_domain::{
    GenerationClient, GenerationError, GenerationRequest, GenerationResponse, ResponseFormat,
};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: SecretString, timeout: Duration) -> Result<Self, GenerationError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string(), timeout)
    }

    pub fn with_base_url(
        api_key: SecretString,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "generationConfig")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let generation_config = match request.response_format {
            ResponseFormat::Json => Some(GenerationConfig {
                response_mime_type: "application/json",
            }),
            ResponseFormat::Text => None,
        };

        let body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            generation_config,
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);

        tracing::debug!(model = %request.model, "Calling Gemini generateContent");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.expose_secret())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Network(e.without_url().to_string())
                }
            })?;

        if response.status() == 429 {
            return Err(GenerationError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let api_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidFormat(e.without_url().to_string()))?;

        let text = api_response
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Ok(GenerationResponse::empty());
        }

        Ok(GenerationResponse::text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use news_classifier_domain::usecases::{ArticleClassifier, DEFAULT_MODEL};
    use news_classifier_domain::Classification;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::with_base_url(
            SecretString::new("test-key".into()),
            server.uri(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn candidate_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [
                {
                    "content": {
                        "parts": [{ "text": text }],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ]
        })
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = GeminiClient::with_base_url(
            SecretString::new("test-key".into()),
            "http://localhost:9999/v1beta/".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(client.base_url(), "http://localhost:9999/v1beta");
    }

    #[tokio::test]
    async fn test_json_request_sets_mime_type() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(candidate_response(r#"{"category":"관광","type":"홍보"}"#)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = client_for(&mock_server)
            .generate(GenerationRequest::json(DEFAULT_MODEL, "prompt"))
            .await
            .unwrap();

        assert_eq!(
            response.text.as_deref(),
            Some(r#"{"category":"관광","type":"홍보"}"#)
        );
    }

    #[tokio::test]
    async fn test_parts_are_concatenated() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "Existing " }, { "text": "headline" }] } }
                ]
            })))
            .mount(&mock_server)
            .await;

        let response = client_for(&mock_server)
            .generate(GenerationRequest::text(DEFAULT_MODEL, "prompt"))
            .await
            .unwrap();

        assert_eq!(response.text.as_deref(), Some("Existing headline"));
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&mock_server)
            .await;

        let response = client_for(&mock_server)
            .generate(GenerationRequest::text(DEFAULT_MODEL, "prompt"))
            .await
            .unwrap();

        assert_eq!(response, GenerationResponse::empty());
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server)
            .generate(GenerationRequest::text(DEFAULT_MODEL, "prompt"))
            .await;

        assert!(matches!(result, Err(GenerationError::RateLimited)));
    }

    #[tokio::test]
    async fn test_api_error_keeps_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server)
            .generate(GenerationRequest::text(DEFAULT_MODEL, "prompt"))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::Api { status: 400, .. }));
        assert_eq!(err.detail(), Some("API key not valid"));
    }

    #[tokio::test]
    async fn test_classifier_end_to_end_single_call() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_response(
                "```json\n{\"category\":\"문화\",\"type\":\"홍보\"}\n```",
            )))
            .expect(1)
            .mount(&mock_server)
            .await;

        let classifier = ArticleClassifier::ready(client_for(&mock_server), DEFAULT_MODEL);
        let result = classifier.classify("Concert opens", "A concert opened").await;

        assert_eq!(result, Some(Classification::new("문화", "홍보")));
    }

    #[tokio::test]
    async fn test_classifier_server_error_is_absent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal error"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let classifier = ArticleClassifier::ready(client_for(&mock_server), DEFAULT_MODEL);

        assert_eq!(classifier.classify("t", "c").await, None);
    }
}
