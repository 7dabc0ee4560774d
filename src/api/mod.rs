mod types;

use async_trait::async_trait;

pub use types::*;

use crate::config::Config;
use crate::core::prompt::verbose_prompt;
use crate::core::{DataUri, ImageParameters, ImagenError};
use crate::http_client::HTTP_CLIENT;

const NO_IMAGE_FALLBACK: &str = "No image generated.";

/// Something that can turn form parameters into an image
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image. Exactly one attempt is made per call.
    async fn generate(&self, params: &ImageParameters) -> Result<DataUri, ImagenError>;
}

/// Gemini API client
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client from config.
    ///
    /// A missing key is not an error here; it is reported by `generate`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.api_key().map(str::to_string),
            model: config.api.model.clone(),
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the API request body
    fn build_generate_request(&self, params: &ImageParameters) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part::text(verbose_prompt(params))],
                role: None,
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
                image_config: Some(ImageConfig {
                    aspect_ratio: Some(params.aspect_ratio.as_str().to_string()),
                }),
            }),
        }
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, params: &ImageParameters) -> Result<DataUri, ImagenError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ImagenError::MissingApiKey)?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = self.build_generate_request(params);

        tracing::debug!("Sending generate request to: {}", url);
        tracing::debug!(
            "Request body: {}",
            serde_json::to_string_pretty(&request).unwrap_or_default()
        );

        let response = HTTP_CLIENT
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            let error: ApiErrorResponse =
                serde_json::from_str(&body).unwrap_or_else(|_| ApiErrorResponse {
                    error: ApiError {
                        code: status.as_u16() as i32,
                        message: if body.trim().is_empty() {
                            status.to_string()
                        } else {
                            body.clone()
                        },
                        status: status.to_string(),
                    },
                });
            tracing::debug!(
                "API error {} ({}): {}",
                error.error.code,
                error.error.status,
                error.error.message
            );
            return Err(ImagenError::Service {
                message: error.error.message,
                source: None,
            });
        }

        let response: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| ImagenError::InvalidResponse(e.to_string()))?;

        extract_image(response)
    }
}

/// Pull the first inline image out of a response, or explain why there is none
pub fn extract_image(response: GenerateResponse) -> Result<DataUri, ImagenError> {
    if response.candidates.is_empty() {
        if let Some(feedback) = response.prompt_feedback {
            if let Some(reason) = feedback.block_reason {
                let message = feedback
                    .block_reason_message
                    .unwrap_or_else(|| format!("Prompt blocked: {}", reason));
                tracing::warn!("Prompt blocked: {}", reason);
                return Err(ImagenError::Refused(message));
            }
        }
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(ImagenError::Refused(NO_IMAGE_FALLBACK.to_string()));
    };

    let mut texts = Vec::new();
    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        if let Some(inline) = part.inline_data {
            if !inline.data.is_empty() {
                return Ok(match inline.mime_type.filter(|m| !m.is_empty()) {
                    Some(mime_type) => DataUri::new(mime_type, inline.data),
                    None => DataUri::png(inline.data),
                });
            }
        }
        if let Some(text) = part.text {
            tracing::debug!("Response text: {}", text);
            texts.push(text);
        }
    }

    let explanation = if !texts.is_empty() {
        texts.join("\n")
    } else if let Some(message) = candidate.finish_message {
        message
    } else {
        NO_IMAGE_FALLBACK.to_string()
    };

    tracing::warn!(
        "Generation refused ({}): {}",
        candidate.finish_reason.as_deref().unwrap_or("no finish reason"),
        explanation
    );
    Err(ImagenError::Refused(explanation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AspectRatio, Field};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/models/gemini-2.5-flash-image:generateContent";

    fn client_for(server: &MockServer, key: Option<&str>) -> GeminiClient {
        let mut config = Config::default().with_base_url(server.uri());
        config.api.key = key.map(str::to_string);
        GeminiClient::from_config(&config)
    }

    fn fox() -> ImageParameters {
        ImageParameters::new("a red fox in snow")
            .with_field(Field::Style, "watercolor")
            .with_aspect_ratio(AspectRatio::Landscape)
    }

    fn parse(value: serde_json::Value) -> GenerateResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_carries_prompt_and_ratio() {
        let client = GeminiClient::from_config(&Config::default());
        let request = client.build_generate_request(&fox());
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "16:9");
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("**Main Subject**: a red fox in snow"));
        assert!(body["contents"][0]["parts"][0].get("inlineData").is_none());
    }

    #[test]
    fn test_extract_inline_image() {
        let response = parse(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "Here is your fox"},
                    {"inlineData": {"mimeType": "image/jpeg", "data": "/9j/4AAQ"}}
                ]},
                "finishReason": "STOP"
            }]
        }));
        let uri = extract_image(response).unwrap();
        assert_eq!(uri.to_string(), "data:image/jpeg;base64,/9j/4AAQ");
    }

    #[test]
    fn test_extract_defaults_mime_type() {
        let response = parse(json!({
            "candidates": [{"content": {"parts": [{"inlineData": {"data": "iVBORw0KGgo="}}]}}]
        }));
        assert_eq!(extract_image(response).unwrap().mime_type, "image/png");
    }

    #[test]
    fn test_extract_text_only_is_refusal() {
        let response = parse(json!({
            "candidates": [{"content": {"parts": [{"text": "content policy violation"}]}}]
        }));
        let err = extract_image(response).unwrap_err();
        assert!(matches!(err, ImagenError::Refused(_)));
        assert!(err.to_string().contains("content policy violation"));
    }

    #[test]
    fn test_extract_empty_candidate_uses_fallback() {
        let response = parse(json!({"candidates": [{"finishReason": "IMAGE_OTHER"}]}));
        let err = extract_image(response).unwrap_err();
        assert_eq!(err.to_string(), "Generation failed: No image generated.");
    }

    #[test]
    fn test_extract_blocked_prompt() {
        let response = parse(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        let err = extract_image(response).unwrap_err();
        assert_eq!(err.to_string(), "Generation failed: Prompt blocked: SAFETY");
    }

    #[tokio::test]
    async fn test_missing_key_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server, None).generate(&fox()).await.unwrap_err();
        assert!(matches!(err, ImagenError::MissingApiKey));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_generate_returns_data_uri() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": {"imageConfig": {"aspectRatio": "16:9"}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"parts": [{"inlineData": {"mimeType": "image/png", "data": "UDA="}}]},
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let uri = client_for(&server, Some("test-key"))
            .generate(&fox())
            .await
            .unwrap();
        assert_eq!(uri.to_string(), "data:image/png;base64,UDA=");
    }

    #[tokio::test]
    async fn test_generate_refusal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "content policy violation"}]}}]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("test-key"))
            .generate(&fox())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Generation failed: content policy violation");
    }

    #[tokio::test]
    async fn test_generate_service_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("bad-key"))
            .generate(&fox())
            .await
            .unwrap_err();
        assert!(matches!(err, ImagenError::Service { .. }));
        assert_eq!(err.to_string(), "API key not valid.");
    }

    #[tokio::test]
    async fn test_generate_raw_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("test-key"))
            .generate(&fox())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "upstream unavailable");
    }

    #[tokio::test]
    async fn test_connection_refused_is_service_error() {
        // bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let mut config = Config::default().with_base_url(format!("http://127.0.0.1:{}", port));
        config.api.key = Some("test-key".to_string());

        let err = GeminiClient::from_config(&config)
            .generate(&fox())
            .await
            .unwrap_err();
        assert!(matches!(err, ImagenError::Service { source: Some(_), .. }));
        let message = err.to_string();
        assert!(message.starts_with("error sending request"), "{}", message);
        assert!(
            message.to_lowercase().contains("connection refused"),
            "cause missing from: {}",
            message
        );
    }

    #[tokio::test]
    async fn test_generate_unparseable_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("test-key"))
            .generate(&fox())
            .await
            .unwrap_err();
        assert!(matches!(err, ImagenError::InvalidResponse(_)));
    }
}
