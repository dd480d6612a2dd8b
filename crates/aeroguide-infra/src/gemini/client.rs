//! GeminiClient -- concrete [`CompletionModel`] and [`TextEmbedder`] for the
//! Google Generative Language API.
//!
//! One client serves both `generateContent` and `embedContent`; the serving
//! layer clones it where the two roles are wired separately (cloning shares
//! the underlying connection pool).
//!
//! The API key is wrapped in [`secrecy::SecretString`] and only exposed when
//! building the `x-goog-api-key` header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use aeroguide_core::answer::{CompletionModel, TextEmbedder};
use aeroguide_types::chat::ChatTurn;
use aeroguide_types::config::GeminiConfig;
use aeroguide_types::error::UpstreamError;
use aeroguide_types::llm::{CompletionOutcome, CompletionRequest};

use super::types::{
    Content, EmbedContentRequest, EmbedContentResponse, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig,
};
use crate::http::{send_error, status_error};
use crate::retry::retry_with_backoff;

const SERVICE: &str = "gemini";

/// Output width of the `embedding-001` family.
const EMBEDDING_DIMENSION: usize = 768;

/// Google Gemini client.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    completion_model: String,
    embedding_model: String,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(api_key: SecretString, config: &GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            completion_model: config.completion_model.clone(),
            embedding_model: config.embedding_model.clone(),
            max_output_tokens: config.max_output_tokens,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, model: &str, method: &str) -> String {
        format!("{}/v1beta/models/{model}:{method}", self.base_url)
    }

    /// Convert a generic [`CompletionRequest`] into the Gemini shape.
    fn to_generate_request(&self, request: &CompletionRequest) -> GenerateContentRequest {
        let mut contents: Vec<Content> = request.history.iter().map(turn_content).collect();
        contents.push(Content::text(Some("user"), request.user.clone()));

        GenerateContentRequest {
            contents,
            system_instruction: request
                .system
                .as_deref()
                .map(|system| Content::text(None, system)),
            generation_config: Some(GenerationConfig {
                max_output_tokens: Some(
                    request.max_output_tokens.unwrap_or(self.max_output_tokens),
                ),
            }),
        }
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, UpstreamError>
    where
        B: serde::Serialize,
        R: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|err| send_error(SERVICE, &err))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(status_error(SERVICE, status.as_u16(), error_body));
        }

        response
            .json::<R>()
            .await
            .map_err(|err| UpstreamError::Malformed {
                service: SERVICE,
                message: format!("failed to parse response: {err}"),
            })
    }

    async fn generate(&self, request: &CompletionRequest) -> Result<CompletionOutcome, UpstreamError> {
        let body = self.to_generate_request(request);
        let url = self.url(&self.completion_model, "generateContent");

        let response: GenerateContentResponse = self.post_json(&url, &body).await?;
        let text = response.first_text().ok_or_else(|| UpstreamError::Malformed {
            service: SERVICE,
            message: "response carried no candidate text".to_string(),
        })?;
        Ok(CompletionOutcome { text })
    }

    async fn embed_once(&self, text: &str) -> Result<Vec<f32>, UpstreamError> {
        let body = EmbedContentRequest {
            model: format!("models/{}", self.embedding_model),
            content: Content::text(None, text),
        };
        let url = self.url(&self.embedding_model, "embedContent");

        let response: EmbedContentResponse = self.post_json(&url, &body).await?;
        Ok(response.embedding.values)
    }
}

fn turn_content(turn: &ChatTurn) -> Content {
    Content::text(Some(&turn.role.to_string()), turn.text.clone())
}

impl CompletionModel for GeminiClient {
    fn name(&self) -> &str {
        &self.completion_model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionOutcome, UpstreamError> {
        retry_with_backoff(SERVICE, || self.generate(request)).await
    }
}

impl TextEmbedder for GeminiClient {
    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, UpstreamError> {
        retry_with_backoff(SERVICE, || self.embed_once(text)).await
    }
}
