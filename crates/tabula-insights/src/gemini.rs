//! Google Generative Language (`generateContent`) client.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::config::ProviderSettings;
use crate::error::{ProviderError, Result};
use crate::provider::{GenerationRequest, InsightProvider};

/// Error bodies longer than this are cut before being stored in the error.
const MAX_ERROR_BODY: usize = 512;

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().map(|part| part.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Provider backed by the Gemini REST API.
pub struct GeminiProvider {
    client: reqwest::Client,
    settings: ProviderSettings,
}

impl GeminiProvider {
    /// Create a provider with a client bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Network`] if the HTTP client cannot be built.
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("tabula/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout())
            .build()?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model.trim()
        )
    }
}

#[async_trait]
impl InsightProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let api_key = self
            .settings
            .api_key()
            .ok_or(ProviderError::MissingCredential)?;

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        };

        tracing::debug!(model = %self.settings.model, "sending generateContent request");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        handle_response(response).await
    }
}

async fn handle_response(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|&idx| body.is_char_boundary(idx))
                .unwrap_or(0);
            body.truncate(cut);
        }
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await?;
    parse_generate_response(&text)
}

/// Extract the candidate text from a `generateContent` response body.
fn parse_generate_response(body: &str) -> Result<String> {
    let parsed: GeminiResponse = serde_json::from_str(body)?;
    parsed
        .into_text()
        .ok_or_else(|| ProviderError::InvalidResponse("response has no candidate text".to_string()))
}
