//! Model gateway: the single point of entry for all text-generation calls.
//!
//! No other module may call the model provider directly. Feature services build a
//! `ModelRequest` and go through `LlmClient`.
//!
//! Transport (HTTP) sits behind `ModelTransport` so the retry and parsing contract
//! can run against a scripted transport in tests.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod parse;
pub mod prompts;
pub mod retry;
#[cfg(test)]
pub mod testing;

use retry::{call_with_policy, RetryPolicy};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response envelope: {0}")]
    Envelope(String),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("model returned a non-JSON response")]
    NonJson,

    #[error("model JSON did not match the expected shape: {0}")]
    Shape(#[source] serde_json::Error),
}

impl LlmError {
    pub fn is_transport(&self) -> bool {
        matches!(self, LlmError::Transport(_))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Part {
    Text(String),
    InlineData { mime_type: String, data: Bytes },
}

/// One generation request: ordered content parts plus output settings.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub parts: Vec<Part>,
    /// Ask the provider for `application/json` output.
    pub json_response: bool,
    pub temperature: Option<f32>,
}

impl ModelRequest {
    /// A request whose response must be a JSON document.
    pub fn json(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text(prompt.into())],
            json_response: true,
            temperature: None,
        }
    }

    /// A request left in free-text mode; the caller still parses JSON out of it.
    pub fn free_text(prompt: impl Into<String>) -> Self {
        Self {
            json_response: false,
            ..Self::json(prompt)
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Text(text.into()));
        self
    }

    pub fn with_attachment(mut self, mime_type: impl Into<String>, data: Bytes) -> Self {
        self.parts.push(Part::InlineData {
            mime_type: mime_type.into(),
            data,
        });
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// All text parts joined, attachments skipped.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text(t) => Some(t.as_str()),
                Part::InlineData { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Provider wire format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentBody<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: WireGenerationConfig,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Text { text: &'a str },
    Inline { inline_data: WireInlineData<'a> },
}

#[derive(Debug, Serialize)]
struct WireInlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Serialize)]
struct WireGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl<'a> GenerateContentBody<'a> {
    fn from_request(request: &'a ModelRequest) -> Self {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => WirePart::Text { text },
                Part::InlineData { mime_type, data } => WirePart::Inline {
                    inline_data: WireInlineData {
                        mime_type,
                        data: BASE64.encode(data),
                    },
                },
            })
            .collect();

        Self {
            contents: vec![WireContent { parts }],
            generation_config: WireGenerationConfig {
                response_mime_type: request.json_response.then_some("application/json"),
                temperature: request.temperature,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsageMetadata {
    #[serde(default, rename = "promptTokenCount")]
    pub prompt_token_count: u32,
    #[serde(default, rename = "candidatesTokenCount")]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }

    /// Text of every part of the first candidate, joined with newlines.
    /// Free-text replies may be split across several parts.
    pub fn joined_text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n"))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Transport
// ────────────────────────────────────────────────────────────────────────────

/// Status and body of one provider round-trip, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait ModelTransport: Send + Sync {
    async fn send(&self, request: &ModelRequest) -> Result<RawResponse, LlmError>;
}

/// `generateContent` over HTTPS.
pub struct GeminiTransport {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiTransport {
    pub fn new(api_key: String, model: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl ModelTransport for GeminiTransport {
    async fn send(&self, request: &ModelRequest) -> Result<RawResponse, LlmError> {
        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);
        let body = GenerateContentBody::from_request(request);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single model client used by all services.
/// Wraps a transport with the retry policy and the JSON response contract.
#[derive(Clone)]
pub struct LlmClient {
    transport: Arc<dyn ModelTransport>,
    policy: RetryPolicy,
}

impl LlmClient {
    pub fn new(transport: Arc<dyn ModelTransport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn gemini(api_key: String, model: String) -> Result<Self, LlmError> {
        let transport = GeminiTransport::new(api_key, model)?;
        Ok(Self::new(Arc::new(transport), RetryPolicy::default()))
    }

    /// Sends the request and returns the model's text.
    /// Rate-limit / unavailable statuses and transport failures are retried per policy;
    /// any non-success status left at the end is an `LlmError::Api`.
    pub async fn call(&self, request: &ModelRequest) -> Result<String, LlmError> {
        let transport = &self.transport;
        let response = call_with_policy(
            &self.policy,
            |_attempt| transport.send(request),
            |outcome| match outcome {
                Ok(r) => self.policy.is_retryable_status(r.status),
                Err(e) => e.is_transport(),
            },
        )
        .await?;

        if !response.is_success() {
            return Err(LlmError::Api {
                status: response.status,
                message: response.body,
            });
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&response.body)
            .map_err(|e| LlmError::Envelope(e.to_string()))?;

        if let Some(usage) = &envelope.usage_metadata {
            debug!(
                "Model call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        let text = if request.json_response {
            envelope.text().map(str::to_owned)
        } else {
            envelope.joined_text()
        };
        text.ok_or(LlmError::EmptyContent)
    }

    /// Calls the model and deserializes its text as JSON (fence-stripped, salvaged if needed).
    pub async fn call_json<T: DeserializeOwned>(&self, request: &ModelRequest) -> Result<T, LlmError> {
        let text = self.call(request).await?;
        parse::parse_model_json(&text)
    }
}
