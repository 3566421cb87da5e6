use std::env;
use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::response::extract_answer;
use super::types::{
    ApiEnvelope, ApiError, Content, EmbedContentRequest, EmbedContentResponse, ErrorEnvelope,
    GenerateContentRequest, GenerateContentResponse,
};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";
const GENERATE_TIMEOUT: Duration = Duration::from_secs(30);
const EMBED_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("GEMINI_API_KEY not set. Get one at https://aistudio.google.com/apikey")]
    ApiKeyNotSet,

    #[error("API rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("API quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("embedding response contained no values")]
    EmptyEmbedding,
}

/// Text to fixed-length vector.
/// Implemented by `GeminiClient` for production; mock implementations used in tests.
pub trait Embedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GeminiError>;
}

/// Prompt to free text. `Ok(None)` means the model answered with no text.
pub trait Generator {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, GeminiError>;
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: Client,
    api_key: ApiKey,
    model: String,
    embedding_model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn from_env(http: Client) -> Result<Self, GeminiError> {
        let api_key = env::var("GEMINI_API_KEY").map_err(|_| GeminiError::ApiKeyNotSet)?;
        if api_key.trim().is_empty() {
            return Err(GeminiError::ApiKeyNotSet);
        }
        Ok(Self {
            http,
            api_key: ApiKey(api_key.trim().to_string()),
            model: env_or("GEMINI_MODEL", DEFAULT_MODEL),
            embedding_model: env_or("GEMINI_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            base_url: API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey("test-key".to_string()),
            model: DEFAULT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: base_url.to_string(),
        }
    }

    async fn post<B, R>(&self, url: &str, body: &B, timeout: Duration) -> Result<R, GeminiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned + ApiEnvelope,
    {
        debug_assert!(
            url.starts_with("https://") || cfg!(test),
            "API key must only be sent over HTTPS"
        );

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key.0)
            .header("User-Agent", crate::USER_AGENT)
            .json(body)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Gemini API rate limited");
            return Err(GeminiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Ok(body) = serde_json::from_str::<ErrorEnvelope>(&text)
                && let Some(err) = &body.error
            {
                let classified = classify_api_error(err);
                warn!(error = %classified, "Gemini API error");
                return Err(classified);
            }
            let end = text.floor_char_boundary(200);
            warn!(status = %status, "Gemini API error (no structured body)");
            return Err(GeminiError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}: {}", &text[..end]),
            });
        }

        let body: R = response.json().await?;
        if let Some(err) = body.api_error() {
            let classified = classify_api_error(err);
            warn!(error = %classified, "Gemini API error in 200 response");
            return Err(classified);
        }
        Ok(body)
    }
}

impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, GeminiError> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
        };
        let response: GenerateContentResponse =
            self.post(&url, &request, GENERATE_TIMEOUT).await?;
        debug!(model = %self.model, "generation complete");
        Ok(extract_answer(&response))
    }
}

impl Embedder for GeminiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GeminiError> {
        let url = format!("{}/{}:embedContent", self.base_url, self.embedding_model);
        let request = EmbedContentRequest {
            model: format!("models/{}", self.embedding_model),
            content: Content::user_text(text),
        };
        let response: EmbedContentResponse = self.post(&url, &request, EMBED_TIMEOUT).await?;
        let values = response
            .embedding
            .map(|e| e.values)
            .filter(|v| !v.is_empty())
            .ok_or(GeminiError::EmptyEmbedding)?;
        debug!(model = %self.embedding_model, dims = values.len(), "embedding complete");
        Ok(values)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| default.to_string())
}

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Runs `op` up to `MAX_RETRIES` times while it fails with a transient error.
///
/// Only the offline batch tooling goes through here; the query path makes a
/// single attempt per call.
pub async fn with_retry<T, F, Fut>(mut op: F) -> Result<T, GeminiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GeminiError>>,
{
    let mut last_err = None;
    for attempt in 0..MAX_RETRIES {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if is_retriable(&e) => {
                last_err = Some(e);
                if attempt + 1 < MAX_RETRIES {
                    let delay_ms = jittered_backoff(attempt);
                    debug!(
                        attempt = attempt + 1,
                        delay_ms, "retrying after transient error"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
            Err(e) => return Err(e),
        }
    }
    Err(last_err.unwrap_or(GeminiError::RateLimited))
}

fn is_retriable(e: &GeminiError) -> bool {
    matches!(
        e,
        GeminiError::RateLimited
            | GeminiError::Api {
                code: 500..=599,
                ..
            }
    )
}

/// Equal jitter backoff: base/2 + rand(0, base/2).
fn jittered_backoff(attempt: u32) -> u64 {
    let base = INITIAL_BACKOFF_MS * 2u64.pow(attempt);
    let half = base / 2;
    half + fastrand::u64(..half.max(1))
}

fn classify_api_error(err: &ApiError) -> GeminiError {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());

    match err.code {
        Some(429) => GeminiError::RateLimited,
        Some(403) => GeminiError::QuotaExhausted(message),
        Some(code) => GeminiError::Api { code, message },
        None => GeminiError::Api {
            code: 0,
            message: format!("Unknown error (no status code): {message}"),
        },
    }
}
