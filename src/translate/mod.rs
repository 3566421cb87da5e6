//! Translation provider client and the fail-soft boundary around it.

mod boundary;

pub use boundary::TranslationBoundary;

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

const API_BASE: &str = "https://translate.googleapis.com";
const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("invalid translation URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("translation request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("translation service returned HTTP {0}")]
    Status(u16),

    #[error("malformed translation response: {0}")]
    Malformed(String),
}

/// Text from one language code to another.
pub trait Translator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError>;
}

/// Client for the public Google Translate `translate_a/single` endpoint.
#[derive(Clone)]
pub struct GoogleTranslator {
    http: Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }
}

impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let url = Url::parse_with_params(
            &format!("{}/translate_a/single", self.base_url),
            &[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ],
        )?;

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .timeout(TRANSLATE_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let raw = response.text().await?;
        let body: Value =
            serde_json::from_str(&raw).map_err(|e| TranslateError::Malformed(e.to_string()))?;
        let translated = join_segments(&body)?;
        debug!(source, target, chars = translated.chars().count(), "translation complete");
        Ok(translated)
    }
}

/// The response is a nested array; `body[0]` holds one `[translated, original, ...]`
/// entry per sentence.
fn join_segments(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Malformed("missing sentence list".to_string()))?;

    let joined: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if joined.trim().is_empty() {
        return Err(TranslateError::Malformed("empty translation".to_string()));
    }
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_sentence_segments() {
        let body = json!([
            [
                ["What is the library ", "લાઇબ્રેરીનો ", null, null, 10],
                ["timing?", "સમય શું છે?", null, null, 10]
            ],
            null,
            "gu"
        ]);
        assert_eq!(join_segments(&body).unwrap(), "What is the library timing?");
    }

    #[test]
    fn rejects_non_array_body() {
        let body = json!({"error": "nope"});
        assert!(matches!(
            join_segments(&body),
            Err(TranslateError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_empty_translation() {
        let body = json!([[["", "x"]]]);
        assert!(matches!(
            join_segments(&body),
            Err(TranslateError::Malformed(_))
        ));
    }
}
