//! Live faculty status: HTTP lookup against the status store and the
//! fail-soft resolver that turns a lookup into a sentence.

mod resolver;

pub use resolver::LiveStatusResolver;

use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// A faculty name is a single path segment, so `/` is encoded too.
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("status store unreachable: {0}")]
    Network(#[from] reqwest::Error),

    #[error("status store returned HTTP {0}")]
    Status(u16),

    #[error("malformed status response: {0}")]
    Malformed(String),
}

/// Name-keyed read access to the live-status store.
pub trait StatusLookup {
    /// `Ok(None)` when the store has no record for `name`.
    async fn lookup(&self, name: &str) -> Result<Option<String>, StatusError>;
}

/// Status part of the `{name, status}` body. The store answers unknown names
/// with `{"error": "..."}` and a 200, so the field is optional.
#[derive(Debug, Deserialize)]
struct FacultyStatus {
    status: Option<String>,
}

#[derive(Clone)]
pub struct StatusClient {
    http: Client,
    base_url: String,
}

impl StatusClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, name: &str) -> String {
        format!(
            "{}/status/{}",
            self.base_url,
            utf8_percent_encode(name, SEGMENT_ENCODE_SET)
        )
    }
}

impl StatusLookup for StatusClient {
    async fn lookup(&self, name: &str) -> Result<Option<String>, StatusError> {
        let response = self
            .http
            .get(self.url_for(name))
            .header("User-Agent", crate::USER_AGENT)
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            200..=299 => {
                let raw = response.text().await?;
                let body: FacultyStatus = serde_json::from_str(&raw)
                    .map_err(|e| StatusError::Malformed(e.to_string()))?;
                let found = body.status.filter(|s| !s.trim().is_empty());
                debug!(name, found = found.is_some(), "status lookup complete");
                Ok(found)
            }
            404 => Ok(None),
            code => Err(StatusError::Status(code)),
        }
    }
}
