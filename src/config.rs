use std::env;
use std::path::PathBuf;

use crate::retrieval::DEFAULT_TOP_K;

const DEFAULT_STATUS_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_INDEX_PATH: &str = "data/knowledge_index.json";
const DEFAULT_DOCUMENTS_PATH: &str = "data/knowledge_base_embeddings.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Chat-session settings. Gemini credentials are read by `GeminiClient` itself.
///
/// - `CAMPUS_STATUS_URL`: live-status store base URL
/// - `CAMPUS_INDEX` / `CAMPUS_DOCUMENTS`: vector index and embedded documents
/// - `CAMPUS_ROSTER`: newline-separated faculty names (built-in roster when unset)
/// - `CAMPUS_TOP_K`: documents retrieved per question
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub status_url: String,
    pub index_path: PathBuf,
    pub documents_path: PathBuf,
    pub roster_path: Option<PathBuf>,
    pub top_k: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let top_k = match get("CAMPUS_TOP_K") {
            None => DEFAULT_TOP_K,
            Some(raw) => match raw.parse::<usize>() {
                Ok(k) if k >= 1 => k,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "CAMPUS_TOP_K",
                        expected: "a positive integer",
                        value: raw,
                    });
                }
            },
        };

        let status_url = get("CAMPUS_STATUS_URL").unwrap_or_else(|| DEFAULT_STATUS_URL.to_string());
        let is_http = url::Url::parse(&status_url)
            .is_ok_and(|u| matches!(u.scheme(), "http" | "https"));
        if !is_http {
            return Err(ConfigError::Invalid {
                key: "CAMPUS_STATUS_URL",
                expected: "an http(s) URL",
                value: status_url,
            });
        }

        Ok(Self {
            status_url,
            index_path: get("CAMPUS_INDEX")
                .unwrap_or_else(|| DEFAULT_INDEX_PATH.to_string())
                .into(),
            documents_path: get("CAMPUS_DOCUMENTS")
                .unwrap_or_else(|| DEFAULT_DOCUMENTS_PATH.to_string())
                .into(),
            roster_path: get("CAMPUS_ROSTER").map(PathBuf::from),
            top_k,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.status_url, "http://127.0.0.1:8000");
        assert_eq!(s.index_path, PathBuf::from("data/knowledge_index.json"));
        assert_eq!(
            s.documents_path,
            PathBuf::from("data/knowledge_base_embeddings.json")
        );
        assert_eq!(s.roster_path, None);
        assert_eq!(s.top_k, 3);
    }

    #[test]
    fn overrides_are_trimmed() {
        let s = settings(&[
            ("CAMPUS_STATUS_URL", " http://status.ldce.local:9000 "),
            ("CAMPUS_TOP_K", "5"),
            ("CAMPUS_ROSTER", "faculty.txt"),
        ])
        .unwrap();
        assert_eq!(s.status_url, "http://status.ldce.local:9000");
        assert_eq!(s.top_k, 5);
        assert_eq!(s.roster_path, Some(PathBuf::from("faculty.txt")));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let s = settings(&[("CAMPUS_TOP_K", "  "), ("CAMPUS_INDEX", "")]).unwrap();
        assert_eq!(s.top_k, 3);
        assert_eq!(s.index_path, PathBuf::from("data/knowledge_index.json"));
    }

    #[test]
    fn rejects_zero_or_garbage_top_k() {
        for bad in ["0", "-1", "three"] {
            let err = settings(&[("CAMPUS_TOP_K", bad)]).unwrap_err();
            assert!(err.to_string().contains("CAMPUS_TOP_K"), "value {bad}");
        }
    }

    #[test]
    fn rejects_non_http_status_url() {
        for bad in ["localhost:8000", "status-store", "ftp://127.0.0.1"] {
            let err = settings(&[("CAMPUS_STATUS_URL", bad)]).unwrap_err();
            assert!(err.to_string().contains("CAMPUS_STATUS_URL"), "value {bad}");
        }
    }
}
