//! Query routing: live faculty status versus static knowledge.

mod roster;

pub use roster::Roster;

/// Words that mark a query as a live-status request.
pub const LIVE_STATUS_KEYWORDS: &[&str] = &["available", "busy", "leave", "faculty", "professor"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    LiveStatus { entity_name: Option<String> },
    Knowledge,
}

/// Decides which path answers an English query.
pub trait QueryClassifier {
    fn classify(&self, english_query: &str) -> RouteDecision;
}

/// Substring keyword match, with the faculty name taken from a roster.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    roster: Roster,
}

impl KeywordClassifier {
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }

    pub fn extract_name(&self, english_query: &str) -> Option<String> {
        self.roster.find(english_query)
    }
}

impl QueryClassifier for KeywordClassifier {
    fn classify(&self, english_query: &str) -> RouteDecision {
        if is_live_status_query(english_query) {
            RouteDecision::LiveStatus {
                entity_name: self.extract_name(english_query),
            }
        } else {
            RouteDecision::Knowledge
        }
    }
}

fn is_live_status_query(query: &str) -> bool {
    let lowered = query.to_lowercase();
    LIVE_STATUS_KEYWORDS.iter().any(|k| lowered.contains(k))
}
