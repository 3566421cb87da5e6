use std::path::Path;

/// Names seeded into the status store.
const DEFAULT_ROSTER: &[&str] = &["Maitrik Shah", "Chirag thakar", "Hetal Pandya"];

/// Shortest query word considered for a partial (given or family name) match.
const MIN_PARTIAL_LEN: usize = 3;

/// Known faculty names. Lookups return the roster spelling, which is also the
/// key the status store is indexed by.
#[derive(Debug, Clone)]
pub struct Roster {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    canonical: String,
    words: Vec<String>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(DEFAULT_ROSTER.iter().copied())
    }
}

impl Roster {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .map(|canonical| Entry {
                words: words(&canonical),
                canonical,
            })
            .filter(|e| !e.words.is_empty())
            .collect();
        Self { entries }
    }

    /// One name per line; blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        Ok(Self::parse(&std::fs::read_to_string(path)?))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the faculty member a query refers to.
    ///
    /// A full name appearing as consecutive words wins (the longest one if
    /// several do). Otherwise a single query word equal to the given or family
    /// name of exactly one roster entry is accepted. Anything ambiguous is `None`.
    pub fn find(&self, query: &str) -> Option<String> {
        let query_words = words(query);
        if let Some(entry) = self.full_match(&query_words) {
            return Some(entry.canonical.clone());
        }
        self.partial_match(&query_words)
            .map(|entry| entry.canonical.clone())
    }

    fn full_match(&self, query_words: &[String]) -> Option<&Entry> {
        let mut best: Option<&Entry> = None;
        for entry in &self.entries {
            let n = entry.words.len();
            let found = query_words.windows(n).any(|w| w == entry.words.as_slice());
            if found && best.is_none_or(|b| n > b.words.len()) {
                best = Some(entry);
            }
        }
        best
    }

    fn partial_match(&self, query_words: &[String]) -> Option<&Entry> {
        let mut hit: Option<&Entry> = None;
        for entry in &self.entries {
            let matched = query_words
                .iter()
                .filter(|w| w.chars().count() >= MIN_PARTIAL_LEN)
                .any(|w| entry.words.contains(w));
            if matched {
                if hit.is_some() {
                    return None;
                }
                hit = Some(entry);
            }
        }
        hit
    }
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_case_insensitive() {
        let roster = Roster::default();
        assert_eq!(
            roster.find("Is Maitrik Shah available?").as_deref(),
            Some("Maitrik Shah")
        );
        assert_eq!(
            roster.find("is maitrik shah available").as_deref(),
            Some("Maitrik Shah")
        );
    }

    #[test]
    fn returns_roster_spelling() {
        let roster = Roster::default();
        assert_eq!(
            roster.find("Is Chirag Thakar busy?").as_deref(),
            Some("Chirag thakar")
        );
    }

    #[test]
    fn family_name_alone_matches_unique_entry() {
        let roster = Roster::default();
        assert_eq!(
            roster.find("Is professor Pandya on leave?").as_deref(),
            Some("Hetal Pandya")
        );
    }

    #[test]
    fn given_name_alone_matches_unique_entry() {
        let roster = Roster::default();
        assert_eq!(
            roster.find("is maitrik available").as_deref(),
            Some("Maitrik Shah")
        );
    }

    #[test]
    fn ambiguous_partial_is_none() {
        let roster = Roster::new(["Maitrik Shah", "Nirav Shah"]);
        assert_eq!(roster.find("Is Shah available?"), None);
        assert_eq!(
            roster.find("Is Nirav Shah available?").as_deref(),
            Some("Nirav Shah")
        );
    }

    #[test]
    fn longest_full_name_wins() {
        let roster = Roster::new(["Hetal Pandya", "Hetal Pandya Joshi"]);
        assert_eq!(
            roster.find("is hetal pandya joshi in").as_deref(),
            Some("Hetal Pandya Joshi")
        );
    }

    #[test]
    fn no_name_in_query() {
        let roster = Roster::default();
        assert_eq!(roster.find("Is the faculty available today?"), None);
        assert_eq!(roster.find(""), None);
    }

    #[test]
    fn words_must_match_whole() {
        let roster = Roster::default();
        assert_eq!(roster.find("is shahrukh available"), None);
    }

    #[test]
    fn parse_skips_blank_and_comment_lines() {
        let roster = Roster::parse("# faculty\nMaitrik Shah\n\n  Hetal Pandya  \n");
        assert_eq!(roster.len(), 2);
        assert_eq!(
            roster.find("hetal pandya").as_deref(),
            Some("Hetal Pandya")
        );
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.txt");
        std::fs::write(&path, "Jay Mehta\n").unwrap();
        let roster = Roster::load(&path).unwrap();
        assert_eq!(roster.find("Is Jay Mehta busy").as_deref(), Some("Jay Mehta"));
    }
}
