/// Working language of a query.
///
/// Detection is a script check, not language identification: any character
/// from the Gujarati block makes the whole text Gujarati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Gujarati,
}

impl Language {
    /// ISO 639-1 code understood by the translation provider.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Gujarati => "gu",
        }
    }

    pub fn is_english(self) -> bool {
        self == Language::English
    }
}

pub fn detect(text: &str) -> Language {
    if contains_gujarati(text) {
        Language::Gujarati
    } else {
        Language::English
    }
}

fn contains_gujarati(text: &str) -> bool {
    text.chars().any(|c| matches!(c, '\u{0A80}'..='\u{0AFF}'))
}
