use tracing::warn;

use super::{TranslateError, Translator};
use crate::lang::Language;

/// Moves text between the user's language and English.
///
/// Provider failures never escape: the caller always gets text back, and on
/// failure that text is the untranslated input. One attempt per call.
pub struct TranslationBoundary<T> {
    translator: T,
}

impl<T: Translator> TranslationBoundary<T> {
    pub fn new(translator: T) -> Self {
        Self { translator }
    }

    pub async fn to_english(&self, text: &str, source: Language) -> String {
        self.translate_or_passthrough(text, source, Language::English)
            .await
    }

    pub async fn from_english(&self, text: &str, target: Language) -> String {
        self.translate_or_passthrough(text, Language::English, target)
            .await
    }

    #[cfg(test)]
    pub(crate) fn translator(&self) -> &T {
        &self.translator
    }

    async fn translate_or_passthrough(&self, text: &str, from: Language, to: Language) -> String {
        match self.try_translate(text, from, to).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!(
                    error = %e,
                    from = from.code(),
                    to = to.code(),
                    "translation failed, passing text through"
                );
                text.to_string()
            }
        }
    }

    async fn try_translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<String, TranslateError> {
        if from == to || text.trim().is_empty() {
            return Ok(text.to_string());
        }
        self.translator
            .translate(text, from.code(), to.code())
            .await
    }
}
