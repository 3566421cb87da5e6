//! Query orchestration:
//! detect language → translate to English → route → answer → translate back.

use tracing::{debug, error, info};

use crate::gemini::{Embedder, GeminiError, Generator};
use crate::lang::{self, Language};
use crate::retrieval::{DEFAULT_TOP_K, RetrievalError, Retriever};
use crate::routing::{QueryClassifier, RouteDecision};
use crate::status::{LiveStatusResolver, StatusLookup};
use crate::synthesis::Synthesizer;
use crate::translate::{TranslationBoundary, Translator};

/// Shown instead of an answer when a provider error reaches the top.
pub const FAILURE_ANSWER: &str = "Sorry, I couldn't answer that right now. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("answer generation failed: {0}")]
    Generation(#[from] GeminiError),
}

/// One request's view of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub raw_text: String,
    pub language: Language,
    pub working_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text: String,
    pub language: Language,
}

/// Provider handles are injected once and reused read-only for every query.
pub struct Pipeline<'kb, C, E, G, T, S> {
    classifier: C,
    retriever: Retriever<'kb, E>,
    synthesizer: Synthesizer<G>,
    translation: TranslationBoundary<T>,
    live_status: LiveStatusResolver<S>,
    top_k: usize,
}

impl<'kb, C, E, G, T, S> Pipeline<'kb, C, E, G, T, S>
where
    C: QueryClassifier,
    E: Embedder,
    G: Generator,
    T: Translator,
    S: StatusLookup,
{
    pub fn new(
        classifier: C,
        retriever: Retriever<'kb, E>,
        synthesizer: Synthesizer<G>,
        translation: TranslationBoundary<T>,
        live_status: LiveStatusResolver<S>,
    ) -> Self {
        Self {
            classifier,
            retriever,
            synthesizer,
            translation,
            live_status,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Runs every stage once, in order. Errors from retrieval or generation
    /// are returned untouched.
    pub async fn answer(&self, raw: &str) -> Result<Answer, PipelineError> {
        let language = lang::detect(raw);
        debug!(stage = "language_detected", language = language.code());

        let working_text = if language.is_english() {
            raw.to_string()
        } else {
            self.translation.to_english(raw, language).await
        };
        let query = Query {
            raw_text: raw.to_string(),
            language,
            working_text,
        };
        debug!(
            stage = "translated_in",
            raw = %query.raw_text,
            query = %query.working_text
        );

        let route = self.classifier.classify(&query.working_text);
        debug!(stage = "routed", route = ?route);

        let answer_en = match route {
            RouteDecision::LiveStatus { entity_name } => {
                self.live_status.resolve(entity_name.as_deref()).await
            }
            RouteDecision::Knowledge => {
                let documents = self
                    .retriever
                    .retrieve(&query.working_text, self.top_k)
                    .await?;
                self.synthesizer
                    .synthesize(&query.working_text, &documents)
                    .await?
            }
        };
        debug!(stage = "answered");

        let text = self.localize(&answer_en, query.language).await;
        info!(language = query.language.code(), "query answered");
        Ok(Answer {
            text,
            language: query.language,
        })
    }

    /// Like `answer`, but a failure becomes `FAILURE_ANSWER` in the user's
    /// language, so every query produces exactly one answer.
    pub async fn respond(&self, raw: &str) -> Answer {
        match self.answer(raw).await {
            Ok(answer) => answer,
            Err(e) => {
                error!(error = %e, "query failed");
                let language = lang::detect(raw);
                Answer {
                    text: self.localize(FAILURE_ANSWER, language).await,
                    language,
                }
            }
        }
    }

    async fn localize(&self, english: &str, language: Language) -> String {
        if language.is_english() {
            english.to_string()
        } else {
            self.translation.from_english(english, language).await
        }
    }
}
