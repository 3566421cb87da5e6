use tracing::debug;

use crate::gemini::{GeminiError, Generator};

/// Fixed answer when the model returns no text at all.
pub const NO_INFORMATION: &str = "I don't have that information.";

const INSTRUCTION: &str = "You are a helpful college assistant chatbot.\n\
Answer the question strictly using the information below.\n\
If the answer is not present, say \"I don't have that information.\"";

pub fn build_prompt(question: &str, documents: &[String]) -> String {
    let context = documents.join("\n");
    format!("{INSTRUCTION}\n\nContext:\n{context}\n\nQuestion:\n{question}\n")
}

/// Grounded answer generation: one prompt, one provider call.
pub struct Synthesizer<G> {
    generator: G,
}

impl<G: Generator> Synthesizer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// The model's text verbatim. Staying within the context is only asked
    /// for in the prompt, not checked.
    pub async fn synthesize(
        &self,
        question: &str,
        documents: &[String],
    ) -> Result<String, GeminiError> {
        let prompt = build_prompt(question, documents);
        debug!(
            documents = documents.len(),
            prompt_chars = prompt.len(),
            "synthesizing answer"
        );
        let answer = self.generator.generate(&prompt).await?;
        Ok(answer.unwrap_or_else(|| NO_INFORMATION.to_string()))
    }

    #[cfg(test)]
    pub(crate) fn generator(&self) -> &G {
        &self.generator
    }
}
