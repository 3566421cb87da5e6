use tracing::warn;

use super::types::GenerateContentResponse;

/// Pulls the answer text out of the first candidate, joining its parts.
/// `None` when the model produced no text (safety block, empty candidate list).
pub fn extract_answer(response: &GenerateContentResponse) -> Option<String> {
    let candidate = response.candidates.as_ref().and_then(|c| c.first());

    let answer = candidate
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .map(|part| part.text.as_str())
                .collect::<String>()
        })
        .filter(|text| !text.trim().is_empty());

    if answer.is_none() {
        let reason = candidate
            .and_then(|c| c.finish_reason.as_deref())
            .unwrap_or("none");
        warn!(finish_reason = reason, "Gemini returned empty answer");
    }

    answer
}
