use tracing::debug;

use crate::gemini::{Embedder, GeminiError};
use crate::knowledge::KnowledgeBase;

pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] GeminiError),

    #[error("query embedding has {found} dimensions but the index holds {expected}")]
    Dimension { expected: usize, found: usize },
}

/// Embeds a query and returns the contents of the nearest documents.
pub struct Retriever<'kb, E> {
    embedder: E,
    knowledge: &'kb KnowledgeBase,
}

impl<'kb, E: Embedder> Retriever<'kb, E> {
    pub fn new(embedder: E, knowledge: &'kb KnowledgeBase) -> Self {
        Self {
            embedder,
            knowledge,
        }
    }

    /// Up to `k` document contents, nearest first. `k` is clamped to
    /// `1..=index size`; an empty index yields an empty result.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>, RetrievalError> {
        if self.knowledge.is_empty() {
            debug!("knowledge base is empty, skipping retrieval");
            return Ok(Vec::new());
        }
        let k = k.clamp(1, self.knowledge.len());

        let vector = self.embedder.embed(query).await?;
        let expected = self.knowledge.dimension();
        if vector.len() != expected {
            return Err(RetrievalError::Dimension {
                expected,
                found: vector.len(),
            });
        }

        let hits = self.knowledge.search(&vector, k);
        debug!(
            k,
            hits = hits.len(),
            nearest = hits.first().map(|h| h.distance),
            "vector search complete"
        );

        Ok(hits
            .iter()
            .filter_map(|hit| self.knowledge.document(hit.position))
            .map(|d| d.content.clone())
            .collect())
    }
}
