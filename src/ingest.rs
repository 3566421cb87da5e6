//! Offline preparation of the knowledge base: embed the raw export, then build
//! the vector index from the embedded documents. Both steps rewrite their
//! output file completely so the index and documents always come from the
//! same run.

use std::path::Path;

use tracing::{debug, info};

use crate::gemini::client::with_retry;
use crate::gemini::{Embedder, GeminiError};
use crate::knowledge::{
    Document, KnowledgeError, KnowledgeRecord, build_index, read_json, write_json,
};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),

    #[error("failed to embed {id}: {source}")]
    Embedding {
        id: String,
        #[source]
        source: GeminiError,
    },
}

/// Embeds records one at a time, keeping their order. The first failure
/// aborts the run; transient provider errors are retried.
pub async fn embed_records(
    embedder: &impl Embedder,
    records: Vec<KnowledgeRecord>,
) -> Result<Vec<Document>, IngestError> {
    let total = records.len();
    let mut documents = Vec::with_capacity(total);
    for (i, record) in records.into_iter().enumerate() {
        let embedding = with_retry(|| embedder.embed(&record.content))
            .await
            .map_err(|source| IngestError::Embedding {
                id: record.id.clone(),
                source,
            })?;
        debug!(id = %record.id, progress = i + 1, total, "embedded");
        documents.push(Document {
            id: record.id,
            category: record.category,
            content: record.content,
            embedding,
        });
    }
    Ok(documents)
}

/// `[KnowledgeRecord]` JSON in, `[Document]` JSON out. Returns the number of
/// documents written.
pub async fn embed_file(
    embedder: &impl Embedder,
    input: &Path,
    output: &Path,
) -> Result<usize, IngestError> {
    let records: Vec<KnowledgeRecord> = read_json(input)?;
    let documents = embed_records(embedder, records).await?;
    write_json(output, &documents)?;
    info!(
        documents = documents.len(),
        output = %output.display(),
        "embeddings written"
    );
    Ok(documents.len())
}

/// `[Document]` JSON in, index JSON out. Returns the number of rows written.
pub fn index_file(input: &Path, output: &Path) -> Result<usize, IngestError> {
    let documents: Vec<Document> = read_json(input)?;
    let index = build_index(&documents)?;
    write_json(output, &index)?;
    info!(
        rows = index.len(),
        dimension = index.dimension(),
        output = %output.display(),
        "index written"
    );
    Ok(index.len())
}
