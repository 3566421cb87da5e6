//! Static knowledge base: documents, their vector index, and the files both
//! are persisted in.

mod index;

pub use index::{FlatL2Index, Hit, IndexRow};
#[cfg(test)]
pub(crate) use index::l2_distance;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Raw knowledge-base export row, before embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    pub id: String,
    pub category: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub category: String,
    pub content: String,
    pub embedding: Vec<f32>,
}

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no documents to index")]
    Empty,

    #[error("document {id} has {found} dimensions, expected {expected}")]
    Dimension {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("document id {0} appears more than once")]
    DuplicateId(String),

    #[error("index has {rows} rows but there are {documents} documents; rebuild the index")]
    SizeMismatch { rows: usize, documents: usize },

    #[error(
        "index row {position} belongs to {index_id} but document {position} is {document_id}; rebuild the index"
    )]
    Drift {
        position: usize,
        index_id: String,
        document_id: String,
    },

    #[error(
        "index row {position} ({id}) holds a different vector than its document; rebuild the index"
    )]
    StaleVector { position: usize, id: String },
}

/// Builds the index rows in document order. Every document must share the
/// first document's dimension, and ids must be unique since they are what
/// ties a row to its document.
pub fn build_index(documents: &[Document]) -> Result<FlatL2Index, KnowledgeError> {
    let dimension = documents
        .first()
        .map(|d| d.embedding.len())
        .ok_or(KnowledgeError::Empty)?;

    let mut seen = HashSet::new();
    let rows = documents
        .iter()
        .map(|d| {
            check_dimension(&d.id, dimension, d.embedding.len())?;
            if !seen.insert(d.id.as_str()) {
                return Err(KnowledgeError::DuplicateId(d.id.clone()));
            }
            Ok(IndexRow {
                id: d.id.clone(),
                vector: d.embedding.clone(),
            })
        })
        .collect::<Result<Vec<_>, KnowledgeError>>()?;

    Ok(FlatL2Index::from_rows(dimension, rows))
}

fn check_dimension(id: &str, expected: usize, found: usize) -> Result<(), KnowledgeError> {
    if expected == 0 || found != expected {
        return Err(KnowledgeError::Dimension {
            id: id.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

/// Documents plus the index built from them, with row `i` verified to belong
/// to document `i`. Immutable once constructed.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    index: FlatL2Index,
    documents: Vec<Document>,
}

impl KnowledgeBase {
    #[cfg(test)]
    pub(crate) fn from_documents(documents: Vec<Document>) -> Result<Self, KnowledgeError> {
        if documents.is_empty() {
            return Ok(Self::default());
        }
        let index = build_index(&documents)?;
        Self::new(index, documents)
    }

    /// Pairs a previously built index with its documents, rejecting any
    /// pairing where row order or row vectors no longer match the documents.
    pub fn new(index: FlatL2Index, documents: Vec<Document>) -> Result<Self, KnowledgeError> {
        if index.len() != documents.len() {
            return Err(KnowledgeError::SizeMismatch {
                rows: index.len(),
                documents: documents.len(),
            });
        }
        for (position, (row, document)) in index.rows().iter().zip(&documents).enumerate() {
            if row.id != document.id {
                return Err(KnowledgeError::Drift {
                    position,
                    index_id: row.id.clone(),
                    document_id: document.id.clone(),
                });
            }
            check_dimension(&row.id, index.dimension(), row.vector.len())?;
            if row.vector != document.embedding {
                return Err(KnowledgeError::StaleVector {
                    position,
                    id: row.id.clone(),
                });
            }
        }
        Ok(Self { index, documents })
    }

    pub fn load(index_path: &Path, documents_path: &Path) -> Result<Self, KnowledgeError> {
        let index: FlatL2Index = read_json(index_path)?;
        let documents: Vec<Document> = read_json(documents_path)?;
        let kb = Self::new(index, documents)?;
        info!(
            documents = kb.len(),
            dimension = kb.dimension(),
            "knowledge base loaded"
        );
        Ok(kb)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    pub fn search(&self, query: &[f32], k: usize) -> Vec<Hit> {
        self.index.search(query, k)
    }

    pub fn document(&self, position: usize) -> Option<&Document> {
        self.documents.get(position)
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, KnowledgeError> {
    let text = fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| KnowledgeError::Json {
        path: path.display().to_string(),
        source,
    })
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), KnowledgeError> {
    let text = serde_json::to_string_pretty(value).map_err(|source| KnowledgeError::Json {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, text).map_err(|source| KnowledgeError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn doc(id: &str, content: &str, embedding: &[f32]) -> Document {
    Document {
        id: id.to_string(),
        category: "general".to_string(),
        content: content.to_string(),
        embedding: embedding.to_vec(),
    }
}
