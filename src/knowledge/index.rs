use serde::{Deserialize, Serialize};

/// One stored vector, tagged with the id of the document it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRow {
    pub id: String,
    pub vector: Vec<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub position: usize,
    pub distance: f32,
}

/// Exact nearest-neighbour index under Euclidean distance.
///
/// Row order is part of the contract: a hit's `position` is the row number,
/// which `KnowledgeBase` maps back to the document at the same position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatL2Index {
    dimension: usize,
    rows: Vec<IndexRow>,
}

impl FlatL2Index {
    /// Callers guarantee every vector has length `dimension`.
    pub(super) fn from_rows(dimension: usize, rows: Vec<IndexRow>) -> Self {
        Self { dimension, rows }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[IndexRow] {
        &self.rows
    }

    /// The `k` closest rows, nearest first. Equal distances keep row order.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<Hit> {
        let mut hits: Vec<Hit> = self
            .rows
            .iter()
            .enumerate()
            .map(|(position, row)| Hit {
                position,
                distance: l2_distance(query, &row.vector),
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(k);
        hits
    }
}

pub fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}
