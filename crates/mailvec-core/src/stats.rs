use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{SearchResult, VectorRecord};

/// Corpus-wide aggregates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_records: usize,
    /// Records carrying a non-empty embedding, i.e. those search can return.
    pub embedded_records: usize,
    /// Distinct embedding lengths present, ascending. More than one entry means
    /// the corpus mixes embedding versions.
    pub dimensions: Vec<usize>,
}

impl IndexStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a VectorRecord>) -> Self {
        let mut total_records = 0;
        let mut embedded_records = 0;
        let mut dimensions = BTreeSet::new();

        for record in records {
            total_records += 1;
            if record.has_embedding() {
                embedded_records += 1;
                dimensions.insert(record.embedding.len());
            }
        }

        Self {
            total_records,
            embedded_records,
            dimensions: dimensions.into_iter().collect(),
        }
    }
}

/// Aggregates over one ranked result set.
///
/// `max_similarity`/`min_similarity` are absent for an empty set so that "no
/// results" is never confused with "a result scored 0".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultStats {
    pub results_found: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_similarity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_similarity: Option<f32>,
}

impl ResultStats {
    pub fn from_results(results: &[SearchResult]) -> Self {
        let mut stats = Self {
            results_found: results.len(),
            ..Self::default()
        };
        for r in results {
            let s = r.similarity;
            stats.max_similarity = Some(stats.max_similarity.map_or(s, |m| m.max(s)));
            stats.min_similarity = Some(stats.min_similarity.map_or(s, |m| m.min(s)));
        }
        stats
    }
}
