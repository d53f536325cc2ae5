use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::similarity::SimilarityMetric;
use crate::types::{SearchResult, SimilarityMetricKind, VectorRecord};

use super::VectorIndex;

/// Exact linear-scan index. Records keep their insertion position, including
/// across overwrites, which makes it the tie-break order for equal scores.
pub struct FlatIndex {
    metric: Box<dyn SimilarityMetric>,
    records: IndexMap<String, VectorRecord>,
}

impl FlatIndex {
    pub fn new(metric: Box<dyn SimilarityMetric>) -> Self {
        Self {
            metric,
            records: IndexMap::new(),
        }
    }
}

impl VectorIndex for FlatIndex {
    fn upsert(&mut self, record: VectorRecord) -> bool {
        self.records.insert(record.id.clone(), record).is_none()
    }

    fn get(&self, id: &str) -> Option<&VectorRecord> {
        self.records.get(id)
    }

    fn delete(&mut self, id: &str) -> bool {
        self.records.shift_remove(id).is_some()
    }

    fn clear(&mut self) {
        self.records.clear();
    }

    fn search_where(
        &self,
        query: &[f32],
        top_k: usize,
        threshold: f32,
        keep: &dyn Fn(&VectorRecord) -> bool,
    ) -> Vec<SearchResult> {
        // Cosine never exceeds 1.0, and a NaN threshold admits nothing.
        if top_k == 0 || !(threshold <= 1.0) {
            return Vec::new();
        }

        let mut scored: Vec<(&VectorRecord, f32)> = self
            .records
            .values()
            .filter(|r| r.has_embedding())
            .map(|r| (r, self.metric.similarity(query, &r.embedding)))
            .filter(|(r, score)| *score >= threshold && keep(*r))
            .collect();

        // sort_by is stable, so equal scores stay in insertion order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(top_k);

        scored
            .into_iter()
            .map(|(record, similarity)| SearchResult {
                record: record.clone(),
                similarity,
            })
            .collect()
    }

    fn records(&self) -> Box<dyn Iterator<Item = &VectorRecord> + '_> {
        Box::new(self.records.values())
    }

    fn metric(&self) -> SimilarityMetricKind {
        self.metric.kind()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
