pub mod flat;

use crate::types::{SearchResult, SimilarityMetricKind, VectorRecord};

/// Storage and ranking primitive behind [`crate::store::SimilarityIndex`].
///
/// Implementations are plain single-threaded structures; locking is the
/// caller's concern.
pub trait VectorIndex: Send + Sync {
    /// Inserts or replaces the record under its id. Returns `true` when the id was new.
    fn upsert(&mut self, record: VectorRecord) -> bool;

    fn get(&self, id: &str) -> Option<&VectorRecord>;

    fn delete(&mut self, id: &str) -> bool;

    fn clear(&mut self);

    /// Ranks records passing `keep` by similarity to `query`, keeping those at or
    /// above `threshold`, best first, at most `top_k` of them.
    fn search_where(
        &self,
        query: &[f32],
        top_k: usize,
        threshold: f32,
        keep: &dyn Fn(&VectorRecord) -> bool,
    ) -> Vec<SearchResult>;

    fn search(&self, query: &[f32], top_k: usize, threshold: f32) -> Vec<SearchResult> {
        self.search_where(query, top_k, threshold, &|_: &VectorRecord| true)
    }

    /// Records in insertion order.
    fn records(&self) -> Box<dyn Iterator<Item = &VectorRecord> + '_>;

    fn metric(&self) -> SimilarityMetricKind;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}
