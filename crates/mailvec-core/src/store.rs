use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::filter::MetadataFilter;
use crate::index::flat::FlatIndex;
use crate::index::VectorIndex;
use crate::similarity::metric_for_kind;
use crate::stats::{IndexStats, ResultStats};
use crate::types::{IndexConfig, SearchResult, VectorRecord};

/// Ranked results of one query plus the aggregates reported alongside them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub results: Vec<SearchResult>,
    /// Corpus size at the moment the query ran.
    pub total_searched: usize,
    pub threshold: f32,
    #[serde(flatten)]
    pub stats: ResultStats,
}

/// What a batch write applied, with the corpus aggregates taken under the
/// same write lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub applied: usize,
    pub stats: IndexStats,
}

/// The shared, thread-safe similarity index.
///
/// Every operation takes the corpus lock once and runs to completion, so a
/// reader never sees a half-applied batch. Share it behind an `Arc`.
pub struct SimilarityIndex {
    config: IndexConfig,
    index: RwLock<Box<dyn VectorIndex>>,
}

impl SimilarityIndex {
    pub fn new(config: IndexConfig) -> Self {
        let index = Box::new(FlatIndex::new(metric_for_kind(config.metric)));
        Self::with_index(config, index)
    }

    pub fn with_index(config: IndexConfig, index: Box<dyn VectorIndex>) -> Self {
        Self {
            config,
            index: RwLock::new(index),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Inserts or overwrites by id. Returns `true` when the id was new.
    pub fn add(&self, record: VectorRecord) -> bool {
        self.index.write().upsert(record)
    }

    /// Applies [`add`](Self::add) for each record in order under a single lock;
    /// later records win on id collision.
    pub fn add_batch(&self, records: impl IntoIterator<Item = VectorRecord>) -> BatchOutcome {
        let mut index = self.index.write();
        let mut applied = 0;
        for record in records {
            index.upsert(record);
            applied += 1;
        }
        let stats = IndexStats::from_records(index.records());
        tracing::info!(applied, corpus = stats.total_records, "batch added");
        BatchOutcome { applied, stats }
    }

    /// Clears the corpus and loads `records` as one step.
    pub fn replace_all(&self, records: impl IntoIterator<Item = VectorRecord>) -> BatchOutcome {
        let mut index = self.index.write();
        let removed = index.len();
        index.clear();
        let mut applied = 0;
        for record in records {
            index.upsert(record);
            applied += 1;
        }
        let stats = IndexStats::from_records(index.records());
        tracing::info!(removed, applied, "corpus replaced");
        BatchOutcome { applied, stats }
    }

    pub fn get(&self, id: &str) -> Option<VectorRecord> {
        self.index.read().get(id).cloned()
    }

    pub fn delete(&self, id: &str) -> bool {
        self.index.write().delete(id)
    }

    /// Empties the corpus, returning how many records were dropped.
    pub fn clear(&self) -> usize {
        let mut index = self.index.write();
        let removed = index.len();
        index.clear();
        tracing::info!(removed, "corpus cleared");
        removed
    }

    pub fn search(&self, query: &[f32], top_k: usize, threshold: f32) -> Vec<SearchResult> {
        let results = self.index.read().search(query, top_k, threshold);
        tracing::debug!(top_k, threshold, found = results.len(), "search");
        results
    }

    /// Like [`search`](Self::search), but `filter` is applied to the full
    /// ranking before truncation, so up to `top_k` matching records come back
    /// whenever that many exist.
    pub fn search_filtered(
        &self,
        query: &[f32],
        top_k: usize,
        threshold: f32,
        filter: &MetadataFilter,
    ) -> Vec<SearchResult> {
        if filter.is_empty() {
            return self.search(query, top_k, threshold);
        }
        let results = self
            .index
            .read()
            .search_where(query, top_k, threshold, &|r: &VectorRecord| filter.matches(r));
        tracing::debug!(top_k, threshold, found = results.len(), "filtered search");
        results
    }

    /// Runs a (possibly filtered) search and collects the reported aggregates
    /// under the same read lock.
    pub fn search_report(
        &self,
        query: &[f32],
        top_k: usize,
        threshold: f32,
        filter: Option<&MetadataFilter>,
    ) -> SearchReport {
        let index = self.index.read();
        let total_searched = index.len();
        let results = match filter {
            Some(f) if !f.is_empty() => {
                index.search_where(query, top_k, threshold, &|r: &VectorRecord| f.matches(r))
            }
            _ => index.search(query, top_k, threshold),
        };
        drop(index);

        let stats = ResultStats::from_results(&results);
        tracing::debug!(total_searched, found = stats.results_found, "search report");
        SearchReport {
            results,
            total_searched,
            threshold,
            stats,
        }
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats::from_records(self.index.read().records())
    }

    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.read().contains(id)
    }
}

impl Default for SimilarityIndex {
    fn default() -> Self {
        Self::new(IndexConfig::default())
    }
}
