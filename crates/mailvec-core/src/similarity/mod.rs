mod cosine;

pub use cosine::CosineSimilarity;

use crate::types::SimilarityMetricKind;

/// All metrics return a *similarity* (higher = more similar).
/// Pairs that cannot be compared (different lengths, zero magnitude) score 0.
pub trait SimilarityMetric: Send + Sync {
    fn similarity(&self, a: &[f32], b: &[f32]) -> f32;

    fn kind(&self) -> SimilarityMetricKind;
}

pub fn metric_for_kind(kind: SimilarityMetricKind) -> Box<dyn SimilarityMetric> {
    match kind {
        SimilarityMetricKind::Cosine => Box::new(CosineSimilarity),
    }
}
