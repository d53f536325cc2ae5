use super::SimilarityMetric;
use crate::types::SimilarityMetricKind;

pub struct CosineSimilarity;

impl SimilarityMetric for CosineSimilarity {
    fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        // f64 accumulation: squaring finite f32 components can overflow or
        // underflow in f32.
        let mut dot = 0.0f64;
        let mut norm_a = 0.0f64;
        let mut norm_b = 0.0f64;

        for (&x, &y) in a.iter().zip(b) {
            let (x, y) = (f64::from(x), f64::from(y));
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }

        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom == 0.0 {
            return 0.0;
        }
        // rounding can push parallel vectors a hair past 1.0
        (dot / denom).clamp(-1.0, 1.0) as f32
    }

    fn kind(&self) -> SimilarityMetricKind {
        SimilarityMetricKind::Cosine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_identical_vectors() {
        let m = CosineSimilarity;
        assert!((m.similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < EPS);
        assert!((m.similarity(&[3.0, 4.0], &[3.0, 4.0]) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_orthogonal_vectors() {
        let m = CosineSimilarity;
        assert!(m.similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < EPS);
    }

    #[test]
    fn test_opposite_vectors() {
        let m = CosineSimilarity;
        assert!((m.similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < EPS);
    }

    #[test]
    fn test_zero_vector() {
        let m = CosineSimilarity;
        assert_eq!(m.similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(m.similarity(&[1.0, 0.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_length_mismatch_is_zero() {
        let m = CosineSimilarity;
        assert_eq!(m.similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0, 0.0]), 0.0);
        assert_eq!(m.similarity(&[], &[1.0]), 0.0);
    }

    #[test]
    fn test_empty_vectors() {
        let m = CosineSimilarity;
        assert_eq!(m.similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_known_value() {
        let m = CosineSimilarity;
        // a=[1,2,3], b=[4,5,6]: 32 / sqrt(14 * 77)
        let expected = 32.0 / (14.0f32.sqrt() * 77.0f32.sqrt());
        assert!((m.similarity(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]) - expected).abs() < EPS);
    }

    #[test]
    fn test_scaling_invariance() {
        let m = CosineSimilarity;
        let s1 = m.similarity(&[1.0, 2.0], &[3.0, 4.0]);
        let s2 = m.similarity(&[2.0, 4.0], &[6.0, 8.0]);
        assert!((s1 - s2).abs() < EPS);
    }

    #[test]
    fn test_extreme_magnitudes() {
        let m = CosineSimilarity;
        let large = [1e20f32, 0.0];
        assert!((m.similarity(&large, &large) - 1.0).abs() < EPS);

        let tiny = [1e-25f32, 0.0];
        assert!((m.similarity(&tiny, &tiny) - 1.0).abs() < EPS);

        let mixed = m.similarity(&[1e20, 1e20], &[1e-25, 0.0]);
        assert!((mixed - std::f32::consts::FRAC_1_SQRT_2).abs() < EPS);
    }

    #[test]
    fn test_never_exceeds_unit_range() {
        let m = CosineSimilarity;
        let v = [0.1f32; 384];
        let s = m.similarity(&v, &v);
        assert!(s <= 1.0 && s > 1.0 - EPS);
    }
}
