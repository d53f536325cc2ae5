//! Input checks for callers sitting above the index.
//!
//! The index itself assumes finite numeric embeddings. Anything that accepts
//! vectors from outside the process should run them through here first.

use crate::error::{IndexError, IndexResult};
use crate::types::VectorRecord;

/// Rejects NaN and infinite components. An empty embedding is allowed: it marks
/// a record whose vector has not been computed yet.
pub fn validate_embedding(embedding: &[f32]) -> IndexResult<()> {
    match embedding.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(IndexError::MalformedEmbedding {
            index,
            value: embedding[index],
        }),
        None => Ok(()),
    }
}

/// A query must carry at least one component.
pub fn validate_query(query: &[f32]) -> IndexResult<()> {
    if query.is_empty() {
        return Err(IndexError::EmptyEmbedding);
    }
    validate_embedding(query)
}

pub fn validate_record(record: &VectorRecord) -> IndexResult<()> {
    if record.id.is_empty() {
        return Err(IndexError::InvalidRecord("id must not be empty".into()));
    }
    validate_embedding(&record.embedding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmailMetadata;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_finite_embedding_ok() {
        assert!(validate_embedding(&[0.1, -2.0, 0.0]).is_ok());
        assert!(validate_embedding(&[]).is_ok());
    }

    #[test]
    fn test_nan_rejected_with_position() {
        let err = validate_embedding(&[0.1, f32::NAN, 0.3]).unwrap_err();
        assert!(matches!(err, IndexError::MalformedEmbedding { index: 1, .. }));
    }

    #[test]
    fn test_infinity_rejected() {
        let err = validate_embedding(&[f32::INFINITY]).unwrap_err();
        assert!(matches!(
            err,
            IndexError::MalformedEmbedding { index: 0, value } if value.is_infinite()
        ));
    }

    #[test]
    fn test_empty_query_rejected() {
        assert!(matches!(validate_query(&[]), Err(IndexError::EmptyEmbedding)));
        assert!(validate_query(&[1.0]).is_ok());
    }

    #[test]
    fn test_record_checks() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let meta = EmailMetadata::new("s", "a@b.com", ts);

        assert!(validate_record(&VectorRecord::new("ok", "", meta.clone())).is_ok());
        assert!(matches!(
            validate_record(&VectorRecord::new("", "", meta.clone())),
            Err(IndexError::InvalidRecord(_))
        ));

        let bad = VectorRecord::new("bad", "", meta).with_embedding(vec![f32::NEG_INFINITY]);
        assert!(matches!(validate_record(&bad), Err(IndexError::MalformedEmbedding { .. })));
    }
}
