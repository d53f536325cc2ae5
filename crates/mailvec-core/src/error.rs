use thiserror::Error;

/// Errors raised at the validation boundary above the index.
///
/// Index operations never fail on absent ids, empty corpora or mismatched
/// dimensions; those are reported through return values instead.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("record '{0}' not found")]
    RecordNotFound(String),

    #[error("empty embedding provided")]
    EmptyEmbedding,

    #[error("malformed embedding: component {index} is {value}")]
    MalformedEmbedding { index: usize, value: f32 },

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}

pub type IndexResult<T> = Result<T, IndexError>;
