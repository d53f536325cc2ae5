use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Embedding = Vec<f32>;

/// Nominal embedding length of the upstream sentence model.
pub const DEFAULT_DIMENSION: usize = 384;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Spam,
    Ham,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetricKind {
    Cosine,
}

impl SimilarityMetricKind {
    pub fn name(&self) -> &'static str {
        match self {
            SimilarityMetricKind::Cosine => "cosine",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMetadata {
    pub subject: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(rename = "type", default)]
    pub kind: RecordKind,
}

impl EmailMetadata {
    pub fn new(
        subject: impl Into<String>,
        sender: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            subject: subject.into(),
            sender: sender.into(),
            timestamp,
            classification: None,
            kind: RecordKind::Email,
        }
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    /// The part of `sender` after the last `@`, or `None` when there is no `@`.
    pub fn sender_domain(&self) -> Option<&str> {
        self.sender.rsplit_once('@').map(|(_, domain)| domain)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub content: String,
    pub metadata: EmailMetadata,
    #[serde(default)]
    pub embedding: Embedding,
}

impl VectorRecord {
    pub fn new(id: impl Into<String>, content: impl Into<String>, metadata: EmailMetadata) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata,
            embedding: Vec::new(),
        }
    }

    pub fn with_embedding(mut self, embedding: Embedding) -> Self {
        self.embedding = embedding;
        self
    }

    pub fn has_embedding(&self) -> bool {
        !self.embedding.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub record: VectorRecord,
    pub similarity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    pub dimension: usize,
    pub metric: SimilarityMetricKind,
}

impl IndexConfig {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            metric: SimilarityMetricKind::Cosine,
        }
    }

    pub fn with_metric(mut self, metric: SimilarityMetricKind) -> Self {
        self.metric = metric;
        self
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}
