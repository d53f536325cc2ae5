use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{IndexError, IndexResult};
use crate::types::{Classification, SearchResult, VectorRecord};

/// Structured post-filter over ranked results.
///
/// Every populated field must match (logical AND); `None` fields impose no
/// constraint. The timestamp range is inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    /// Case-insensitive substring of the sender's domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_domain: Option<String>,
    #[serde(default, alias = "from", skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default, alias = "to", skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
}

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a filter from the JSON object a caller sends.
    /// Format: {"classification": "spam", "sender_domain": "example",
    ///          "date_from": "...", "date_to": "..."}
    pub fn parse(value: &Value) -> IndexResult<Self> {
        if !value.is_object() {
            return Err(IndexError::InvalidFilter("filter must be a JSON object".into()));
        }
        let filter: MetadataFilter = serde_json::from_value(value.clone())
            .map_err(|e| IndexError::InvalidFilter(e.to_string()))?;
        filter.validate()?;
        Ok(filter)
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn with_sender_domain(mut self, domain: impl Into<String>) -> Self {
        self.sender_domain = Some(domain.into());
        self
    }

    pub fn with_date_from(mut self, from: DateTime<Utc>) -> Self {
        self.date_from = Some(from);
        self
    }

    pub fn with_date_to(mut self, to: DateTime<Utc>) -> Self {
        self.date_to = Some(to);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.classification.is_none()
            && self.sender_domain.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Rejects an inverted date range, which could never match anything.
    pub fn validate(&self) -> IndexResult<()> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(IndexError::InvalidFilter(format!(
                    "date_from {} is after date_to {}",
                    from.to_rfc3339(),
                    to.to_rfc3339()
                )));
            }
        }
        Ok(())
    }

    /// Evaluate the filter against a single record.
    pub fn matches(&self, record: &VectorRecord) -> bool {
        let meta = &record.metadata;

        if let Some(wanted) = self.classification {
            if meta.classification != Some(wanted) {
                return false;
            }
        }

        if let Some(needle) = &self.sender_domain {
            // No '@' means no domain, which matches nothing.
            let Some(domain) = meta.sender_domain() else {
                return false;
            };
            if !domain.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }

        if self.date_from.is_some_and(|from| meta.timestamp < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| meta.timestamp > to) {
            return false;
        }

        true
    }

    /// Keeps the results whose record matches, in their original order.
    pub fn apply(&self, results: Vec<SearchResult>) -> Vec<SearchResult> {
        if self.is_empty() {
            return results;
        }
        let before = results.len();
        let kept: Vec<SearchResult> = results
            .into_iter()
            .filter(|r| self.matches(&r.record))
            .collect();
        tracing::debug!(before, after = kept.len(), "applied metadata filter");
        kept
    }
}
