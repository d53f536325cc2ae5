use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mailvec_core::filter::MetadataFilter;
use mailvec_core::store::SimilarityIndex;
use mailvec_core::types::{Classification, EmailMetadata, VectorRecord};
use mailvec_core::validate::{validate_query, validate_record};
use mailvec_core::IndexError;

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<SimilarityIndex>,
    pub default_limit: usize,
    pub default_threshold: f32,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn err_response(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: msg.into() })).into_response()
}

fn index_error_response(e: IndexError) -> Response {
    let status = match &e {
        IndexError::RecordNotFound(_) => StatusCode::NOT_FOUND,
        IndexError::EmptyEmbedding
        | IndexError::MalformedEmbedding { .. }
        | IndexError::InvalidRecord(_)
        | IndexError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
    };
    tracing::debug!(error = %e, %status, "request rejected");
    err_response(status, e.to_string())
}

// --- Ingest ---

#[derive(Deserialize)]
pub struct IngestDocument {
    id: String,
    subject: String,
    sender: String,
    content: String,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    classification: Option<Classification>,
    #[serde(default)]
    embedding: Option<Vec<f32>>,
}

impl From<IngestDocument> for VectorRecord {
    fn from(doc: IngestDocument) -> Self {
        let mut metadata = EmailMetadata::new(doc.subject, doc.sender, doc.timestamp);
        metadata.classification = doc.classification;
        VectorRecord::new(doc.id, doc.content, metadata)
            .with_embedding(doc.embedding.unwrap_or_default())
    }
}

#[derive(Deserialize)]
pub struct IngestRequest {
    documents: Vec<IngestDocument>,
    #[serde(default)]
    clear_existing: bool,
}

pub async fn ingest(State(state): State<AppState>, Json(req): Json<IngestRequest>) -> Response {
    let records: Vec<VectorRecord> = req.documents.into_iter().map(VectorRecord::from).collect();
    // Validate everything up front so a bad document leaves the corpus untouched.
    if let Err(e) = records.iter().try_for_each(validate_record) {
        return index_error_response(e);
    }

    let outcome = if req.clear_existing {
        state.index.replace_all(records)
    } else {
        state.index.add_batch(records)
    };

    Json(serde_json::json!({
        "ingested": outcome.applied,
        "stats": outcome.stats,
    }))
    .into_response()
}

// --- Query ---

#[derive(Deserialize)]
pub struct QueryRequest {
    embedding: Vec<f32>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    threshold: Option<f32>,
    #[serde(default)]
    filter: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct QueryResultItem {
    id: String,
    content: String,
    metadata: EmailMetadata,
    similarity: f32,
}

pub async fn query(State(state): State<AppState>, Json(req): Json<QueryRequest>) -> Response {
    if let Err(e) = validate_query(&req.embedding) {
        return index_error_response(e);
    }
    let filter = match req.filter.as_ref().map(MetadataFilter::parse).transpose() {
        Ok(f) => f,
        Err(e) => return index_error_response(e),
    };

    let limit = req.limit.unwrap_or(state.default_limit);
    let threshold = req.threshold.unwrap_or(state.default_threshold);
    let report = state
        .index
        .search_report(&req.embedding, limit, threshold, filter.as_ref());

    let items: Vec<QueryResultItem> = report
        .results
        .into_iter()
        .map(|r| QueryResultItem {
            id: r.record.id,
            content: r.record.content,
            metadata: r.record.metadata,
            similarity: r.similarity,
        })
        .collect();

    Json(serde_json::json!({
        "results": items,
        "stats": {
            "total_searched": report.total_searched,
            "results_found": report.stats.results_found,
            "max_similarity": report.stats.max_similarity,
            "min_similarity": report.stats.min_similarity,
            "threshold": report.threshold,
        },
    }))
    .into_response()
}

// --- Inspect / retrieve ---

pub async fn inspect(State(state): State<AppState>) -> Response {
    let config = state.index.config();
    Json(serde_json::json!({
        "stats": state.index.stats(),
        "capabilities": {
            "dimension": config.dimension,
            "metric": config.metric.name(),
            "index": "flat",
            "exact": true,
            "persistence": "none",
        },
    }))
    .into_response()
}

pub async fn get_record(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.index.get(&id) {
        Some(record) => Json(serde_json::json!({
            "id": record.id,
            "content": record.content,
            "metadata": record.metadata,
            "vector_dimensions": record.embedding.len(),
        }))
        .into_response(),
        None => index_error_response(IndexError::RecordNotFound(id)),
    }
}

// --- Purge ---

pub async fn delete_record(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    if !state.index.delete(&id) {
        return index_error_response(IndexError::RecordNotFound(id));
    }
    Json(serde_json::json!({
        "deleted": id,
        "stats": state.index.stats(),
    }))
    .into_response()
}

pub async fn clear_records(State(state): State<AppState>) -> Response {
    let cleared = state.index.clear();
    Json(serde_json::json!({
        "cleared": cleared,
        "stats": state.index.stats(),
    }))
    .into_response()
}
