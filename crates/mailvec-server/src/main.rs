mod config;
mod routes;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use mailvec_core::store::SimilarityIndex;
use mailvec_core::types::IndexConfig;

use routes::AppState;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = config::Config::parse();
    let index = Arc::new(SimilarityIndex::new(IndexConfig::new(cfg.dimension)));
    let state = AppState {
        index,
        default_limit: cfg.default_limit,
        default_threshold: cfg.default_threshold,
    };

    let app = build_router(state);

    let addr = cfg.addr();
    tracing::info!("mailvec server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ingest", post(routes::ingest))
        .route("/query", post(routes::query))
        .route("/inspect", get(routes::inspect))
        .route("/records", delete(routes::clear_records))
        .route(
            "/records/{id}",
            get(routes::get_record).delete(routes::delete_record),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
