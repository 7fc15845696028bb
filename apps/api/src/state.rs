use std::sync::Arc;

use sqlx::SqlitePool;

use crate::analysis::analyzer::Analyzer;
use crate::config::Config;
use crate::extraction::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub analyzer: Analyzer,
    /// Pluggable document-to-text backend. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    pub config: Config,
}
