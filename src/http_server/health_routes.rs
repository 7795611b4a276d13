//! Health HTTP Route
//!
//! Reports whether the blog document can be read. A missing or malformed
//! document makes every page fail, so the probe fails with it.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use super::blog_routes::BlogState;
use crate::blog::BlogError;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `ok`, `missing`, `malformed` or `unreadable`
    pub document: &'static str,
    /// Number of entries, when the document could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,
}

impl HealthResponse {
    fn from_load(loaded: Result<usize, BlogError>) -> Self {
        let (document, entries) = match loaded {
            Ok(count) => ("ok", Some(count)),
            Err(BlogError::DocumentMissing(_)) => ("missing", None),
            Err(BlogError::Malformed(_)) => ("malformed", None),
            Err(BlogError::IoError(_)) => ("unreadable", None),
        };
        Self {
            status: if entries.is_some() { "ok" } else { "unavailable" },
            version: env!("CARGO_PKG_VERSION"),
            document,
            entries,
        }
    }

    fn status_code(&self) -> StatusCode {
        if self.entries.is_some() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Health check route
pub fn health_routes(state: Arc<BlogState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<BlogState>>) -> impl IntoResponse {
    let response = HealthResponse::from_load(state.store.load().map(|entries| entries.len()));
    (response.status_code(), Json(response))
}
