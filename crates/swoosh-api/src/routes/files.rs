//! Uploaded logo serving.
//!
//! `GET /uploads/{file}` streams a stored logo back from the local upload
//! directory; unknown or unsafe names are a plain 404.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/uploads/{file}", get(serve_file))
}

async fn serve_file(State(state): State<Arc<AppState>>, Path(file): Path<String>) -> Response {
    match state.logos.read(&file).await {
        Ok(Some((bytes, content_type))) => (
            [
                (header::CONTENT_TYPE, content_type),
                (
                    header::CACHE_CONTROL,
                    "public, max-age=31536000, immutable".to_string(),
                ),
            ],
            Body::from(bytes),
        )
            .into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!(file = %file, error = %e, "Failed to serve uploaded file");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
