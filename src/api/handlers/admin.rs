use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use log::info;

use super::AppState;

/// Drops the engine's memoized results; the next request recomputes from
/// the snapshot on disk. Called by the ingestion layer after it rewrites
/// the snapshot.
pub async fn admin_refresh(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.engine.invalidate();
    info!("Admin triggered cache invalidation");
    (StatusCode::ACCEPTED, "Cache invalidated").into_response()
}
