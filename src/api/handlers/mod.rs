use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::config::settings::AppConfig;
use crate::domain::ResultSet;
use crate::engine::Engine;
use crate::store::SnapshotStore;

pub mod achievements;
pub mod admin;
pub mod participants;

pub struct AppState {
    pub engine: Engine,
    pub store: SnapshotStore,
    pub config: AppConfig,
}

/// Snapshot per request; the engine's fingerprint cache makes repeat loads
/// cheap to derive from.
pub fn load_snapshot(state: &AppState) -> Result<ResultSet, Response> {
    state.store.load().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Snapshot error: {e}"),
        )
            .into_response()
    })
}
