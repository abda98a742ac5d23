use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    achievements::{get_achievement, get_achievements},
    admin::admin_refresh,
    participants::{get_participant_detail, get_participants, get_standings},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/standings", get(get_standings))
        .route("/api/participants", get(get_participants))
        .route("/api/participant/:id", get(get_participant_detail))
        .route("/api/achievements", get(get_achievements))
        .route("/api/achievement/:id", get(get_achievement))
        .route("/api/admin/refresh", post(admin_refresh))
        .with_state(state)
}
