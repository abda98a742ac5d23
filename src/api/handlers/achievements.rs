use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::AchievementInfo;

use super::{load_snapshot, AppState};

pub async fn get_achievements(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let result_set = match load_snapshot(&state) {
        Ok(set) => set,
        Err(response) => return response,
    };
    let awards = state.engine.compute_achievements(&result_set);

    let infos: Vec<AchievementInfo> = state
        .engine
        .catalogue()
        .iter()
        .map(|def| AchievementInfo {
            id: def.id.to_string(),
            title: def.title.to_string(),
            description: def.description.to_string(),
            category: def.category,
            rarity: def.rarity,
            base_points: def.base_points,
            points: def.points(),
            holders: awards.values().filter(|ids| ids.contains(def.id)).count(),
        })
        .collect();

    Json(infos).into_response()
}

pub async fn get_achievement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(def) = state.engine.lookup_achievement(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let holders = match load_snapshot(&state) {
        Ok(result_set) => {
            let awards = state.engine.compute_achievements(&result_set);
            awards.values().filter(|ids| ids.contains(def.id)).count()
        }
        Err(_) => 0,
    };

    Json(AchievementInfo {
        id: def.id.to_string(),
        title: def.title.to_string(),
        description: def.description.to_string(),
        category: def.category,
        rarity: def.rarity,
        base_points: def.base_points,
        points: def.points(),
        holders,
    })
    .into_response()
}
