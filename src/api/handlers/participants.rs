use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{
    AwardedAchievement, ParticipantDetail, ParticipantListItem, StandingsResponse, StandingsRow,
};
use crate::domain::ParticipantId;
use crate::stats;
use crate::trend;

use super::{load_snapshot, AppState};

pub async fn get_standings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let result_set = match load_snapshot(&state) {
        Ok(set) => set,
        Err(response) => return response,
    };

    let all_stats = state.engine.compute_all_stats(&result_set);
    let awards = state.engine.compute_achievements(&result_set);

    let rows = stats::medal_table(&result_set, &all_stats)
        .into_iter()
        .enumerate()
        .map(|(i, medals)| {
            let points = awards
                .get(&medals.participant_id)
                .map(|ids| state.engine.achievement_points(ids))
                .unwrap_or(0);
            StandingsRow {
                position: i + 1,
                medals,
                achievement_points: points,
            }
        })
        .collect();

    Json(StandingsResponse {
        rows,
        scored_competitions: result_set.scored_competitions().count(),
    })
    .into_response()
}

pub async fn get_participants(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let result_set = match load_snapshot(&state) {
        Ok(set) => set,
        Err(response) => return response,
    };

    let all_stats = state.engine.compute_all_stats(&result_set);
    let awards = state.engine.compute_achievements(&result_set);

    let items: Vec<ParticipantListItem> = result_set
        .participants()
        .iter()
        .map(|p| {
            let stats = all_stats.get(&p.id);
            ParticipantListItem {
                participant_id: p.id,
                display_name: p.display_name.clone(),
                nickname: p.nickname().to_string(),
                status: p.status,
                participations: stats.map_or(0, |s| s.participations),
                wins: stats.map_or(0, |s| s.wins),
                achievement_count: awards.get(&p.id).map_or(0, |ids| ids.len()),
            }
        })
        .collect();

    Json(items).into_response()
}

pub async fn get_participant_detail(
    State(state): State<Arc<AppState>>,
    Path(participant_id): Path<ParticipantId>,
) -> impl IntoResponse {
    let result_set = match load_snapshot(&state) {
        Ok(set) => set,
        Err(response) => return response,
    };

    let Some(participant) = result_set.participant(participant_id).cloned() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let all_stats = state.engine.compute_all_stats(&result_set);
    let awards = state.engine.compute_achievements(&result_set);
    let Some(participant_stats) = all_stats.get(&participant_id).cloned() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let years = result_set.scored_years();
    let trend = (!participant_stats.sequence.is_empty())
        .then(|| trend::compute_trend(&participant_stats, &years));

    let ids = awards.get(&participant_id).cloned().unwrap_or_default();
    let achievements: Vec<AwardedAchievement> = ids
        .iter()
        .filter_map(|id| state.engine.lookup_achievement(id))
        .map(|def| AwardedAchievement {
            id: def.id.to_string(),
            title: def.title.to_string(),
            category: def.category,
            rarity: def.rarity,
            points: def.points(),
        })
        .collect();

    Json(ParticipantDetail {
        participant_id,
        display_name: participant.display_name.clone(),
        nickname: participant.nickname().to_string(),
        status: participant.status,
        stats: participant_stats,
        trend,
        achievement_points: state.engine.achievement_points(&ids),
        achievements,
    })
    .into_response()
}
