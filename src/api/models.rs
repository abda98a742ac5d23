use serde::Serialize;

use crate::achievements::{Category, Rarity};
use crate::stats::{MedalTableRow, ParticipantStats};
use crate::trend::TrendSummary;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsResponse {
    pub rows: Vec<StandingsRow>,
    pub scored_competitions: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub position: usize,
    #[serde(flatten)]
    pub medals: MedalTableRow,
    pub achievement_points: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantListItem {
    pub participant_id: i64,
    pub display_name: String,
    pub nickname: String,
    pub status: crate::domain::ParticipantStatus,
    pub participations: u32,
    pub wins: u32,
    pub achievement_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDetail {
    pub participant_id: i64,
    pub display_name: String,
    pub nickname: String,
    pub status: crate::domain::ParticipantStatus,
    pub stats: ParticipantStats,
    pub trend: Option<TrendSummary>,
    pub achievements: Vec<AwardedAchievement>,
    pub achievement_points: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardedAchievement {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub rarity: Rarity,
    pub points: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub rarity: Rarity,
    pub base_points: u32,
    pub points: u32,
    /// How many participants currently hold it.
    pub holders: usize,
}
