use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{ParticipantId, Rank};

/// One entry of a participant's chronological result sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRank {
    pub year: i32,
    pub rank: Rank,
}

/// Everything derivable from a single participant's history. Recomputed on
/// every pass, never persisted by the engine itself.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStats {
    pub participant_id: ParticipantId,
    pub participations: u32,
    /// Chronological (year, rank), one entry per participated competition.
    pub sequence: Vec<YearRank>,
    /// Best rank per participated year.
    pub ranks_by_year: BTreeMap<i32, Rank>,
    pub wins: u32,
    pub podiums: u32,
    pub top_five: u32,
    pub best_rank: Option<Rank>,
    pub worst_rank: Option<Rank>,
    /// 0.0 when the sequence is empty; callers treat that as "no data".
    pub mean_rank: f64,
    /// Population standard deviation (divide by N).
    pub std_dev: f64,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub arrangements: u32,
    pub win_years: Vec<i32>,
    pub podium_years: Vec<i32>,
    pub participation_rate: f64,
}

impl ParticipantStats {
    pub fn total_medals(&self) -> u32 {
        self.gold + self.silver + self.bronze
    }
}

/// Per-competition aggregate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionStats {
    pub competition_id: i64,
    pub year: i32,
    pub scored_participants: u32,
    /// Share of the roster that showed up; 0.0 for a cancelled year.
    pub competitiveness: f64,
}

/// One row of the aggregate medal table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedalTableRow {
    pub participant_id: ParticipantId,
    pub display_name: String,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}
