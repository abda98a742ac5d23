use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

pub type ParticipantId = i64;

/// Finishing position in one competition; 1 = first place.
pub type Rank = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    #[default]
    Active,
    Inactive,
    Retired,
}

/// Roster member. Ids are caller-supplied and stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    #[serde(default)]
    pub status: ParticipantStatus,
}

impl Participant {
    /// Short display string: first word of the display name.
    pub fn nickname(&self) -> &str {
        self.display_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.display_name)
    }

    /// Surname token: last word of the display name.
    pub fn surname(&self) -> Option<&str> {
        self.display_name.split_whitespace().last()
    }
}

/// One year's competition. A competition with an empty score map is a
/// cancelled year: it occupies a calendar slot but carries no results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competition {
    pub id: i64,
    #[serde(deserialize_with = "deserialize_year")]
    pub year: i32,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub scores: BTreeMap<ParticipantId, Rank>,
    #[serde(default)]
    pub arranger_third: Option<ParticipantId>,
    #[serde(default)]
    pub arranger_second_last: Option<ParticipantId>,
}

/// Ingestion layers sometimes hand over a full date where a year is meant;
/// date-valued years are truncated to the year component.
fn deserialize_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YearRepr {
        Year(i32),
        Date(String),
    }

    match YearRepr::deserialize(deserializer)? {
        YearRepr::Year(year) => Ok(year),
        YearRepr::Date(text) => parse_date_year(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("unparseable year: {text}"))),
    }
}

fn parse_date_year(text: &str) -> Option<i32> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(dt.year());
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.year());
    }
    text.parse::<i32>().ok()
}

impl Competition {
    pub fn is_scored(&self) -> bool {
        !self.scores.is_empty()
    }

    pub fn rank_of(&self, id: ParticipantId) -> Option<Rank> {
        self.scores.get(&id).copied()
    }

    /// Worst recorded rank, i.e. what "last place" means in this
    /// competition. None for a cancelled year.
    pub fn last_place_rank(&self) -> Option<Rank> {
        self.scores.values().copied().max()
    }

    pub fn arranged_by(&self, id: ParticipantId) -> bool {
        self.arranger_third == Some(id) || self.arranger_second_last == Some(id)
    }
}

/// Immutable snapshot of everything the engine computes from.
///
/// Competitions are kept sorted by (year, id); participants keep their
/// roster order, which is the stable iteration order used by every
/// deterministic tie-break downstream.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSet {
    participants: Vec<Participant>,
    competitions: Vec<Competition>,
}

impl ResultSet {
    pub fn new(participants: Vec<Participant>, mut competitions: Vec<Competition>) -> Self {
        competitions.sort_by_key(|c| (c.year, c.id));
        Self {
            participants,
            competitions,
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn competitions(&self) -> &[Competition] {
        &self.competitions
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn scored_competitions(&self) -> impl Iterator<Item = &Competition> {
        self.competitions.iter().filter(|c| c.is_scored())
    }

    /// Calendar axis for streak reasoning: years with at least one scored
    /// competition, ascending, deduplicated. Cancelled years do not appear.
    pub fn scored_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.scored_competitions().map(|c| c.year).collect();
        years.dedup();
        years
    }
}
