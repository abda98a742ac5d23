use std::collections::BTreeMap;

use crate::domain::{Competition, Participant, Rank, ResultSet};

use super::types::{CompetitionStats, ParticipantStats, YearRank};

/// Derives one participant's scalar statistics from the full snapshot.
/// Pure: no shared state, no side effects.
pub fn compute_stats(participant: &Participant, result_set: &ResultSet) -> ParticipantStats {
    let mut stats = ParticipantStats {
        participant_id: participant.id,
        ..ParticipantStats::default()
    };

    let mut ranks_by_year: BTreeMap<i32, Rank> = BTreeMap::new();
    let mut total_scored = 0u32;

    for competition in result_set.competitions() {
        if competition.arranged_by(participant.id) {
            stats.arrangements += 1;
        }
        if !competition.is_scored() {
            continue;
        }
        total_scored += 1;

        let Some(rank) = competition.rank_of(participant.id) else {
            continue;
        };

        stats.participations += 1;
        stats.sequence.push(YearRank {
            year: competition.year,
            rank,
        });

        match rank {
            1 => stats.gold += 1,
            2 => stats.silver += 1,
            3 => stats.bronze += 1,
            _ => {}
        }
        if rank == 1 {
            stats.wins += 1;
        }
        if rank <= 3 {
            stats.podiums += 1;
        }
        if rank <= 5 {
            stats.top_five += 1;
        }

        stats.best_rank = Some(stats.best_rank.map_or(rank, |b| b.min(rank)));
        stats.worst_rank = Some(stats.worst_rank.map_or(rank, |w| w.max(rank)));

        // A year with several competitions keeps the best finish.
        ranks_by_year
            .entry(competition.year)
            .and_modify(|existing| *existing = (*existing).min(rank))
            .or_insert(rank);
    }

    stats.win_years = years_where(&ranks_by_year, |r| r == 1);
    stats.podium_years = years_where(&ranks_by_year, |r| r <= 3);
    stats.ranks_by_year = ranks_by_year;

    let ranks: Vec<f64> = stats.sequence.iter().map(|e| e.rank as f64).collect();
    stats.mean_rank = mean(&ranks);
    stats.std_dev = population_std_dev(&ranks);
    stats.participation_rate = if total_scored > 0 {
        stats.participations as f64 / total_scored as f64
    } else {
        0.0
    };

    stats
}

pub fn compute_competition_stats(
    competition: &Competition,
    roster_size: usize,
) -> CompetitionStats {
    let scored = competition.scores.len() as u32;
    CompetitionStats {
        competition_id: competition.id,
        year: competition.year,
        scored_participants: scored,
        competitiveness: if roster_size > 0 {
            scored as f64 / roster_size as f64
        } else {
            0.0
        },
    }
}

fn years_where(ranks_by_year: &BTreeMap<i32, Rank>, predicate: impl Fn(Rank) -> bool) -> Vec<i32> {
    ranks_by_year
        .iter()
        .filter(|&(_, &rank)| predicate(rank))
        .map(|(&year, _)| year)
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
