use std::collections::BTreeSet;

use crate::domain::{ParticipantId, Rank, ResultSet};
use crate::stats::ParticipantStats;
use crate::trend::TrendSummary;

use super::catalogue::Catalogue;
use super::types::{AchievementId, Rule};

/// Evaluates every single-participant rule in the catalogue against one
/// participant's derived stats, trend and raw history. Comparative rules
/// are skipped here; the comparative engine owns them.
pub fn evaluate(
    catalogue: &Catalogue,
    stats: &ParticipantStats,
    trend: &TrendSummary,
    result_set: &ResultSet,
) -> BTreeSet<AchievementId> {
    catalogue
        .defs()
        .iter()
        .filter(|def| rule_matches(&def.rule, stats, trend, result_set))
        .map(|def| def.id)
        .collect()
}

fn rule_matches(
    rule: &Rule,
    stats: &ParticipantStats,
    trend: &TrendSummary,
    result_set: &ResultSet,
) -> bool {
    match *rule {
        Rule::GoldAtLeast(min) => stats.gold >= min,
        Rule::GoldBetween { min, below } => stats.gold >= min && stats.gold < below,
        Rule::SilverWithoutGold { min_silver } => stats.silver >= min_silver && stats.gold == 0,
        Rule::TotalMedalsAtLeast(min) => stats.total_medals() >= min,
        Rule::OneOfEachMedal => stats.gold >= 1 && stats.silver >= 1 && stats.bronze >= 1,
        Rule::WinStreakAtLeast(min) => trend.max_win_streak >= min,
        Rule::PodiumStreakAtLeast(min) => trend.max_podium_streak >= min,
        Rule::NeverMissed => never_missed(stats, result_set),
        Rule::WinGapAtLeast(gap) => win_gap_at_least(&stats.win_years, gap),
        Rule::ParityMatch { min_years, share } => parity_match(stats, min_years, share),
        Rule::RankBand {
            low,
            high,
            share,
            min_years,
        } => rank_band(stats, low, high, share, min_years),
        Rule::RankSwing { delta, share } => rank_swing(stats, delta, share),
        Rule::AllRanksDistinct { min_years } => all_ranks_distinct(stats, min_years),
        Rule::FirstThenLast => has_reversal(stats.participant_id, result_set, Reversal::Collapse),
        Rule::LastThenFirst => has_reversal(stats.participant_id, result_set, Reversal::Rise),
        // Not this engine's job.
        Rule::Comparative(_) => false,
    }
}

fn never_missed(stats: &ParticipantStats, result_set: &ResultSet) -> bool {
    let scored = result_set.scored_competitions().count() as u32;
    scored > 0 && stats.participations == scored
}

/// A drought: two adjacent entries of the sorted win-year list at least
/// `gap` years apart.
fn win_gap_at_least(win_years: &[i32], gap: i32) -> bool {
    win_years
        .windows(2)
        .any(|pair| pair[1] - pair[0] >= gap)
}

fn parity_match(stats: &ParticipantStats, min_years: usize, share: f64) -> bool {
    let years = &stats.ranks_by_year;
    if years.len() < min_years {
        return false;
    }
    let matching = years
        .iter()
        .filter(|&(&year, &rank)| (year.rem_euclid(2) as u32) == rank % 2)
        .count();
    matching as f64 / years.len() as f64 >= share
}

fn rank_band(stats: &ParticipantStats, low: Rank, high: Rank, share: f64, min_years: usize) -> bool {
    let years = &stats.ranks_by_year;
    if years.len() < min_years {
        return false;
    }
    let inside = years
        .values()
        .filter(|&&rank| rank >= low && rank <= high)
        .count();
    inside as f64 / years.len() as f64 >= share
}

fn rank_swing(stats: &ParticipantStats, delta: u32, share: f64) -> bool {
    let pairs: Vec<u32> = stats
        .sequence
        .windows(2)
        .map(|w| w[0].rank.abs_diff(w[1].rank))
        .collect();
    if pairs.is_empty() {
        return false;
    }
    let swings = pairs.iter().filter(|&&d| d >= delta).count();
    swings as f64 / pairs.len() as f64 >= share
}

fn all_ranks_distinct(stats: &ParticipantStats, min_years: usize) -> bool {
    if stats.sequence.len() < min_years {
        return false;
    }
    let distinct: BTreeSet<Rank> = stats.sequence.iter().map(|e| e.rank).collect();
    distinct.len() == stats.sequence.len()
}

enum Reversal {
    /// First place, then last place in the very next participated competition.
    Collapse,
    /// Last place, then first.
    Rise,
}

fn has_reversal(id: ParticipantId, result_set: &ResultSet, kind: Reversal) -> bool {
    // (own rank, last place rank) per participated competition, in order.
    let placements: Vec<(Rank, Rank)> = result_set
        .scored_competitions()
        .filter_map(|c| {
            let rank = c.rank_of(id)?;
            let last = c.last_place_rank()?;
            Some((rank, last))
        })
        .collect();

    placements.windows(2).any(|w| {
        let (prev_rank, prev_last) = w[0];
        let (next_rank, next_last) = w[1];
        match kind {
            Reversal::Collapse => prev_rank == 1 && next_rank == next_last && next_rank > 1,
            Reversal::Rise => prev_rank == prev_last && prev_rank > 1 && next_rank == 1,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Competition, Participant, ParticipantStatus};
    use crate::stats::compute_stats;
    use crate::trend::compute_trend;

    use rstest::rstest;

    fn participant(id: ParticipantId) -> Participant {
        Participant {
            id,
            display_name: format!("Player {id}"),
            status: ParticipantStatus::Active,
        }
    }

    fn competition(id: i64, year: i32, scores: &[(ParticipantId, Rank)]) -> Competition {
        Competition {
            id,
            year,
            name: "Summer Cup".to_string(),
            location: "Lakeside".to_string(),
            scores: scores.iter().copied().collect(),
            arranger_third: None,
            arranger_second_last: None,
        }
    }

    fn awards_for(set: &ResultSet, id: ParticipantId) -> BTreeSet<AchievementId> {
        let catalogue = Catalogue::standard();
        let p = set.participant(id).unwrap().clone();
        let stats = compute_stats(&p, set);
        let years = set.scored_years();
        let trend = compute_trend(&stats, &years);
        evaluate(&catalogue, &stats, &trend, set)
    }

    /// Ranks per year for a lone participant, opponent filling second place.
    fn solo_history(ranks: &[(i32, Rank)]) -> ResultSet {
        let competitions = ranks
            .iter()
            .enumerate()
            .map(|(i, &(year, rank))| {
                competition(i as i64 + 1, year, &[(1, rank), (2, rank + 1)])
            })
            .collect();
        ResultSet::new(vec![participant(1), participant(2)], competitions)
    }

    #[rstest]
    #[case(5, true)]
    #[case(4, false)]
    fn gold_king_needs_exactly_five(#[case] golds: u32, #[case] expected: bool) {
        let history: Vec<(i32, Rank)> = (0..golds).map(|i| (2015 + i as i32, 1)).collect();
        let set = solo_history(&history);
        let awarded = awards_for(&set, 1).contains("gold_king");
        assert_eq!(awarded, expected);
    }

    #[test]
    fn three_golds_collect_but_do_not_rule() {
        let set = solo_history(&[(2019, 1), (2020, 1), (2021, 1)]);
        let awards = awards_for(&set, 1);
        assert!(awards.contains("gold_collector"));
        assert!(!awards.contains("gold_king"));
    }

    #[test]
    fn five_golds_outgrow_the_collector_badge() {
        let set = solo_history(&[(2018, 1), (2019, 1), (2020, 1), (2021, 1), (2022, 1)]);
        let awards = awards_for(&set, 1);
        assert!(awards.contains("gold_king"));
        assert!(!awards.contains("gold_collector"));
    }

    #[test]
    fn three_year_sweep_awards_the_streak() {
        // A wins 2020-2022, B always second, C always third.
        let set = ResultSet::new(
            vec![participant(1), participant(2), participant(3)],
            vec![
                competition(1, 2020, &[(1, 1), (2, 2), (3, 3)]),
                competition(2, 2021, &[(1, 1), (2, 2), (3, 3)]),
                competition(3, 2022, &[(1, 1), (2, 2), (3, 3)]),
            ],
        );

        let a = awards_for(&set, 1);
        assert!(a.contains("win_streak_3"));
        assert!(a.contains("win_streak_2"));
        assert!(a.contains("podium_streak_3"));
        assert!(!a.contains("bridesmaid"));

        // Three silvers, zero golds: silver lining but not yet bridesmaid.
        let b = awards_for(&set, 2);
        assert!(b.contains("silver_lining"));
        assert!(!b.contains("bridesmaid"));
    }

    #[test]
    fn five_silvers_and_no_gold_make_the_bridesmaid() {
        let set = solo_history(&[(2018, 2), (2019, 2), (2020, 2), (2021, 2), (2022, 2)]);
        let awards = awards_for(&set, 1);
        assert!(awards.contains("bridesmaid"));
        assert!(awards.contains("silver_lining"));
    }

    #[test]
    fn grace_to_grass_on_win_then_last_place() {
        // D wins, then finishes 12th of 12.
        let mut second = competition(2, 2021, &[(1, 12)]);
        for opponent in 2..=12 {
            second.scores.insert(opponent, opponent as Rank - 1);
        }
        let set = ResultSet::new(
            (1..=12).map(participant).collect(),
            vec![competition(1, 2020, &[(1, 1), (2, 2)]), second],
        );

        let awards = awards_for(&set, 1);
        assert!(awards.contains("grace_to_grass"));
        assert!(!awards.contains("grass_to_grace"));
    }

    #[test]
    fn grass_to_grace_also_lights_the_phoenix() {
        let set = ResultSet::new(
            vec![participant(1), participant(2), participant(3)],
            vec![
                competition(1, 2020, &[(1, 3), (2, 1), (3, 2)]),
                competition(2, 2021, &[(1, 1), (2, 2), (3, 3)]),
            ],
        );

        let awards = awards_for(&set, 1);
        assert!(awards.contains("grass_to_grace"));
        assert!(awards.contains("phoenix"));
        assert!(!awards.contains("grace_to_grass"));
    }

    #[test]
    fn sole_winner_is_not_a_reversal() {
        // Rank 1 is also the last recorded rank when nobody else shows up;
        // winning twice alone must not read as a collapse.
        let set = ResultSet::new(
            vec![participant(1)],
            vec![
                competition(1, 2020, &[(1, 1)]),
                competition(2, 2021, &[(1, 1)]),
            ],
        );
        let awards = awards_for(&set, 1);
        assert!(!awards.contains("grace_to_grass"));
        assert!(!awards.contains("grass_to_grace"));
    }

    #[test]
    fn never_missed_ignores_cancelled_years() {
        let set = ResultSet::new(
            vec![participant(1), participant(2)],
            vec![
                competition(1, 2020, &[(1, 1), (2, 2)]),
                competition(2, 2021, &[]),
                competition(3, 2022, &[(1, 2), (2, 1)]),
            ],
        );
        assert!(awards_for(&set, 1).contains("never_missed"));
    }

    #[test]
    fn missing_a_scored_year_loses_iron_attendance() {
        let set = ResultSet::new(
            vec![participant(1), participant(2)],
            vec![
                competition(1, 2020, &[(1, 1), (2, 2)]),
                competition(2, 2021, &[(2, 1)]),
            ],
        );
        assert!(!awards_for(&set, 1).contains("never_missed"));
    }

    #[test]
    fn comeback_needs_a_three_year_drought() {
        let drought = solo_history(&[(2016, 1), (2017, 4), (2018, 4), (2019, 1)]);
        assert!(awards_for(&drought, 1).contains("comeback_kid"));

        let steady = solo_history(&[(2016, 1), (2017, 1), (2018, 1)]);
        assert!(!awards_for(&steady, 1).contains("comeback_kid"));
    }

    #[test]
    fn parity_pattern_wants_four_years_at_eighty_percent() {
        // Even years with even ranks, odd years with odd ranks.
        let matching = solo_history(&[(2018, 2), (2019, 3), (2020, 4), (2021, 1)]);
        assert!(awards_for(&matching, 1).contains("odd_even"));

        // Three matching of four is 75%.
        let below = solo_history(&[(2018, 2), (2019, 3), (2020, 4), (2021, 2)]);
        assert!(!awards_for(&below, 1).contains("odd_even"));

        // Only three years, share irrelevant.
        let short = solo_history(&[(2018, 2), (2019, 3), (2020, 4)]);
        assert!(!awards_for(&short, 1).contains("odd_even"));
    }

    #[test]
    fn gatekeeper_guards_fourth_and_fifth() {
        let set = solo_history(&[(2018, 4), (2019, 5), (2020, 4), (2021, 2), (2022, 5)]);
        assert!(awards_for(&set, 1).contains("gatekeeper"));

        // Four data points only.
        let short = solo_history(&[(2018, 4), (2019, 5), (2020, 4), (2021, 4)]);
        assert!(!awards_for(&short, 1).contains("gatekeeper"));
    }

    #[test]
    fn elevator_rides_big_swings() {
        // Deltas: 7, 7, 1 — two of three pairs qualify.
        let set = solo_history(&[(2019, 1), (2020, 8), (2021, 1), (2022, 2)]);
        assert!(awards_for(&set, 1).contains("elevator"));

        // Deltas: 1, 1 — none qualify.
        let flat = solo_history(&[(2019, 3), (2020, 4), (2021, 3)]);
        assert!(!awards_for(&flat, 1).contains("elevator"));
    }

    #[test]
    fn consistent_chaos_needs_five_distinct_ranks() {
        let distinct = solo_history(&[(2018, 1), (2019, 4), (2020, 2), (2021, 5), (2022, 3)]);
        assert!(awards_for(&distinct, 1).contains("consistent_chaos"));

        let repeat = solo_history(&[(2018, 1), (2019, 4), (2020, 2), (2021, 4), (2022, 3)]);
        assert!(!awards_for(&repeat, 1).contains("consistent_chaos"));
    }
}
