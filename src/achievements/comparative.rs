use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::domain::{Competition, ParticipantId, ResultSet};
use crate::stats::ParticipantStats;

use super::catalogue::Catalogue;
use super::types::{AchievementId, ComparativeRule, Rule};

/// Evaluates every roster-wide rule. Ties for a leader position go to the
/// first participant in roster order; a strictly better metric is required
/// to displace the current leader.
pub fn evaluate(
    catalogue: &Catalogue,
    all_stats: &BTreeMap<ParticipantId, ParticipantStats>,
    result_set: &ResultSet,
) -> BTreeMap<ParticipantId, BTreeSet<AchievementId>> {
    let mut awards: BTreeMap<ParticipantId, BTreeSet<AchievementId>> = BTreeMap::new();

    for def in catalogue.defs() {
        let Rule::Comparative(rule) = def.rule else {
            continue;
        };
        for id in winners(&rule, all_stats, result_set) {
            awards.entry(id).or_default().insert(def.id);
        }
    }

    awards
}

fn winners(
    rule: &ComparativeRule,
    all_stats: &BTreeMap<ParticipantId, ParticipantStats>,
    result_set: &ResultSet,
) -> Vec<ParticipantId> {
    match *rule {
        ComparativeRule::MostWins { min_wins } => single_leader(result_set, all_stats, |s| {
            (s.wins >= min_wins).then_some(s.wins as f64)
        }),
        ComparativeRule::MostMedals { min_medals } => single_leader(result_set, all_stats, |s| {
            (s.total_medals() >= min_medals).then_some(s.total_medals() as f64)
        }),
        ComparativeRule::LowestStdDev { min_participations } => {
            // Minimum wanted: negate so the shared maximum scan applies.
            single_leader(result_set, all_stats, |s| {
                (s.participations >= min_participations).then_some(-s.std_dev)
            })
        }
        ComparativeRule::MostArrangements { min_arrangements } => {
            single_leader(result_set, all_stats, |s| {
                (s.arrangements >= min_arrangements).then_some(s.arrangements as f64)
            })
        }
        ComparativeRule::MostDecadeWins { min_wins } => {
            single_leader(result_set, all_stats, |s| {
                let best = best_decade_wins(s);
                (best >= min_wins).then_some(best as f64)
            })
        }
        ComparativeRule::MostRecentWins { window, min_wins } => {
            let recent: Vec<&Competition> = {
                let scored: Vec<&Competition> = result_set.scored_competitions().collect();
                let skip = scored.len().saturating_sub(window);
                scored.into_iter().skip(skip).collect()
            };
            single_leader(result_set, all_stats, |s| {
                let wins = recent
                    .iter()
                    .filter(|c| c.rank_of(s.participant_id) == Some(1))
                    .count() as u32;
                (wins >= min_wins).then_some(wins as f64)
            })
        }
        ComparativeRule::BiggestRivalry {
            min_meetings,
            max_margin,
        } => biggest_rivalry(result_set, min_meetings, max_margin),
        ComparativeRule::FamilyFeud { min_beatings } => family_feud(result_set, min_beatings),
    }
}

/// Shared leader scan. `metric` returns None for non-qualifying
/// participants; the first qualifying participant in roster order wins
/// ties.
fn single_leader(
    result_set: &ResultSet,
    all_stats: &BTreeMap<ParticipantId, ParticipantStats>,
    metric: impl Fn(&ParticipantStats) -> Option<f64>,
) -> Vec<ParticipantId> {
    let mut leader: Option<(ParticipantId, f64)> = None;

    for participant in result_set.participants() {
        let Some(stats) = all_stats.get(&participant.id) else {
            continue;
        };
        let Some(value) = metric(stats) else {
            continue;
        };
        let displaces = leader.is_none_or(|(_, best)| value > best);
        if displaces {
            leader = Some((participant.id, value));
        }
    }

    leader.map(|(id, _)| id).into_iter().collect()
}

fn best_decade_wins(stats: &ParticipantStats) -> u32 {
    let mut by_decade: BTreeMap<i32, u32> = BTreeMap::new();
    for &year in &stats.win_years {
        *by_decade.entry(year.div_euclid(10) * 10).or_default() += 1;
    }
    by_decade.values().copied().max().unwrap_or(0)
}

/// Head-to-head record between two participants over shared competitions.
struct HeadToHead {
    meetings: u32,
    first_wins: u32,
    second_wins: u32,
}

fn head_to_head(result_set: &ResultSet, a: ParticipantId, b: ParticipantId) -> HeadToHead {
    let mut record = HeadToHead {
        meetings: 0,
        first_wins: 0,
        second_wins: 0,
    };

    for competition in result_set.scored_competitions() {
        let (Some(rank_a), Some(rank_b)) = (competition.rank_of(a), competition.rank_of(b)) else {
            continue;
        };
        record.meetings += 1;
        if rank_a < rank_b {
            record.first_wins += 1;
        } else if rank_b < rank_a {
            record.second_wins += 1;
        }
    }

    record
}

/// The qualifying pair with the most meetings; both members are awarded.
/// First-found wins on equal meeting counts (roster pair order).
fn biggest_rivalry(
    result_set: &ResultSet,
    min_meetings: u32,
    max_margin: u32,
) -> Vec<ParticipantId> {
    let roster = result_set.participants();
    let mut best: Option<(ParticipantId, ParticipantId, u32)> = None;

    for i in 0..roster.len() {
        for j in (i + 1)..roster.len() {
            let a = roster[i].id;
            let b = roster[j].id;
            let record = head_to_head(result_set, a, b);

            let margin = record.first_wins.abs_diff(record.second_wins);
            if record.meetings < min_meetings || margin > max_margin {
                continue;
            }
            let displaces = best.is_none_or(|(_, _, meetings)| record.meetings > meetings);
            if displaces {
                best = Some((a, b, record.meetings));
            }
        }
    }

    match best {
        Some((a, b, _)) => vec![a, b],
        None => vec![],
    }
}

/// Surname groups (last word of the display name, case-insensitive); any
/// member who has beaten another member enough times is awarded.
fn family_feud(result_set: &ResultSet, min_beatings: u32) -> Vec<ParticipantId> {
    let roster = result_set.participants();
    let mut families: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, participant) in roster.iter().enumerate() {
        if let Some(surname) = participant.surname() {
            families.entry(surname.to_lowercase()).or_default().push(idx);
        }
    }

    let mut awarded: BTreeSet<ParticipantId> = BTreeSet::new();
    for members in families.values() {
        if members.len() < 2 {
            continue;
        }
        for &i in members {
            for &j in members {
                if i == j {
                    continue;
                }
                let record = head_to_head(result_set, roster[i].id, roster[j].id);
                if record.first_wins >= min_beatings {
                    awarded.insert(roster[i].id);
                }
            }
        }
    }

    // Roster order for determinism of the returned list.
    roster
        .iter()
        .map(|p| p.id)
        .filter(|id| awarded.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Participant, ParticipantStatus, Rank};
    use crate::stats::compute_stats;

    fn participant(id: ParticipantId, name: &str) -> Participant {
        Participant {
            id,
            display_name: name.to_string(),
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

    fn stats_for(set: &ResultSet) -> BTreeMap<ParticipantId, ParticipantStats> {
        set.participants()
            .iter()
            .map(|p| (p.id, compute_stats(p, set)))
            .collect()
    }

    fn awards(set: &ResultSet) -> BTreeMap<ParticipantId, BTreeSet<AchievementId>> {
        evaluate(&Catalogue::standard(), &stats_for(set), set)
    }

    fn dominant_history(winner_years: std::ops::RangeInclusive<i32>) -> Vec<Competition> {
        winner_years
            .enumerate()
            .map(|(i, year)| competition(i as i64 + 1, year, &[(1, 1), (2, 2), (3, 3)]))
            .collect()
    }

    #[test]
    fn goat_requires_five_wins_not_just_most() {
        let roster = vec![
            participant(1, "Anna K"),
            participant(2, "Ola N"),
            participant(3, "Piotr Z"),
        ];

        // Four wins: most, but below the bar.
        let set = ResultSet::new(roster.clone(), dominant_history(2018..=2021));
        assert!(!awards(&set).get(&1).is_some_and(|a| a.contains("goat")));

        // Five wins qualifies.
        let set = ResultSet::new(roster, dominant_history(2018..=2022));
        assert!(awards(&set).get(&1).unwrap().contains("goat"));
    }

    #[test]
    fn leader_ties_go_to_roster_order() {
        // Both 1 and 2 have five wins each; roster lists 2 first.
        let mut competitions = Vec::new();
        for (i, year) in (2013..=2017).enumerate() {
            competitions.push(competition(i as i64 + 1, year, &[(1, 1), (2, 2)]));
        }
        for (i, year) in (2018..=2022).enumerate() {
            competitions.push(competition(i as i64 + 6, year, &[(1, 2), (2, 1)]));
        }
        let set = ResultSet::new(
            vec![participant(2, "Ola N"), participant(1, "Anna K")],
            competitions,
        );

        let result = awards(&set);
        assert!(result.get(&2).unwrap().contains("goat"));
        assert!(!result.get(&1).is_some_and(|a| a.contains("goat")));
    }

    #[test]
    fn medal_hoarder_counts_all_colors() {
        // 1 hoards five mixed medals; 2 has three golds, 3 two bronzes.
        let set = ResultSet::new(
            vec![participant(1, "Anna K"), participant(2, "Ola N"), participant(3, "Piotr Z")],
            vec![
                competition(1, 2016, &[(1, 1), (2, 4), (3, 3)]),
                competition(2, 2017, &[(1, 1), (2, 4), (3, 3)]),
                competition(3, 2018, &[(1, 3), (2, 1), (3, 4)]),
                competition(4, 2019, &[(1, 3), (2, 1), (3, 4)]),
                competition(5, 2020, &[(1, 3), (2, 1), (3, 4)]),
            ],
        );

        let result = awards(&set);
        assert!(result.get(&1).unwrap().contains("medal_hoarder"));
        assert!(!result.get(&2).unwrap().contains("medal_hoarder"));
    }

    #[test]
    fn most_consistent_wants_five_participations() {
        // 1 is perfectly consistent but only attended four times.
        let set = ResultSet::new(
            vec![participant(1, "Anna K"), participant(2, "Ola N")],
            vec![
                competition(1, 2017, &[(1, 2), (2, 1)]),
                competition(2, 2018, &[(1, 2), (2, 1)]),
                competition(3, 2019, &[(1, 2), (2, 1)]),
                competition(4, 2020, &[(1, 2), (2, 1)]),
                competition(5, 2021, &[(2, 1)]),
            ],
        );

        let result = awards(&set);
        assert!(!result.get(&1).is_some_and(|a| a.contains("most_consistent")));
        assert!(result.get(&2).unwrap().contains("most_consistent"));
    }

    #[test]
    fn rivalry_needs_meetings_and_a_close_margin() {
        // 1 and 2 trade wins over six shared competitions (3-3); 3 only
        // ever meets them twice.
        let mut competitions = Vec::new();
        for (i, year) in (2016..=2021).enumerate() {
            let (first, second) = if i % 2 == 0 { (1, 2) } else { (2, 1) };
            competitions.push(competition(
                i as i64 + 1,
                year,
                &[(first, 1), (second, 2)],
            ));
        }
        competitions.push(competition(7, 2022, &[(1, 1), (2, 2), (3, 3)]));

        let set = ResultSet::new(
            vec![participant(1, "Anna K"), participant(2, "Ola N"), participant(3, "Piotr Z")],
            competitions,
        );

        let result = awards(&set);
        assert!(result.get(&1).unwrap().contains("biggest_rivalry"));
        assert!(result.get(&2).unwrap().contains("biggest_rivalry"));
        assert!(!result.get(&3).is_some_and(|a| a.contains("biggest_rivalry")));
    }

    #[test]
    fn lopsided_pairs_are_not_rivals() {
        // Seven meetings, 7-0: margin far above 2.
        let competitions = (2015..=2021)
            .enumerate()
            .map(|(i, year)| competition(i as i64 + 1, year, &[(1, 1), (2, 2)]))
            .collect();
        let set = ResultSet::new(
            vec![participant(1, "Anna K"), participant(2, "Ola N")],
            competitions,
        );

        assert!(awards(&set).values().all(|a| !a.contains("biggest_rivalry")));
    }

    #[test]
    fn family_feud_groups_by_surname() {
        // The Kowalski siblings: 1 beats 3 five times. 2 shares no surname.
        let competitions = (2017..=2021)
            .enumerate()
            .map(|(i, year)| competition(i as i64 + 1, year, &[(1, 1), (2, 2), (3, 3)]))
            .collect();
        let set = ResultSet::new(
            vec![
                participant(1, "Jan Kowalski"),
                participant(2, "Ola Nowak"),
                participant(3, "Marek Kowalski"),
            ],
            competitions,
        );

        let result = awards(&set);
        assert!(result.get(&1).unwrap().contains("family_feud"));
        assert!(!result.get(&2).is_some_and(|a| a.contains("family_feud")));
        assert!(!result.get(&3).is_some_and(|a| a.contains("family_feud")));
    }

    #[test]
    fn the_closer_looks_at_the_recent_window() {
        // 2 won the distant past; 1 won three of the last five.
        let mut competitions = Vec::new();
        for (i, year) in (2010..=2014).enumerate() {
            competitions.push(competition(i as i64 + 1, year, &[(1, 2), (2, 1)]));
        }
        for (i, year) in (2018..=2022).enumerate() {
            let scores: &[(ParticipantId, Rank)] = if i < 3 {
                &[(1, 1), (2, 2)]
            } else {
                &[(1, 2), (2, 1)]
            };
            competitions.push(competition(i as i64 + 6, year, scores));
        }
        let set = ResultSet::new(
            vec![participant(1, "Anna K"), participant(2, "Ola N")],
            competitions,
        );

        let result = awards(&set);
        assert!(result.get(&1).unwrap().contains("the_closer"));
        assert!(!result.get(&2).unwrap().contains("the_closer"));
    }

    #[test]
    fn decade_champion_needs_three_wins_in_one_decade() {
        // Four wins spread across two decades, at most two per decade.
        let set = ResultSet::new(
            vec![participant(1, "Anna K"), participant(2, "Ola N")],
            vec![
                competition(1, 2008, &[(1, 1), (2, 2)]),
                competition(2, 2009, &[(1, 1), (2, 2)]),
                competition(3, 2011, &[(1, 1), (2, 2)]),
                competition(4, 2012, &[(1, 1), (2, 2)]),
            ],
        );
        assert!(!awards(&set).get(&1).is_some_and(|a| a.contains("decade_champion")));

        // A third win in the 2010s crosses the bar.
        let set = ResultSet::new(
            vec![participant(1, "Anna K"), participant(2, "Ola N")],
            vec![
                competition(1, 2011, &[(1, 1), (2, 2)]),
                competition(2, 2012, &[(1, 1), (2, 2)]),
                competition(3, 2014, &[(1, 1), (2, 2)]),
            ],
        );
        assert!(awards(&set).get(&1).unwrap().contains("decade_champion"));
    }

    #[test]
    fn no_qualifying_candidate_awards_nothing() {
        let set = ResultSet::new(
            vec![participant(1, "Anna K"), participant(2, "Ola N")],
            vec![competition(1, 2022, &[(1, 1), (2, 2)])],
        );

        let result = awards(&set);
        for ids in result.values() {
            assert!(!ids.contains("goat"));
            assert!(!ids.contains("medal_hoarder"));
            assert!(!ids.contains("decade_champion"));
        }
    }
}
