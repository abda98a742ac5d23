use super::types::{AchievementDef, AchievementId, Category, ComparativeRule, Rarity, Rule};

/// Immutable rule catalogue, built once at startup and threaded through
/// every engine call. No ambient registries.
#[derive(Debug, Clone)]
pub struct Catalogue {
    defs: Vec<AchievementDef>,
}

impl Catalogue {
    pub fn standard() -> Self {
        Self {
            defs: standard_defs(),
        }
    }

    pub fn defs(&self) -> &[AchievementDef] {
        &self.defs
    }

    pub fn lookup(&self, id: &str) -> Option<&AchievementDef> {
        self.defs.iter().find(|d| d.id == id)
    }

    pub fn points_for(&self, ids: &std::collections::BTreeSet<AchievementId>) -> u32 {
        ids.iter()
            .filter_map(|id| self.lookup(id))
            .map(|d| d.points())
            .sum()
    }
}

fn standard_defs() -> Vec<AchievementDef> {
    use Category::*;
    use Rarity::*;

    let def = |id, title, description, category, rarity, base_points, rule| AchievementDef {
        id,
        title,
        description,
        category,
        rarity,
        base_points,
        rule,
    };

    vec![
        // Medal counts
        def(
            "gold_king",
            "Gold King",
            "Five or more first places",
            Medals,
            Legendary,
            40,
            Rule::GoldAtLeast(5),
        ),
        def(
            "gold_collector",
            "Gold Collector",
            "Three or four first places",
            Medals,
            Epic,
            25,
            Rule::GoldBetween { min: 3, below: 5 },
        ),
        def(
            "silver_lining",
            "Silver Lining",
            "Three silvers without a single gold",
            Medals,
            Rare,
            15,
            Rule::SilverWithoutGold { min_silver: 3 },
        ),
        def(
            "bridesmaid",
            "Always the Bridesmaid",
            "Five second places, never first",
            Medals,
            Epic,
            20,
            Rule::SilverWithoutGold { min_silver: 5 },
        ),
        def(
            "decorated",
            "Decorated",
            "Ten medals of any color",
            Medals,
            Epic,
            25,
            Rule::TotalMedalsAtLeast(10),
        ),
        def(
            "full_set",
            "Full Set",
            "At least one gold, one silver and one bronze",
            Medals,
            Rare,
            15,
            Rule::OneOfEachMedal,
        ),
        // Streaks
        def(
            "win_streak_3",
            "Hat Trick",
            "Three consecutive winning years",
            Streaks,
            Legendary,
            35,
            Rule::WinStreakAtLeast(3),
        ),
        def(
            "win_streak_2",
            "Back to Back",
            "Two consecutive winning years",
            Streaks,
            Rare,
            15,
            Rule::WinStreakAtLeast(2),
        ),
        def(
            "podium_streak_5",
            "Podium Fixture",
            "Five consecutive podium years",
            Streaks,
            Epic,
            25,
            Rule::PodiumStreakAtLeast(5),
        ),
        def(
            "podium_streak_3",
            "Podium Regular",
            "Three consecutive podium years",
            Streaks,
            Rare,
            15,
            Rule::PodiumStreakAtLeast(3),
        ),
        def(
            "never_missed",
            "Iron Attendance",
            "Competed in every scored competition",
            Streaks,
            Epic,
            20,
            Rule::NeverMissed,
        ),
        def(
            "comeback_kid",
            "Comeback Kid",
            "Won again after a drought of three years or more",
            Streaks,
            Epic,
            20,
            Rule::WinGapAtLeast(3),
        ),
        // Positional patterns
        def(
            "odd_even",
            "Clockwork",
            "Rank parity follows year parity four years running or better",
            Patterns,
            Mythic,
            50,
            Rule::ParityMatch {
                min_years: 4,
                share: 0.8,
            },
        ),
        def(
            "gatekeeper",
            "Gatekeeper",
            "Fourth or fifth place most of the time",
            Patterns,
            Rare,
            15,
            Rule::RankBand {
                low: 4,
                high: 5,
                share: 0.6,
                min_years: 5,
            },
        ),
        def(
            "elevator",
            "Elevator",
            "Rank jumps of five or more, half the time",
            Patterns,
            Epic,
            20,
            Rule::RankSwing {
                delta: 5,
                share: 0.5,
            },
        ),
        def(
            "consistent_chaos",
            "Consistent Chaos",
            "Never the same rank twice",
            Patterns,
            Epic,
            20,
            Rule::AllRanksDistinct { min_years: 5 },
        ),
        // Reversals
        def(
            "grace_to_grass",
            "Grace to Grass",
            "From first place straight to last",
            Reversals,
            Epic,
            20,
            Rule::FirstThenLast,
        ),
        def(
            "grass_to_grace",
            "Grass to Grace",
            "From last place straight to first",
            Reversals,
            Epic,
            20,
            Rule::LastThenFirst,
        ),
        def(
            "phoenix",
            "Phoenix",
            "Rose from the ashes of last place to win",
            Reversals,
            Legendary,
            30,
            Rule::LastThenFirst,
        ),
        // Comparative
        def(
            "goat",
            "The GOAT",
            "Most wins of anyone, five at minimum",
            Comparative,
            Mythic,
            60,
            Rule::Comparative(ComparativeRule::MostWins { min_wins: 5 }),
        ),
        def(
            "medal_hoarder",
            "Medal Hoarder",
            "Most medals of anyone, five at minimum",
            Comparative,
            Legendary,
            35,
            Rule::Comparative(ComparativeRule::MostMedals { min_medals: 5 }),
        ),
        def(
            "most_consistent",
            "Metronome",
            "Lowest rank spread of anyone with five participations",
            Comparative,
            Epic,
            25,
            Rule::Comparative(ComparativeRule::LowestStdDev {
                min_participations: 5,
            }),
        ),
        def(
            "host_hero",
            "Host Hero",
            "Arranged more competitions than anyone else",
            Comparative,
            Rare,
            15,
            Rule::Comparative(ComparativeRule::MostArrangements {
                min_arrangements: 2,
            }),
        ),
        def(
            "decade_champion",
            "Decade Champion",
            "Owned a decade with three or more wins in it",
            Comparative,
            Legendary,
            35,
            Rule::Comparative(ComparativeRule::MostDecadeWins { min_wins: 3 }),
        ),
        def(
            "the_closer",
            "The Closer",
            "Most wins across the five most recent competitions",
            Comparative,
            Rare,
            15,
            Rule::Comparative(ComparativeRule::MostRecentWins {
                window: 5,
                min_wins: 2,
            }),
        ),
        def(
            "biggest_rivalry",
            "Arch Rivals",
            "The closest long-running head-to-head in the roster",
            Comparative,
            Epic,
            20,
            Rule::Comparative(ComparativeRule::BiggestRivalry {
                min_meetings: 5,
                max_margin: 2,
            }),
        ),
        def(
            "family_feud",
            "Family Feud",
            "Beat a family member five times",
            Comparative,
            Rare,
            15,
            Rule::Comparative(ComparativeRule::FamilyFeud { min_beatings: 5 }),
        ),
    ]
}
