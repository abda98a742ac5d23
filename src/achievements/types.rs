use serde::Serialize;

use crate::domain::Rank;

/// Catalogue key. Static because the catalogue is compiled in; award sets
/// borrow these, never own strings.
pub type AchievementId = &'static str;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Medals,
    Streaks,
    Patterns,
    Reversals,
    Comparative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    /// Scoring multiplier only; rarity never affects eligibility.
    pub fn multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Rare => 1.5,
            Rarity::Epic => 2.0,
            Rarity::Legendary => 3.0,
            Rarity::Mythic => 5.0,
        }
    }
}

/// Closed set of predicate shapes. Every achievement picks one variant with
/// its exact thresholds; there is no open-ended rule dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    GoldAtLeast(u32),
    /// min ≤ gold < below.
    GoldBetween { min: u32, below: u32 },
    SilverWithoutGold { min_silver: u32 },
    TotalMedalsAtLeast(u32),
    OneOfEachMedal,
    WinStreakAtLeast(u32),
    PodiumStreakAtLeast(u32),
    /// A rank in every scored competition of the dataset.
    NeverMissed,
    /// Two adjacent win-years at least this many years apart.
    WinGapAtLeast(i32),
    /// (year mod 2) == (rank mod 2) in at least `share` of participated
    /// years; `min_years` participated years required.
    ParityMatch { min_years: usize, share: f64 },
    /// Rank within [low, high] in at least `share` of participated years.
    RankBand {
        low: Rank,
        high: Rank,
        share: f64,
        min_years: usize,
    },
    /// |rank delta| ≥ `delta` between consecutive participated
    /// competitions in at least `share` of consecutive pairs.
    RankSwing { delta: u32, share: f64 },
    AllRanksDistinct { min_years: usize },
    /// Rank 1 immediately followed by last place, over consecutive
    /// participated competitions.
    FirstThenLast,
    LastThenFirst,
    Comparative(ComparativeRule),
}

/// Rules needing a total ordering across the roster. Evaluated by the
/// comparative engine; the pattern engine skips them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComparativeRule {
    MostWins { min_wins: u32 },
    MostMedals { min_medals: u32 },
    LowestStdDev { min_participations: u32 },
    MostArrangements { min_arrangements: u32 },
    /// Most wins inside one decade (year / 10 * 10).
    MostDecadeWins { min_wins: u32 },
    /// Most wins across the `window` most recent scored competitions.
    MostRecentWins { window: usize, min_wins: u32 },
    BiggestRivalry { min_meetings: u32, max_margin: u32 },
    FamilyFeud { min_beatings: u32 },
}

/// Static catalogue entry. Predicate selection lives in `rule`; everything
/// else is presentation and scoring metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDef {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub rarity: Rarity,
    pub base_points: u32,
    #[serde(skip)]
    pub rule: Rule,
}

impl AchievementDef {
    /// base_points × rarity multiplier, rounded to whole points.
    pub fn points(&self) -> u32 {
        (self.base_points as f64 * self.rarity.multiplier()).round() as u32
    }
}
