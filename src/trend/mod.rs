pub mod regression;
pub mod streaks;
pub mod types;

pub use types::{Direction, Regression, TrendSummary};

use crate::stats::ParticipantStats;

/// Full ordered-sequence summary for one participant.
///
/// `scored_years` is the snapshot's calendar axis (ascending years with at
/// least one scored competition) — streaks are measured against it, not
/// against the participant's own sequence.
pub fn compute_trend(stats: &ParticipantStats, scored_years: &[i32]) -> TrendSummary {
    let ranks: Vec<f64> = stats.sequence.iter().map(|e| e.rank as f64).collect();

    let regression = regression::fit(&ranks);
    let direction = regression::direction(regression.as_ref());

    TrendSummary {
        regression,
        direction,
        max_win_streak: streaks::max_win_streak(scored_years, &stats.ranks_by_year),
        max_podium_streak: streaks::max_podium_streak(scored_years, &stats.ranks_by_year),
        improvement: regression::improvement(&ranks),
    }
}
