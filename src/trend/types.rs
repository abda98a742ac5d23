use serde::Serialize;

/// Ordinary least-squares fit of rank against sequence index.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

/// Reading of the regression slope. Ranks decreasing over time means the
/// participant is placing better, hence Improving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Improving,
    Declining,
    Stable,
}

/// Ordered-sequence analytics for one participant. Optional fields are
/// absent below their minimum sample size and never read as zero.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub regression: Option<Regression>,
    pub direction: Direction,
    pub max_win_streak: u32,
    pub max_podium_streak: u32,
    pub improvement: Option<f64>,
}
