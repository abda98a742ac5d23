use ndarray::Array1;

use super::types::{Direction, Regression};

/// Slopes within ±0.1 read as stable.
const SLOPE_THRESHOLD: f64 = 0.1;

/// Least-squares line through (index, rank). Needs at least two points;
/// shorter sequences have no defined trend.
pub fn fit(ranks: &[f64]) -> Option<Regression> {
    let n = ranks.len();
    if n < 2 {
        return None;
    }

    let y = Array1::from_vec(ranks.to_vec());
    let x = Array1::from_iter((0..n).map(|i| i as f64));

    let x_mean = x.mean().unwrap_or(0.0);
    let y_mean = y.mean().unwrap_or(0.0);

    let ss_xy = (&x - x_mean).dot(&(&y - y_mean));
    let ss_xx = (&x - x_mean).dot(&(&x - x_mean));

    // ss_xx is zero only for n < 2, which is excluded above.
    let slope = ss_xy / ss_xx;
    let intercept = y_mean - slope * x_mean;

    let residuals = &y - &(x.mapv(|xi| intercept + slope * xi));
    let ss_res = residuals.dot(&residuals);
    let ss_tot = (&y - y_mean).dot(&(&y - y_mean));

    // Constant sequences carry no explainable variance.
    let r_squared = if ss_tot == 0.0 { 0.0 } else { 1.0 - ss_res / ss_tot };

    Some(Regression {
        slope,
        intercept,
        r_squared,
    })
}

/// An absent regression reads as Stable: no data, no claimed trend.
pub fn direction(regression: Option<&Regression>) -> Direction {
    match regression {
        Some(r) if r.slope < -SLOPE_THRESHOLD => Direction::Improving,
        Some(r) if r.slope > SLOPE_THRESHOLD => Direction::Declining,
        _ => Direction::Stable,
    }
}

/// Mean of the first half minus mean of the second half; positive means
/// ranks got numerically lower (better) over time. Undefined below four
/// data points.
pub fn improvement(ranks: &[f64]) -> Option<f64> {
    let n = ranks.len();
    if n < 4 {
        return None;
    }
    let mid = n / 2;
    let first = &ranks[..mid];
    let second = &ranks[mid..];
    Some(mean(first) - mean(second))
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
