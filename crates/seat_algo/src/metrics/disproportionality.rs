//! Disproportionality between the share and the seat distributions.
//!
//! Contract:
//! - Shares and allocations are normalized to proportions first, except for
//!   Cox–Shugart, which regresses raw allocations on raw shares.
//! - Rose is `100 − Loosemore–Hanby` on proportions.
//! - Gini is a recognised name but has no implementation.

use seat_core::{shares, DisprMetric};

use super::MetricError;

pub fn dispr_index(
    shares_in: &[f64],
    allocations: &[u32],
    metric: DisprMetric,
) -> Result<f64, MetricError> {
    MetricError::check_lengths(shares_in.len(), allocations.len())?;

    let p = shares::normalize(shares_in);
    let a = shares::normalize_alloc(allocations);
    let pairs = || p.iter().copied().zip(a.iter().copied());

    let index = match metric {
        DisprMetric::Gallagher => (0.5 * pairs().map(|(s, x)| (s - x).powi(2)).sum::<f64>()).sqrt(),
        DisprMetric::LoosemoreHanby => loosemore_hanby(pairs()),
        DisprMetric::Rose => 100.0 - loosemore_hanby(pairs()),
        DisprMetric::Rae => pairs().map(|(s, x)| (s - x).abs()).sum::<f64>() / p.len() as f64,
        DisprMetric::SainteLague => pairs().map(|(s, x)| (s - x).powi(2) / s).sum(),
        DisprMetric::DHondt => pairs().map(|(s, x)| x / s).fold(f64::NEG_INFINITY, f64::max),
        DisprMetric::CoxShugart => {
            let raw: Vec<f64> = allocations.iter().map(|&x| f64::from(x)).collect();
            ols_slope(shares_in, &raw)
        }
        DisprMetric::Gini => return Err(MetricError::Unsupported { metric }),
    };
    Ok(index)
}

fn loosemore_hanby(pairs: impl Iterator<Item = (f64, f64)>) -> f64 {
    0.5 * pairs.map(|(s, x)| (s - x).abs()).sum::<f64>()
}

/// Least-squares slope of `y` on `x`. Constant `x` gives `NaN`.
fn ols_slope(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;
    let (cov, var) = x.iter().zip(y).fold((0.0, 0.0), |(cov, var), (&xi, &yi)| {
        let dx = xi - mean_x;
        (cov + dx * (yi - mean_y), var + dx * dx)
    });
    cov / var
}
