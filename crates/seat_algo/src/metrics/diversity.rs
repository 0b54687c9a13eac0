//! Diversity indices and effective number of groups over normalized shares.

use seat_core::{shares, DivMetric, GroupsMetric};

use super::MetricError;

/// Diversity of the share distribution.
///
/// `q` is the order for `Renyi` and `Effective` and is ignored otherwise.
/// Rényi is undefined at `q == 1` (its limit is Shannon); `Effective` at
/// `q == 1` is `exp(Shannon)`.
pub fn div_index(shares_in: &[f64], metric: DivMetric, q: Option<f64>) -> Result<f64, MetricError> {
    let p = shares::normalize(shares_in);
    let index = match metric {
        DivMetric::Shannon => shannon(&p),
        DivMetric::Renyi => {
            let q = order(metric, q)?;
            if q == 1.0 {
                return Err(MetricError::InvalidOrder { metric, q });
            }
            power_sum(&p, q).ln() / (1.0 - q)
        }
        DivMetric::Simpson => power_sum(&p, 2.0),
        DivMetric::GiniSimpson => 1.0 - power_sum(&p, 2.0),
        DivMetric::BergerParker => max(&p),
        DivMetric::Effective => {
            let q = order(metric, q)?;
            if q == 1.0 {
                shannon(&p).exp()
            } else {
                power_sum(&p, q).powf(1.0 / (1.0 - q))
            }
        }
    };
    Ok(index)
}

/// Effective number of groups carrying the shares.
pub fn effective_number_of_groups(shares_in: &[f64], metric: GroupsMetric) -> f64 {
    let p = shares::normalize(shares_in);
    match metric {
        GroupsMetric::LaaksoTaagepera => 1.0 / power_sum(&p, 2.0),
        GroupsMetric::Golosov => {
            let top = max(&p);
            p.iter().map(|&s| s / (s + top * top - s * s)).sum()
        }
        GroupsMetric::InverseSimpson => 1.0 / shannon(&p),
    }
}

fn order(metric: DivMetric, q: Option<f64>) -> Result<f64, MetricError> {
    match q {
        None => Err(MetricError::MissingOrder { metric }),
        Some(q) if !q.is_finite() => Err(MetricError::InvalidOrder { metric, q }),
        Some(q) => Ok(q),
    }
}

/// `−Σ p ln p`, with `0 · ln 0 = 0`.
fn shannon(p: &[f64]) -> f64 {
    -p.iter().filter(|&&s| s > 0.0).map(|&s| s * s.ln()).sum::<f64>()
}

fn power_sum(p: &[f64], q: f64) -> f64 {
    p.iter().map(|&s| s.powf(q)).sum()
}

fn max(p: &[f64]) -> f64 {
    p.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: [f64; 5] = [1_918_578.0, 1_348_072.0, 1_023_503.0, 937_901.0, 639_747.0];

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn uniform_shares() {
        let even = [1.0; 4];
        assert!(close(div_index(&even, DivMetric::Shannon, None).unwrap(), 4f64.ln()));
        assert!(close(div_index(&even, DivMetric::Simpson, None).unwrap(), 0.25));
        assert!(close(div_index(&even, DivMetric::GiniSimpson, None).unwrap(), 0.75));
        assert!(close(div_index(&even, DivMetric::BergerParker, None).unwrap(), 0.25));
        assert!(close(div_index(&even, DivMetric::Renyi, Some(2.0)).unwrap(), 4f64.ln()));
        assert!(close(div_index(&even, DivMetric::Effective, Some(2.0)).unwrap(), 4.0));
        assert!(close(effective_number_of_groups(&even, GroupsMetric::LaaksoTaagepera), 4.0));
        assert!(close(effective_number_of_groups(&even, GroupsMetric::Golosov), 4.0));
    }

    #[test]
    fn every_metric_is_nonzero_on_real_votes() {
        for &metric in DivMetric::ALL {
            for q in [0.5, 2.0] {
                assert_ne!(div_index(&SHORT, metric, Some(q)).unwrap(), 0.0, "{metric}");
            }
        }
        for &metric in GroupsMetric::ALL {
            assert_ne!(effective_number_of_groups(&SHORT, metric), 0.0, "{metric}");
        }
    }

    #[test]
    fn effective_order_one_is_exp_shannon() {
        let h = div_index(&SHORT, DivMetric::Shannon, None).unwrap();
        assert!(close(div_index(&SHORT, DivMetric::Effective, Some(1.0)).unwrap(), h.exp()));
    }

    #[test]
    fn empty_groups_do_not_poison_shannon() {
        let h = div_index(&[3.0, 0.0, 1.0], DivMetric::Shannon, None).unwrap();
        assert!(h.is_finite() && h > 0.0);
    }

    #[test]
    fn order_is_required() {
        assert_eq!(
            div_index(&SHORT, DivMetric::Renyi, None),
            Err(MetricError::MissingOrder { metric: DivMetric::Renyi })
        );
        assert_eq!(
            div_index(&SHORT, DivMetric::Renyi, Some(1.0)),
            Err(MetricError::InvalidOrder { metric: DivMetric::Renyi, q: 1.0 })
        );
        assert!(div_index(&SHORT, DivMetric::Effective, None).is_err());
        // order is irrelevant for the others
        assert!(div_index(&SHORT, DivMetric::Simpson, None).is_ok());
    }
}
