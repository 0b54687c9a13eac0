//! Highest averages (divisor) allocation: Jefferson/D’Hondt, Webster/Sainte-Laguë
//! and Huntington–Hill.
//!
//! Contract:
//! - Quotient for group i holding n_i seats is `v_i / d(n_i)` with
//!     * Jefferson:       d(n) = n + 1
//!     * Webster:         d(n) = 2n + 1
//!     * Huntington–Hill: d(n) = sqrt(n (n + 1))
//! - `modifier`, when set, replaces d(0) for every style.
//! - Each round every group sharing the maximal quotient gets a seat, unless
//!   that would overshoot; then one seat goes through the `TieBreak` chain.
//! - Huntington–Hill needs a floor of one seat per group: it rejects an entry
//!   threshold and lifts a missing minimum to 1.
//!
//! Determinism:
//! - Scans run in input order; the `TieRng` is drawn only for genuine ties.

use seat_core::{AllocConfig, AveragingStyle, TieRng};
use tracing::warn;

use super::bonus::apply_majority_bonus;
use super::common::{check_min_alloc, prepare, seat_sum, AllocError};
use super::ties::resolve_ties;

/// Apportion `cfg.total_alloc` seats over `shares` by highest averages.
pub fn allocate_highest_averages(
    style: AveragingStyle,
    shares: &[f64],
    cfg: &AllocConfig,
    rng: &mut TieRng,
) -> Result<Vec<u32>, AllocError> {
    let min_alloc = effective_floor(style, shares.len(), cfg)?;
    let shares = prepare(shares, cfg)?;
    let seats = cfg.total_alloc;
    let n = shares.len();

    let mut alloc = match min_alloc {
        Some(m) => {
            check_min_alloc(m, n, seats)?;
            vec![m; n]
        }
        None => vec![0; n],
    };

    // Separate counter: the bonus below needs the caller's total.
    let mut remaining = u64::from(seats) - seat_sum(&alloc);
    while remaining > 0 {
        let quotients: Vec<f64> = shares
            .iter()
            .zip(&alloc)
            .map(|(&v, &k)| v / divisor(style, k, cfg.modifier))
            .collect();
        let best = quotients.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<usize> = (0..n).filter(|&i| quotients[i] == best).collect();

        let winners = if tied.len() as u64 <= remaining {
            tied
        } else {
            resolve_ties(&tied, 1, &shares, cfg.tie_break, rng)
        };
        remaining -= winners.len() as u64;
        for i in winners {
            alloc[i] += 1;
        }
    }

    let alloc = if cfg.majority_bonus {
        apply_majority_bonus(&shares, alloc, seats, |others, reduced| {
            let sub = AllocConfig {
                total_alloc: reduced,
                majority_bonus: false,
                min_alloc,
                ..cfg.clone()
            };
            allocate_highest_averages(style, others, &sub, rng)
        })?
    } else {
        alloc
    };

    debug_assert_eq!(seat_sum(&alloc), u64::from(seats));
    Ok(alloc)
}

/// Minimum seats per group, after the Huntington–Hill adjustments.
fn effective_floor(
    style: AveragingStyle,
    groups: usize,
    cfg: &AllocConfig,
) -> Result<Option<u32>, AllocError> {
    if style != AveragingStyle::HuntingtonHill {
        return Ok(cfg.effective_min_alloc());
    }
    if cfg.alloc_threshold.is_some() {
        return Err(AllocError::ThresholdWithHuntingtonHill);
    }
    match cfg.effective_min_alloc() {
        Some(m) => Ok(Some(m)),
        None => {
            if groups as u64 > u64::from(cfg.total_alloc) {
                return Err(AllocError::TooFewSeatsForHuntingtonHill {
                    groups,
                    total_alloc: cfg.total_alloc,
                });
            }
            warn!("huntington_hill divides by sqrt(n (n + 1)); applying a minimum allocation of 1");
            Ok(Some(1))
        }
    }
}

fn divisor(style: AveragingStyle, seats_held: u32, modifier: Option<f64>) -> f64 {
    if let (0, Some(m)) = (seats_held, modifier) {
        return m;
    }
    let n = f64::from(seats_held);
    match style {
        AveragingStyle::Jefferson => n + 1.0,
        AveragingStyle::Webster => 2.0 * n + 1.0,
        AveragingStyle::HuntingtonHill => (n * (n + 1.0)).sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ha(style: AveragingStyle, shares: &[f64], cfg: &AllocConfig) -> Vec<u32> {
        allocate_highest_averages(style, shares, cfg, &mut TieRng::from_seed_u64(0)).unwrap()
    }

    #[test]
    fn divisors_by_style() {
        assert_eq!(divisor(AveragingStyle::Jefferson, 2, None), 3.0);
        assert_eq!(divisor(AveragingStyle::Webster, 2, None), 5.0);
        assert_eq!(divisor(AveragingStyle::HuntingtonHill, 3, None), 12f64.sqrt());
        assert_eq!(divisor(AveragingStyle::Webster, 0, Some(1.4)), 1.4);
        assert_eq!(divisor(AveragingStyle::Webster, 1, Some(1.4)), 3.0);
    }

    #[test]
    fn dhondt_textbook_case() {
        // 100k/80k/30k/20k for 8 seats
        let out = ha(
            AveragingStyle::Jefferson,
            &[100_000.0, 80_000.0, 30_000.0, 20_000.0],
            &AllocConfig::new(8),
        );
        assert_eq!(out, vec![4, 3, 1, 0]);
    }

    #[test]
    fn sainte_lague_textbook_case() {
        let out = ha(
            AveragingStyle::Webster,
            &[100_000.0, 80_000.0, 30_000.0, 20_000.0],
            &AllocConfig::new(8),
        );
        assert_eq!(out, vec![3, 3, 1, 1]);
    }

    #[test]
    fn whole_tie_set_is_served_when_it_fits() {
        let mut rng = TieRng::from_seed_u64(4);
        let (cfg, style) = (AllocConfig::new(6), AveragingStyle::Jefferson);
        let out = allocate_highest_averages(style, &[5.0; 3], &cfg, &mut rng).unwrap();
        assert_eq!(out, vec![2, 2, 2]);
        assert_eq!(rng.words_consumed(), 0);
    }

    #[test]
    fn huntington_hill_lifts_minimum_to_one() {
        let out = ha(AveragingStyle::HuntingtonHill, &[1000.0, 1.0, 1.0], &AllocConfig::new(5));
        assert_eq!(out, vec![3, 1, 1]);
    }

    #[test]
    fn huntington_hill_rejections() {
        let mut rng = TieRng::default();
        assert_eq!(
            allocate_highest_averages(
                AveragingStyle::HuntingtonHill,
                &[1.0, 2.0],
                &AllocConfig::new(4).with_threshold(0.1),
                &mut rng
            ),
            Err(AllocError::ThresholdWithHuntingtonHill)
        );
        assert_eq!(
            allocate_highest_averages(
                AveragingStyle::HuntingtonHill,
                &[1.0, 2.0, 3.0],
                &AllocConfig::new(2),
                &mut rng
            ),
            Err(AllocError::TooFewSeatsForHuntingtonHill { groups: 3, total_alloc: 2 })
        );
    }

    #[test]
    fn zero_seats() {
        assert_eq!(ha(AveragingStyle::Webster, &[1.0, 2.0], &AllocConfig::new(0)), vec![0, 0]);
    }
}
