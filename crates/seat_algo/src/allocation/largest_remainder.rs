//! Largest Remainder (Hamilton, Vinton, Hare–Niemeyer) allocation with
//! selectable quota (Hare, Droop, Hagenbach–Bischoff).
//!
//! Contract:
//! - Quota kinds (V = total shares, m = seats):
//!     * Hare:               V / m
//!     * Droop:              floor(V / (m + 1)) + 1
//!     * Hagenbach–Bischoff: V / (m + 1)
//! - Floors are trunc(v_i / q); remainders are the fractional parts.
//! - If sum_floors < seats → leftovers by largest remainder, with the exact
//!   ties at the last seat(s) resolved by the configured `TieBreak`.
//! - If sum_floors > seats (Hagenbach–Bischoff edge) → trim from smallest
//!   remainder (remainder ↑, raw share ↑, then index ↑).
//! - Threshold, minimum allocation and majority bonus as in `AllocConfig`.
//!
//! Output order is input order; `sum(result) == cfg.total_alloc`.

use seat_core::{AllocConfig, QuotaStyle, TieBreak, TieRng};

use super::bonus::apply_majority_bonus;
use super::common::{check_min_alloc, prepare, seat_sum, AllocError};
use super::ties::resolve_ties;

/// Apportion `cfg.total_alloc` seats over `shares` by largest remainder.
pub fn allocate_largest_remainder(
    quota: QuotaStyle,
    shares: &[f64],
    cfg: &AllocConfig,
    rng: &mut TieRng,
) -> Result<Vec<u32>, AllocError> {
    let shares = prepare(shares, cfg)?;
    let seats = cfg.total_alloc;
    if seats == 0 {
        return Ok(vec![0; shares.len()]);
    }

    let alloc = match cfg.effective_min_alloc() {
        None => {
            let q = compute_quota(quota, &shares, seats);
            let (floors, remainders) = floors_and_remainders(&shares, q);
            settle(floors, &remainders, seats, &shares, cfg.tie_break, rng)
        }
        Some(min_alloc) => with_min_alloc(quota, &shares, seats, min_alloc, cfg.tie_break, rng)?,
    };

    let alloc = if cfg.majority_bonus {
        apply_majority_bonus(&shares, alloc, seats, |others, reduced| {
            let sub = AllocConfig {
                total_alloc: reduced,
                majority_bonus: false,
                ..cfg.clone()
            };
            allocate_largest_remainder(quota, others, &sub, rng)
        })?
    } else {
        alloc
    };

    debug_assert_eq!(seat_sum(&alloc), u64::from(seats));
    Ok(alloc)
}

/// Minimum-allocation branch.
///
/// The unconstrained split is computed once. Each group's baseline is
/// `max(floor, min_alloc)` when those baselines fit in `seats`; the seats left
/// over are then handed out by the *original* remainders only. When they do
/// not fit, every group starts at the flat `min_alloc`, the quota is rerun for
/// the remaining seats, and its leftover again follows the original remainders.
fn with_min_alloc(
    quota: QuotaStyle,
    shares: &[f64],
    seats: u32,
    min_alloc: u32,
    tie_break: TieBreak,
    rng: &mut TieRng,
) -> Result<Vec<u32>, AllocError> {
    let n = shares.len();
    check_min_alloc(min_alloc, n, seats)?;

    let q = compute_quota(quota, shares, seats);
    let (floors, original_remainders) = floors_and_remainders(shares, q);

    let raised: Vec<u32> = floors.iter().map(|&f| f.max(min_alloc)).collect();
    let baseline = if seat_sum(&raised) <= u64::from(seats) {
        raised
    } else {
        vec![min_alloc; n]
    };

    // baseline sum ≤ seats on both branches
    let remaining = seats - seat_sum(&baseline) as u32;
    if remaining == 0 {
        return Ok(baseline);
    }

    let floors = if baseline.iter().all(|&b| b == min_alloc) {
        let q = compute_quota(quota, shares, remaining);
        floors_and_remainders(shares, q).0
    } else {
        vec![0; n]
    };

    let extra = settle(floors, &original_remainders, remaining, shares, tie_break, rng);
    Ok(extra.iter().zip(&baseline).map(|(e, b)| e + b).collect())
}

fn compute_quota(quota: QuotaStyle, shares: &[f64], seats: u32) -> f64 {
    let total: f64 = shares.iter().sum();
    let m = f64::from(seats);
    match quota {
        QuotaStyle::Hare => total / m,
        QuotaStyle::Droop => (total / (m + 1.0)).trunc() + 1.0,
        QuotaStyle::HagenbachBischoff => total / (m + 1.0),
    }
}

/// Integer and fractional parts of `v_i / q`.
fn floors_and_remainders(shares: &[f64], q: f64) -> (Vec<u32>, Vec<f64>) {
    shares
        .iter()
        .map(|&v| {
            let x = v / q;
            // `as` saturates
            (x.trunc() as u32, x.fract())
        })
        .unzip()
}

/// Bring `floors` to exactly `seats` using the remainder ranking.
fn settle(
    mut alloc: Vec<u32>,
    remainders: &[f64],
    seats: u32,
    shares: &[f64],
    tie_break: TieBreak,
    rng: &mut TieRng,
) -> Vec<u32> {
    let sum_floors = seat_sum(&alloc);
    let target = u64::from(seats);
    if sum_floors < target {
        let extra = (target - sum_floors) as usize;
        distribute_leftovers(extra, &mut alloc, remainders, shares, tie_break, rng);
    } else if sum_floors > target {
        trim_over_allocation(target, &mut alloc, remainders, shares);
    }
    alloc
}

/// Assign `extra` seats by largest remainder. Groups strictly above the
/// cut-off remainder are served first; the exact ties at the cut-off share
/// what is left through `resolve_ties`.
fn distribute_leftovers(
    extra: usize,
    alloc: &mut [u32],
    remainders: &[f64],
    shares: &[f64],
    tie_break: TieBreak,
    rng: &mut TieRng,
) {
    // Zero-share groups (including those cut by the threshold) never take a
    // leftover seat.
    let mut ranking: Vec<usize> = (0..alloc.len()).filter(|&i| shares[i] > 0.0).collect();
    let n = ranking.len();
    if extra == 0 || n == 0 {
        return;
    }

    // Degenerate quotas: whole rounds for every eligible group before ranking.
    let rounds = (extra / n) as u32;
    if rounds > 0 {
        ranking.iter().for_each(|&i| alloc[i] += rounds);
    }
    let extra = extra % n;
    if extra == 0 {
        return;
    }

    ranking.sort_by(|&a, &b| remainders[b].total_cmp(&remainders[a]).then(a.cmp(&b)));

    let cutoff = remainders[ranking[extra - 1]];
    let above: Vec<usize> = ranking.iter().copied().filter(|&i| remainders[i] > cutoff).collect();
    let tied: Vec<usize> = ranking.iter().copied().filter(|&i| remainders[i] == cutoff).collect();
    let winners = resolve_ties(&tied, extra - above.len(), shares, tie_break, rng);

    for i in above.into_iter().chain(winners) {
        alloc[i] += 1;
    }
}

/// Remove seats when floors over-allocate, using inverse LR ranking:
/// remainder ↑, raw share ↑, then index ↑.
fn trim_over_allocation(target: u64, alloc: &mut [u32], remainders: &[f64], shares: &[f64]) {
    let mut total = seat_sum(alloc);

    let mut ranking: Vec<usize> = (0..alloc.len()).filter(|&i| alloc[i] > 0).collect();
    ranking.sort_by(|&a, &b| {
        remainders[a]
            .total_cmp(&remainders[b])
            .then(shares[a].total_cmp(&shares[b]))
            .then(a.cmp(&b))
    });
    if ranking.is_empty() {
        return;
    }

    let mut idx = 0usize;
    while total > target {
        let i = ranking[idx];
        if alloc[i] > 0 {
            alloc[i] -= 1;
            total -= 1;
        }
        idx = (idx + 1) % ranking.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lr(quota: QuotaStyle, shares: &[f64], cfg: &AllocConfig) -> Vec<u32> {
        allocate_largest_remainder(quota, shares, cfg, &mut TieRng::from_seed_u64(0)).unwrap()
    }

    #[test]
    fn quotas_match_their_formulas() {
        let shares = [600.0, 400.0];
        assert_eq!(compute_quota(QuotaStyle::Hare, &shares, 4), 250.0);
        assert_eq!(compute_quota(QuotaStyle::Droop, &shares, 4), 201.0);
        assert_eq!(compute_quota(QuotaStyle::HagenbachBischoff, &shares, 4), 200.0);
    }

    #[test]
    fn leftovers_follow_remainders() {
        // Hare quota 10: floors [4, 3, 1], remainders [.1, .5, .4]
        assert_eq!(lr(QuotaStyle::Hare, &[41.0, 35.0, 14.0], &AllocConfig::new(9)), vec![4, 4, 1]);
    }

    #[test]
    fn zero_seats_gives_zero_vector() {
        assert_eq!(lr(QuotaStyle::Droop, &[3.0, 2.0], &AllocConfig::new(0)), vec![0, 0]);
    }

    #[test]
    fn hagenbach_bischoff_over_allocation_is_trimmed() {
        // q = 30 / 3 = 10, floors [1, 1, 1] = 3 > 2 seats, all remainders zero.
        let out = lr(QuotaStyle::HagenbachBischoff, &[10.0, 10.0, 10.0], &AllocConfig::new(2));
        assert_eq!(out, vec![0, 1, 1]);
    }

    #[test]
    fn min_alloc_fitting_baseline_uses_original_remainders() {
        // Hare q = 10: floors [7, 2, 0], remainders [.5, .6, .9].
        // Plain LR gives [7, 3, 1]; raised [7, 2, 1] leaves one seat, which goes by .9.
        assert_eq!(lr(QuotaStyle::Hare, &[75.0, 26.0, 9.0], &AllocConfig::new(11)), vec![7, 3, 1]);
        let cfg = AllocConfig::new(11).with_min_alloc(1);
        assert_eq!(lr(QuotaStyle::Hare, &[75.0, 26.0, 9.0], &cfg), vec![7, 2, 2]);
    }

    #[test]
    fn min_alloc_flat_baseline_reruns_quota() {
        // floors [9, 0, 0] raised to [9, 3, 3] = 15 > 10 → flat [3, 3, 3], one seat left.
        let cfg = AllocConfig::new(10).with_min_alloc(3);
        assert_eq!(lr(QuotaStyle::Hare, &[100.0, 1.0, 1.0], &cfg), vec![4, 3, 3]);
    }

    #[test]
    fn min_alloc_infeasible() {
        let cfg = AllocConfig::new(5).with_min_alloc(2);
        let mut rng = TieRng::default();
        assert_eq!(
            allocate_largest_remainder(QuotaStyle::Hare, &[1.0, 1.0, 1.0], &cfg, &mut rng),
            Err(AllocError::MinAllocExceedsTotal { min_alloc: 2, groups: 3, total_alloc: 5 })
        );
    }

    #[test]
    fn majority_tie_break_uses_larger_share() {
        // Hare q = 10: equal remainders at the last seat; equal shares draw at random.
        let out = lr(QuotaStyle::Hare, &[15.0, 15.0, 0.0], &AllocConfig::new(3));
        assert_eq!(out.iter().sum::<u32>(), 3);
        assert!(out == vec![2, 1, 0] || out == vec![1, 2, 0]);

        // floors [2, 0, 0], remainders [.5, .5, 0]; the larger share wins.
        let out = lr(QuotaStyle::Hare, &[25.0, 5.0, 0.0], &AllocConfig::new(3));
        assert_eq!(out, vec![3, 0, 0]);
    }

    #[test]
    fn degenerate_droop_skips_groups_below_threshold() {
        // q = 1 after the threshold drops group 1: 200 leftover seats, all to group 0.
        let cfg = AllocConfig::new(300).with_threshold(0.1);
        assert_eq!(lr(QuotaStyle::Droop, &[100.0, 5.0], &cfg), vec![300, 0]);

        let cfg = AllocConfig::new(10).with_threshold(0.25);
        assert_eq!(lr(QuotaStyle::Droop, &[0.5, 0.3, 0.2], &cfg), vec![5, 5, 0]);
    }

    #[test]
    fn zero_shares_take_no_leftover_rounds() {
        assert_eq!(lr(QuotaStyle::Droop, &[10.0, 0.0, 0.0], &AllocConfig::new(40)), vec![40, 0, 0]);

        // floors [10, 10, 0], 21 leftovers: 10 rounds, then one seat drawn between 0 and 1
        for seed in 0..16 {
            let cfg = AllocConfig::new(41).with_tie_break(TieBreak::Random);
            let out = allocate_largest_remainder(
                QuotaStyle::Droop,
                &[10.0, 10.0, 0.0],
                &cfg,
                &mut TieRng::from_seed_u64(seed),
            )
            .unwrap();
            assert_eq!(out[2], 0, "seed {seed}");
            assert_eq!(out.iter().sum::<u32>(), 41);
        }
    }
}
