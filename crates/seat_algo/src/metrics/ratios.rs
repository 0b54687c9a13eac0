//! Per-group representation ratios and their aggregate squared errors.
//!
//! Zero denominators are not guarded: a zero share or a zero allocation
//! yields `inf`/`NaN` exactly as IEEE-754 division does.

use seat_core::shares;

use super::MetricError;

/// Seats a group would hold under exact proportionality.
#[inline]
pub fn ideal_share(share: f64, total_shares: f64, total_alloc: u32) -> f64 {
    share / total_shares * f64::from(total_alloc)
}

/// Seat fraction over share fraction; 1.0 is exact proportionality.
#[inline]
pub fn alloc_to_share_ratio(
    share: f64,
    total_shares: f64,
    allocation: u32,
    total_alloc: u32,
) -> f64 {
    (f64::from(allocation) / f64::from(total_alloc)) / (share / total_shares)
}

pub fn sqr_alloc_to_share_error(
    share: f64,
    total_shares: f64,
    allocation: u32,
    total_alloc: u32,
) -> f64 {
    (alloc_to_share_ratio(share, total_shares, allocation, total_alloc) - 1.0).powi(2)
}

/// Sum of squared ratio errors, weighted by share fraction when `proportional`.
pub fn total_alloc_to_share_error(
    shares_in: &[f64],
    allocations: &[u32],
    proportional: bool,
) -> Result<f64, MetricError> {
    aggregate(shares_in, allocations, proportional, sqr_alloc_to_share_error)
}

/// Shares represented per seat.
#[inline]
pub fn rep_weight(share: f64, allocation: u32) -> f64 {
    share / f64::from(allocation)
}

/// Squared distance of a group's weight from the overall shares-per-seat.
pub fn sqr_rep_weight_error(
    share: f64,
    total_shares: f64,
    allocation: u32,
    total_alloc: u32,
) -> f64 {
    (rep_weight(share, allocation) - total_shares / f64::from(total_alloc)).powi(2)
}

pub fn total_rep_weight_error(
    shares_in: &[f64],
    allocations: &[u32],
    proportional: bool,
) -> Result<f64, MetricError> {
    aggregate(shares_in, allocations, proportional, sqr_rep_weight_error)
}

fn aggregate(
    shares_in: &[f64],
    allocations: &[u32],
    proportional: bool,
    per_group: fn(f64, f64, u32, u32) -> f64,
) -> Result<f64, MetricError> {
    MetricError::check_lengths(shares_in.len(), allocations.len())?;
    let total_shares = shares::total(shares_in);
    // Seat totals are summed wide; a u32 sum is enough for any real assembly.
    let total_alloc = allocations.iter().map(|&a| u64::from(a)).sum::<u64>() as u32;

    Ok(shares_in
        .iter()
        .zip(allocations)
        .map(|(&s, &a)| {
            let err = per_group(s, total_shares, a, total_alloc);
            if proportional {
                s / total_shares * err
            } else {
                err
            }
        })
        .sum())
}
