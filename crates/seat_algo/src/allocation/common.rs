//! Shared pre-flight for both apportionment families: error type, share
//! validation, entry threshold, and the minimum-allocation feasibility check.

use seat_core::{shares, AllocConfig, CoreError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("no shares supplied")]
    EmptyShares,

    /// Shares must be finite and non-negative.
    #[error("share {index} is invalid: {value}")]
    InvalidShare { index: usize, value: f64 },

    /// After thresholding every share is zero while seats > 0.
    #[error("no group has a positive share to apportion {total_alloc} seats over")]
    NoEligibleShares { total_alloc: u32 },

    #[error("minimum allocation {min_alloc} for {groups} groups exceeds {total_alloc} seats")]
    MinAllocExceedsTotal { min_alloc: u32, groups: usize, total_alloc: u32 },

    #[error("huntington_hill gives every group a seat and cannot take an entry threshold")]
    ThresholdWithHuntingtonHill,

    #[error("huntington_hill needs a seat per group: {groups} groups, {total_alloc} seats")]
    TooFewSeatsForHuntingtonHill { groups: usize, total_alloc: u32 },
}

/// Validate config and shares, then apply the entry threshold.
/// Returns the (possibly zeroed) shares the method should work on.
pub(crate) fn prepare(shares_in: &[f64], cfg: &AllocConfig) -> Result<Vec<f64>, AllocError> {
    cfg.validate()?;
    if shares_in.is_empty() {
        return Err(AllocError::EmptyShares);
    }
    if let Some((index, &value)) = shares_in
        .iter()
        .enumerate()
        .find(|(_, s)| !s.is_finite() || **s < 0.0)
    {
        return Err(AllocError::InvalidShare { index, value });
    }

    let out = match cfg.alloc_threshold {
        Some(t) => apply_threshold(shares_in, t),
        None => shares_in.to_vec(),
    };

    if cfg.total_alloc > 0 && shares::total(&out) <= 0.0 {
        return Err(AllocError::NoEligibleShares { total_alloc: cfg.total_alloc });
    }
    Ok(out)
}

/// Zero every share whose fraction of the total does not exceed `threshold`.
pub(crate) fn apply_threshold(shares_in: &[f64], threshold: f64) -> Vec<f64> {
    let total = shares::total(shares_in);
    shares_in
        .iter()
        .map(|&s| if s / total > threshold { s } else { 0.0 })
        .collect()
}

/// `min_alloc * groups <= total_alloc`, widened to avoid overflow.
pub(crate) fn check_min_alloc(
    min_alloc: u32,
    groups: usize,
    total_alloc: u32,
) -> Result<(), AllocError> {
    if u64::from(min_alloc) * groups as u64 > u64::from(total_alloc) {
        return Err(AllocError::MinAllocExceedsTotal { min_alloc, groups, total_alloc });
    }
    Ok(())
}

#[inline]
pub(crate) fn seat_sum(alloc: &[u32]) -> u64 {
    alloc.iter().map(|&a| u64::from(a)).sum()
}
