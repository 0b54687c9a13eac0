//! Quota rule: every group holds `floor(ideal)` or `ceil(ideal)` seats.

use std::collections::BTreeMap;

use seat_core::shares;
use tracing::info;

use super::CheckError;
use crate::metrics::ratios::ideal_share;

/// Outcome of [`quota_condition`]. Failures map group index to `(share, seats)`.
#[derive(Clone, Debug, PartialEq)]
pub enum QuotaReport {
    Pass,
    Fail(BTreeMap<usize, (f64, u32)>),
}

impl QuotaReport {
    pub fn is_pass(&self) -> bool {
        matches!(self, QuotaReport::Pass)
    }
}

pub fn quota_condition(shares_in: &[f64], seats: &[u32]) -> Result<QuotaReport, CheckError> {
    if shares_in.len() != seats.len() {
        return Err(CheckError::LengthMismatch { shares: shares_in.len(), seats: seats.len() });
    }
    let total_shares = shares::total(shares_in);
    let total_seats = seats.iter().map(|&s| u64::from(s)).sum::<u64>() as u32;

    let failures: BTreeMap<usize, (f64, u32)> = shares_in
        .iter()
        .zip(seats)
        .enumerate()
        .filter(|&(_, (&s, &seat))| {
            let ideal = ideal_share(s, total_shares, total_seats);
            let seat = f64::from(seat);
            !(ideal.floor() <= seat && seat <= ideal.ceil())
        })
        .map(|(i, (&s, &seat))| (i, (s, seat)))
        .collect();

    let passed = failures.is_empty();
    info!(passed, "quota condition");
    Ok(if passed { QuotaReport::Pass } else { QuotaReport::Fail(failures) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_floor_and_ceiling() {
        // ideal [4.5, 2.5, 1.0]
        assert!(quota_condition(&[36.0, 20.0, 8.0], &[5, 2, 1]).unwrap().is_pass());
        assert!(quota_condition(&[36.0, 20.0, 8.0], &[4, 3, 1]).unwrap().is_pass());
    }

    #[test]
    fn reports_offenders_only() {
        // ideal [4.5, 2.5, 1.0]
        let report = quota_condition(&[36.0, 20.0, 8.0], &[6, 1, 1]).unwrap();
        let expected = BTreeMap::from([(0, (36.0, 6)), (1, (20.0, 1))]);
        assert_eq!(report, QuotaReport::Fail(expected));
    }

    #[test]
    fn lengths_must_match() {
        assert_eq!(
            quota_condition(&[1.0], &[1, 2]),
            Err(CheckError::LengthMismatch { shares: 1, seats: 2 })
        );
    }
}
