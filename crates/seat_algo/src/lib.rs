// crates/seat_algo/src/lib.rs
//! seat_algo: apportionment methods, fairness metrics and validity checks.
//!
//! Every allocator takes the shares in caller order, an `AllocConfig` and an
//! explicit `&mut TieRng`, and returns one seat count per share summing to
//! `cfg.total_alloc`.

#![forbid(unsafe_code)]

pub use seat_core::{AllocConfig, TieRng};

// ----------------------------- Allocation (public surface) ---------------------------

pub mod allocation {
    // Shared pre-flight, tie chain and bonus rule
    pub mod common;
    mod bonus;
    mod ties;

    // File modules (actual implementations)
    pub mod highest_averages;
    pub mod largest_remainder;

    pub use common::AllocError;
    pub use highest_averages::allocate_highest_averages;
    pub use largest_remainder::allocate_largest_remainder;
}

pub mod method;

// ----------------------------- Metrics ----------------------------------------------

pub mod metrics {
    use seat_core::{DisprMetric, DivMetric};
    use thiserror::Error;

    pub mod disproportionality;
    pub mod diversity;
    pub mod ratios;

    pub use disproportionality::dispr_index;
    pub use diversity::{div_index, effective_number_of_groups};
    pub use ratios::{
        alloc_to_share_ratio, ideal_share, rep_weight, sqr_alloc_to_share_error,
        sqr_rep_weight_error, total_alloc_to_share_error, total_rep_weight_error,
    };

    #[derive(Clone, Debug, PartialEq, Error)]
    pub enum MetricError {
        #[error("{shares} shares but {allocations} allocations")]
        LengthMismatch { shares: usize, allocations: usize },

        #[error("{metric} needs an order q")]
        MissingOrder { metric: DivMetric },

        #[error("{metric} is undefined for order q = {q}")]
        InvalidOrder { metric: DivMetric, q: f64 },

        #[error("{metric} is not implemented")]
        Unsupported { metric: DisprMetric },
    }

    impl MetricError {
        pub(crate) fn check_lengths(shares: usize, allocations: usize) -> Result<(), MetricError> {
            if shares != allocations {
                return Err(MetricError::LengthMismatch { shares, allocations });
            }
            Ok(())
        }
    }
}

// ----------------------------- Checks -----------------------------------------------

pub mod checks {
    use thiserror::Error;

    pub mod consistency;
    pub mod quota;

    pub use consistency::{consistency_condition, Column, ColumnKind, ConsistencyReport, FailTable};
    pub use quota::{quota_condition, QuotaReport};

    #[derive(Clone, Debug, PartialEq, Eq, Error)]
    pub enum CheckError {
        #[error("{shares} shares but {seats} seat counts")]
        LengthMismatch { shares: usize, seats: usize },

        /// `(rows, columns)` of each matrix.
        #[error("share matrix is {shares:?} but seat matrix is {seats:?}")]
        ShapeMismatch { shares: (usize, usize), seats: (usize, usize) },

        #[error("row {row} has {got} columns, expected {expected}")]
        Ragged { row: usize, expected: usize, got: usize },

        #[error("share_monotony needs the share matrix")]
        MissingShares,
    }
}

// Convenience re-exports
pub use allocation::{allocate_highest_averages, allocate_largest_remainder, AllocError};
pub use checks::{
    consistency_condition, quota_condition, CheckError, ConsistencyReport, QuotaReport,
};
pub use method::Method;
pub use metrics::{dispr_index, div_index, effective_number_of_groups, MetricError};
