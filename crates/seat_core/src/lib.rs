//! seat_core: Core domains, configuration, share helpers, and tie RNG.
//!
//! This crate is **I/O-free**. It defines the stable types used by
//! `seat_algo`:
//!
//! - Named-choice domains: `QuotaStyle`, `AveragingStyle`, `TieBreak`,
//!   `DivMetric`, `GroupsMetric`, `DisprMetric`, `CheckType`
//! - Per-call configuration: `AllocConfig` (validated, JSON-loadable)
//! - Share normalizer and list-shaping helpers
//! - Seedable RNG (ChaCha20) for **ties only**

#![forbid(unsafe_code)]

pub mod errors {
    use thiserror::Error;

    /// Error set for configuration domains, parsing, and share shaping.
    #[derive(Clone, Debug, PartialEq, Error)]
    pub enum CoreError {
        /// A named choice (quota, averaging style, metric, check type) was not recognised.
        #[error("'{got}' is not a valid {kind}; choose from: {}", .valid.join(", "))]
        UnknownChoice {
            kind: &'static str,
            got: String,
            valid: &'static [&'static str],
        },

        #[error("an entry threshold and a minimum allocation cannot both be set")]
        ThresholdWithMinAlloc,

        #[error("domain out of range: {field} = {value}")]
        DomainOutOfRange { field: &'static str, value: String },

        #[error("structure sums to {expected} elements but the list has {got}")]
        StructureMismatch { expected: usize, got: usize },

        #[error("index {index} out of range for list of length {len}")]
        IndexOutOfRange { index: usize, len: usize },

        #[error("invalid config json: {0}")]
        Json(String),
    }
}

pub mod rng;
pub mod shares;
pub mod variables;

pub use errors::CoreError;
pub use rng::TieRng;
pub use variables::{
    AllocConfig, AveragingStyle, CheckType, DisprMetric, DivMetric, GroupsMetric, QuotaStyle,
    TieBreak,
};
