//! One entry point over both apportionment families.
//!
//! `Method` names a concrete rule (e.g. `LargestRemainder(Droop)`,
//! `HighestAverages(Webster)`); `apportion` routes to the family allocator.

use core::fmt;
use core::str::FromStr;

use seat_core::{AllocConfig, AveragingStyle, CoreError, QuotaStyle, TieRng};

use crate::allocation::{allocate_highest_averages, allocate_largest_remainder, AllocError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    LargestRemainder(QuotaStyle),
    HighestAverages(AveragingStyle),
}

/// Wire tokens of every method, largest remainder first.
pub const METHOD_TOKENS: &[&str] =
    &["hare", "droop", "hagenbach_bischoff", "jefferson", "webster", "huntington_hill"];

impl Method {
    pub fn apportion(
        self,
        shares: &[f64],
        cfg: &AllocConfig,
        rng: &mut TieRng,
    ) -> Result<Vec<u32>, AllocError> {
        match self {
            Method::LargestRemainder(q) => allocate_largest_remainder(q, shares, cfg, rng),
            Method::HighestAverages(s) => allocate_highest_averages(s, shares, cfg, rng),
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            Method::LargestRemainder(q) => q.token(),
            Method::HighestAverages(s) => s.token(),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Method {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<QuotaStyle>()
            .map(Method::LargestRemainder)
            .or_else(|_| s.parse::<AveragingStyle>().map(Method::HighestAverages))
            .map_err(|_| CoreError::UnknownChoice {
                kind: "apportionment method",
                got: s.trim().to_string(),
                valid: METHOD_TOKENS,
            })
    }
}
