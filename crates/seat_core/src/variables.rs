//! variables.rs
//! Canonical named-choice domains and the per-call `AllocConfig`.
//!
//! Every named choice is a `Copy` enum with an explicit wire token. Parsing
//! accepts the wire token plus the display names used in the literature
//! (e.g. `"Hagenbach–Bischoff"`, `"Sainte-Laguë"`); an unknown name fails with
//! `CoreError::UnknownChoice` listing the wire tokens.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CoreError;
use crate::rng::TieRng;

// ------------ Macros ------------

/// Define a serde'd enum with explicit wire tokens and accepted aliases.
macro_rules! serde_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) => {
            $($variant:ident = $token:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $token $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            /// Wire tokens, in declaration order.
            pub const TOKENS: &'static [&'static str] = &[$($token),+];

            pub const fn token(self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($token $(| $alias)* => Ok($name::$variant),)+
                    other => Err(CoreError::UnknownChoice {
                        kind: $kind,
                        got: other.to_string(),
                        valid: Self::TOKENS,
                    }),
                }
            }
        }
    };
}

// ------------ Canonical enums (wire tokens explicit) ------------

serde_enum! {
    /// Largest-remainder quota.
    QuotaStyle ("quota style") => {
        Hare              = "hare" | "Hare" | "hamilton" | "Hamilton",
        Droop             = "droop" | "Droop",
        HagenbachBischoff = "hagenbach_bischoff" | "Hagenbach–Bischoff" | "Hagenbach-Bischoff",
    }
}

serde_enum! {
    /// Highest-averages divisor family (US naming, European aliases accepted).
    AveragingStyle ("averaging style") => {
        Jefferson      = "jefferson" | "Jefferson" | "dhondt" | "d'Hondt" | "D'Hondt" | "d’Hondt",
        Webster        = "webster" | "Webster" | "sainte_lague" | "Sainte-Laguë" | "Sainte-Lague",
        HuntingtonHill = "huntington_hill" | "Huntington-Hill"
                       | "equal_proportions" | "Equal Proportions",
    }
}

serde_enum! {
    /// How the last seat(s) are awarded when candidates are exactly tied.
    TieBreak ("tie break") => {
        Majority = "majority",
        Random   = "random",
    }
}

serde_enum! {
    /// Diversity index over normalized shares.
    DivMetric ("diversity metric") => {
        Shannon      = "shannon" | "Shannon",
        Renyi        = "renyi" | "Renyi" | "Rényi",
        Simpson      = "simpson" | "Simpson",
        GiniSimpson  = "gini_simpson" | "Gini-Simpson",
        BergerParker = "berger_parker" | "Berger-Parker",
        Effective    = "effective" | "Effective",
    }
}

serde_enum! {
    /// Effective number of groups.
    GroupsMetric ("effective groups metric") => {
        LaaksoTaagepera = "laakso_taagepera" | "Laakso-Taagepera",
        Golosov         = "golosov" | "Golosov",
        InverseSimpson  = "inverse_simpson" | "Inverse-Simpson",
    }
}

serde_enum! {
    /// Disproportionality index between shares and allocations.
    DisprMetric ("disproportionality metric") => {
        Gallagher      = "gallagher" | "Gallagher",
        LoosemoreHanby = "loosemore_hanby" | "Loosemore–Hanby" | "Loosemore-Hanby",
        Rose           = "rose" | "Rose",
        Rae            = "rae" | "Rae",
        SainteLague    = "sainte_lague" | "Sainte-Laguë" | "Sainte-Lague",
        DHondt         = "dhondt" | "d’Hondt" | "d'Hondt" | "dHondt",
        CoxShugart     = "cox_shugart" | "Cox-Shugart",
        Gini           = "gini" | "Gini",
    }
}

serde_enum! {
    /// Monotonicity test run by the consistency check.
    CheckType ("check type") => {
        SeatMonotony  = "seat_monotony",
        ShareMonotony = "share_monotony",
    }
}

// ------------ Per-call configuration ------------

/// Configuration for one apportionment call.
///
/// `alloc_threshold` and `min_alloc` are mutually exclusive. `modifier` only
/// affects highest-averages methods. `tie_seed` pins the tie RNG; when absent
/// `tie_rng()` draws a seed from the OS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllocConfig {
    pub total_alloc: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alloc_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_alloc: Option<u32>,
    pub tie_break: TieBreak,
    pub majority_bonus: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tie_seed: Option<u64>,
}

impl Default for AllocConfig {
    fn default() -> Self {
        Self {
            total_alloc: 0,
            alloc_threshold: None,
            min_alloc: None,
            tie_break: TieBreak::Majority,
            majority_bonus: false,
            modifier: None,
            tie_seed: None,
        }
    }
}

impl AllocConfig {
    pub fn new(total_alloc: u32) -> Self {
        Self { total_alloc, ..Self::default() }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.alloc_threshold = Some(threshold);
        self
    }

    pub fn with_min_alloc(mut self, min_alloc: u32) -> Self {
        self.min_alloc = Some(min_alloc);
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_majority_bonus(mut self, on: bool) -> Self {
        self.majority_bonus = on;
        self
    }

    pub fn with_modifier(mut self, modifier: f64) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn with_tie_seed(mut self, seed: u64) -> Self {
        self.tie_seed = Some(seed);
        self
    }

    /// Minimum allocation, with `Some(0)` folded into `None`.
    pub fn effective_min_alloc(&self) -> Option<u32> {
        self.min_alloc.filter(|&m| m > 0)
    }

    /// Validate domains and cross-field consistency.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.alloc_threshold.is_some() && self.min_alloc.is_some() {
            return Err(CoreError::ThresholdWithMinAlloc);
        }
        if let Some(t) = self.alloc_threshold {
            if !t.is_finite() || !(0.0..1.0).contains(&t) {
                return Err(CoreError::DomainOutOfRange {
                    field: "alloc_threshold",
                    value: t.to_string(),
                });
            }
        }
        if let Some(m) = self.modifier {
            if !m.is_finite() || m <= 0.0 {
                return Err(CoreError::DomainOutOfRange {
                    field: "modifier",
                    value: m.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(s: &str) -> Result<Self, CoreError> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| CoreError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Tie RNG for this call: seeded when `tie_seed` is set.
    #[cfg(feature = "entropy")]
    pub fn tie_rng(&self) -> TieRng {
        match self.tie_seed {
            Some(seed) => TieRng::from_seed_u64(seed),
            None => {
                debug!("no tie_seed configured; seeding tie rng from os entropy");
                TieRng::from_entropy()
            }
        }
    }

    #[cfg(not(feature = "entropy"))]
    pub fn tie_rng(&self) -> TieRng {
        if self.tie_seed.is_none() {
            debug!("no tie_seed configured and entropy disabled; using seed 0");
        }
        TieRng::from_seed_u64(self.tie_seed.unwrap_or(0))
    }
}
