//! Tie-break chain shared by largest remainder and highest averages.
//!
//! - `Majority`: rank the tied groups by raw share (desc). Seats go to the
//!   largest shares; if the seat boundary cuts through a run of equal shares,
//!   the winners within that run are drawn from the `TieRng`.
//! - `Random`: winners drawn uniformly from the whole tie set.
//!
//! The RNG is consumed only when a random draw actually decides something.

use seat_core::{TieBreak, TieRng};
use tracing::debug;

/// Choose `k` winners among `tied` (indices into `shares`).
/// Returns every tied index when `k >= tied.len()`.
pub(crate) fn resolve_ties(
    tied: &[usize],
    k: usize,
    shares: &[f64],
    policy: TieBreak,
    rng: &mut TieRng,
) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }
    if k >= tied.len() {
        return tied.to_vec();
    }

    let winners = match policy {
        TieBreak::Random => rng.choose_k(tied, k),
        TieBreak::Majority => {
            let mut ranked = tied.to_vec();
            // share desc; index asc keeps the ranking stable
            ranked.sort_by(|&a, &b| shares[b].total_cmp(&shares[a]).then(a.cmp(&b)));

            let boundary = shares[ranked[k - 1]];
            let mut winners: Vec<usize> =
                ranked.iter().copied().filter(|&i| shares[i] > boundary).collect();
            let run: Vec<usize> =
                ranked.iter().copied().filter(|&i| shares[i] == boundary).collect();
            let need = k - winners.len();

            if run.len() == need {
                winners.extend(run);
            } else {
                debug!(?run, need, "equal shares at the seat boundary; drawing at random");
                winners.extend(rng.choose_k(&run, need));
            }
            winners
        }
    };

    debug!(?tied, k, ?policy, ?winners, "tie resolved");
    winners
}
