//! Majority bonus: a unique plurality leader that won fewer than half the
//! seats is lifted to `ceil(total / 2)`; the other groups are re-apportioned
//! over what remains and the leader is spliced back in at its index.

use tracing::debug;

use super::common::AllocError;

/// `reapportion(others, seats)` must run the same method with the bonus off.
pub(crate) fn apply_majority_bonus<F>(
    shares: &[f64],
    alloc: Vec<u32>,
    total_alloc: u32,
    reapportion: F,
) -> Result<Vec<u32>, AllocError>
where
    F: FnOnce(&[f64], u32) -> Result<Vec<u32>, AllocError>,
{
    let max = shares.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut leaders = shares.iter().enumerate().filter(|&(_, &s)| s == max);
    let (lead, _) = match (leaders.next(), leaders.next()) {
        (Some(first), None) => first,
        _ => return Ok(alloc), // no unique leader
    };

    let forced = total_alloc.div_ceil(2);
    if alloc[lead] >= forced {
        return Ok(alloc);
    }

    debug!(lead, had = alloc[lead], forced, "applying majority bonus");
    let others: Vec<f64> = shares
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != lead)
        .map(|(_, &s)| s)
        .collect();
    let mut rest = reapportion(&others, total_alloc - forced)?;
    rest.insert(lead, forced);
    Ok(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leader_with_half_is_untouched() {
        let out = apply_majority_bonus(&[5.0, 3.0, 2.0], vec![5, 3, 2], 10, |_, _| {
            unreachable!("no re-apportionment expected")
        })
        .unwrap();
        assert_eq!(out, vec![5, 3, 2]);
    }

    #[test]
    fn tied_leaders_get_no_bonus() {
        let out = apply_majority_bonus(&[4.0, 4.0, 2.0], vec![2, 2, 1], 5, |_, _| unreachable!())
            .unwrap();
        assert_eq!(out, vec![2, 2, 1]);
    }

    #[test]
    fn leader_is_spliced_at_its_index() {
        let out = apply_majority_bonus(&[2.0, 6.0, 1.0, 1.0], vec![2, 4, 2, 1], 9, |others, seats| {
            assert_eq!(others, &[2.0, 1.0, 1.0]);
            assert_eq!(seats, 4);
            Ok(vec![2, 1, 1])
        })
        .unwrap();
        assert_eq!(out, vec![2, 5, 1, 1]);
    }
}
