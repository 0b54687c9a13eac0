//! Share normalizer and list-shaping helpers.

use crate::errors::CoreError;

/// Sum of raw shares.
#[inline]
pub fn total(shares: &[f64]) -> f64 {
    shares.iter().sum()
}

/// Proportions of the total, in input order. A zero total yields `NaN`s.
pub fn normalize(shares: &[f64]) -> Vec<f64> {
    let t = total(shares);
    shares.iter().map(|&s| s / t).collect()
}

/// Proportions of integer allocations.
pub fn normalize_alloc(allocations: &[u32]) -> Vec<f64> {
    let t: f64 = allocations.iter().map(|&a| f64::from(a)).sum();
    allocations.iter().map(|&a| f64::from(a) / t).collect()
}

/// Split `list` into consecutive sublists whose lengths are given by `structure`.
pub fn gen_list_of_lists<T: Clone>(
    list: &[T],
    structure: &[usize],
) -> Result<Vec<Vec<T>>, CoreError> {
    let expected: usize = structure.iter().sum();
    if expected != list.len() {
        return Err(CoreError::StructureMismatch { expected, got: list.len() });
    }
    let mut out = Vec::with_capacity(structure.len());
    let mut start = 0;
    for &len in structure {
        out.push(list[start..start + len].to_vec());
        start += len;
    }
    Ok(out)
}

/// Regroup `list` into faction sublists; `faction_indexes[f]` names the
/// positions of `list` that belong to faction `f`, in output order.
pub fn gen_faction_groups<T: Clone>(
    list: &[T],
    faction_indexes: &[Vec<usize>],
) -> Result<Vec<Vec<T>>, CoreError> {
    faction_indexes
        .iter()
        .map(|faction| {
            faction
                .iter()
                .map(|&i| {
                    list.get(i)
                        .cloned()
                        .ok_or(CoreError::IndexOutOfRange { index: i, len: list.len() })
                })
                .collect()
        })
        .collect()
}
