//! Monotonicity across allocation scenarios.
//!
//! Inputs are matrices indexed `[group][scenario]`: every row is one group,
//! every column one scenario (a different seat total or vote variant).
//!
//! Contract:
//! - `SeatMonotony`: scenarios are ordered by seat total (stable). Along that
//!   order no group may lose seats, including between equal totals.
//! - `ShareMonotony`: for every ordered pair of scenarios, a group whose share
//!   strictly grows may not hold strictly fewer seats.
//! - The violation set is built first; the fail table is a projection of it
//!   onto the rows and scenarios that take part in at least one violation.

use std::collections::BTreeSet;

use seat_core::CheckType;
use tracing::info;

use super::CheckError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Share,
    Seat,
}

/// One column of a [`FailTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub scenario: usize,
    pub kind: ColumnKind,
}

/// Offending sub-matrix. `values[r][c]` belongs to group `rows[r]` and
/// column `columns[c]`.
#[derive(Clone, Debug, PartialEq)]
pub struct FailTable {
    pub rows: Vec<usize>,
    pub columns: Vec<Column>,
    pub values: Vec<Vec<f64>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConsistencyReport {
    Pass,
    Fail(FailTable),
}

impl ConsistencyReport {
    pub fn is_pass(&self) -> bool {
        matches!(self, ConsistencyReport::Pass)
    }
}

/// A violating `(group, earlier scenario, later scenario)` triple.
type Violation = (usize, usize, usize);

/// `shares` is only read by `ShareMonotony` and may be `None` otherwise.
pub fn consistency_condition(
    shares: Option<&[Vec<f64>]>,
    seats: &[Vec<u32>],
    check: CheckType,
) -> Result<ConsistencyReport, CheckError> {
    let cols = matrix_width(seats)?;
    if let Some(shares) = shares {
        let share_cols = matrix_width(shares)?;
        if (shares.len(), share_cols) != (seats.len(), cols) {
            return Err(CheckError::ShapeMismatch {
                shares: (shares.len(), share_cols),
                seats: (seats.len(), cols),
            });
        }
    }

    let report = match check {
        CheckType::SeatMonotony => seat_monotony(seats, cols),
        CheckType::ShareMonotony => {
            let shares = shares.ok_or(CheckError::MissingShares)?;
            share_monotony(shares, seats, cols)
        }
    };
    info!(%check, passed = report.is_pass(), "consistency condition");
    Ok(report)
}

fn seat_monotony(seats: &[Vec<u32>], cols: usize) -> ConsistencyReport {
    let totals: Vec<u64> = (0..cols)
        .map(|c| seats.iter().map(|row| u64::from(row[c])).sum())
        .collect();
    let mut order: Vec<usize> = (0..cols).collect();
    order.sort_by_key(|&c| totals[c]);

    let order = &order;
    let violations: Vec<Violation> = (0..seats.len())
        .flat_map(move |r| {
            (0..cols).flat_map(move |i| {
                (i + 1..cols).filter_map(move |j| {
                    let (a, b) = (order[i], order[j]);
                    (seats[r][a] > seats[r][b]).then_some((r, a, b))
                })
            })
        })
        .collect();
    if violations.is_empty() {
        return ConsistencyReport::Pass;
    }

    let rows = distinct(violations.iter().map(|&(r, _, _)| r));
    let involved: BTreeSet<usize> = violations.iter().flat_map(|&(_, a, b)| [a, b]).collect();
    let columns: Vec<Column> = order
        .iter()
        .filter(|&&c| involved.contains(&c))
        .map(|&scenario| Column { scenario, kind: ColumnKind::Seat })
        .collect();

    let values = project(&rows, &columns, |r, col| f64::from(seats[r][col.scenario]));
    ConsistencyReport::Fail(FailTable { rows, columns, values })
}

fn share_monotony(shares: &[Vec<f64>], seats: &[Vec<u32>], cols: usize) -> ConsistencyReport {
    let violations: Vec<Violation> = (0..seats.len())
        .flat_map(move |r| {
            (0..cols).flat_map(move |j| {
                (0..cols).filter_map(move |k| {
                    (shares[r][j] < shares[r][k] && seats[r][j] > seats[r][k]).then_some((r, j, k))
                })
            })
        })
        .collect();
    if violations.is_empty() {
        return ConsistencyReport::Pass;
    }

    let rows = distinct(violations.iter().map(|&(r, _, _)| r));
    let columns: Vec<Column> = distinct(violations.iter().flat_map(|&(_, j, k)| [j, k]))
        .into_iter()
        .flat_map(|scenario| {
            [
                Column { scenario, kind: ColumnKind::Share },
                Column { scenario, kind: ColumnKind::Seat },
            ]
        })
        .collect();

    let values = project(&rows, &columns, |r, col| match col.kind {
        ColumnKind::Share => shares[r][col.scenario],
        ColumnKind::Seat => f64::from(seats[r][col.scenario]),
    });
    ConsistencyReport::Fail(FailTable { rows, columns, values })
}

/// Column count of a rectangular matrix.
fn matrix_width<T>(m: &[Vec<T>]) -> Result<usize, CheckError> {
    let width = m.first().map_or(0, Vec::len);
    match m.iter().position(|row| row.len() != width) {
        Some(row) => Err(CheckError::Ragged { row, expected: width, got: m[row].len() }),
        None => Ok(width),
    }
}

fn distinct(it: impl Iterator<Item = usize>) -> Vec<usize> {
    it.collect::<BTreeSet<_>>().into_iter().collect()
}

fn project(
    rows: &[usize],
    columns: &[Column],
    cell: impl Fn(usize, &Column) -> f64,
) -> Vec<Vec<f64>> {
    rows.iter()
        .map(|&r| columns.iter().map(|col| cell(r, col)).collect())
        .collect()
}
