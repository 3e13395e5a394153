//! Exact maximum-weight bipartite matching.
//!
//! # Algorithm
//!
//! The rectangular, partially excluded weight matrix is turned into a square
//! assignment problem: excluded and non-positive edges get weight zero (as
//! do padding rows and columns), and costs are `max_weight - weight`. The
//! Hungarian algorithm with row/column potentials then finds a minimum-cost
//! perfect assignment, which is a maximum-weight one on the original
//! weights. Zero-weight pairs are dropped from the answer, since leaving
//! both sides unmatched is worth the same.
//!
//! # Complexity
//!
//! O(n³) where n = max(rows, cols).
//!
//! # Reference
//!
//! Kuhn, H.W. (1955). "The Hungarian method for the assignment problem",
//! *Naval Research Logistics Quarterly* 2, 83-97.

use super::WeightMatrix;

/// Minimum-cost perfect assignment on an n×n cost function.
///
/// Returns `row_to_col`. Rows are augmented in index order and columns are
/// scanned in index order, so equal-cost alternatives resolve the same way
/// on every run.
fn min_cost_assignment(n: usize, cost: impl Fn(usize, usize) -> f64) -> Vec<usize> {
    // 1-based potentials; index 0 is the virtual source column
    let mut u = vec![0.0; n + 1];
    let mut v = vec![0.0; n + 1];
    let mut matched_row = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        matched_row[0] = i;
        let mut j0 = 0;
        let mut min_slack = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = matched_row[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0;
            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let slack = cost(i0 - 1, j - 1) - u[i0] - v[j];
                if slack < min_slack[j] {
                    min_slack[j] = slack;
                    way[j] = j0;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    j1 = j;
                }
            }
            for j in 0..=n {
                if used[j] {
                    u[matched_row[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }
            j0 = j1;
            if matched_row[j0] == 0 {
                break;
            }
        }

        // augment along the alternating path
        loop {
            let j1 = way[j0];
            matched_row[j0] = matched_row[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut row_to_col = vec![0; n];
    for j in 1..=n {
        if matched_row[j] != 0 {
            row_to_col[matched_row[j] - 1] = j - 1;
        }
    }
    row_to_col
}

/// Finds a one-to-one matching of rows to columns maximizing total weight.
///
/// Excluded (`None`) edges are never selected, and neither are edges with
/// weight ≤ 0. Returns `(row, col)` pairs sorted by row.
///
/// # Examples
///
/// ```
/// use u_voyage::optimizer::{max_weight_matching, WeightMatrix};
///
/// // Greedy would take (0, 0) = 10 and be left with (1, 1) = 1.
/// let m = WeightMatrix::from_data(2, 2, vec![Some(10.0), Some(9.0), Some(8.0), Some(1.0)]).unwrap();
/// assert_eq!(max_weight_matching(&m), vec![(0, 1), (1, 0)]);
/// ```
pub fn max_weight_matching(weights: &WeightMatrix) -> Vec<(usize, usize)> {
    let (rows, cols) = (weights.rows(), weights.cols());
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    let gain = |i: usize, j: usize| -> f64 {
        if i < rows && j < cols {
            weights.get(i, j).filter(|w| *w > 0.0).unwrap_or(0.0)
        } else {
            0.0
        }
    };
    let n = rows.max(cols);
    let mut max_gain: f64 = 0.0;
    for i in 0..rows {
        for j in 0..cols {
            max_gain = max_gain.max(gain(i, j));
        }
    }

    let row_to_col = min_cost_assignment(n, |i, j| max_gain - gain(i, j));

    row_to_col
        .into_iter()
        .enumerate()
        .filter(|&(i, j)| i < rows && j < cols && gain(i, j) > 0.0)
        .collect()
}
