//! Series-parallel reductions.
//!
//! Removing zero rows/columns (coloops/loops), unit rows/columns
//! (series/parallel pairs with a basis element) and duplicate
//! rows/columns (series/parallel classes) preserves regularity in both
//! directions. A matrix that reduces to nothing is series-parallel and
//! regular; otherwise the irreducible core seeds the nested minor search.

use rustc_hash::FxHashSet;
use tracing::debug;

use regulus_matrix::Matrix;

use crate::driver::{DriverCtx, Task, TaskQueue};
use crate::error::DecompError;
use crate::node::{DecompNode, NodeType};

/// Applies series-parallel reductions to a fixpoint; returns the row and
/// column indices of the irreducible core.
#[must_use]
pub fn reduce(matrix: &Matrix) -> (Vec<usize>, Vec<usize>) {
    let num_rows = matrix.num_rows();
    let num_cols = matrix.num_cols();
    let mut row_alive = vec![true; num_rows];
    let mut col_alive = vec![true; num_cols];

    loop {
        let mut changed = false;

        let mut seen: FxHashSet<Vec<i8>> = FxHashSet::default();
        for col in 0..num_cols {
            if !col_alive[col] {
                continue;
            }
            let entries: Vec<i8> = (0..num_rows)
                .filter(|&r| row_alive[r])
                .map(|r| matrix[(r, col)])
                .collect();
            let support = entries.iter().filter(|&&v| v != 0).count();
            if support <= 1 || !seen.insert(entries) {
                col_alive[col] = false;
                changed = true;
            }
        }

        let mut seen: FxHashSet<Vec<i8>> = FxHashSet::default();
        for row in 0..num_rows {
            if !row_alive[row] {
                continue;
            }
            let entries: Vec<i8> = (0..num_cols)
                .filter(|&c| col_alive[c])
                .map(|c| matrix[(row, c)])
                .collect();
            let support = entries.iter().filter(|&&v| v != 0).count();
            if support <= 1 || !seen.insert(entries) {
                row_alive[row] = false;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    let rows = (0..num_rows).filter(|&r| row_alive[r]).collect();
    let cols = (0..num_cols).filter(|&c| col_alive[c]).collect();
    (rows, cols)
}

/// Series-parallel reduction step: an empty core makes the node a leaf;
/// otherwise the core becomes the node's dense matrix and the task is
/// re-enqueued for the nested minor search. The irreducible core of a
/// connected matroid always has at least three rows and columns.
pub(crate) fn decompose_series_parallel(
    ctx: &mut DriverCtx<'_>,
    node: &mut DecompNode,
    queue: &mut TaskQueue,
    task: &Task,
) -> Result<(), DecompError> {
    ctx.check_deadline()?;
    node.tested_series_parallel = true;
    let (rows, cols) = reduce(&node.matrix);
    if rows.is_empty() && cols.is_empty() {
        node.node_type = NodeType::LeafSeriesParallel;
        return Ok(());
    }
    debug!(
        core_rows = rows.len(),
        core_cols = cols.len(),
        "series-parallel reductions left a dense core"
    );
    node.dense_matrix = Some(node.matrix.submatrix(&rows, &cols));
    queue.push(task.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ones_reduces_to_nothing() {
        let m = Matrix::from_rows(vec![vec![1, 1, 1], vec![1, 1, 1], vec![1, 1, 1]]);
        let (rows, cols) = reduce(&m);
        assert!(rows.is_empty());
        assert!(cols.is_empty());
    }

    #[test]
    fn test_wheel_is_irreducible() {
        let w3 = Matrix::from_rows(vec![vec![1, 1, 0], vec![1, 1, 1], vec![0, 1, 1]]);
        let (rows, cols) = reduce(&w3);
        assert_eq!(rows, vec![0, 1, 2]);
        assert_eq!(cols, vec![0, 1, 2]);
    }

    #[test]
    fn test_padding_is_stripped_around_a_core() {
        // A wheel padded with a zero column, a unit column and a
        // duplicate row.
        let m = Matrix::from_rows(vec![
            vec![1, 1, 0, 0, 0],
            vec![1, 1, 1, 0, 1],
            vec![0, 1, 1, 0, 0],
            vec![0, 1, 1, 0, 0],
        ]);
        let (rows, cols) = reduce(&m);
        assert_eq!(rows, vec![0, 1, 2]);
        assert_eq!(cols, vec![0, 1, 2]);
    }
}
