//! Search for a W3 wheel minor.
//!
//! Given a permuted matroid view with at least three rows and columns,
//! either certify a k-separation (no wheel minor exists across it) or
//! permute and pivot the view until rows {0, 1, 2} × columns {0, 1, 2}
//! carry the canonical W3 template
//!
//! ```text
//!   1 1 0
//!   1 1 1
//!   0 1 1
//! ```
//!
//! The search seeds a 2×2 block of ones, grows it to a set-maximal
//! all-ones block, and looks for a path from the block's rows back to its
//! columns through the rest of the matrix. The path closes a cycle that
//! witnesses the wheel; pivoting at interior path vertices shortens it
//! until only the template remains.

use std::cmp::Ordering;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use regulus_matrix::{
    bipartite_bfs, count_column_run, count_row_run, is_non_zero, is_one, BfsNode, BipartiteDims,
    ElementId, MatrixRef, PermutedMatroid, Reachability, ZeroBlock,
};

use crate::error::DecompError;
use crate::separation::Separation;

/// Result of the wheel-minor search.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WheelOutcome {
    /// A W3 minor was found; the view now carries the canonical template
    /// at rows {0, 1, 2} × columns {0, 1, 2}.
    Found,
    /// No W3 minor crosses the view; the separation certifies why.
    Separated(Separation),
}

/// Descending lexicographic order on entry vectors.
fn descending(a: &[i8], b: &[i8]) -> Ordering {
    b.cmp(a)
}

/// Searches `matroid` for a W3 wheel minor.
///
/// On [`WheelOutcome::Found`] the view is left canonically permuted. Both
/// element labels of every pivot performed during the search are inserted
/// into `extra_elements`.
///
/// # Errors
///
/// Returns [`DecompError::InvalidInput`] if the view has fewer than three
/// rows or columns.
pub fn find_wheel_minor(
    matroid: &mut PermutedMatroid<'_>,
    extra_elements: &mut FxHashSet<ElementId>,
) -> Result<WheelOutcome, DecompError> {
    let num_rows = matroid.num_rows();
    let num_cols = matroid.num_cols();
    if num_rows < 3 || num_cols < 3 {
        return Err(DecompError::InvalidInput(format!(
            "wheel search needs at least a 3x3 view, got {num_rows}x{num_cols}"
        )));
    }

    // Seed: move the ones of row 0 to the left, then the ones of column 0
    // (below row 0) to the top.
    matroid.sort_cols(0..1, 0..num_cols, descending);
    let ones_row0 = count_column_run(&*matroid, 0..1, 0..num_cols, is_non_zero);
    if ones_row0 == 0 {
        // Row 0 is zero.
        return Ok(WheelOutcome::Separated(Separation::one((1, 0))));
    }

    matroid.sort_rows(1..num_rows, 0..1, descending);
    let ones_col0_below = count_row_run(&*matroid, 1..num_rows, 0..1, is_non_zero);

    if ones_row0 == 1 {
        return Ok(WheelOutcome::Separated(if ones_col0_below == 0 {
            // The top-left entry is the only one in its row and column.
            Separation::one((1, 1))
        } else {
            Separation::two((1, 1), (1, 0))
        }));
    } else if ones_col0_below == 0 {
        // Column 0 is a unit column.
        return Ok(WheelOutcome::Separated(Separation::two((1, 1), (0, 1))));
    }

    debug_assert_eq!(matroid.at(0, 0), 1);
    debug_assert_eq!(matroid.at(0, 1), 1);
    debug_assert_eq!(matroid.at(1, 0), 1);

    // Ensure a full 2x2 block of ones.
    if matroid.at(1, 1) != 1 {
        matroid.binary_pivot(0, 0)?;
        extra_elements.insert(matroid.row_label(0));
        extra_elements.insert(matroid.col_label(0));
        debug_assert_eq!(matroid.at(1, 1), 1);
    }

    // Grow the block to a set-maximal all-ones block anchored at (0, 0).
    matroid.sort_cols(0..2, 2..num_cols, descending);
    let block_width = 2 + count_column_run(&*matroid, 0..2, 2..num_cols, is_one);
    matroid.sort_rows(2..num_rows, 0..block_width, descending);
    let block_height = 2 + count_row_run(&*matroid, 2..num_rows, 0..block_width, is_one);
    trace!(block_height, block_width, "grew all-ones block");

    // Search for a closing path from the block's rows back to its columns
    // through the rest of the matrix.
    let dims = BipartiteDims::new(num_rows, num_cols);
    let starts: SmallVec<[usize; 8]> = (0..block_height).map(|r| dims.row_to_index(r)).collect();
    let targets: SmallVec<[usize; 8]> = (0..block_width).map(|c| dims.column_to_index(c)).collect();
    let (found, bfs) = {
        let suppressed = ZeroBlock::new(&*matroid, block_height, block_width);
        bipartite_bfs(&suppressed, &dims, &starts, &targets)
    };

    if !found {
        return Ok(WheelOutcome::Separated(block_separation(
            matroid, &dims, &bfs,
        )));
    }

    // Any reached target lies on the final BFS wave; keep the last one.
    let nearest_end = targets
        .iter()
        .copied()
        .filter(|&t| bfs[t].reach.is_reached())
        .last()
        .expect("a target was reached");

    let w3_one_col = dims.index_to_column(nearest_end);
    let nearest_distance = bfs[nearest_end]
        .reach
        .depth()
        .expect("reached target has a depth")
        + 1;
    debug_assert_eq!(nearest_distance % 2, 0, "row-to-column paths are odd");

    let mut last = nearest_end;
    let mut current = bfs[last].predecessor;

    let w3_path_row = dims.index_to_row(current);
    // The path row lies outside the block, so it misses at least one
    // block column. Located before any shortening pivot.
    let w3_zero_col = (0..block_width)
        .find(|&c| matroid.at(w3_path_row, c) == 0)
        .expect("path row has a zero among the block columns");

    let mut w3_one_row = 0;
    let mut w3_path_col = 0;
    while last != current {
        let (row, col) = dims.indexes_to_coordinates(current, last);
        if let Reachability::Reached(depth) = bfs[current].reach {
            if depth % 2 == 0 && depth >= 2 && depth + 2 < nearest_distance {
                // Interior vertex: pivot on the path edge to shorten it.
                matroid.binary_pivot(row, col)?;
                extra_elements.insert(matroid.row_label(row));
                extra_elements.insert(matroid.col_label(col));
            }
            if depth == 1 {
                w3_path_col = dims.index_to_column(current);
            } else if depth == 0 {
                w3_one_row = dims.index_to_row(current);
            }
        }
        last = current;
        current = bfs[current].predecessor;
    }

    let w3_zero_row = (0..block_height)
        .find(|&r| matroid.at(r, w3_path_col) == 0)
        .expect("path column has a zero among the block rows");

    debug_assert_eq!(matroid.at(w3_one_row, w3_one_col), 1);
    debug_assert_eq!(matroid.at(w3_one_row, w3_zero_col), 1);
    debug_assert_eq!(matroid.at(w3_one_row, w3_path_col), 1);
    debug_assert_eq!(matroid.at(w3_zero_row, w3_one_col), 1);
    debug_assert_eq!(matroid.at(w3_zero_row, w3_zero_col), 1);
    debug_assert_eq!(matroid.at(w3_zero_row, w3_path_col), 0);
    debug_assert_eq!(matroid.at(w3_path_row, w3_one_col), 1);
    debug_assert_eq!(matroid.at(w3_path_row, w3_zero_col), 0);
    debug_assert_eq!(matroid.at(w3_path_row, w3_path_col), 1);

    // Order the anchors ascending as (zero, one, path), then move them to
    // positions 0, 1, 2.
    let (mut w3_zero_row, mut w3_one_row, mut w3_path_row) = (w3_zero_row, w3_one_row, w3_path_row);
    if w3_zero_row > w3_one_row {
        matroid.swap_rows(w3_one_row, w3_zero_row);
        std::mem::swap(&mut w3_one_row, &mut w3_zero_row);
    }
    if w3_one_row > w3_path_row {
        matroid.swap_rows(w3_path_row, w3_one_row);
        std::mem::swap(&mut w3_path_row, &mut w3_one_row);
    }

    let (mut w3_zero_col, mut w3_one_col, mut w3_path_col) = (w3_zero_col, w3_one_col, w3_path_col);
    if w3_zero_col > w3_one_col {
        matroid.swap_cols(w3_one_col, w3_zero_col);
        std::mem::swap(&mut w3_one_col, &mut w3_zero_col);
    }
    if w3_one_col > w3_path_col {
        matroid.swap_cols(w3_path_col, w3_one_col);
        std::mem::swap(&mut w3_path_col, &mut w3_one_col);
    }

    matroid.swap_rows(0, w3_zero_row);
    matroid.swap_rows(1, w3_one_row);
    matroid.swap_rows(2, w3_path_row);

    matroid.swap_cols(0, w3_zero_col);
    matroid.swap_cols(1, w3_one_col);
    matroid.swap_cols(2, w3_path_col);

    Ok(WheelOutcome::Found)
}

/// Builds the separation certificate for a failed closing-path search.
///
/// Rows never touched by the BFS move to the top, then the start rows,
/// then rows reached later. Columns never touched move to the left, then
/// target columns that were never reached, then reached columns. Start
/// rows cannot touch untouched columns (the search would have advanced),
/// so the cross block below the split is exactly the all-ones seed block:
/// rank one, a 2-separation.
fn block_separation(
    matroid: &mut PermutedMatroid<'_>,
    dims: &BipartiteDims,
    bfs: &[BfsNode],
) -> Separation {
    let num_rows = matroid.num_rows();
    let num_cols = matroid.num_cols();

    let mut split_rows = 0;
    let mut row_tags = vec![0u8; num_rows];
    for i in 0..num_rows {
        let tag = match bfs[dims.row_to_index(i)].reach {
            Reachability::Reached(0) => 1,
            Reachability::Reached(_) => 2,
            Reachability::Unexplored | Reachability::Target => {
                split_rows += 1;
                0
            }
        };
        row_tags[matroid.view().physical_row(i)] = tag;
    }
    matroid.sort_rows_with(|a, b| row_tags[a].cmp(&row_tags[b]));

    let mut split_cols = 0;
    let mut col_tags = vec![0u8; num_cols];
    for j in 0..num_cols {
        let tag = match bfs[dims.column_to_index(j)].reach {
            Reachability::Reached(_) => 2,
            Reachability::Target => 1,
            Reachability::Unexplored => 0,
        };
        if tag < 2 {
            split_cols += 1;
        }
        col_tags[matroid.view().physical_col(j)] = tag;
    }
    matroid.sort_cols_with(|a, b| col_tags[a].cmp(&col_tags[b]));

    Separation::two((split_rows, split_cols), (split_rows, split_cols - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regulus_matrix::Matrix;

    /// The canonical W3 template.
    fn wheel3_template() -> Matrix {
        Matrix::from_rows(vec![vec![1, 1, 0], vec![1, 1, 1], vec![0, 1, 1]])
    }

    fn run(matrix: &mut Matrix) -> (WheelOutcome, FxHashSet<ElementId>, Matrix) {
        let mut extra = FxHashSet::default();
        let mut matroid = PermutedMatroid::new(matrix);
        let outcome = find_wheel_minor(&mut matroid, &mut extra).unwrap();
        let permuted = Matrix::from_view(&matroid);
        (outcome, extra, permuted)
    }

    fn top_left(matrix: &Matrix) -> Matrix {
        matrix.submatrix(&[0, 1, 2], &[0, 1, 2])
    }

    #[test]
    fn test_wheel_template_is_found_in_place() {
        let mut m = wheel3_template();
        let (outcome, extra, permuted) = run(&mut m);
        assert_eq!(outcome, WheelOutcome::Found);
        assert!(extra.is_empty());
        assert_eq!(top_left(&permuted), wheel3_template());
    }

    #[test]
    fn test_zero_matrix_is_a_one_separation() {
        let mut m = Matrix::zeros(3, 3);
        let (outcome, extra, _) = run(&mut m);
        assert_eq!(
            outcome,
            WheelOutcome::Separated(Separation::one((1, 0)))
        );
        assert!(extra.is_empty());
    }

    #[test]
    fn test_zero_first_row_is_a_one_separation() {
        let mut m = Matrix::from_rows(vec![vec![0, 0, 0], vec![0, 1, 1], vec![0, 1, 1]]);
        let (outcome, _, _) = run(&mut m);
        assert_eq!(
            outcome,
            WheelOutcome::Separated(Separation::one((1, 0)))
        );
    }

    #[test]
    fn test_isolated_corner_entry_is_a_one_separation() {
        // After sorting, the top-left entry is alone in its row and column.
        let mut m = Matrix::from_rows(vec![vec![1, 0, 0], vec![0, 1, 1], vec![0, 1, 1]]);
        let (outcome, _, _) = run(&mut m);
        assert_eq!(
            outcome,
            WheelOutcome::Separated(Separation::one((1, 1)))
        );
    }

    #[test]
    fn test_unit_row_is_a_two_separation() {
        let mut m = Matrix::from_rows(vec![vec![1, 0, 0], vec![1, 1, 1], vec![1, 1, 1]]);
        let (outcome, _, _) = run(&mut m);
        assert_eq!(
            outcome,
            WheelOutcome::Separated(Separation::two((1, 1), (1, 0)))
        );
    }

    #[test]
    fn test_unit_column_is_a_two_separation() {
        let mut m = Matrix::from_rows(vec![vec![1, 1, 1], vec![0, 1, 1], vec![0, 1, 1]]);
        let (outcome, _, _) = run(&mut m);
        assert_eq!(
            outcome,
            WheelOutcome::Separated(Separation::two((1, 1), (0, 1)))
        );
    }

    #[test]
    fn test_all_ones_has_no_wheel() {
        // The three columns form a parallel class; the block swallows the
        // whole matrix and the degenerate block separation remains.
        let mut m = Matrix::from_rows(vec![vec![1, 1, 1], vec![1, 1, 1], vec![1, 1, 1]]);
        let (outcome, extra, _) = run(&mut m);
        assert_eq!(
            outcome,
            WheelOutcome::Separated(Separation::two((0, 3), (0, 2)))
        );
        assert!(extra.is_empty());
    }

    #[test]
    fn test_block_diagonal_separates() {
        let mut rows = Vec::new();
        for i in 0..6 {
            let mut row = vec![0; 6];
            for j in 0..6 {
                if (i < 3) == (j < 3) {
                    row[j] = 1;
                }
            }
            rows.push(row);
        }
        let mut m = Matrix::from_rows(rows);
        let (outcome, extra, permuted) = run(&mut m);
        assert_eq!(
            outcome,
            WheelOutcome::Separated(Separation::two((3, 6), (3, 5)))
        );
        assert!(extra.is_empty());
        // The unreached block moved above and left of the split; the
        // permuted matrix is block-diagonal with the blocks exchanged.
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(permuted[(r, c)], 1);
                assert_eq!(permuted[(r, c + 3)], 0);
                assert_eq!(permuted[(r + 3, c)], 0);
                assert_eq!(permuted[(r + 3, c + 3)], 1);
            }
        }
    }

    #[test]
    fn test_wheel_found_via_path() {
        // A 4x4 matrix whose block is 2x2 and whose closing path has
        // length three: r0 - c2 - r2 - c0.
        let mut m = Matrix::from_rows(vec![
            vec![1, 1, 1, 0],
            vec![1, 1, 0, 0],
            vec![1, 0, 1, 0],
            vec![0, 0, 0, 1],
        ]);
        let (outcome, extra, permuted) = run(&mut m);
        assert_eq!(outcome, WheelOutcome::Found);
        assert!(extra.is_empty());
        assert_eq!(top_left(&permuted), wheel3_template());
    }

    #[test]
    fn test_shortening_pivot_along_a_long_path() {
        // Rim-and-spokes matrix of the wheel W4: the closing path has
        // length five, so the finder shortens it with one interior pivot
        // on top of the seed pivot that completes the 2x2 corner. Both
        // pivots leave their two element labels behind.
        let mut m = Matrix::from_rows(vec![
            vec![1, 0, 0, 1],
            vec![1, 1, 0, 0],
            vec![0, 1, 1, 0],
            vec![0, 0, 1, 1],
        ]);
        let (outcome, extra, permuted) = run(&mut m);
        assert_eq!(outcome, WheelOutcome::Found);
        assert_eq!(extra.len(), 4);
        assert_eq!(top_left(&permuted), wheel3_template());
    }

    #[test]
    fn test_seed_pivot_records_elements() {
        // Rows 0 and 1 share only column 0, so the 2x2 seed corner is
        // incomplete and the finder pivots at (0, 0) to fill it.
        let mut m = Matrix::from_rows(vec![
            vec![1, 1, 0, 0],
            vec![1, 0, 1, 0],
            vec![0, 1, 1, 0],
            vec![0, 0, 1, 1],
        ]);
        let mut extra = FxHashSet::default();
        let mut matroid = PermutedMatroid::new(&mut m);
        let outcome = find_wheel_minor(&mut matroid, &mut extra).unwrap();
        assert_eq!(outcome, WheelOutcome::Found);
        assert_eq!(extra.len(), 2);
        let permuted = Matrix::from_view(&matroid);
        assert_eq!(top_left(&permuted), wheel3_template());
    }
}
