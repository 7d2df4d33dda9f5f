//! R10 recognition.
//!
//! R10 is the ten-element regular matroid that is neither graphic nor
//! cographic; it only ever shows up in a decomposition as a 5×5 node.
//! Up to row and column permutation its representation matrix is one of
//! two canonical forms, distinguished by their non-zero counts.

use regulus_matrix::Matrix;

use crate::driver::{DriverCtx, Task, TaskQueue};
use crate::error::DecompError;
use crate::node::{DecompNode, NodeType};

/// The circulant representation: every row has three ones.
const R10_CIRCULANT: [[i8; 5]; 5] = [
    [1, 1, 0, 0, 1],
    [1, 1, 1, 0, 0],
    [0, 1, 1, 1, 0],
    [0, 0, 1, 1, 1],
    [1, 0, 0, 1, 1],
];

/// The second representation: a path of doubletons closed by a full row.
const R10_FULL_ROW: [[i8; 5]; 5] = [
    [1, 1, 0, 0, 0],
    [0, 1, 1, 0, 0],
    [0, 0, 1, 1, 0],
    [0, 0, 0, 1, 1],
    [1, 1, 1, 1, 1],
];

/// Checks whether `matrix` represents R10 up to row and column
/// permutation.
#[must_use]
pub fn matches_r10(matrix: &Matrix) -> bool {
    if matrix.num_rows() != 5 || matrix.num_cols() != 5 {
        return false;
    }
    match matrix.count_nonzeros() {
        15 => permutation_equivalent(matrix, &R10_CIRCULANT),
        13 => permutation_equivalent(matrix, &R10_FULL_ROW),
        _ => false,
    }
}

/// True iff some row and column permutation of `matrix` equals `target`.
/// For a fixed row permutation a column permutation exists iff the column
/// multisets agree, so only the 120 row permutations are enumerated.
fn permutation_equivalent(matrix: &Matrix, target: &[[i8; 5]; 5]) -> bool {
    let mut target_cols: Vec<[i8; 5]> = (0..5)
        .map(|j| std::array::from_fn(|i| target[i][j]))
        .collect();
    target_cols.sort_unstable();

    let mut order = [0usize, 1, 2, 3, 4];
    permutations(&mut order, 0, &mut |perm| {
        let mut cols: Vec<[i8; 5]> = (0..5)
            .map(|j| std::array::from_fn(|i| matrix[(perm[i], j)]))
            .collect();
        cols.sort_unstable();
        cols == target_cols
    })
}

/// Calls `visit` for every permutation of `items[at..]`; stops early when
/// a visit returns true.
fn permutations(items: &mut [usize; 5], at: usize, visit: &mut impl FnMut(&[usize; 5]) -> bool) -> bool {
    if at == items.len() {
        return visit(items);
    }
    for i in at..items.len() {
        items.swap(at, i);
        if permutations(items, at + 1, visit) {
            items.swap(at, i);
            return true;
        }
        items.swap(at, i);
    }
    false
}

/// R10 recognition step: a match becomes a leaf, otherwise the pipeline
/// continues.
pub(crate) fn test_r10(
    ctx: &mut DriverCtx<'_>,
    node: &mut DecompNode,
    queue: &mut TaskQueue,
    task: &Task,
) -> Result<(), DecompError> {
    ctx.check_deadline()?;
    node.tested_r10 = true;
    if matches_r10(&node.matrix) {
        node.node_type = NodeType::LeafR10;
        return Ok(());
    }
    queue.push(task.clone());
    Ok(())
}
