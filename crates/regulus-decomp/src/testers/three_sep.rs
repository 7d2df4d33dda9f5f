//! Exact search for a 3-separation.
//!
//! Looks for a row bipartition whose top side sees only a zero top-right
//! block once the columns hitting it are moved left, with the bottom-left
//! block of rank at most two. This is the display form the rest of the
//! engine produces and splits. A node that is 3-connected, not graphic,
//! not cographic, not R10 and admits no such separation is irregular.

use tracing::debug;

use regulus_matrix::Matrix;

use crate::driver::{DriverCtx, Task, TaskQueue};
use crate::error::DecompError;
use crate::minor::{Minor, MinorKind};
use crate::node::{DecompNode, NodeType};
use crate::separation::Separation;
use crate::split::split_by_separation;

/// GF(2) rank of the given matrix.
fn gf2_rank(matrix: &Matrix) -> usize {
    let mut rows: Vec<u64> = (0..matrix.num_rows())
        .map(|r| {
            (0..matrix.num_cols())
                .filter(|&c| matrix[(r, c)] != 0)
                .fold(0u64, |acc, c| acc | (1 << c))
        })
        .collect();
    let mut rank = 0;
    for col in 0..matrix.num_cols() {
        let bit = 1u64 << col;
        let Some(pivot) = (rank..rows.len()).find(|&i| rows[i] & bit != 0) else {
            continue;
        };
        rows.swap(rank, pivot);
        let lead = rows[rank];
        for (i, row) in rows.iter_mut().enumerate() {
            if i != rank && *row & bit != 0 {
                *row ^= lead;
            }
        }
        rank += 1;
    }
    rank
}

/// Searches for a 3-separation (or a missed 2-separation) of `matrix`.
///
/// Returns the matrix rearranged with the separation's first side at the
/// top left, together with the certificate. Each side must carry at
/// least four elements. The enumeration is exact and exponential in the
/// row count; the deadline is polled along the way.
pub(crate) fn find_three_separation(
    matrix: &Matrix,
    ctx: &mut DriverCtx<'_>,
) -> Result<Option<(Matrix, Separation)>, DecompError> {
    let num_rows = matrix.num_rows();
    let num_cols = matrix.num_cols();
    if num_rows == 0 || num_rows > 63 {
        return Ok(None);
    }

    for mask in 1..(1u64 << num_rows) - 1 {
        if mask % 1024 == 0 {
            ctx.check_deadline()?;
        }
        let top: Vec<usize> = (0..num_rows).filter(|&r| mask & (1 << r) != 0).collect();
        let bottom: Vec<usize> = (0..num_rows).filter(|&r| mask & (1 << r) == 0).collect();

        // Columns with support in the top rows must go left; the rest
        // maximize the right side.
        let (left, right): (Vec<usize>, Vec<usize>) =
            (0..num_cols).partition(|&c| top.iter().any(|&r| matrix[(r, c)] != 0));

        if top.len() + left.len() < 4 || bottom.len() + right.len() < 4 {
            continue;
        }
        let cross = matrix.submatrix(&bottom, &left);
        let rank = gf2_rank(&cross);
        if rank == 0 || rank > 2 {
            continue;
        }

        let row_order: Vec<usize> = top.iter().chain(bottom.iter()).copied().collect();
        let col_order: Vec<usize> = left.iter().chain(right.iter()).copied().collect();
        let arranged = matrix.submatrix(&row_order, &col_order);
        let split = (top.len(), left.len());
        let overlap = (top.len(), left.len() - 1);
        let sep = if rank == 1 {
            Separation::two(split, overlap)
        } else {
            Separation::three(split, overlap)
        };
        return Ok(Some((arranged, sep)));
    }
    Ok(None)
}

/// 3-separation step of the nested minor pipeline: a separation splits
/// the node, none means the node is irregular by the splitter theorem.
pub(crate) fn search_three_separation(
    ctx: &mut DriverCtx<'_>,
    node: &mut DecompNode,
    queue: &mut TaskQueue,
    task: &Task,
) -> Result<(), DecompError> {
    let matrix = node
        .nested_minors_matrix
        .clone()
        .unwrap_or_else(|| node.matrix.clone());
    match find_three_separation(&matrix, ctx)? {
        Some((arranged, sep)) => {
            debug!(
                split_rows = sep.split_rows(),
                split_cols = sep.split_cols(),
                "splitting along a 3-separation"
            );
            let (first, second, node_type) = split_by_separation(&arranged, &sep)?;
            node.node_type = node_type;
            node.children.push(DecompNode::child(first, node.is_ternary));
            node.children.push(DecompNode::child(second, node.is_ternary));
            queue.push(task.child(0));
            queue.push(task.child(1));
        }
        None => {
            debug!("no 3-separation: node is irregular");
            node.node_type = NodeType::Irregular;
            queue.mark_irregular(Minor {
                matrix,
                kind: MinorKind::NoThreeSeparation,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::tests::fresh_ctx;
    use crate::separation::SeparationRank;

    #[test]
    fn test_gf2_rank() {
        let m = Matrix::from_rows(vec![vec![1, 1, 0], vec![0, 1, 1], vec![1, 0, 1]]);
        assert_eq!(gf2_rank(&m), 2);
        assert_eq!(gf2_rank(&Matrix::zeros(3, 3)), 0);
        let id = Matrix::from_rows(vec![vec![1, 0], vec![0, 1]]);
        assert_eq!(gf2_rank(&id), 2);
    }

    #[test]
    fn test_planted_three_separation_is_found() {
        // Top-left 3x3 wheel, bottom-right 3x3 wheel, rank-2 bottom-left
        // cross block built from two marker patterns.
        let m = Matrix::from_rows(vec![
            vec![1, 1, 0, 0, 0, 0],
            vec![1, 1, 1, 0, 0, 0],
            vec![0, 1, 1, 0, 0, 0],
            vec![1, 1, 0, 1, 1, 0],
            vec![0, 1, 1, 1, 1, 1],
            vec![1, 0, 1, 0, 1, 1],
        ]);
        let mut found = None;
        fresh_ctx(|ctx, _queue| {
            found = find_three_separation(&m, ctx)?;
            Ok(())
        });
        let (arranged, sep) = found.expect("separation exists");
        assert_eq!(sep.rank(), SeparationRank::Three);
        assert_eq!(sep.split_rows() + (arranged.num_rows() - sep.split_rows()), 6);
        // The top-right block of the arranged matrix is zero.
        for r in 0..sep.split_rows() {
            for c in sep.split_cols()..arranged.num_cols() {
                assert_eq!(arranged[(r, c)], 0);
            }
        }
        // And the cross block has rank two.
        let bottom: Vec<usize> = (sep.split_rows()..arranged.num_rows()).collect();
        let left: Vec<usize> = (0..sep.split_cols()).collect();
        assert_eq!(gf2_rank(&arranged.submatrix(&bottom, &left)), 2);
    }

    #[test]
    fn test_wheel_has_no_three_separation() {
        // W3 is 3-connected and too small for a proper separation.
        let w3 = Matrix::from_rows(vec![vec![1, 1, 0], vec![1, 1, 1], vec![0, 1, 1]]);
        let mut found = None;
        fresh_ctx(|ctx, _queue| {
            found = find_three_separation(&w3, ctx)?;
            Ok(())
        });
        assert!(found.is_none());
    }
}
