//! Camion sign verification for ternary matrices.
//!
//! A {−1, 0, 1} matrix is totally unimodular iff its binary support is
//! regular and the signs follow the Camion pattern: around every cycle
//! closed by shortest paths the entries sum to a multiple of four. The
//! check processes columns left to right; for column `j`, every support
//! row reachable from the column's first support row through the
//! bipartite graph of the earlier columns has its sign forced.

use regulus_matrix::{bipartite_bfs, BipartiteDims, Matrix, MatrixRef};

/// The first `cols` columns of a matrix, as a read-only view.
struct ColumnPrefix<'a> {
    matrix: &'a Matrix,
    cols: usize,
}

impl MatrixRef for ColumnPrefix<'_> {
    fn num_rows(&self) -> usize {
        self.matrix.num_rows()
    }

    fn num_cols(&self) -> usize {
        self.cols
    }

    fn at(&self, row: usize, col: usize) -> i8 {
        self.matrix.at(row, col)
    }
}

/// Verifies the Camion sign pattern of a ternary matrix.
///
/// Sound for matrices whose support is regular; when the support is
/// irregular the overall answer is irregular either way.
#[must_use]
pub fn signs_valid(matrix: &Matrix) -> bool {
    let num_rows = matrix.num_rows();
    let num_cols = matrix.num_cols();
    for col in 1..num_cols {
        let support: Vec<usize> = (0..num_rows).filter(|&r| matrix[(r, col)] != 0).collect();
        let Some((&first, rest)) = support.split_first() else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        let prefix = ColumnPrefix { matrix, cols: col };
        let dims = BipartiteDims::new(num_rows, col);
        let (_, bfs) = bipartite_bfs(&prefix, &dims, &[dims.row_to_index(first)], &[]);
        for &row in rest {
            if !bfs[dims.row_to_index(row)].reach.is_reached() {
                continue;
            }
            // Sum the entries along the BFS path back to the first
            // support row; closing the cycle through column `col` must
            // give a multiple of four.
            let mut sum = i32::from(matrix[(first, col)]) + i32::from(matrix[(row, col)]);
            let mut vertex = dims.row_to_index(row);
            while bfs[vertex].predecessor != vertex {
                let pred = bfs[vertex].predecessor;
                let (r, c) = dims.indexes_to_coordinates(pred, vertex);
                sum += i32::from(matrix[(r, c)]);
                vertex = pred;
            }
            if sum.rem_euclid(4) != 0 {
                return false;
            }
        }
    }
    true
}
