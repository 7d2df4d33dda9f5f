//! Property-based tests for the matrix data model.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::bfs::{bipartite_bfs, BipartiteDims, Reachability};
    use crate::dense::Matrix;
    use crate::matroid::PermutedMatroid;
    use crate::view::MatrixRef;

    // Strategy for small binary matrices with at least one row and column.
    fn binary_matrix(max_dim: usize) -> impl Strategy<Value = Matrix> {
        (1..=max_dim, 1..=max_dim)
            .prop_flat_map(|(rows, cols)| {
                prop::collection::vec(prop::collection::vec(0i8..=1, cols), rows)
            })
            .prop_map(Matrix::from_rows)
    }

    fn first_one(matrix: &Matrix) -> Option<(usize, usize)> {
        (0..matrix.num_rows()).find_map(|r| {
            (0..matrix.num_cols()).find_map(|c| (matrix[(r, c)] == 1).then_some((r, c)))
        })
    }

    fn row_multiset(matrix: &impl MatrixRef) -> Vec<Vec<i8>> {
        let mut rows: Vec<Vec<i8>> = (0..matrix.num_rows())
            .map(|r| (0..matrix.num_cols()).map(|c| matrix.at(r, c)).collect())
            .collect();
        rows.sort_unstable();
        rows
    }

    proptest! {
        #[test]
        fn pivot_is_involution(m in binary_matrix(6)) {
            let Some((r, c)) = first_one(&m) else { return Ok(()) };
            let original = m.clone();
            let mut work = m;
            {
                let mut pm = PermutedMatroid::new(&mut work);
                pm.binary_pivot(r, c).unwrap();
                pm.binary_pivot(r, c).unwrap();
            }
            prop_assert_eq!(work, original);
        }

        #[test]
        fn pivot_keeps_pivot_row_and_column(m in binary_matrix(6)) {
            let Some((r, c)) = first_one(&m) else { return Ok(()) };
            let original = m.clone();
            let mut work = m;
            {
                let mut pm = PermutedMatroid::new(&mut work);
                pm.binary_pivot(r, c).unwrap();
            }
            for j in 0..original.num_cols() {
                prop_assert_eq!(work[(r, j)], original[(r, j)]);
            }
            for i in 0..original.num_rows() {
                prop_assert_eq!(work[(i, c)], original[(i, c)]);
            }
        }

        #[test]
        fn sorting_preserves_row_multiset(m in binary_matrix(6)) {
            let before = row_multiset(&m);
            let mut work = m;
            let (rows, cols) = (work.num_rows(), work.num_cols());
            let mut pm = PermutedMatroid::new(&mut work);
            pm.sort_rows(0..rows, 0..cols, |a, b| b.cmp(a));
            prop_assert_eq!(row_multiset(&pm), before);
        }

        #[test]
        fn swap_transposes_view(m in binary_matrix(6), i in 0usize..6, j in 0usize..6) {
            let mut work = m;
            let rows = work.num_rows();
            let (i, j) = (i % rows, j % rows);
            let before = Matrix::from_view(&work);
            let mut pm = PermutedMatroid::new(&mut work);
            pm.swap_rows(i, j);
            for c in 0..before.num_cols() {
                prop_assert_eq!(pm.at(i, c), before[(j, c)]);
                prop_assert_eq!(pm.at(j, c), before[(i, c)]);
            }
        }

        #[test]
        fn bfs_depths_alternate_parity(m in binary_matrix(6)) {
            let dims = BipartiteDims::new(m.num_rows(), m.num_cols());
            let starts = [dims.row_to_index(0)];
            let (_, nodes) = bipartite_bfs(&m, &dims, &starts, &[]);
            for (idx, node) in nodes.iter().enumerate() {
                if let Reachability::Reached(d) = node.reach {
                    // Rows sit at even depth, columns at odd depth.
                    prop_assert_eq!(d % 2 == 0, dims.is_row(idx));
                    if d > 0 {
                        let pred = nodes[node.predecessor];
                        prop_assert_eq!(pred.reach.depth(), Some(d - 1));
                    }
                }
            }
        }
    }
}
