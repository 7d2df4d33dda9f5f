//! 1-separation search: connected components of the support graph.

use tracing::debug;

use regulus_matrix::{bipartite_bfs, BipartiteDims};

use crate::driver::{DriverCtx, Task, TaskQueue};
use crate::error::DecompError;
use crate::node::{DecompNode, NodeType};

/// Decomposes the node as a 1-sum if its support graph is disconnected;
/// otherwise marks it 2-connected and re-enqueues the task.
pub(crate) fn search_one_sum(
    ctx: &mut DriverCtx<'_>,
    node: &mut DecompNode,
    queue: &mut TaskQueue,
    task: &Task,
) -> Result<(), DecompError> {
    ctx.check_deadline()?;
    let num_rows = node.matrix.num_rows();
    let num_cols = node.matrix.num_cols();
    let dims = BipartiteDims::new(num_rows, num_cols);

    let mut visited = vec![false; dims.total()];
    let mut components: Vec<(Vec<usize>, Vec<usize>)> = Vec::new();
    for start in 0..dims.total() {
        if visited[start] {
            continue;
        }
        let (_, bfs) = bipartite_bfs(&node.matrix, &dims, &[start], &[]);
        let mut rows = Vec::new();
        let mut cols = Vec::new();
        for (index, state) in bfs.iter().enumerate() {
            if state.reach.is_reached() {
                visited[index] = true;
                if dims.is_row(index) {
                    rows.push(dims.index_to_row(index));
                } else {
                    cols.push(dims.index_to_column(index));
                }
            }
        }
        components.push((rows, cols));
    }

    node.tested_two_connected = true;
    if components.len() <= 1 {
        queue.push(task.clone());
        return Ok(());
    }

    debug!(count = components.len(), "splitting as a 1-sum");
    node.node_type = NodeType::OneSum;
    for (index, (rows, cols)) in components.into_iter().enumerate() {
        let child = DecompNode::child(node.matrix.submatrix(&rows, &cols), node.is_ternary);
        node.children.push(child);
        queue.push(task.child(index));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::tests::{fresh_ctx, run_tester};
    use regulus_matrix::Matrix;

    #[test]
    fn test_connected_matrix_re_enqueues() {
        let matrix = Matrix::from_rows(vec![vec![1, 1], vec![0, 1]]);
        let mut node = DecompNode::from_matrix_root(matrix, false);
        let (queue, _) = fresh_ctx(|ctx, queue| {
            run_tester(ctx, &mut node, queue, search_one_sum)
        });
        assert!(node.tested_two_connected);
        assert!(node.children.is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_disconnected_matrix_splits() {
        let matrix = Matrix::from_rows(vec![vec![1, 0, 0], vec![0, 1, 1], vec![0, 0, 0]]);
        let mut node = DecompNode::from_matrix_root(matrix, false);
        let (queue, _) = fresh_ctx(|ctx, queue| {
            run_tester(ctx, &mut node, queue, search_one_sum)
        });
        assert_eq!(node.node_type, NodeType::OneSum);
        // Components: {r0, c0}, {r1, c1, c2} and the zero row {r2}.
        assert_eq!(node.children.len(), 3);
        assert_eq!(queue.len(), 3);
        let dims: Vec<(usize, usize)> = node
            .children
            .iter()
            .map(|c| (c.matrix.num_rows(), c.matrix.num_cols()))
            .collect();
        assert!(dims.contains(&(1, 1)));
        assert!(dims.contains(&(1, 2)));
        assert!(dims.contains(&(1, 0)));
    }
}
