//! Direct graphicness and cographicness tests.
//!
//! A binary matroid given as `[I | A]` is graphic iff the rows of `A` can
//! be assigned to the edges of a spanning tree such that every column's
//! support is a path in that tree (the column is then the fundamental
//! circuit of one extra edge). The search below enumerates trees with
//! canonical vertex numbering and prunes on per-column degrees, which is
//! exact and fast for the ranks the pipeline feeds it.

use regulus_matrix::Matrix;

use crate::driver::{DriverCtx, Task, TaskQueue};
use crate::error::DecompError;
use crate::minor::{Minor, MinorKind};
use crate::node::{DecompNode, NodeType, TriState};

/// Tests whether the binary matroid `[I | A]` of `matrix` is graphic.
#[must_use]
pub fn is_graphic(matrix: &Matrix) -> bool {
    let num_rows = matrix.num_rows();
    if num_rows == 0 {
        // Every column is empty, i.e. a loop; loops are self-loop edges.
        return true;
    }
    let mut search = RealizationSearch::new(matrix);
    search.run(0, 0)
}

/// Tests whether the binary matroid `[I | A]` of `matrix` is cographic.
///
/// The dual of `[I | A]` is represented by `[I | Aᵀ]`, so cographicness
/// is graphicness of the transpose.
#[must_use]
pub fn is_cographic(matrix: &Matrix) -> bool {
    is_graphic(&matrix.transpose())
}

struct RealizationSearch<'a> {
    matrix: &'a Matrix,
    /// Edge assigned to each row processed so far.
    edges: Vec<(usize, usize)>,
    /// Per-column vertex degrees of the edges assigned so far.
    col_degrees: Vec<Vec<u8>>,
}

impl<'a> RealizationSearch<'a> {
    fn new(matrix: &'a Matrix) -> Self {
        let vertices = matrix.num_rows() + 1;
        Self {
            matrix,
            edges: Vec::with_capacity(matrix.num_rows()),
            col_degrees: vec![vec![0; vertices]; matrix.num_cols()],
        }
    }

    /// Tries to assign an edge to `row` and all following rows. `used`
    /// counts the vertices taken so far; vertices are numbered in order
    /// of first use, so a candidate edge joins two old vertices, an old
    /// vertex with `used`, or starts a new piece on `used` and
    /// `used + 1` (tree edges of earlier rows need not touch it).
    fn run(&mut self, row: usize, used: usize) -> bool {
        let num_rows = self.matrix.num_rows();
        if row == num_rows {
            // An acyclic full assignment within `num_rows + 1` vertices
            // is automatically a spanning tree; only the column paths
            // remain to be checked.
            return self.columns_are_paths();
        }
        let vertices = num_rows + 1;
        for u in 0..used {
            for v in (u + 1)..=used.min(vertices - 1) {
                if self.creates_cycle(u, v) || !self.degrees_admit(row, u, v) {
                    continue;
                }
                self.push_edge(row, u, v);
                if self.run(row + 1, used.max(v + 1)) {
                    return true;
                }
                self.pop_edge(row, u, v);
            }
        }
        if used + 2 <= vertices {
            let (u, v) = (used, used + 1);
            if self.degrees_admit(row, u, v) {
                self.push_edge(row, u, v);
                if self.run(row + 1, used + 2) {
                    return true;
                }
                self.pop_edge(row, u, v);
            }
        }
        false
    }

    fn creates_cycle(&self, u: usize, v: usize) -> bool {
        // Walk the assigned edges from u; the edge count is tiny.
        let vertices = self.matrix.num_rows() + 1;
        let mut seen = vec![false; vertices];
        let mut stack = vec![u];
        seen[u] = true;
        while let Some(x) = stack.pop() {
            if x == v {
                return true;
            }
            for &(a, b) in &self.edges {
                let next = if a == x {
                    b
                } else if b == x {
                    a
                } else {
                    continue;
                };
                if !seen[next] {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }
        false
    }

    fn degrees_admit(&self, row: usize, u: usize, v: usize) -> bool {
        (0..self.matrix.num_cols()).all(|col| {
            self.matrix[(row, col)] == 0
                || (self.col_degrees[col][u] < 2 && self.col_degrees[col][v] < 2)
        })
    }

    fn push_edge(&mut self, row: usize, u: usize, v: usize) {
        self.edges.push((u, v));
        for col in 0..self.matrix.num_cols() {
            if self.matrix[(row, col)] != 0 {
                self.col_degrees[col][u] += 1;
                self.col_degrees[col][v] += 1;
            }
        }
    }

    fn pop_edge(&mut self, row: usize, u: usize, v: usize) {
        self.edges.pop();
        for col in 0..self.matrix.num_cols() {
            if self.matrix[(row, col)] != 0 {
                self.col_degrees[col][u] -= 1;
                self.col_degrees[col][v] -= 1;
            }
        }
    }

    /// A column's edges form a sub-forest of the tree with all degrees at
    /// most two (enforced during assignment); it is a single path iff it
    /// touches exactly one more vertex than it has edges.
    fn columns_are_paths(&self) -> bool {
        let vertices = self.matrix.num_rows() + 1;
        for col in 0..self.matrix.num_cols() {
            let mut edge_count = 0;
            let mut touched = vec![false; vertices];
            let mut touched_count = 0;
            for (row, &(u, v)) in self.edges.iter().enumerate() {
                if self.matrix[(row, col)] == 0 {
                    continue;
                }
                edge_count += 1;
                for x in [u, v] {
                    if !touched[x] {
                        touched[x] = true;
                        touched_count += 1;
                    }
                }
            }
            if edge_count > 0 && touched_count != edge_count + 1 {
                return false;
            }
        }
        true
    }
}

/// Direct graphicness test. A graphic node becomes a leaf; a non-graphic
/// node with at most three rows or columns is irregular, because in that
/// regime graphic, cographic and regular coincide (the excluded minors of
/// graphicness beyond F7 all have rank and corank at least four).
pub(crate) fn test_graphicness(
    ctx: &mut DriverCtx<'_>,
    node: &mut DecompNode,
    queue: &mut TaskQueue,
    task: &Task,
) -> Result<(), DecompError> {
    ctx.check_deadline()?;
    let graphic = is_graphic(&node.matrix);
    node.graphicness = if graphic { TriState::Yes } else { TriState::No };
    if graphic {
        node.node_type = NodeType::LeafGraphic;
        return Ok(());
    }
    if node.matrix.num_rows() <= 3 || node.matrix.num_cols() <= 3 {
        node.node_type = NodeType::Irregular;
        queue.mark_irregular(Minor {
            matrix: node.matrix.clone(),
            kind: MinorKind::NonGraphicSmall,
        });
        return Ok(());
    }
    queue.push(task.clone());
    Ok(())
}

/// Direct cographicness test; mirror of [`test_graphicness`].
pub(crate) fn test_cographicness(
    ctx: &mut DriverCtx<'_>,
    node: &mut DecompNode,
    queue: &mut TaskQueue,
    task: &Task,
) -> Result<(), DecompError> {
    ctx.check_deadline()?;
    let cographic = is_cographic(&node.matrix);
    node.cographicness = if cographic { TriState::Yes } else { TriState::No };
    if cographic {
        node.node_type = NodeType::LeafCographic;
        return Ok(());
    }
    if node.matrix.num_rows() <= 3 || node.matrix.num_cols() <= 3 {
        node.node_type = NodeType::Irregular;
        queue.mark_irregular(Minor {
            matrix: node.matrix.clone(),
            kind: MinorKind::NonGraphicSmall,
        });
        return Ok(());
    }
    queue.push(task.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_is_graphic() {
        let w3 = Matrix::from_rows(vec![vec![1, 1, 0], vec![1, 1, 1], vec![0, 1, 1]]);
        assert!(is_graphic(&w3));
        assert!(is_cographic(&w3));
    }

    #[test]
    fn test_fano_is_not_graphic() {
        // F7 = [I | A]: the columns are the three edge pairs and the
        // center of the Fano plane.
        let fano = Matrix::from_rows(vec![
            vec![1, 1, 0, 1],
            vec![1, 0, 1, 1],
            vec![0, 1, 1, 1],
        ]);
        assert!(!is_graphic(&fano));
        assert!(!is_cographic(&fano));
    }

    #[test]
    fn test_k5_is_graphic_not_cographic() {
        // M(K5) with the star at one vertex as basis: columns are all
        // pairs of spokes.
        let k5 = Matrix::from_rows(vec![
            vec![1, 1, 1, 0, 0, 0],
            vec![1, 0, 0, 1, 1, 0],
            vec![0, 1, 0, 1, 0, 1],
            vec![0, 0, 1, 0, 1, 1],
        ]);
        assert!(is_graphic(&k5));
        assert!(!is_cographic(&k5));
    }

    #[test]
    fn test_loops_and_parallels_are_graphic() {
        let m = Matrix::from_rows(vec![vec![0, 1, 1], vec![0, 1, 1]]);
        assert!(is_graphic(&m));
    }

    #[test]
    fn test_empty_rank_is_graphic() {
        assert!(is_graphic(&Matrix::zeros(0, 2)));
        assert!(is_graphic(&Matrix::zeros(2, 0)));
    }
}
