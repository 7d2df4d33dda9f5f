//! BFS over the bipartite graph spanned by a matrix's non-zero entries.
//!
//! Row index `i` and column index `j` are adjacent iff the entry at
//! `(i, j)` is non-zero. Rows occupy graph indices `[0, m)` and columns
//! `[m, m + n)`.

use std::collections::VecDeque;

use crate::view::MatrixRef;

/// Bijection between matrix coordinates and bipartite graph indices.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BipartiteDims {
    num_rows: usize,
    num_cols: usize,
}

impl BipartiteDims {
    /// Dimensions for an `num_rows` × `num_cols` matrix.
    #[must_use]
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self { num_rows, num_cols }
    }

    /// Total number of graph vertices.
    #[must_use]
    pub fn total(&self) -> usize {
        self.num_rows + self.num_cols
    }

    /// Graph index of a row.
    #[must_use]
    pub fn row_to_index(&self, row: usize) -> usize {
        row
    }

    /// Graph index of a column.
    #[must_use]
    pub fn column_to_index(&self, col: usize) -> usize {
        self.num_rows + col
    }

    /// True iff the graph index denotes a row.
    #[must_use]
    pub fn is_row(&self, index: usize) -> bool {
        index < self.num_rows
    }

    /// The row of a row index.
    #[must_use]
    pub fn index_to_row(&self, index: usize) -> usize {
        debug_assert!(self.is_row(index));
        index
    }

    /// The column of a column index.
    #[must_use]
    pub fn index_to_column(&self, index: usize) -> usize {
        debug_assert!(!self.is_row(index));
        index - self.num_rows
    }

    /// The matrix coordinates of the edge between a row index and a
    /// column index, in either order.
    #[must_use]
    pub fn indexes_to_coordinates(&self, a: usize, b: usize) -> (usize, usize) {
        if self.is_row(a) {
            (self.index_to_row(a), self.index_to_column(b))
        } else {
            (self.index_to_row(b), self.index_to_column(a))
        }
    }
}

/// Search state of one bipartite graph vertex.
///
/// Replaces the −1/−2 distance sentinels of the classical formulation
/// with explicit states.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Reachability {
    /// Never seen by the search.
    Unexplored,
    /// Pre-marked as a search target and never reached.
    Target,
    /// Reached at the given BFS depth.
    Reached(usize),
}

impl Reachability {
    /// True iff the vertex was actually reached.
    #[must_use]
    pub fn is_reached(self) -> bool {
        matches!(self, Reachability::Reached(_))
    }

    /// The BFS depth, if reached.
    #[must_use]
    pub fn depth(self) -> Option<usize> {
        match self {
            Reachability::Reached(d) => Some(d),
            _ => None,
        }
    }
}

/// Per-vertex BFS result: reachability plus the BFS tree predecessor
/// (self for start vertices and untouched vertices).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BfsNode {
    /// Search state of the vertex.
    pub reach: Reachability,
    /// Predecessor in the BFS forest.
    pub predecessor: usize,
}

/// Runs a BFS from `starts` over the support graph of `matrix`.
///
/// Vertices in `targets` are pre-marked; the search stops as soon as one
/// of them is assigned a real depth, and the returned flag tells whether
/// that happened. With an empty target list the search sweeps the whole
/// component of the start set. Exploration is FIFO, ties broken by
/// enqueue order, so depths are shortest-path distances.
#[must_use]
pub fn bipartite_bfs<M: MatrixRef>(
    matrix: &M,
    dims: &BipartiteDims,
    starts: &[usize],
    targets: &[usize],
) -> (bool, Vec<BfsNode>) {
    let mut nodes: Vec<BfsNode> = (0..dims.total())
        .map(|i| BfsNode {
            reach: Reachability::Unexplored,
            predecessor: i,
        })
        .collect();
    for &t in targets {
        nodes[t].reach = Reachability::Target;
    }

    let mut queue = VecDeque::with_capacity(starts.len());
    for &s in starts {
        nodes[s].reach = Reachability::Reached(0);
        queue.push_back(s);
    }

    while let Some(u) = queue.pop_front() {
        let depth = match nodes[u].reach {
            Reachability::Reached(d) => d,
            _ => unreachable!("queued vertices are reached"),
        };
        if dims.is_row(u) {
            let row = dims.index_to_row(u);
            for col in 0..matrix.num_cols() {
                if matrix.at(row, col) == 0 {
                    continue;
                }
                let v = dims.column_to_index(col);
                match nodes[v].reach {
                    Reachability::Unexplored => {
                        nodes[v] = BfsNode {
                            reach: Reachability::Reached(depth + 1),
                            predecessor: u,
                        };
                        queue.push_back(v);
                    }
                    Reachability::Target => {
                        nodes[v] = BfsNode {
                            reach: Reachability::Reached(depth + 1),
                            predecessor: u,
                        };
                        return (true, nodes);
                    }
                    Reachability::Reached(_) => {}
                }
            }
        } else {
            let col = dims.index_to_column(u);
            for row in 0..matrix.num_rows() {
                if matrix.at(row, col) == 0 {
                    continue;
                }
                let v = dims.row_to_index(row);
                match nodes[v].reach {
                    Reachability::Unexplored => {
                        nodes[v] = BfsNode {
                            reach: Reachability::Reached(depth + 1),
                            predecessor: u,
                        };
                        queue.push_back(v);
                    }
                    Reachability::Target => {
                        nodes[v] = BfsNode {
                            reach: Reachability::Reached(depth + 1),
                            predecessor: u,
                        };
                        return (true, nodes);
                    }
                    Reachability::Reached(_) => {}
                }
            }
        }
    }

    (false, nodes)
}
