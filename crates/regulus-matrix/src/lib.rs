//! # regulus-matrix
//!
//! The shared data model for the Regulus matroid decomposition engine.
//!
//! This crate provides:
//! - Dense matrices over {−1, 0, 1} stored row-major
//! - Permutation views with O(1) logical row/column swaps
//! - Permuted matroid views keeping element labels in sync with the view
//! - The GF(2) pivot exchanging a basis element with a cobasis element
//! - Read-only matrix overlays (zero-block suppression)
//! - BFS over the bipartite graph spanned by a matrix's non-zero support
//!
//! ## Design Principles
//!
//! - **Permutations, not copies**: reorderings swap index-vector entries;
//!   a matrix is only materialized at canonical-form time.
//! - **Element readers**: algorithms consume the [`MatrixRef`] capability,
//!   so overlays compose with views without allocation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bfs;
pub mod dense;
pub mod matroid;
pub mod perm;
pub mod permuted;
pub mod view;

pub use bfs::{bipartite_bfs, BfsNode, BipartiteDims, Reachability};
pub use dense::Matrix;
pub use matroid::{ElementId, InvalidPivot, PermutedMatroid};
pub use perm::Permutation;
pub use permuted::{count_column_run, count_row_run, is_non_zero, is_one, PermutedMatrix};
pub use view::{MatrixRef, ZeroBlock};

#[cfg(test)]
mod proptests;
