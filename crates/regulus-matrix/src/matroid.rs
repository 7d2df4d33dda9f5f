//! Permuted matroid views: a permuted matrix plus element labels.

use std::cmp::Ordering;
use std::ops::Range;

use thiserror::Error;

use crate::dense::Matrix;
use crate::permuted::PermutedMatrix;
use crate::view::MatrixRef;

/// Identifier of a matroid element.
///
/// Rows (basis elements) are positive `index + 1`; columns (cobasis
/// elements) are negative `−(index + 1)`, so the two families are disjoint.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ElementId(i32);

impl ElementId {
    /// The element labelling row `index` of the original matrix.
    ///
    /// # Panics
    ///
    /// Panics if `index + 1` does not fit in `i32`.
    #[must_use]
    pub fn row(index: usize) -> Self {
        Self(i32::try_from(index + 1).expect("row index fits in i32"))
    }

    /// The element labelling column `index` of the original matrix.
    ///
    /// # Panics
    ///
    /// Panics if `index + 1` does not fit in `i32`.
    #[must_use]
    pub fn column(index: usize) -> Self {
        Self(-i32::try_from(index + 1).expect("column index fits in i32"))
    }

    /// True iff the element originated as a row.
    #[must_use]
    pub fn is_row(self) -> bool {
        self.0 > 0
    }

    /// The raw signed value.
    #[must_use]
    pub fn raw(self) -> i32 {
        self.0
    }
}

/// Error returned when a GF(2) pivot is requested on a zero entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
#[error("pivot entry at ({row}, {col}) is zero")]
pub struct InvalidPivot {
    /// Logical row of the rejected pivot.
    pub row: usize,
    /// Logical column of the rejected pivot.
    pub col: usize,
}

/// A permuted matrix together with row and column element labels.
///
/// Labels are attached to *backing* positions, so permutation-entry swaps
/// keep view and labels consistent by construction; only the pivot, which
/// exchanges a basis element with a cobasis element, moves labels.
pub struct PermutedMatroid<'a> {
    view: PermutedMatrix<'a>,
    row_labels: Vec<ElementId>,
    col_labels: Vec<ElementId>,
}

impl<'a> PermutedMatroid<'a> {
    /// Wraps a matrix with identity permutations and default labels
    /// (`ElementId::row(i)` / `ElementId::column(j)`).
    #[must_use]
    pub fn new(matrix: &'a mut Matrix) -> Self {
        let row_labels = (0..matrix.num_rows()).map(ElementId::row).collect();
        let col_labels = (0..matrix.num_cols()).map(ElementId::column).collect();
        Self {
            view: PermutedMatrix::new(matrix),
            row_labels,
            col_labels,
        }
    }

    /// Returns the underlying permuted view.
    #[must_use]
    pub fn view(&self) -> &PermutedMatrix<'a> {
        &self.view
    }

    /// Returns the label of logical row `i`.
    #[must_use]
    pub fn row_label(&self, i: usize) -> ElementId {
        self.row_labels[self.view.physical_row(i)]
    }

    /// Returns the label of logical column `j`.
    #[must_use]
    pub fn col_label(&self, j: usize) -> ElementId {
        self.col_labels[self.view.physical_col(j)]
    }

    /// Swaps two logical rows, labels included.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.view.swap_rows(i, j);
    }

    /// Swaps two logical columns, labels included.
    pub fn swap_cols(&mut self, i: usize, j: usize) {
        self.view.swap_cols(i, j);
    }

    /// Sorts the logical rows in `row_range` by comparing their entry
    /// vectors restricted to `col_range` under `cmp`. Ties keep their
    /// original order. Labels follow automatically.
    pub fn sort_rows<F>(&mut self, row_range: Range<usize>, col_range: Range<usize>, cmp: F)
    where
        F: Fn(&[i8], &[i8]) -> Ordering,
    {
        let mut keys: Vec<Option<Vec<i8>>> = vec![None; self.num_rows()];
        for i in row_range.clone() {
            let key = col_range.clone().map(|j| self.at(i, j)).collect();
            keys[self.view.physical_row(i)] = Some(key);
        }
        self.view.row_perm_mut().sort_range_by(row_range, |a, b| {
            cmp(
                keys[a].as_deref().expect("key extracted for sorted row"),
                keys[b].as_deref().expect("key extracted for sorted row"),
            )
        });
    }

    /// Sorts the logical columns in `col_range` by comparing their entry
    /// vectors restricted to `row_range` under `cmp`.
    pub fn sort_cols<F>(&mut self, row_range: Range<usize>, col_range: Range<usize>, cmp: F)
    where
        F: Fn(&[i8], &[i8]) -> Ordering,
    {
        let mut keys: Vec<Option<Vec<i8>>> = vec![None; self.num_cols()];
        for j in col_range.clone() {
            let key = row_range.clone().map(|i| self.at(i, j)).collect();
            keys[self.view.physical_col(j)] = Some(key);
        }
        self.view.col_perm_mut().sort_range_by(col_range, |a, b| {
            cmp(
                keys[a].as_deref().expect("key extracted for sorted column"),
                keys[b].as_deref().expect("key extracted for sorted column"),
            )
        });
    }

    /// Sorts all logical rows with a comparator over backing row indices.
    pub fn sort_rows_with<F>(&mut self, cmp: F)
    where
        F: FnMut(usize, usize) -> Ordering,
    {
        let n = self.num_rows();
        self.view.row_perm_mut().sort_range_by(0..n, cmp);
    }

    /// Sorts all logical columns with a comparator over backing column
    /// indices.
    pub fn sort_cols_with<F>(&mut self, cmp: F)
    where
        F: FnMut(usize, usize) -> Ordering,
    {
        let n = self.num_cols();
        self.view.col_perm_mut().sort_range_by(0..n, cmp);
    }

    /// Performs the binary pivot at logical entry `(row, col)`.
    ///
    /// Requires the pivot entry to be one. For every `i ≠ row`, `j ≠ col`
    /// the entry becomes `M(i, j) XOR (M(i, col) AND M(row, j))`; the
    /// pivot row and column themselves are unchanged. The labels of the
    /// pivot row and pivot column are exchanged, so the matrix again
    /// represents the same matroid over the relabelled ground set.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPivot`] if the pivot entry is not one.
    pub fn binary_pivot(&mut self, row: usize, col: usize) -> Result<(), InvalidPivot> {
        if self.at(row, col) != 1 {
            return Err(InvalidPivot { row, col });
        }
        for i in 0..self.num_rows() {
            if i == row || self.at(i, col) == 0 {
                continue;
            }
            for j in 0..self.num_cols() {
                if j == col || self.at(row, j) == 0 {
                    continue;
                }
                let flipped = self.at(i, j) ^ 1;
                self.view.set(i, j, flipped);
            }
        }
        let (r, c) = (self.view.physical_row(row), self.view.physical_col(col));
        std::mem::swap(&mut self.row_labels[r], &mut self.col_labels[c]);
        Ok(())
    }
}

impl MatrixRef for PermutedMatroid<'_> {
    fn num_rows(&self) -> usize {
        self.view.num_rows()
    }

    fn num_cols(&self) -> usize {
        self.view.num_cols()
    }

    fn at(&self, row: usize, col: usize) -> i8 {
        self.view.at(row, col)
    }
}
