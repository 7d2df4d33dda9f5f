//! Element-reader capability and read-only overlays.

/// Read access to a rectangular array of `i8` entries.
///
/// Algorithms that only inspect entries take this capability instead of a
/// concrete matrix, so permutation views and overlays compose freely.
pub trait MatrixRef {
    /// Returns the number of rows.
    fn num_rows(&self) -> usize;

    /// Returns the number of columns.
    fn num_cols(&self) -> usize;

    /// Returns the entry at the given logical coordinates.
    fn at(&self, row: usize, col: usize) -> i8;
}

impl<M: MatrixRef> MatrixRef for &M {
    fn num_rows(&self) -> usize {
        (**self).num_rows()
    }

    fn num_cols(&self) -> usize {
        (**self).num_cols()
    }

    fn at(&self, row: usize, col: usize) -> i8 {
        (**self).at(row, col)
    }
}

/// Overlay that reads the top-left `height` × `width` block as zero and
/// passes every other entry through.
///
/// Used to suppress the seed block while searching for a closing path in
/// the rest of the matrix. O(1) per access, no allocation.
pub struct ZeroBlock<'a, M> {
    inner: &'a M,
    height: usize,
    width: usize,
}

impl<'a, M: MatrixRef> ZeroBlock<'a, M> {
    /// Wraps `inner`, zeroing the top-left `height` × `width` block.
    #[must_use]
    pub fn new(inner: &'a M, height: usize, width: usize) -> Self {
        Self {
            inner,
            height,
            width,
        }
    }
}

impl<M: MatrixRef> MatrixRef for ZeroBlock<'_, M> {
    fn num_rows(&self) -> usize {
        self.inner.num_rows()
    }

    fn num_cols(&self) -> usize {
        self.inner.num_cols()
    }

    fn at(&self, row: usize, col: usize) -> i8 {
        if row < self.height && col < self.width {
            0
        } else {
            self.inner.at(row, col)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::Matrix;

    #[test]
    fn test_zero_block() {
        let m = Matrix::from_rows(vec![vec![1, 1, 1], vec![1, 1, 1], vec![1, 1, 1]]);
        let z = ZeroBlock::new(&m, 2, 2);
        assert_eq!(z.num_rows(), 3);
        assert_eq!(z.num_cols(), 3);
        assert_eq!(z.at(0, 0), 0);
        assert_eq!(z.at(1, 1), 0);
        assert_eq!(z.at(0, 2), 1);
        assert_eq!(z.at(2, 0), 1);
        assert_eq!(z.at(2, 2), 1);
    }
}
