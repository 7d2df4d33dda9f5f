//! k-separation certificates.

/// Connectivity rank of a separation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SeparationRank {
    /// 1-separation: the two sides are disconnected.
    One,
    /// 2-separation: the cross block has rank one.
    Two,
    /// 3-separation: the cross block has rank two.
    Three,
}

impl SeparationRank {
    /// The rank as a number.
    #[must_use]
    pub fn value(self) -> usize {
        match self {
            SeparationRank::One => 1,
            SeparationRank::Two => 2,
            SeparationRank::Three => 3,
        }
    }
}

/// Certificate that a matroid decomposes as a k-sum, with the split at a
/// top-left rectangle of the (suitably permuted) matrix.
///
/// `split` is the `(rows, cols)` size of the top-left block belonging to
/// the first side. For ranks two and three, `overlap` locates the shared
/// rank structure connecting the two sides.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Separation {
    rank: SeparationRank,
    split: (usize, usize),
    overlap: (usize, usize),
}

impl Separation {
    /// A 1-separation with the given split; there is no overlap.
    #[must_use]
    pub fn one(split: (usize, usize)) -> Self {
        Self {
            rank: SeparationRank::One,
            split,
            overlap: (0, 0),
        }
    }

    /// A 2-separation with the given split and overlap offset.
    #[must_use]
    pub fn two(split: (usize, usize), overlap: (usize, usize)) -> Self {
        Self {
            rank: SeparationRank::Two,
            split,
            overlap,
        }
    }

    /// A 3-separation with the given split and overlap offset.
    #[must_use]
    pub fn three(split: (usize, usize), overlap: (usize, usize)) -> Self {
        Self {
            rank: SeparationRank::Three,
            split,
            overlap,
        }
    }

    /// The connectivity rank k.
    #[must_use]
    pub fn rank(&self) -> SeparationRank {
        self.rank
    }

    /// Rows of the top-left block.
    #[must_use]
    pub fn split_rows(&self) -> usize {
        self.split.0
    }

    /// Columns of the top-left block.
    #[must_use]
    pub fn split_cols(&self) -> usize {
        self.split.1
    }

    /// Row coordinate of the overlap offset.
    #[must_use]
    pub fn overlap_rows(&self) -> usize {
        self.overlap.0
    }

    /// Column coordinate of the overlap offset.
    #[must_use]
    pub fn overlap_cols(&self) -> usize {
        self.overlap.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let s = Separation::two((1, 1), (1, 0));
        assert_eq!(s.rank(), SeparationRank::Two);
        assert_eq!(s.rank().value(), 2);
        assert_eq!(s.split_rows(), 1);
        assert_eq!(s.split_cols(), 1);
        assert_eq!(s.overlap_rows(), 1);
        assert_eq!(s.overlap_cols(), 0);
        assert_eq!(s, Separation::two((1, 1), (1, 0)));
        assert_ne!(s, Separation::one((1, 1)));
    }
}
