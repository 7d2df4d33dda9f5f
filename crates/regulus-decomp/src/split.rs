//! Splitting a matrix along a separation into k-sum children.
//!
//! The input matrix is arranged with the separation's first side at the
//! top left; the cross block carrying the connectivity is factored and
//! distributed to both children as marker rows/columns, so that the
//! k-sum of the children reassembles the original matroid.

use regulus_matrix::Matrix;

use crate::error::DecompError;
use crate::node::NodeType;
use crate::separation::{Separation, SeparationRank};

/// Builds the two child matrices of the k-sum certified by `sep`.
///
/// The returned [`NodeType`] reflects the rank actually found in the
/// cross block, which never exceeds the separation's declared rank.
///
/// # Errors
///
/// Returns [`DecompError::InvalidInput`] when the cross block does not
/// factor with the declared rank, which indicates an inconsistent
/// certificate.
pub(crate) fn split_by_separation(
    matrix: &Matrix,
    sep: &Separation,
) -> Result<(Matrix, Matrix, NodeType), DecompError> {
    let split_rows = sep.split_rows();
    let split_cols = sep.split_cols();
    let num_rows = matrix.num_rows();
    let num_cols = matrix.num_cols();
    let top: Vec<usize> = (0..split_rows).collect();
    let bottom: Vec<usize> = (split_rows..num_rows).collect();
    let left: Vec<usize> = (0..split_cols).collect();
    let right: Vec<usize> = (split_cols..num_cols).collect();

    match sep.rank() {
        SeparationRank::One => Ok((
            matrix.submatrix(&top, &left),
            matrix.submatrix(&bottom, &right),
            NodeType::OneSum,
        )),
        SeparationRank::Two => {
            // The overlap offset tells which cross block carries the
            // rank: at or below the split it is the bottom-left block,
            // above it the top-right one.
            if sep.overlap_rows() >= split_rows {
                split_rank_one_bottom_left(matrix, &top, &bottom, &left, &right)
            } else {
                split_rank_one_top_right(matrix, &top, &bottom, &left, &right)
            }
        }
        SeparationRank::Three => {
            split_rank_two_bottom_left(matrix, &top, &bottom, &left, &right)
        }
    }
}

/// Rank-1 cross block below the split: factor it as `u · vᵀ`; `v` becomes
/// a marker row of the first child and `u` a marker column of the second.
fn split_rank_one_bottom_left(
    matrix: &Matrix,
    top: &[usize],
    bottom: &[usize],
    left: &[usize],
    right: &[usize],
) -> Result<(Matrix, Matrix, NodeType), DecompError> {
    let cross = matrix.submatrix(bottom, left);
    let Some(pattern) = (0..cross.num_rows()).find(|&i| cross.row(i).iter().any(|&v| v != 0))
    else {
        // Cross block is zero after all: plain 1-sum.
        return Ok((
            matrix.submatrix(top, left),
            matrix.submatrix(bottom, right),
            NodeType::OneSum,
        ));
    };
    let pattern_row: Vec<i8> = cross.row(pattern).to_vec();
    let mut first = Vec::with_capacity(top.len() + 1);
    for &r in top {
        first.push(left.iter().map(|&c| matrix[(r, c)]).collect::<Vec<i8>>());
    }
    first.push(pattern_row.clone());

    let mut second = Vec::with_capacity(bottom.len());
    for (i, &r) in bottom.iter().enumerate() {
        let row = cross.row(i);
        let marker = if row.iter().any(|&v| v != 0) {
            if row != pattern_row.as_slice() {
                return Err(DecompError::InvalidInput(
                    "cross block of a 2-separation has rank above one".into(),
                ));
            }
            1
        } else {
            0
        };
        let mut entries = Vec::with_capacity(right.len() + 1);
        entries.push(marker);
        entries.extend(right.iter().map(|&c| matrix[(r, c)]));
        second.push(entries);
    }
    Ok((
        Matrix::from_rows(first),
        Matrix::from_rows(second),
        NodeType::TwoSum,
    ))
}

/// Rank-1 cross block above the split; mirror of the bottom-left case.
fn split_rank_one_top_right(
    matrix: &Matrix,
    top: &[usize],
    bottom: &[usize],
    left: &[usize],
    right: &[usize],
) -> Result<(Matrix, Matrix, NodeType), DecompError> {
    let cross = matrix.submatrix(top, right);
    let Some(pattern) = (0..cross.num_cols())
        .find(|&j| (0..cross.num_rows()).any(|i| cross[(i, j)] != 0))
    else {
        return Ok((
            matrix.submatrix(top, left),
            matrix.submatrix(bottom, right),
            NodeType::OneSum,
        ));
    };
    let pattern_col: Vec<i8> = (0..cross.num_rows()).map(|i| cross[(i, pattern)]).collect();

    let mut first = Vec::with_capacity(top.len());
    for (i, &r) in top.iter().enumerate() {
        let mut entries: Vec<i8> = left.iter().map(|&c| matrix[(r, c)]).collect();
        entries.push(pattern_col[i]);
        first.push(entries);
    }

    let mut marker_row = Vec::with_capacity(right.len());
    for j in 0..cross.num_cols() {
        let col: Vec<i8> = (0..cross.num_rows()).map(|i| cross[(i, j)]).collect();
        let nonzero = col.iter().any(|&v| v != 0);
        if nonzero && col != pattern_col {
            return Err(DecompError::InvalidInput(
                "cross block of a 2-separation has rank above one".into(),
            ));
        }
        marker_row.push(i8::from(nonzero));
    }
    let mut second = Vec::with_capacity(bottom.len() + 1);
    second.push(marker_row);
    for &r in bottom {
        second.push(right.iter().map(|&c| matrix[(r, c)]).collect());
    }
    Ok((
        Matrix::from_rows(first),
        Matrix::from_rows(second),
        NodeType::TwoSum,
    ))
}

/// Rank-2 cross block below the split: factor it as `u₁v₁ᵀ ⊕ u₂v₂ᵀ` over
/// GF(2); both patterns become marker rows/columns.
fn split_rank_two_bottom_left(
    matrix: &Matrix,
    top: &[usize],
    bottom: &[usize],
    left: &[usize],
    right: &[usize],
) -> Result<(Matrix, Matrix, NodeType), DecompError> {
    let cross = matrix.submatrix(bottom, left);
    let rows: Vec<&[i8]> = (0..cross.num_rows()).map(|i| cross.row(i)).collect();
    let Some(first_idx) = rows.iter().position(|r| r.iter().any(|&v| v != 0)) else {
        return Ok((
            matrix.submatrix(top, left),
            matrix.submatrix(bottom, right),
            NodeType::OneSum,
        ));
    };
    let v1: Vec<i8> = rows[first_idx].to_vec();
    let second_idx = rows
        .iter()
        .position(|r| r.iter().any(|&v| v != 0) && *r != v1.as_slice());
    let Some(second_idx) = second_idx else {
        // Rank one after all.
        return split_rank_one_bottom_left(matrix, top, bottom, left, right);
    };
    let v2: Vec<i8> = rows[second_idx].to_vec();
    let xor = |a: &[i8], b: &[i8]| -> Vec<i8> {
        a.iter().zip(b.iter()).map(|(&x, &y)| x ^ y).collect()
    };
    let v12 = xor(&v1, &v2);

    let mut second = Vec::with_capacity(bottom.len());
    for (i, &r) in bottom.iter().enumerate() {
        let row = rows[i];
        let (u1, u2) = if row.iter().all(|&v| v == 0) {
            (0, 0)
        } else if row == v1.as_slice() {
            (1, 0)
        } else if row == v2.as_slice() {
            (0, 1)
        } else if row == v12.as_slice() {
            (1, 1)
        } else {
            return Err(DecompError::InvalidInput(
                "cross block of a 3-separation has rank above two".into(),
            ));
        };
        let mut entries = Vec::with_capacity(right.len() + 2);
        entries.push(u1);
        entries.push(u2);
        entries.extend(right.iter().map(|&c| matrix[(r, c)]));
        second.push(entries);
    }

    let mut first = Vec::with_capacity(top.len() + 2);
    for &r in top {
        first.push(left.iter().map(|&c| matrix[(r, c)]).collect::<Vec<i8>>());
    }
    first.push(v1);
    first.push(v2);
    Ok((
        Matrix::from_rows(first),
        Matrix::from_rows(second),
        NodeType::ThreeSum,
    ))
}
