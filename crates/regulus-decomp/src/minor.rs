//! Irregularity certificates.

use regulus_matrix::Matrix;

/// How the irregularity was established.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MinorKind {
    /// A node with at most three rows or columns whose matroid is not
    /// graphic; in that regime graphic, cographic and regular coincide.
    NonGraphicSmall,
    /// A 3-connected node that is neither graphic, cographic nor R10 and
    /// admits no 3-separation.
    NoThreeSeparation,
    /// A ternary matrix whose signs violate the Camion pattern.
    BadSigning,
}

/// A minor certifying irregularity of the input matroid.
///
/// The certificate is not minimum-size; it is the matrix of the node at
/// which irregularity was established.
#[derive(Clone, Debug)]
pub struct Minor {
    /// Matrix of the irregular node.
    pub matrix: Matrix,
    /// How irregularity was established.
    pub kind: MinorKind,
}
