//! # Regulus
//!
//! Regular matroid recognition for Rust.
//!
//! Regulus decides whether a binary matroid given by a 0/1 matrix is
//! *regular* — representable over every field — or, equivalently,
//! whether a {−1, 0, 1} matrix is totally unimodular. It follows the
//! classical decomposition route: a regular matroid is built from
//! graphic and cographic pieces and copies of R10, glued along 1-, 2-
//! and 3-sums.
//!
//! ## Quick Start
//!
//! ```
//! use regulus::prelude::*;
//!
//! // The wheel W3 is graphic, hence regular.
//! let wheel = Matrix::from_rows(vec![
//!     vec![1, 1, 0],
//!     vec![1, 1, 1],
//!     vec![0, 1, 1],
//! ]);
//! let outcome = test_regularity(&wheel, false, &RegularParams::default(), None).unwrap();
//! assert!(outcome.is_regular);
//!
//! // The Fano plane is not.
//! let fano = Matrix::from_rows(vec![
//!     vec![1, 1, 0, 1],
//!     vec![1, 0, 1, 1],
//!     vec![0, 1, 1, 1],
//! ]);
//! let outcome = test_regularity(&fano, false, &RegularParams::default(), None).unwrap();
//! assert!(!outcome.is_regular);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use regulus_decomp as decomp;
pub use regulus_matrix as matrix;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use regulus_decomp::{
        complete_decomposition, find_wheel_minor, test_regularity, DecompNode, DecompError,
        Minor, MinorKind, NodeType, RegularParams, RegularStats, Regularity, RegularityOutcome,
        Separation, SeparationRank, WheelOutcome,
    };
    pub use regulus_matrix::{ElementId, Matrix, MatrixRef, PermutedMatroid};
}
