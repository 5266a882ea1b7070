//! The problems that ship with the library.
pub use distance_matrix::DistanceMatrix;
pub use motsp::{MOTSPArg, MOTSPExport, MOTSPProblem, PERMUTATION_CONSTRAINT};

mod distance_matrix;
mod motsp;
