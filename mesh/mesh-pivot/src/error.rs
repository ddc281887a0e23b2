//! Error types for ball pivoting reconstruction.

use thiserror::Error;

/// Errors that can occur before reconstruction starts.
///
/// Every variant rejects the input up front; once the spatial index is built
/// the growing loop never fails. A cloud with no usable seed is reported as
/// [`ReconstructionOutcome::NoSeedFound`](crate::ReconstructionOutcome::NoSeedFound)
/// on a successful result, not as an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReconstructError {
    /// The point cloud has no points.
    #[error("point cloud is empty")]
    EmptyPointCloud,

    /// Ball radius is not a positive finite number.
    #[error("ball radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// A point has a NaN or infinite position or normal component.
    #[error("point {index} has a non-finite position or normal")]
    NonFinitePoint {
        /// Index of the offending point in the input slice.
        index: usize,
    },

    /// The grid is too fine for positions to map to distinct cells.
    #[error("spatial grid of {x}x{y}x{z} cells overflows")]
    GridOverflow {
        /// Cells along X.
        x: usize,
        /// Cells along Y.
        y: usize,
        /// Cells along Z.
        z: usize,
    },
}

impl ReconstructError {
    /// Returns `true` if the error rejects the caller's input.
    ///
    /// All current variants do; the method exists so callers can tell input
    /// problems apart from any future internal failure kind.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyPointCloud
                | Self::InvalidRadius(_)
                | Self::NonFinitePoint { .. }
                | Self::GridOverflow { .. }
        )
    }
}

/// Result type for reconstruction operations.
pub type ReconstructResult<T> = std::result::Result<T, ReconstructError>;
