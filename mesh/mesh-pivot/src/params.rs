//! Parameters for ball pivoting.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ReconstructError, ReconstructResult};

/// Parameters for ball pivoting reconstruction.
///
/// The ball radius is the only tunable. It drives both the size of the rolling
/// ball and the spatial grid (cells are two radii wide), so it should be a
/// little larger than the typical spacing between neighbouring samples.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BallPivotingParams {
    /// Ball radius. Default: 1.0
    pub radius: f64,
}

impl Default for BallPivotingParams {
    fn default() -> Self {
        Self { radius: 1.0 }
    }
}

impl BallPivotingParams {
    /// Creates new parameters with the given radius.
    #[must_use]
    pub const fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Sets the ball radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Checks that the radius is a positive finite number.
    ///
    /// # Errors
    ///
    /// Returns [`ReconstructError::InvalidRadius`] otherwise.
    pub fn validate(&self) -> ReconstructResult<()> {
        if self.radius.is_finite() && self.radius > 0.0 {
            Ok(())
        } else {
            Err(ReconstructError::InvalidRadius(self.radius))
        }
    }
}
