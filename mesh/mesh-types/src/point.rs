//! Oriented point samples.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A surface sample: a position and the surface normal at that position.
///
/// Normals are expected to be roughly unit length and to point away from the
/// sampled surface. They are used as given; nothing here renormalizes them.
///
/// # Example
///
/// ```
/// use mesh_types::OrientedPoint;
///
/// let p = OrientedPoint::from_coords(1.0, 2.0, 3.0, 0.0, 0.0, 1.0);
/// assert_eq!(p.position.y, 2.0);
/// assert_eq!(p.normal.z, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrientedPoint {
    /// Sample position.
    pub position: Point3<f64>,
    /// Outward surface normal at the sample.
    pub normal: Vector3<f64>,
}

impl OrientedPoint {
    /// Create a point from a position and a normal.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }

    /// Create a point from raw position and normal components.
    #[inline]
    #[must_use]
    #[allow(clippy::many_single_char_names)]
    pub fn from_coords(x: f64, y: f64, z: f64, nx: f64, ny: f64, nz: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }

    /// Returns `true` if every position and normal component is finite.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::OrientedPoint;
    ///
    /// assert!(OrientedPoint::from_coords(0.0, 0.0, 0.0, 0.0, 0.0, 1.0).is_finite());
    /// assert!(!OrientedPoint::from_coords(f64::NAN, 0.0, 0.0, 0.0, 0.0, 1.0).is_finite());
    /// ```
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite()) && self.normal.iter().all(|c| c.is_finite())
    }
}
