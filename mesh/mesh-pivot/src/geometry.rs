//! Geometric kernel: face normals, ball placement, emptiness and pivot angles.
//!
//! Every function here is pure. Degenerate input (collinear faces, a ball
//! center sitting on the edge midpoint) yields `None` instead of a non-finite
//! value so callers can reject the candidate outright.

// Algorithm uses standard mathematical variable names
#![allow(clippy::many_single_char_names)]

use std::f64::consts::TAU;

use mesh_types::{Point3, Vector3};

/// Relative magnitude below which a vector is treated as zero.
///
/// Every guard compares against this fraction of a length scale taken from
/// the same input (squared edge length for a cross product, ball radius or
/// edge length for a center offset), so the kernel behaves the same at any
/// coordinate scale.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Relative slack on the squared radius in [`ball_is_empty`].
///
/// A point violates emptiness only if its squared distance to the center is
/// below `r² (1 - EMPTY_BALL_TOLERANCE)`, so the three points the ball rests on
/// never disqualify it through rounding.
pub const EMPTY_BALL_TOLERANCE: f64 = 1e-6;

/// Unit normal of the face `(p0, p1, p2)`.
///
/// Computed as `(p0 - p1) × (p0 - p2)`, which is counter-clockwise positive.
/// Returns `None` when the points are collinear or coincident, judged against
/// the squared length of the longest edge.
///
/// # Example
///
/// ```
/// use mesh_pivot::geometry::face_normal;
/// use mesh_types::Point3;
///
/// let n = face_normal(
///     &Point3::new(0.0, 0.0, 0.0),
///     &Point3::new(1.0, 0.0, 0.0),
///     &Point3::new(0.0, 1.0, 0.0),
/// )
/// .unwrap();
/// assert!((n.z - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn face_normal(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Option<Vector3<f64>> {
    let longest_sq = [p0 - p1, p1 - p2, p2 - p0]
        .iter()
        .map(Vector3::norm_squared)
        .fold(0.0, f64::max);
    (p0 - p1)
        .cross(&(p0 - p2))
        .try_normalize(DEGENERATE_EPSILON * longest_sq)
}

/// Unit vector along `v`, or `None` if `v` is negligible next to `scale`.
pub(crate) fn unit_direction(v: &Vector3<f64>, scale: f64) -> Option<Vector3<f64>> {
    v.try_normalize(DEGENERATE_EPSILON * scale)
}

/// Center of the ball of `radius` resting on `p0`, `p1` and `p2`.
///
/// The circumcenter of the face is lifted along the face normal by
/// `sqrt(r² - ρ²)`, where `ρ` is the circumradius. Returns `None` if the face
/// is degenerate or too large for the ball (`ρ > r`).
///
/// # Example
///
/// ```
/// use mesh_pivot::geometry::ball_center;
/// use mesh_types::Point3;
///
/// let p0 = Point3::new(0.0, 0.0, 0.0);
/// let p1 = Point3::new(1.0, 0.0, 0.0);
/// let p2 = Point3::new(0.0, 1.0, 0.0);
///
/// let c = ball_center(&p0, &p1, &p2, 1.0).unwrap();
/// assert!(((c - p0).norm() - 1.0).abs() < 1e-12);
/// assert!(c.z > 0.0);
///
/// assert!(ball_center(&p0, &p1, &p2, 0.5).is_none());
/// ```
#[must_use]
pub fn ball_center(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    radius: f64,
) -> Option<Point3<f64>> {
    let normal = face_normal(p0, p1, p2)?;

    let ab = p1 - p0;
    let ac = p2 - p0;
    let ab_x_ac = ab.cross(&ac);
    let to_circumcenter = (ab_x_ac.cross(&ab) * ac.norm_squared()
        + ac.cross(&ab_x_ac) * ab.norm_squared())
        / (2.0 * ab_x_ac.norm_squared());

    let height_sq = radius.mul_add(radius, -to_circumcenter.norm_squared());
    if height_sq.is_nan() || height_sq < 0.0 {
        return None;
    }

    let center = p0 + to_circumcenter + normal * height_sq.sqrt();
    center.iter().all(|c| c.is_finite()).then_some(center)
}

/// Returns `true` if no candidate lies strictly inside the ball.
///
/// Points on the sphere surface (within [`EMPTY_BALL_TOLERANCE`]) do not count
/// as inside.
#[must_use]
pub fn ball_is_empty<'p>(
    center: &Point3<f64>,
    radius: f64,
    candidates: impl IntoIterator<Item = &'p Point3<f64>>,
) -> bool {
    let limit = radius * radius * (1.0 - EMPTY_BALL_TOLERANCE);
    candidates
        .into_iter()
        .all(|p| nalgebra::distance_squared(p, center) >= limit)
}

/// Angle the ball turns about an edge to move from `old_center` to `new_center`.
///
/// Both centers are seen from the edge `midpoint`; `edge` is the edge vector
/// (from its start vertex to its end vertex) and fixes the positive rotation
/// sense by the right-hand rule. The result is in `[0, 2π)`. Returns `None` if
/// either center coincides with the midpoint, relative to the edge length.
///
/// # Example
///
/// ```
/// use mesh_pivot::geometry::rotation_angle;
/// use mesh_types::{Point3, Vector3};
/// use std::f64::consts::FRAC_PI_2;
///
/// let m = Point3::origin();
/// let quarter = rotation_angle(
///     &Point3::new(0.0, 0.0, 1.0),
///     &Point3::new(0.0, -1.0, 0.0),
///     &m,
///     &Vector3::x(),
/// )
/// .unwrap();
/// assert!((quarter - FRAC_PI_2).abs() < 1e-12);
/// ```
#[must_use]
pub fn rotation_angle(
    old_center: &Point3<f64>,
    new_center: &Point3<f64>,
    midpoint: &Point3<f64>,
    edge: &Vector3<f64>,
) -> Option<f64> {
    let scale = edge.norm();
    let old_dir = unit_direction(&(old_center - midpoint), scale)?;
    let new_dir = unit_direction(&(new_center - midpoint), scale)?;
    Some(signed_angle(&old_dir, &new_dir, edge))
}

/// Rotation from unit direction `from` to unit direction `to` about `axis`, in `[0, 2π)`.
pub(crate) fn signed_angle(from: &Vector3<f64>, to: &Vector3<f64>, axis: &Vector3<f64>) -> f64 {
    let angle = from.dot(to).clamp(-1.0, 1.0).acos();
    if from.cross(to).dot(axis) < 0.0 {
        (TAU - angle).rem_euclid(TAU)
    } else {
        angle
    }
}
