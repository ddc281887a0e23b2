//! The pivot operator: rolling the ball about one front edge.

use mesh_types::Point3;

use crate::front::{EdgeId, Front, VertexId};
use crate::geometry::{ball_center, ball_is_empty, face_normal, signed_angle, unit_direction};
use crate::grid::SpatialGrid;

/// Where the ball comes to rest after pivoting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    /// Vertex the ball touches next.
    pub vertex: VertexId,
    /// Ball center resting on the edge and `vertex`.
    pub center: Point3<f64>,
}

/// Rotates the ball about `edge` and returns the first point it hits.
///
/// Candidates are the neighbours of the edge midpoint other than the edge's
/// endpoints and opposite vertex. For an edge `a→b` and candidate `p`, the new
/// face is `(b, a, p)`. A candidate is skipped when:
///
/// - the new face points away from `p`'s normal,
/// - no ball of `radius` rests on the new face,
/// - the new ball center lies behind the new face,
/// - `p` already has an inner edge to `a` or `b`.
///
/// The survivor with the smallest rotation angle wins, first found on ties.
/// Returns `None` if nothing survives or the winning ball is not empty.
///
/// # Panics
///
/// Panics if `edge` was not issued by `front`.
#[must_use]
pub fn pivot_ball(
    grid: &SpatialGrid<'_>,
    front: &Front,
    edge: EdgeId,
    radius: f64,
) -> Option<Pivot> {
    let e = front.edge(edge);
    let a = grid.point(e.from()).position;
    let b = grid.point(e.to()).position;
    let midpoint = nalgebra::center(&a, &b);
    let axis = b - a;
    let old_dir = unit_direction(&(e.center() - midpoint), radius)?;

    let neighbourhood = grid.query(&midpoint, &[e.from(), e.to(), e.opposite()]);

    let mut best: Option<(f64, Pivot)> = None;
    for &id in &neighbourhood {
        let p = grid.point(id);
        let Some(normal) = face_normal(&b, &a, &p.position) else {
            continue;
        };
        if normal.dot(&p.normal) < 0.0 {
            continue;
        }
        let Some(center) = ball_center(&b, &a, &p.position, radius) else {
            continue;
        };
        let Some(new_dir) = unit_direction(&(center - midpoint), radius) else {
            continue;
        };
        if new_dir.dot(&normal) < 0.0 {
            continue;
        }
        if front.has_inner_edge_to(id, e.from(), e.to()) {
            continue;
        }

        let angle = signed_angle(&old_dir, &new_dir, &axis);
        if best.is_none_or(|(smallest, _)| angle < smallest) {
            best = Some((angle, Pivot { vertex: id, center }));
        }
    }

    let (_, pivot) = best?;
    let candidates = neighbourhood.iter().map(|&id| &grid.point(id).position);
    ball_is_empty(&pivot.center, radius, candidates).then_some(pivot)
}
