//! Seed triangle search.

use mesh_types::{Point3, Vector3};

use crate::front::VertexId;
use crate::geometry::{ball_center, ball_is_empty, face_normal, unit_direction};
use crate::grid::SpatialGrid;

/// A triangle the ball can rest on with no other point inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    /// Vertices in emission order.
    pub vertices: [VertexId; 3],
    /// Center of the empty ball touching all three vertices.
    pub center: Point3<f64>,
}

/// Finds the first seed triangle, scanning cells in storage order.
///
/// Within a cell, the average input normal fixes the expected orientation.
/// For every point `p1` of the cell, its neighbours are sorted by distance and
/// every ordered pair `(p2, p3)` is tried as the face `(p1, p2, p3)`. A face is
/// accepted when it faces the same side as the average normal, admits a ball
/// center and that ball is empty over the neighbourhood.
///
/// Cells whose normals cancel out are skipped. The search is pure: marking
/// the vertices used is left to the caller.
#[must_use]
pub fn find_seed_triangle(grid: &SpatialGrid<'_>, radius: f64) -> Option<Seed> {
    grid.cells()
        .find_map(|cell| seed_in_cell(grid, cell, radius))
}

fn seed_in_cell(grid: &SpatialGrid<'_>, cell: &[VertexId], radius: f64) -> Option<Seed> {
    let (sum, total) = cell.iter().map(|&id| grid.point(id).normal).fold(
        (Vector3::zeros(), 0.0),
        |(sum, total), n| (sum + n, total + n.norm()),
    );
    let reference = unit_direction(&sum, total)?;

    for &p1 in cell {
        let origin = grid.point(p1).position;
        let mut neighbours = grid.query(&origin, &[p1]);
        neighbours.sort_by(|&a, &b| {
            let da = nalgebra::distance_squared(&grid.point(a).position, &origin);
            let db = nalgebra::distance_squared(&grid.point(b).position, &origin);
            da.total_cmp(&db)
        });

        for &p2 in &neighbours {
            for &p3 in &neighbours {
                if p2 == p3 {
                    continue;
                }
                let a = &grid.point(p2).position;
                let b = &grid.point(p3).position;
                if face_normal(&origin, a, b).is_none_or(|n| n.dot(&reference) < 0.0) {
                    continue;
                }
                let Some(center) = ball_center(&origin, a, b, radius) else {
                    continue;
                };
                let candidates = neighbours.iter().map(|&id| &grid.point(id).position);
                if ball_is_empty(&center, radius, candidates) {
                    return Some(Seed {
                        vertices: [p1, p2, p3],
                        center,
                    });
                }
            }
        }
    }
    None
}
