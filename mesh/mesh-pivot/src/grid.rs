//! Uniform bucket grid over the point cloud.
//!
//! Cells are cubes with an edge of two ball radii laid over the bounding box
//! of the input. Any point within one cell edge of a query position is found
//! by scanning the 3x3x3 block of cells around the query cell.
//!
//! Only occupied cells are stored, so memory follows the point count rather
//! than the volume of the bounding box.

// Cell coordinates are clamped to the grid before casting
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;

use mesh_types::{Aabb, OrientedPoint, Point3};
use tracing::debug;

use crate::error::{ReconstructError, ReconstructResult};
use crate::front::VertexId;

/// Most cells along one axis. Beyond this, `f64` positions no longer map to
/// distinct integer cell coordinates.
const MAX_AXIS_CELLS: f64 = 9_007_199_254_740_992.0;

/// Integer cell coordinate.
type CellCoord = [usize; 3];

/// Spatial index answering fixed-radius neighbourhood queries.
///
/// Built once from the input slice and read-only afterwards. Cells hold
/// [`VertexId`]s, which are indices into that slice.
#[derive(Debug, Clone)]
pub struct SpatialGrid<'a> {
    points: &'a [OrientedPoint],
    lower: Point3<f64>,
    cell_size: f64,
    dims: [usize; 3],
    /// Occupied cells in storage order (X fastest, then Y, then Z).
    cells: Vec<Vec<VertexId>>,
    /// Position of each occupied cell in `cells`.
    slots: HashMap<CellCoord, usize>,
}

impl<'a> SpatialGrid<'a> {
    /// Buckets every point into the cell containing it.
    ///
    /// # Errors
    ///
    /// - [`ReconstructError::EmptyPointCloud`] for an empty slice
    /// - [`ReconstructError::InvalidRadius`] unless `radius` is positive and finite
    /// - [`ReconstructError::NonFinitePoint`] for NaN or infinite components
    /// - [`ReconstructError::GridOverflow`] if an axis needs more cells than
    ///   positions can resolve
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_pivot::SpatialGrid;
    /// use mesh_types::OrientedPoint;
    ///
    /// let points = [
    ///     OrientedPoint::from_coords(0.0, 0.0, 0.0, 0.0, 0.0, 1.0),
    ///     OrientedPoint::from_coords(3.0, 0.0, 0.0, 0.0, 0.0, 1.0),
    /// ];
    /// let grid = SpatialGrid::build(&points, 0.5).unwrap();
    /// assert_eq!(grid.dims(), [3, 1, 1]);
    /// ```
    pub fn build(points: &'a [OrientedPoint], radius: f64) -> ReconstructResult<Self> {
        if points.is_empty() {
            return Err(ReconstructError::EmptyPointCloud);
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ReconstructError::InvalidRadius(radius));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ReconstructError::NonFinitePoint { index });
        }

        let bounds = Aabb::from_points(points.iter().map(|p| &p.position));
        let cell_size = radius * 2.0;
        let extent = bounds.size();
        let counts = [extent.x, extent.y, extent.z].map(|e| (e / cell_size).ceil().max(1.0));
        if counts.iter().any(|&c| c > MAX_AXIS_CELLS) {
            let [x, y, z] = counts.map(|c| c as usize);
            return Err(ReconstructError::GridOverflow { x, y, z });
        }

        let mut grid = Self {
            points,
            lower: bounds.min,
            cell_size,
            dims: counts.map(|c| c as usize),
            cells: Vec::new(),
            slots: HashMap::new(),
        };

        let mut buckets: HashMap<CellCoord, Vec<VertexId>> = HashMap::new();
        for (i, point) in points.iter().enumerate() {
            let coord = grid.cell_coord(&point.position);
            buckets.entry(coord).or_default().push(VertexId::new(i));
        }
        let mut occupied: Vec<_> = buckets.into_iter().collect();
        occupied.sort_unstable_by_key(|(coord, _)| [coord[2], coord[1], coord[0]]);

        grid.cells.reserve(occupied.len());
        for (slot, (coord, ids)) in occupied.into_iter().enumerate() {
            grid.slots.insert(coord, slot);
            grid.cells.push(ids);
        }

        debug!(
            dims = ?grid.dims,
            cell_size,
            occupied = grid.cells.len(),
            "Built spatial grid"
        );
        Ok(grid)
    }

    /// Returns every point strictly within one cell edge of `center`,
    /// skipping the ids listed in `exclude`.
    ///
    /// Points are reported cell by cell in a fixed scan order, and in
    /// insertion order within a cell.
    #[must_use]
    pub fn query(&self, center: &Point3<f64>, exclude: &[VertexId]) -> Vec<VertexId> {
        let [cx, cy, cz] = self.cell_coord(center);
        let radius_sq = self.cell_size * self.cell_size;
        let mut result = Vec::new();

        for x in cx.saturating_sub(1)..=(cx + 1).min(self.dims[0] - 1) {
            for y in cy.saturating_sub(1)..=(cy + 1).min(self.dims[1] - 1) {
                for z in cz.saturating_sub(1)..=(cz + 1).min(self.dims[2] - 1) {
                    let Some(&slot) = self.slots.get(&[x, y, z]) else {
                        continue;
                    };
                    for &id in &self.cells[slot] {
                        if exclude.contains(&id) {
                            continue;
                        }
                        let d_sq = nalgebra::distance_squared(&self.point(id).position, center);
                        if d_sq < radius_sq {
                            result.push(id);
                        }
                    }
                }
            }
        }

        result
    }

    /// The indexed point for an id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not come from this grid's input slice.
    #[inline]
    #[must_use]
    pub fn point(&self, id: VertexId) -> &OrientedPoint {
        &self.points[id.index()]
    }

    /// The input slice the grid was built from.
    #[inline]
    #[must_use]
    pub const fn points(&self) -> &'a [OrientedPoint] {
        self.points
    }

    /// Iterates occupied cells in storage order (X fastest, then Y, then Z).
    pub fn cells(&self) -> impl Iterator<Item = &[VertexId]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Number of cells along each axis.
    #[inline]
    #[must_use]
    pub const fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Cell edge length, which is also the neighbourhood radius of [`query`](Self::query).
    #[inline]
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell containing `position`, clamped into the grid.
    fn cell_coord(&self, position: &Point3<f64>) -> CellCoord {
        std::array::from_fn(|axis| {
            let max = (self.dims[axis] - 1) as f64;
            ((position[axis] - self.lower[axis]) / self.cell_size)
                .floor()
                .clamp(0.0, max) as usize
        })
    }
}
