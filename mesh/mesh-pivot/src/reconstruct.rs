//! The reconstruction session and its state machine.
//!
//! ```text
//! new() ──► IndexBuilt ──seed()──► Growing ──step()*──► Done
//!                │
//!                └──────seed()──► SeedingFailed
//! ```

use mesh_types::{OrientedPoint, Triangle};
use tracing::{debug, info, trace, warn};

use crate::error::ReconstructResult;
use crate::front::{EdgeId, Front, VertexId};
use crate::grid::SpatialGrid;
use crate::observer::{NoopObserver, PivotObserver};
use crate::params::BallPivotingParams;
use crate::pivot::{Pivot, pivot_ball};
use crate::result::{BallPivotingResult, PivotStats, ReconstructionOutcome};
use crate::seed::find_seed_triangle;

/// Where a [`BallPivoting`] session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The spatial index is ready and no seed has been searched for yet.
    IndexBuilt,
    /// A seed was found and the front still has work.
    Growing,
    /// No seed triangle exists. Terminal.
    SeedingFailed,
    /// The work list ran dry. Terminal.
    Done,
}

impl Phase {
    /// Returns `true` for phases no step can leave.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::SeedingFailed | Self::Done)
    }
}

/// A ball pivoting run that can be advanced one step at a time.
///
/// # Example
///
/// ```
/// use mesh_pivot::{BallPivoting, BallPivotingParams, Phase};
/// use mesh_types::OrientedPoint;
///
/// let points: Vec<_> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
///     .into_iter()
///     .map(|(x, y)| OrientedPoint::from_coords(x, y, 0.0, 0.0, 0.0, 1.0))
///     .collect();
///
/// let mut session = BallPivoting::new(&points, &BallPivotingParams::new(2.0)).unwrap();
/// assert_eq!(session.seed(), Phase::Growing);
/// while !session.step().is_terminal() {}
/// assert_eq!(session.triangles().len(), 2);
/// ```
#[derive(Debug)]
pub struct BallPivoting<'a, O: PivotObserver = NoopObserver> {
    grid: SpatialGrid<'a>,
    radius: f64,
    front: Front,
    triangles: Vec<Triangle>,
    faces: Vec<[VertexId; 3]>,
    phase: Phase,
    pivots: usize,
    boundary_edges: usize,
    glues: usize,
    observer: O,
}

impl<'a> BallPivoting<'a> {
    /// Validates the input and builds the spatial index.
    ///
    /// # Errors
    ///
    /// See [`SpatialGrid::build`].
    pub fn new(
        points: &'a [OrientedPoint],
        params: &BallPivotingParams,
    ) -> ReconstructResult<Self> {
        Self::with_observer(points, params, NoopObserver)
    }
}

impl<'a, O: PivotObserver> BallPivoting<'a, O> {
    /// Like [`new`](BallPivoting::new), reporting events to `observer`.
    ///
    /// # Errors
    ///
    /// See [`SpatialGrid::build`].
    pub fn with_observer(
        points: &'a [OrientedPoint],
        params: &BallPivotingParams,
        observer: O,
    ) -> ReconstructResult<Self> {
        info!(
            points = points.len(),
            radius = params.radius,
            "Starting ball pivoting"
        );
        params.validate()?;
        let grid = SpatialGrid::build(points, params.radius)?;

        Ok(Self {
            grid,
            radius: params.radius,
            front: Front::new(points.len()),
            triangles: Vec::new(),
            faces: Vec::new(),
            phase: Phase::IndexBuilt,
            pivots: 0,
            boundary_edges: 0,
            glues: 0,
            observer,
        })
    }

    /// Searches for the seed triangle and starts the front from it.
    ///
    /// Only acts in [`Phase::IndexBuilt`]; otherwise returns the current phase.
    pub fn seed(&mut self) -> Phase {
        if self.phase != Phase::IndexBuilt {
            return self.phase;
        }

        if let Some(seed) = find_seed_triangle(&self.grid, self.radius) {
            debug!(vertices = ?seed.vertices.map(VertexId::index), "Found seed triangle");
            self.front.seed(seed.vertices, seed.center);
            self.emit(seed.vertices);
            self.observer.seed_found(seed.vertices, &seed.center);
            self.phase = Phase::Growing;
        } else {
            warn!(
                points = self.grid.points().len(),
                radius = self.radius,
                "No seed triangle found"
            );
            self.phase = Phase::SeedingFailed;
        }
        self.phase
    }

    /// Pivots about the next active edge.
    ///
    /// Seeds first when still in [`Phase::IndexBuilt`]. Terminal phases are
    /// left untouched.
    pub fn step(&mut self) -> Phase {
        match self.phase {
            Phase::IndexBuilt => return self.seed(),
            Phase::Growing => {}
            Phase::SeedingFailed | Phase::Done => return self.phase,
        }

        let Some(edge) = self.front.pop_active() else {
            debug!(
                triangles = self.triangles.len(),
                stale = self.front.stale_skipped(),
                "Front exhausted"
            );
            self.phase = Phase::Done;
            return self.phase;
        };

        let pivot = pivot_ball(&self.grid, &self.front, edge, self.radius)
            .filter(|p| !self.front.is_used(p.vertex) || self.front.on_front(p.vertex));
        match pivot {
            Some(pivot) => self.advance(edge, pivot),
            None => {
                trace!(edge = edge.index(), "Marking boundary edge");
                self.front.mark_boundary(edge);
                self.boundary_edges += 1;
                self.observer.edge_boundary(edge);
            }
        }
        self.phase
    }

    /// Steps until a terminal phase and returns the mesh.
    #[must_use]
    pub fn run(mut self) -> BallPivotingResult {
        while !self.step().is_terminal() {}

        let stats = self.stats();
        info!(
            triangles = stats.triangles,
            boundary_edges = stats.boundary_edges,
            glues = stats.glues,
            used = stats.used_vertices,
            "Ball pivoting complete"
        );

        let outcome = if self.phase == Phase::SeedingFailed {
            ReconstructionOutcome::NoSeedFound
        } else {
            ReconstructionOutcome::Meshed
        };
        BallPivotingResult {
            triangles: self.triangles,
            faces: self.faces,
            outcome,
            stats,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The mesh front.
    #[must_use]
    pub const fn front(&self) -> &Front {
        &self.front
    }

    /// The spatial index.
    #[must_use]
    pub const fn grid(&self) -> &SpatialGrid<'a> {
        &self.grid
    }

    /// Triangles emitted so far, in discovery order.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Emitted triangles as indices into the input slice.
    #[must_use]
    pub fn faces(&self) -> &[[VertexId; 3]] {
        &self.faces
    }

    /// The event observer.
    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// Counters for the run so far.
    #[must_use]
    pub fn stats(&self) -> PivotStats {
        PivotStats {
            points: self.grid.points().len(),
            triangles: self.triangles.len(),
            pivots: self.pivots,
            boundary_edges: self.boundary_edges,
            glues: self.glues,
            stale_skipped: self.front.stale_skipped(),
            work_pushes: self.front.pushes(),
            work_pops: self.front.pops(),
            used_vertices: self.front.used_count(),
        }
    }

    fn advance(&mut self, edge: EdgeId, pivot: Pivot) {
        let e = self.front.edge(edge);
        let face = [e.from(), pivot.vertex, e.to()];
        trace!(
            edge = edge.index(),
            vertex = pivot.vertex.index(),
            "Pivoted onto vertex"
        );

        self.emit(face);
        self.observer.triangle_emitted(face);
        self.pivots += 1;

        let (ik, kj) = self.front.join(edge, pivot.vertex, pivot.center);
        for new_edge in [ik, kj] {
            if let Some(reverse) = self.front.find_reverse_edge(new_edge) {
                let case = self.front.glue(new_edge, reverse);
                self.glues += 1;
                self.observer.edges_glued(new_edge, reverse, case);
            }
        }
    }

    fn emit(&mut self, face: [VertexId; 3]) {
        let [a, b, c] = face.map(|v| self.grid.point(v).position);
        self.triangles.push(Triangle::new(a, b, c));
        self.faces.push(face);
    }
}

/// Reconstructs a triangle mesh from an oriented point cloud.
///
/// A cloud with no seed triangle at this radius yields an empty result with
/// [`ReconstructionOutcome::NoSeedFound`], not an error.
///
/// # Errors
///
/// Returns an error if the cloud is empty, the radius is not positive and
/// finite, a point is non-finite, or the grid would be too large.
///
/// # Example
///
/// ```
/// use mesh_pivot::{BallPivotingParams, ReconstructionOutcome, ball_pivoting};
/// use mesh_types::OrientedPoint;
///
/// let points = [OrientedPoint::from_coords(0.0, 0.0, 0.0, 0.0, 0.0, 1.0)];
/// let result = ball_pivoting(&points, &BallPivotingParams::default()).unwrap();
/// assert_eq!(result.outcome, ReconstructionOutcome::NoSeedFound);
/// assert!(result.is_empty());
/// ```
pub fn ball_pivoting(
    points: &[OrientedPoint],
    params: &BallPivotingParams,
) -> ReconstructResult<BallPivotingResult> {
    Ok(BallPivoting::new(points, params)?.run())
}
