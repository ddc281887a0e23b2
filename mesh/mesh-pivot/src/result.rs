//! Result types for ball pivoting.

use mesh_types::Triangle;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::front::VertexId;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReconstructionOutcome {
    /// A seed was found and the front grew until no active edge remained.
    #[default]
    Meshed,
    /// No seed triangle exists at this radius. The mesh is empty.
    NoSeedFound,
}

/// Counters collected while growing the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PivotStats {
    /// Number of input points.
    pub points: usize,
    /// Triangles emitted, seed included.
    pub triangles: usize,
    /// Pivots that produced a triangle.
    pub pivots: usize,
    /// Edges retired as open boundary.
    pub boundary_edges: usize,
    /// Glue operations performed.
    pub glues: usize,
    /// Work-list entries discarded because their edge had been retired.
    pub stale_skipped: usize,
    /// Pushes onto the work list.
    pub work_pushes: usize,
    /// Pops from the work list, stale entries included.
    pub work_pops: usize,
    /// Points incorporated into at least one triangle.
    pub used_vertices: usize,
}

impl PivotStats {
    /// Fraction of input points incorporated into the mesh (0.0 - 1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage_ratio(&self) -> f64 {
        if self.points == 0 {
            0.0
        } else {
            self.used_vertices as f64 / self.points as f64
        }
    }
}

/// Output of ball pivoting.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BallPivotingResult {
    /// Triangles in discovery order.
    pub triangles: Vec<Triangle>,
    /// The same triangles as indices into the input slice.
    pub faces: Vec<[VertexId; 3]>,
    /// How the run ended.
    pub outcome: ReconstructionOutcome,
    /// Run counters.
    pub stats: PivotStats,
}

impl BallPivotingResult {
    /// Returns `true` if no triangle was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Fraction of input points incorporated into the mesh.
    #[must_use]
    pub fn coverage_ratio(&self) -> f64 {
        self.stats.coverage_ratio()
    }
}

impl std::fmt::Display for BallPivotingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.outcome {
            ReconstructionOutcome::Meshed => write!(
                f,
                "BallPivoting: {} triangles, {:.1}% coverage, {} boundary edges",
                self.triangles.len(),
                self.coverage_ratio() * 100.0,
                self.stats.boundary_edges
            ),
            ReconstructionOutcome::NoSeedFound => write!(
                f,
                "BallPivoting: no seed triangle among {} points",
                self.stats.points
            ),
        }
    }
}
