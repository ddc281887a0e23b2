//! Hooks into the growing loop.
//!
//! A [`PivotObserver`] sees every topological event as it happens. It cannot
//! influence the reconstruction; use it for counters, tracing or debugging
//! views of a run.

use mesh_types::Point3;

use crate::front::{EdgeId, GlueCase, VertexId};

/// Receives reconstruction events. Every method defaults to a no-op.
pub trait PivotObserver {
    /// The seed triangle was accepted.
    fn seed_found(&mut self, _face: [VertexId; 3], _center: &Point3<f64>) {}

    /// A triangle was emitted after a successful pivot.
    fn triangle_emitted(&mut self, _face: [VertexId; 3]) {}

    /// Pivoting about `edge` found nothing.
    fn edge_boundary(&mut self, _edge: EdgeId) {}

    /// Two reverse edges were sealed.
    fn edges_glued(&mut self, _x: EdgeId, _y: EdgeId, _case: GlueCase) {}
}

/// An observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PivotObserver for NoopObserver {}

impl<T: PivotObserver + ?Sized> PivotObserver for &mut T {
    #[inline]
    fn seed_found(&mut self, face: [VertexId; 3], center: &Point3<f64>) {
        (**self).seed_found(face, center);
    }

    #[inline]
    fn triangle_emitted(&mut self, face: [VertexId; 3]) {
        (**self).triangle_emitted(face);
    }

    #[inline]
    fn edge_boundary(&mut self, edge: EdgeId) {
        (**self).edge_boundary(edge);
    }

    #[inline]
    fn edges_glued(&mut self, x: EdgeId, y: EdgeId, case: GlueCase) {
        (**self).edges_glued(x, y, case);
    }
}
