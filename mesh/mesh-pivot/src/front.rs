//! Mesh front: vertex and edge arenas, the active work list, Join and Glue.
//!
//! Edges live in one arena for the whole run and are addressed by [`EdgeId`].
//! They are never removed; retiring an edge only changes its [`EdgeStatus`].
//! Active edges form closed loops through their `prev`/`next` links. Boundary
//! edges keep their links so that their active neighbours stay consistent.
//! Inner edges are unlinked and their links go stale.
//!
//! The work list is a LIFO of edge ids. Entries whose edge has been retired
//! after being pushed are discarded lazily by [`Front::pop_active`].

use std::fmt;

use mesh_types::Point3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of a point in the input slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexId(usize);

impl VertexId {
    /// Create a vertex ID from an input index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Index into the input slice.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex({})", self.0)
    }
}

/// Index of an edge in the front arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeId(usize);

impl EdgeId {
    /// Create an edge ID from an arena index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Index into the edge arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({})", self.0)
    }
}

/// Lifecycle of a front edge.
///
/// Edges start `Active`. `Boundary` and `Inner` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeStatus {
    /// On the front, waiting to be pivoted.
    Active,
    /// Pivoting found nothing; part of the open mesh boundary.
    Boundary,
    /// Shared by two triangles, or replaced by a Join.
    Inner,
}

/// A directed edge of the growing mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontEdge {
    from: VertexId,
    to: VertexId,
    opposite: VertexId,
    center: Point3<f64>,
    status: EdgeStatus,
    prev: EdgeId,
    next: EdgeId,
}

impl FrontEdge {
    /// Start vertex.
    #[must_use]
    pub const fn from(&self) -> VertexId {
        self.from
    }

    /// End vertex.
    #[must_use]
    pub const fn to(&self) -> VertexId {
        self.to
    }

    /// Third vertex of the triangle that created this edge.
    #[must_use]
    pub const fn opposite(&self) -> VertexId {
        self.opposite
    }

    /// Ball center of the triangle that created this edge.
    #[must_use]
    pub const fn center(&self) -> Point3<f64> {
        self.center
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> EdgeStatus {
        self.status
    }

    /// Previous edge in the loop. Stale once the edge is inner.
    #[must_use]
    pub const fn prev(&self) -> EdgeId {
        self.prev
    }

    /// Next edge in the loop. Stale once the edge is inner.
    #[must_use]
    pub const fn next(&self) -> EdgeId {
        self.next
    }

    /// Returns `true` while the edge is on the front.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == EdgeStatus::Active
    }

    /// The endpoint that is not `v`, if `v` is an endpoint.
    fn other_end(&self, v: VertexId) -> Option<VertexId> {
        if self.from == v {
            Some(self.to)
        } else if self.to == v {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Which relinking [`Front::glue`] performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GlueCase {
    /// The two edges formed a loop on their own, which disappears.
    Collapsed,
    /// The second edge followed the first in the loop.
    AdjacentNext,
    /// The second edge preceded the first in the loop.
    AdjacentPrev,
    /// Non-adjacent edges; their loops were cross-spliced.
    Spliced,
}

#[derive(Debug, Clone, Default)]
struct MeshVertex {
    used: bool,
    edges: Vec<EdgeId>,
}

/// The growing mesh front.
#[derive(Debug, Clone)]
pub struct Front {
    vertices: Vec<MeshVertex>,
    edges: Vec<FrontEdge>,
    work: Vec<EdgeId>,
    pushes: usize,
    pops: usize,
    stale: usize,
}

impl Front {
    /// Creates an empty front over `vertex_count` input points.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertices: vec![MeshVertex::default(); vertex_count],
            edges: Vec::new(),
            work: Vec::new(),
            pushes: 0,
            pops: 0,
            stale: 0,
        }
    }

    /// Starts a new loop from a seed triangle.
    ///
    /// Creates the edges `a→b`, `b→c` and `c→a` linked into one cycle, marks
    /// the three vertices used and pushes the edges in that order.
    ///
    /// # Panics
    ///
    /// Panics if a vertex id is out of range.
    pub fn seed(&mut self, [a, b, c]: [VertexId; 3], center: Point3<f64>) -> [EdgeId; 3] {
        let base = self.edges.len();
        let ids = [EdgeId(base), EdgeId(base + 1), EdgeId(base + 2)];
        let ends = [(a, b, c), (b, c, a), (c, a, b)];

        for (i, (from, to, opposite)) in ends.into_iter().enumerate() {
            self.edges.push(FrontEdge {
                from,
                to,
                opposite,
                center,
                status: EdgeStatus::Active,
                prev: ids[(i + 2) % 3],
                next: ids[(i + 1) % 3],
            });
        }

        for (v, incident) in [(a, [ids[0], ids[2]]), (b, [ids[0], ids[1]]), (c, [ids[1], ids[2]])] {
            let vertex = &mut self.vertices[v.0];
            vertex.used = true;
            vertex.edges.extend(incident);
        }
        for id in ids {
            self.push(id);
        }
        ids
    }

    /// Pops the most recently pushed edge that is still active.
    ///
    /// Retired entries met on the way are discarded.
    pub fn pop_active(&mut self) -> Option<EdgeId> {
        while let Some(id) = self.work.pop() {
            self.pops += 1;
            if self.edges[id.0].is_active() {
                return Some(id);
            }
            self.stale += 1;
        }
        None
    }

    /// Replaces active `edge` (`i→j`) by `i→k` and `k→j` through `vertex` `k`.
    ///
    /// The new edges take the place of `edge` in its loop, carry `center` as
    /// their ball center and are pushed onto the work list. `edge` becomes
    /// inner and `k` becomes used.
    ///
    /// Returns `(i→k, k→j)`.
    pub fn join(
        &mut self,
        edge: EdgeId,
        vertex: VertexId,
        center: Point3<f64>,
    ) -> (EdgeId, EdgeId) {
        let old = self.edges[edge.0];
        let ik = EdgeId(self.edges.len());
        let kj = EdgeId(ik.0 + 1);

        self.edges.push(FrontEdge {
            from: old.from,
            to: vertex,
            opposite: old.to,
            center,
            status: EdgeStatus::Active,
            prev: old.prev,
            next: kj,
        });
        self.edges.push(FrontEdge {
            from: vertex,
            to: old.to,
            opposite: old.from,
            center,
            status: EdgeStatus::Active,
            prev: ik,
            next: old.next,
        });
        self.edges[old.prev.0].next = ik;
        self.edges[old.next.0].prev = kj;

        self.vertices[old.from.0].edges.push(ik);
        self.vertices[old.to.0].edges.push(kj);
        let k = &mut self.vertices[vertex.0];
        k.used = true;
        k.edges.extend([ik, kj]);

        self.push(ik);
        self.push(kj);
        self.retire(edge, EdgeStatus::Inner);
        (ik, kj)
    }

    /// Seals two mutually reverse active edges and retires both as inner.
    ///
    /// Their neighbours are relinked so every remaining active edge stays in
    /// a valid cycle. A loop may be closed, shortened, split or merged.
    pub fn glue(&mut self, x: EdgeId, y: EdgeId) -> GlueCase {
        let ex = self.edges[x.0];
        let ey = self.edges[y.0];

        let case = if ex.next == y && ex.prev == y && ey.next == x && ey.prev == x {
            GlueCase::Collapsed
        } else if ex.next == y && ey.prev == x {
            self.link(ex.prev, ey.next);
            GlueCase::AdjacentNext
        } else if ex.prev == y && ey.next == x {
            self.link(ey.prev, ex.next);
            GlueCase::AdjacentPrev
        } else {
            self.link(ex.prev, ey.next);
            self.link(ey.prev, ex.next);
            GlueCase::Spliced
        };

        self.retire(x, EdgeStatus::Inner);
        self.retire(y, EdgeStatus::Inner);
        case
    }

    /// Finds an active edge running opposite to active `edge`.
    ///
    /// Only the start vertex's incident edges are scanned. Returns `None` if
    /// `edge` itself is no longer active.
    #[must_use]
    pub fn find_reverse_edge(&self, edge: EdgeId) -> Option<EdgeId> {
        let e = &self.edges[edge.0];
        if !e.is_active() {
            return None;
        }
        self.vertices[e.from.0].edges.iter().copied().find(|id| {
            let candidate = &self.edges[id.0];
            candidate.is_active() && candidate.from == e.to && candidate.to == e.from
        })
    }

    /// Marks active `edge` as part of the open boundary.
    pub fn mark_boundary(&mut self, edge: EdgeId) {
        self.retire(edge, EdgeStatus::Boundary);
    }

    /// Returns `true` once `vertex` belongs to an emitted triangle.
    #[must_use]
    pub fn is_used(&self, vertex: VertexId) -> bool {
        self.vertices[vertex.0].used
    }

    /// Number of used vertices.
    #[must_use]
    pub fn used_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.used).count()
    }

    /// Returns `true` if `vertex` has an incident active edge.
    #[must_use]
    pub fn on_front(&self, vertex: VertexId) -> bool {
        self.vertices[vertex.0]
            .edges
            .iter()
            .any(|id| self.edges[id.0].is_active())
    }

    /// Returns `true` if `vertex` has an inner edge to `a` or to `b`.
    #[must_use]
    pub fn has_inner_edge_to(&self, vertex: VertexId, a: VertexId, b: VertexId) -> bool {
        self.vertices[vertex.0].edges.iter().any(|id| {
            let e = &self.edges[id.0];
            e.status == EdgeStatus::Inner && e.other_end(vertex).is_some_and(|o| o == a || o == b)
        })
    }

    /// Verifies `prev.next == e == next.prev` for every active edge.
    ///
    /// # Errors
    ///
    /// Returns the first active edge whose links are inconsistent.
    pub fn check_links(&self) -> Result<(), EdgeId> {
        for (i, e) in self.edges.iter().enumerate() {
            let id = EdgeId(i);
            let linked = self.edges[e.prev.0].next == id && self.edges[e.next.0].prev == id;
            if e.is_active() && !linked {
                return Err(id);
            }
        }
        Ok(())
    }

    /// Edges of the loop through `start`, following `next` links.
    ///
    /// Stops after visiting as many edges as the arena holds, so a corrupted
    /// loop cannot spin forever.
    #[must_use]
    pub fn loop_edges(&self, start: EdgeId) -> Vec<EdgeId> {
        let mut result = vec![start];
        let mut current = self.edges[start.0].next;
        while current != start && result.len() < self.edges.len() {
            result.push(current);
            current = self.edges[current.0].next;
        }
        result
    }

    /// The edge for an id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this front.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> &FrontEdge {
        &self.edges[id.0]
    }

    /// Every edge created so far, in creation order.
    #[must_use]
    pub fn edges(&self) -> &[FrontEdge] {
        &self.edges
    }

    /// Edges incident to `vertex`, in creation order.
    #[must_use]
    pub fn incident_edges(&self, vertex: VertexId) -> &[EdgeId] {
        &self.vertices[vertex.0].edges
    }

    /// Number of vertices the front was created for.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Entries currently on the work list, stale ones included.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.work.len()
    }

    /// Total pushes onto the work list.
    #[must_use]
    pub const fn pushes(&self) -> usize {
        self.pushes
    }

    /// Total pops from the work list, stale ones included.
    #[must_use]
    pub const fn pops(&self) -> usize {
        self.pops
    }

    /// Popped entries that were discarded because their edge was retired.
    #[must_use]
    pub const fn stale_skipped(&self) -> usize {
        self.stale
    }

    fn push(&mut self, id: EdgeId) {
        self.work.push(id);
        self.pushes += 1;
    }

    fn link(&mut self, prev: EdgeId, next: EdgeId) {
        self.edges[prev.0].next = next;
        self.edges[next.0].prev = prev;
    }

    fn retire(&mut self, id: EdgeId, status: EdgeStatus) {
        let edge = &mut self.edges[id.0];
        debug_assert_eq!(edge.status, EdgeStatus::Active, "{id} retired twice");
        edge.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn e(i: usize) -> EdgeId {
        EdgeId::new(i)
    }

    #[test]
    fn test_seed_forms_cycle() {
        let mut front = Front::new(4);
        let ids = front.seed([v(0), v(1), v(2)], Point3::origin());

        assert_eq!(ids, [e(0), e(1), e(2)]);
        assert_eq!(front.loop_edges(e(0)), vec![e(0), e(1), e(2)]);
        assert_eq!(front.edge(e(1)).from(), v(1));
        assert_eq!(front.edge(e(1)).to(), v(2));
        assert_eq!(front.edge(e(1)).opposite(), v(0));
        assert_eq!(front.check_links(), Ok(()));

        assert_eq!(front.used_count(), 3);
        assert!(!front.is_used(v(3)));
        assert!(front.on_front(v(0)));
        assert_eq!(front.incident_edges(v(0)), &[e(0), e(2)]);

        assert_eq!(front.pop_active(), Some(e(2)));
        assert_eq!(front.pop_active(), Some(e(1)));
        assert_eq!(front.pop_active(), Some(e(0)));
        assert_eq!(front.pop_active(), None);
        assert_eq!(front.pushes(), 3);
        assert_eq!(front.pops(), 3);
    }

    #[test]
    fn test_join_splices_loop() {
        let mut front = Front::new(4);
        front.seed([v(0), v(1), v(2)], Point3::origin());
        let popped = front.pop_active().unwrap();
        assert_eq!(popped, e(2));

        let center = Point3::new(0.0, 0.0, 1.0);
        let (ik, kj) = front.join(popped, v(3), center);

        assert_eq!(front.edge(ik).from(), v(2));
        assert_eq!(front.edge(ik).to(), v(3));
        assert_eq!(front.edge(ik).opposite(), v(0));
        assert_eq!(front.edge(kj).from(), v(3));
        assert_eq!(front.edge(kj).to(), v(0));
        assert_eq!(front.edge(kj).center(), center);

        assert_eq!(front.edge(e(2)).status(), EdgeStatus::Inner);
        assert_eq!(front.loop_edges(e(0)), vec![e(0), e(1), ik, kj]);
        assert_eq!(front.check_links(), Ok(()));
        assert!(front.is_used(v(3)));
        assert_eq!(front.incident_edges(v(3)), &[ik, kj]);
        assert_eq!(front.pop_active(), Some(kj));
    }

    #[test]
    fn test_closing_tetrahedron_hits_every_adjacent_case() {
        let mut front = Front::new(4);
        let center = Point3::origin();
        front.seed([v(0), v(1), v(2)], center);

        // Face (2, 3, 0)
        let edge = front.pop_active().unwrap();
        let (ik, kj) = front.join(edge, v(3), center);
        assert_eq!(front.find_reverse_edge(ik), None);
        assert_eq!(front.find_reverse_edge(kj), None);

        // Face (3, 1, 0): 1→0 meets the seed edge 0→1 right after it
        let edge = front.pop_active().unwrap();
        assert_eq!(edge, kj);
        let (ik, kj) = front.join(edge, v(1), center);
        assert_eq!(front.find_reverse_edge(ik), None);
        let reverse = front.find_reverse_edge(kj).unwrap();
        assert_eq!(reverse, e(0));
        assert_eq!(front.glue(kj, reverse), GlueCase::AdjacentNext);
        assert_eq!(front.check_links(), Ok(()));
        assert_eq!(front.loop_edges(e(1)).len(), 3);

        // Face (3, 2, 1) closes the surface
        let edge = front.pop_active().unwrap();
        assert_eq!(edge, ik);
        let (ik, kj) = front.join(edge, v(2), center);
        let reverse = front.find_reverse_edge(ik).unwrap();
        assert_eq!(front.glue(ik, reverse), GlueCase::AdjacentPrev);
        assert_eq!(front.check_links(), Ok(()));
        let reverse = front.find_reverse_edge(kj).unwrap();
        assert_eq!(front.glue(kj, reverse), GlueCase::Collapsed);

        assert!(front.edges().iter().all(|edge| edge.status() == EdgeStatus::Inner));
        assert_eq!(front.pop_active(), None);
        assert_eq!(front.pushes(), 9);
        assert_eq!(front.pops(), 9);
        assert_eq!(front.stale_skipped(), 6);
        assert!((0..4).all(|i| !front.on_front(v(i))));
        assert!(front.has_inner_edge_to(v(3), v(0), v(1)));
    }

    #[test]
    fn test_glue_splices_separate_loops() {
        let mut front = Front::new(4);
        let center = Point3::origin();
        front.seed([v(0), v(1), v(2)], center);
        let [x, ..] = front.seed([v(1), v(0), v(3)], center);

        let y = front.find_reverse_edge(x).unwrap();
        assert_eq!(y, e(0));
        assert_eq!(front.glue(x, y), GlueCase::Spliced);
        assert_eq!(front.check_links(), Ok(()));
        assert_eq!(front.loop_edges(e(1)), vec![e(1), e(2), e(4), e(5)]);
    }

    #[test]
    fn test_glue_splits_one_loop() {
        let mut front = Front::new(6);
        let center = Point3::origin();
        front.seed([v(0), v(1), v(5)], center);

        // Grow 0→1→2→3→1→0→4→5→0, which passes through 0→1 and 1→0
        let (_, tail) = front.join(e(1), v(2), center);
        let (_, tail) = front.join(tail, v(3), center);
        let (_, tail) = front.join(tail, v(1), center);
        let (x, tail) = front.join(tail, v(0), center);
        front.join(tail, v(4), center);
        assert_eq!(front.loop_edges(e(0)).len(), 8);

        let y = front.find_reverse_edge(x).unwrap();
        assert_eq!(y, e(0));
        assert_eq!(front.glue(x, y), GlueCase::Spliced);
        assert_eq!(front.check_links(), Ok(()));

        let inner = front.loop_edges(e(3));
        let outer = front.loop_edges(e(2));
        assert_eq!(inner, vec![e(3), e(5), e(7)]);
        assert_eq!(outer, vec![e(2), e(11), e(12)]);
        let active = front.edges().iter().filter(|edge| edge.is_active()).count();
        assert_eq!(active, inner.len() + outer.len());
    }

    #[test]
    fn test_boundary_edges_are_terminal() {
        let mut front = Front::new(4);
        let center = Point3::origin();
        front.seed([v(0), v(1), v(2)], center);
        front.mark_boundary(e(0));
        let [x, ..] = front.seed([v(1), v(0), v(3)], center);

        assert_eq!(front.edge(e(0)).status(), EdgeStatus::Boundary);
        assert_eq!(front.find_reverse_edge(x), None);
        assert_eq!(front.find_reverse_edge(e(0)), None);
        assert!(!front.has_inner_edge_to(v(0), v(1), v(2)));
        assert_eq!(front.check_links(), Ok(()));
    }

    #[test]
    fn test_stale_entries_skipped() {
        let mut front = Front::new(3);
        front.seed([v(0), v(1), v(2)], Point3::origin());
        front.mark_boundary(e(2));
        front.mark_boundary(e(1));

        assert_eq!(front.pop_active(), Some(e(0)));
        assert_eq!(front.stale_skipped(), 2);
        assert_eq!(front.pending(), 0);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(v(4).to_string(), "Vertex(4)");
        assert_eq!(e(7).to_string(), "Edge(7)");
    }
}
