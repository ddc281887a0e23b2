//! End-to-end reconstruction scenarios.
//!
//! Run with: cargo test -p mesh-pivot --test scenarios

use std::collections::HashSet;

use mesh_pivot::{
    BallPivoting, BallPivotingParams, EdgeId, GlueCase, Phase, PivotObserver, ReconstructError,
    ReconstructionOutcome, VertexId, ball_pivoting,
};
use mesh_types::{OrientedPoint, Point3, Vector3};

// =============================================================================
// Point cloud generators
// =============================================================================

/// Unit square in the XY plane, normals +Z.
fn square() -> Vec<OrientedPoint> {
    [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        .into_iter()
        .map(|(x, y)| OrientedPoint::from_coords(x, y, 0.0, 0.0, 0.0, 1.0))
        .collect()
}

/// Fibonacci lattice on the unit sphere with outward normals.
#[allow(clippy::cast_precision_loss)]
fn fibonacci_sphere(n: usize) -> Vec<OrientedPoint> {
    let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
    (0..n)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
            let r = (1.0 - y * y).sqrt();
            let phi = golden_angle * i as f64;
            let normal = Vector3::new(phi.cos() * r, y, phi.sin() * r);
            OrientedPoint::new(Point3::from(normal), normal)
        })
        .collect()
}

// =============================================================================
// Scenario 1: a square
// =============================================================================

#[test]
fn test_square_gives_two_triangles() {
    let points = square();
    let result = ball_pivoting(&points, &BallPivotingParams::new(2.0)).unwrap();

    assert_eq!(result.outcome, ReconstructionOutcome::Meshed);
    assert_eq!(result.triangles.len(), 2);
    for tri in &result.triangles {
        let n = tri.normal().unwrap();
        assert!((n - Vector3::z()).norm() < 1e-9);
    }

    let area: f64 = result.triangles.iter().map(mesh_types::Triangle::area).sum();
    assert!((area - 1.0).abs() < 1e-9);
}

#[test]
fn test_square_at_small_scale() {
    // About 6e-8; a power of two keeps the run comparable to the unit square
    let scale = 2.0_f64.powi(-24);
    let points: Vec<_> = square()
        .into_iter()
        .map(|p| OrientedPoint::new(p.position * scale, p.normal))
        .collect();
    let result = ball_pivoting(&points, &BallPivotingParams::new(2.0 * scale)).unwrap();

    assert_eq!(result.outcome, ReconstructionOutcome::Meshed);
    assert_eq!(result.triangles.len(), 2);
    for tri in &result.triangles {
        let n = tri.normal().unwrap();
        assert!((n - Vector3::z()).norm() < 1e-9);
    }
    let area: f64 = result.triangles.iter().map(mesh_types::Triangle::area).sum();
    assert!((area / (scale * scale) - 1.0).abs() < 1e-9);
}

#[test]
fn test_square_at_large_scale() {
    let scale = 1e6;
    let points: Vec<_> = square()
        .into_iter()
        .map(|p| OrientedPoint::new(p.position * scale, p.normal))
        .collect();
    let result = ball_pivoting(&points, &BallPivotingParams::new(2.0 * scale)).unwrap();
    assert_eq!(result.triangles.len(), 2);
}

// =============================================================================
// Scenario 2: too few points
// =============================================================================

#[test]
fn test_one_or_two_points_find_no_seed() {
    let points = square();
    for count in [1, 2] {
        for radius in [0.1, 1.0, 10.0] {
            let result = ball_pivoting(&points[..count], &BallPivotingParams::new(radius)).unwrap();
            assert_eq!(result.outcome, ReconstructionOutcome::NoSeedFound);
            assert!(result.is_empty());
            assert!(result.faces.is_empty());
        }
    }
}

#[test]
fn test_sparse_cloud_finds_no_seed() {
    let points = square();
    let result = ball_pivoting(&points, &BallPivotingParams::new(0.2)).unwrap();
    assert_eq!(result.outcome, ReconstructionOutcome::NoSeedFound);
    assert_eq!(result.stats.used_vertices, 0);
}

#[test]
fn test_far_apart_points_with_small_radius() {
    let points = [
        OrientedPoint::from_coords(0.0, 0.0, 0.0, 0.0, 0.0, 1.0),
        OrientedPoint::from_coords(1e4, 1e4, 1e4, 0.0, 0.0, 1.0),
    ];
    let result = ball_pivoting(&points, &BallPivotingParams::new(0.01)).unwrap();
    assert_eq!(result.outcome, ReconstructionOutcome::NoSeedFound);
    assert!(result.is_empty());
}

// =============================================================================
// Scenario 3: a sphere
// =============================================================================

#[test]
fn test_sphere_orientation_follows_normals() {
    let points = fibonacci_sphere(400);
    let result = ball_pivoting(&points, &BallPivotingParams::new(0.3)).unwrap();

    assert_eq!(result.outcome, ReconstructionOutcome::Meshed);
    assert!(result.coverage_ratio() > 0.8, "{result}");

    for face in &result.faces {
        let [a, b, c] = face.map(|v| points[v.index()].position);
        let normal = (b - a).cross(&(c - a));
        for v in face {
            assert!(normal.dot(&points[v.index()].normal) > 0.0);
        }
    }

    let mut oriented = HashSet::new();
    for &[a, b, c] in &result.faces {
        // Canonical rotation keeps winding and starts at the smallest index
        let rotations = [[a, b, c], [b, c, a], [c, a, b]];
        let key = rotations.into_iter().min().unwrap();
        let reversed = [key[0], key[2], key[1]];
        assert!(!oriented.contains(&reversed), "reversed duplicate of {key:?}");
        oriented.insert(key);
    }
}

#[test]
fn test_faces_match_triangles() {
    let points = fibonacci_sphere(200);
    let result = ball_pivoting(&points, &BallPivotingParams::new(0.4)).unwrap();

    assert_eq!(result.faces.len(), result.triangles.len());
    for (face, tri) in result.faces.iter().zip(&result.triangles) {
        let [a, b, c] = *face;
        assert!(a != b && b != c && a != c);
        assert_eq!(tri.vertices(), face.map(|v| points[v.index()].position));
    }
}

// =============================================================================
// Invariants while stepping
// =============================================================================

#[test]
fn test_stepwise_invariants() {
    let points = fibonacci_sphere(150);
    let mut session = BallPivoting::new(&points, &BallPivotingParams::new(0.45)).unwrap();
    assert_eq!(session.seed(), Phase::Growing);

    let mut used = session.front().used_count();
    loop {
        let phase = session.step();
        assert_eq!(session.front().check_links(), Ok(()));

        let now = session.front().used_count();
        assert!(now >= used);
        used = now;

        let stats = session.stats();
        assert!(stats.work_pushes - stats.work_pops <= 2 * stats.pivots + 3);

        if phase.is_terminal() {
            break;
        }
    }

    assert_eq!(session.phase(), Phase::Done);
    let stats = session.stats();
    assert_eq!(stats.work_pushes, stats.work_pops);
    assert_eq!(stats.triangles, stats.pivots + 1);

    let in_faces: HashSet<VertexId> = session.faces().iter().flatten().copied().collect();
    assert_eq!(in_faces.len(), stats.used_vertices);
}

// =============================================================================
// Observer
// =============================================================================

#[derive(Default)]
struct Tally {
    seeds: usize,
    triangles: usize,
    boundaries: usize,
    glued: Vec<(EdgeId, EdgeId)>,
}

impl PivotObserver for Tally {
    fn seed_found(&mut self, _face: [VertexId; 3], _center: &Point3<f64>) {
        self.seeds += 1;
    }

    fn triangle_emitted(&mut self, _face: [VertexId; 3]) {
        self.triangles += 1;
    }

    fn edge_boundary(&mut self, _edge: EdgeId) {
        self.boundaries += 1;
    }

    fn edges_glued(&mut self, x: EdgeId, y: EdgeId, _case: GlueCase) {
        self.glued.push((x, y));
    }
}

#[test]
fn test_observer_matches_stats() {
    let points = fibonacci_sphere(200);
    let mut tally = Tally::default();
    let result = BallPivoting::with_observer(&points, &BallPivotingParams::new(0.4), &mut tally)
        .unwrap()
        .run();

    assert_eq!(tally.seeds, 1);
    assert_eq!(tally.triangles + 1, result.triangles.len());
    assert_eq!(tally.boundaries, result.stats.boundary_edges);
    assert_eq!(tally.glued.len(), result.stats.glues);
    // A closed surface is sealed by gluing
    assert!(result.stats.glues > 0);
}

// =============================================================================
// Invalid input
// =============================================================================

#[test]
fn test_invalid_input_is_an_error() {
    let points = square();

    let err = ball_pivoting(&[], &BallPivotingParams::default()).unwrap_err();
    assert!(matches!(err, ReconstructError::EmptyPointCloud));
    assert!(err.is_invalid_input());

    for radius in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        let err = ball_pivoting(&points, &BallPivotingParams::new(radius)).unwrap_err();
        assert!(matches!(err, ReconstructError::InvalidRadius(_)));
    }

    let mut bad = points;
    bad[2].normal.x = f64::NAN;
    let err = ball_pivoting(&bad, &BallPivotingParams::new(2.0)).unwrap_err();
    assert!(matches!(err, ReconstructError::NonFinitePoint { index: 2 }));
}
