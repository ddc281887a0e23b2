//! Ball Pivoting surface reconstruction.
//!
//! Turns a point cloud with per-point normals into a triangle mesh by rolling
//! a ball of fixed radius across the samples. Wherever the ball rests on three
//! points without containing any other, those points become a triangle.
//!
//! - **Spatial index** - [`SpatialGrid`] buckets points into cubes two radii wide
//! - **Geometric kernel** - [`geometry`] places balls and measures pivot angles
//! - **Seed finder** - [`find_seed_triangle`] bootstraps the front
//! - **Mesh front** - [`Front`] tracks edge loops and performs Join and Glue
//! - **Pivot operator** - [`pivot_ball`] rolls the ball about one edge
//! - **Driver** - [`BallPivoting`] runs the state machine step by step
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero Bevy dependencies. The core is
//! single-threaded and performs no I/O.
//!
//! # Quick Start
//!
//! ```
//! use mesh_pivot::{BallPivotingParams, ball_pivoting};
//! use mesh_types::OrientedPoint;
//!
//! let points: Vec<_> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
//!     .into_iter()
//!     .map(|(x, y)| OrientedPoint::from_coords(x, y, 0.0, 0.0, 0.0, 1.0))
//!     .collect();
//!
//! let result = ball_pivoting(&points, &BallPivotingParams::new(2.0)).unwrap();
//! assert_eq!(result.triangles.len(), 2);
//! for tri in &result.triangles {
//!     assert!(tri.normal().unwrap().z > 0.0);
//! }
//! println!("{result}");
//! ```
//!
//! # Choosing a Radius
//!
//! The radius should be slightly larger than the typical distance between
//! neighbouring samples. Too small and no seed is found; too large and
//! concave detail is bridged over.
//!
//! # Logging
//!
//! Progress is reported through [`tracing`]. No subscriber is installed.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![allow(clippy::module_name_repetitions)]

mod error;
mod front;
pub mod geometry;
mod grid;
mod observer;
mod params;
mod pivot;
mod reconstruct;
mod result;
mod seed;

pub use error::{ReconstructError, ReconstructResult};
pub use front::{EdgeId, EdgeStatus, Front, FrontEdge, GlueCase, VertexId};
pub use grid::SpatialGrid;
pub use observer::{NoopObserver, PivotObserver};
pub use params::BallPivotingParams;
pub use pivot::{Pivot, pivot_ball};
pub use reconstruct::{BallPivoting, Phase, ball_pivoting};
pub use result::{BallPivotingResult, PivotStats, ReconstructionOutcome};
pub use seed::{Seed, find_seed_triangle};
