//! Core value types for point-cloud reconstruction.
//!
//! This crate provides the small set of types exchanged between the
//! reconstruction core and its callers:
//!
//! - [`OrientedPoint`] - A position with an outward-facing normal
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in
//! CLI tools, servers, WASM builds and bindings alike.
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Triangle winding is
//! **counter-clockwise (CCW) when viewed from outside**, so the face normal
//! follows the right-hand rule and points away from the surface.
//!
//! # Example
//!
//! ```
//! use mesh_types::{OrientedPoint, Point3, Triangle, Vector3};
//!
//! let p = OrientedPoint::new(Point3::new(0.0, 0.0, 0.0), Vector3::z());
//! assert!(p.is_finite());
//!
//! let tri = Triangle::new(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! );
//! assert!(tri.normal().unwrap().dot(&p.normal) > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod point;
mod triangle;

// Re-export core types
pub use bounds::Aabb;
pub use point::OrientedPoint;
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
