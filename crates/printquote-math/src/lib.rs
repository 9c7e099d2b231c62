#![warn(missing_docs)]

//! Math types for printquote volume estimation.
//!
//! Thin wrappers around nalgebra providing the handful of primitives the
//! mesh decoders need: points, triangles, signed tetrahedron volumes and
//! an axis-aligned bounds accumulator.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A point in 3D space (mm).
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A triangle given by three vertices. Winding is taken as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// The three corners in file order.
    pub vertices: [Point3; 3],
}

impl Triangle {
    /// Create a triangle from three corners.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Unnormalized face normal following the right-hand rule.
    pub fn normal(&self) -> Vec3 {
        let [a, b, c] = self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Signed volume of the tetrahedron spanned by `reference` and this triangle.
    pub fn signed_volume_from(&self, reference: &Point3) -> f64 {
        let [a, b, c] = self.vertices;
        signed_tetra_volume(&(a - reference), &(b - reference), &(c - reference))
    }
}

/// Signed volume of the tetrahedron with one corner at the origin and the
/// other three at `a`, `b`, `c`: the scalar triple product divided by 6.
///
/// Positive when `a`, `b`, `c` wind counter-clockwise seen from outside.
pub fn signed_tetra_volume(a: &Vec3, b: &Vec3, c: &Vec3) -> f64 {
    a.dot(&b.cross(c)) / 6.0
}

/// Extent of an axis-aligned box along each axis (mm).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extent {
    /// Size along X.
    pub x: f64,
    /// Size along Y.
    pub y: f64,
    /// Size along Z.
    pub z: f64,
}

impl Extent {
    /// Create an extent from per-axis sizes.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Product of the three sizes.
    pub fn volume(&self) -> f64 {
        self.x * self.y * self.z
    }
}

/// Running axis-aligned bounding box.
///
/// Starts empty; [`Bounds3::extent`] of an empty box is zero on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    min: Point3,
    max: Point3,
}

impl Bounds3 {
    /// An empty box that any point will grow.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// True until the first point is included.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Grow the box component-wise to contain `p`.
    pub fn include(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Grow the box to contain every corner of `tri`.
    pub fn include_triangle(&mut self, tri: &Triangle) {
        for v in &tri.vertices {
            self.include(v);
        }
    }

    /// Minimum corner, or `None` while empty.
    pub fn min(&self) -> Option<Point3> {
        (!self.is_empty()).then_some(self.min)
    }

    /// Maximum corner, or `None` while empty.
    pub fn max(&self) -> Option<Point3> {
        (!self.is_empty()).then_some(self.max)
    }

    /// `max - min` per axis.
    pub fn extent(&self) -> Extent {
        if self.is_empty() {
            return Extent::default();
        }
        let d = self.max - self.min;
        Extent::new(d.x, d.y, d.z)
    }
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::empty()
    }
}

/// Tolerance used when deciding that a length is effectively zero.
pub const LINEAR_TOLERANCE: f64 = 1e-10;
