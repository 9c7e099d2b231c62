//! Rescaling a decoded mesh to the dimensions the customer asked for.
//!
//! Each bounding-box axis is stretched independently and the mesh volume
//! is multiplied by the product of the three factors. That is exact for
//! boxes and only approximate for other shapes, which is fine for a quote.

use printquote_math::Extent;
use printquote_mesh::MeshSummary;
use serde::Serialize;

use crate::model::DimensionInput;

/// Per-axis stretch applied to a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleFactors {
    /// Width / bbox X.
    pub x: f64,
    /// Height / bbox Y.
    pub y: f64,
    /// Thickness / bbox Z.
    pub z: f64,
}

impl ScaleFactors {
    /// No rescale.
    pub const IDENTITY: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    /// Factors mapping `native` onto the requested target dimensions.
    pub fn between(native: &Extent, target: &DimensionInput) -> Self {
        Self {
            x: axis_scale(target.width, native.x),
            y: axis_scale(target.height, native.y),
            z: axis_scale(target.thickness, native.z),
        }
    }

    /// Volume multiplier.
    pub fn volumetric(&self) -> f64 {
        self.x * self.y * self.z
    }
}

/// `target / native`, or 1 unless both are finite and positive.
///
/// A flat mesh has a zero-length axis; it keeps its scale instead of
/// blowing up to infinity.
pub fn axis_scale(target: f64, native: f64) -> f64 {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if usable(target) && usable(native) {
        target / native
    } else {
        1.0
    }
}

/// Mesh volume stretched to the target dimensions, with the factors used.
pub fn scaled_volume(mesh: &MeshSummary, target: &DimensionInput) -> (f64, ScaleFactors) {
    let factors = ScaleFactors::between(&mesh.bbox, target);
    (mesh.volume_mm3 * factors.volumetric(), factors)
}
