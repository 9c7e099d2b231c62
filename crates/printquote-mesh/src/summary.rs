//! Volume and bounding-box summary shared by both decoders.

use printquote_math::{Bounds3, Extent, Point3, Triangle};
use serde::{Deserialize, Serialize};

/// Serialization a mesh was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshFormat {
    /// 80-byte header, u32 count, 50-byte triangle records.
    Binary,
    /// `solid ... vertex x y z ... endsolid` text.
    Ascii,
}

/// What the cost model needs to know about an uploaded mesh.
///
/// Built once per decoded file and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshSummary {
    /// Format the buffer was decoded as.
    pub format: MeshFormat,
    /// Triangles integrated.
    pub triangle_count: usize,
    /// Enclosed volume (mm³), always non-negative.
    pub volume_mm3: f64,
    /// `max - min` per axis over every vertex.
    pub bbox: Extent,
    /// Minimum vertex corner, `None` for a mesh without triangles.
    pub bounds_min: Option<Point3>,
    /// Maximum vertex corner, `None` for a mesh without triangles.
    pub bounds_max: Option<Point3>,
}

/// Accumulates signed tetrahedron volumes and vertex bounds one triangle
/// at a time.
///
/// The first vertex of the first triangle becomes the reference apex for
/// every tetrahedron. For a closed, consistently wound surface the sum does
/// not depend on that choice.
#[derive(Debug, Default)]
pub(crate) struct SummaryBuilder {
    reference: Option<Point3>,
    signed_volume: f64,
    bounds: Bounds3,
    triangle_count: usize,
}

impl SummaryBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, tri: &Triangle) {
        let reference = *self.reference.get_or_insert(tri.vertices[0]);
        self.bounds.include_triangle(tri);
        self.signed_volume += tri.signed_volume_from(&reference);
        self.triangle_count += 1;
    }

    pub(crate) fn finish(self, format: MeshFormat) -> MeshSummary {
        MeshSummary {
            format,
            triangle_count: self.triangle_count,
            volume_mm3: self.signed_volume.abs(),
            bbox: self.bounds.extent(),
            bounds_min: self.bounds.min(),
            bounds_max: self.bounds.max(),
        }
    }
}
