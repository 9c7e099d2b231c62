//! Binary STL decoding.
//!
//! ```text
//! UINT8[80]    header (ignored)
//! UINT32       triangle count
//! foreach triangle
//!     REAL32[3] normal (ignored)
//!     REAL32[3] vertex 1
//!     REAL32[3] vertex 2
//!     REAL32[3] vertex 3
//!     UINT16    attribute byte count (ignored)
//! end
//! ```

use printquote_math::{Point3, Triangle};
use tracing::debug;

use crate::detect::{BINARY_HEADER_SIZE, TRIANGLE_RECORD_SIZE};
use crate::error::{ParseError, Result};
use crate::summary::{MeshFormat, MeshSummary, SummaryBuilder};

/// Decode `triangle_count` binary records starting at byte 84.
///
/// Bytes after the last declared record are ignored. A buffer that cannot
/// hold every declared record fails with [`ParseError::Truncated`] before
/// anything is integrated.
pub fn decode_binary(bytes: &[u8], triangle_count: u32) -> Result<MeshSummary> {
    if bytes.len() < BINARY_HEADER_SIZE {
        return Err(ParseError::TooSmall { len: bytes.len() });
    }

    let available = (bytes.len() - BINARY_HEADER_SIZE) / TRIANGLE_RECORD_SIZE;
    let declared = triangle_count as usize;
    if declared > available {
        return Err(ParseError::Truncated {
            declared: triangle_count,
            available,
        });
    }

    let body = &bytes[BINARY_HEADER_SIZE..BINARY_HEADER_SIZE + declared * TRIANGLE_RECORD_SIZE];
    let mut builder = SummaryBuilder::new();
    for record in body.chunks_exact(TRIANGLE_RECORD_SIZE) {
        builder.add(&read_triangle(record));
    }

    let summary = builder.finish(MeshFormat::Binary);
    debug!(
        triangles = summary.triangle_count,
        volume_mm3 = summary.volume_mm3,
        "decoded binary STL"
    );
    Ok(summary)
}

/// Vertices of one 50-byte record; the normal and attribute are skipped.
fn read_triangle(record: &[u8]) -> Triangle {
    Triangle::new(
        read_vertex(&record[12..24]),
        read_vertex(&record[24..36]),
        read_vertex(&record[36..48]),
    )
}

/// Read a vertex from 12 bytes (3 little-endian f32s).
fn read_vertex(buf: &[u8]) -> Point3 {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Point3::new(f64::from(x), f64::from(y), f64::from(z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn header(count: u32) -> Vec<u8> {
        let mut data = vec![0u8; 80];
        data.extend_from_slice(&count.to_le_bytes());
        data
    }

    fn push_record(data: &mut Vec<u8>, verts: [[f32; 3]; 3]) {
        // Garbage normal: must be ignored.
        for n in [9.0f32, -9.0, 9.0] {
            data.extend_from_slice(&n.to_le_bytes());
        }
        for v in verts {
            for c in v {
                data.extend_from_slice(&c.to_le_bytes());
            }
        }
        data.extend_from_slice(&0xBEEFu16.to_le_bytes());
    }

    #[test]
    fn test_single_triangle_bounds() {
        let mut data = header(1);
        push_record(&mut data, [[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 2.0, 1.0]]);
        let summary = decode_binary(&data, 1).unwrap();
        assert_eq!(summary.format, MeshFormat::Binary);
        assert_eq!(summary.triangle_count, 1);
        // Reference is the first vertex, which lies on the triangle.
        assert_eq!(summary.volume_mm3, 0.0);
        assert_relative_eq!(summary.bbox.x, 4.0);
        assert_relative_eq!(summary.bbox.y, 2.0);
        assert_relative_eq!(summary.bbox.z, 1.0);
    }

    #[test]
    fn test_truncated() {
        let mut data = header(3);
        push_record(&mut data, [[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        data.extend_from_slice(&[0u8; 30]);
        assert_eq!(
            decode_binary(&data, 3),
            Err(ParseError::Truncated {
                declared: 3,
                available: 1
            })
        );
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut data = header(1);
        push_record(&mut data, [[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        data.extend_from_slice(b"trailing junk");
        let summary = decode_binary(&data, 1).unwrap();
        assert_eq!(summary.triangle_count, 1);
    }

    #[test]
    fn test_zero_triangles() {
        let summary = decode_binary(&header(0), 0).unwrap();
        assert_eq!(summary.triangle_count, 0);
        assert_eq!(summary.volume_mm3, 0.0);
        assert_eq!(summary.bbox.volume(), 0.0);
    }
}
