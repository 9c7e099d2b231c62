//! STL encoders.
//!
//! Produce files the decoders accept; normals are recomputed from the
//! winding since the decoders ignore them anyway.

use std::fmt::Write as _;

use printquote_math::{Triangle, Vec3, LINEAR_TOLERANCE};

use crate::detect::{BINARY_HEADER_SIZE, TRIANGLE_RECORD_SIZE};

const HEADER_TEXT: &[u8] = b"printquote binary STL";

/// Encode triangles as binary STL.
pub fn to_binary_stl(triangles: &[Triangle]) -> Vec<u8> {
    let mut data = Vec::with_capacity(BINARY_HEADER_SIZE + triangles.len() * TRIANGLE_RECORD_SIZE);

    let mut header = [b' '; 80];
    header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    data.extend_from_slice(&header);
    data.extend_from_slice(&(triangles.len() as u32).to_le_bytes());

    for tri in triangles {
        let n = unit_normal(tri);
        for c in [n.x, n.y, n.z] {
            data.extend_from_slice(&(c as f32).to_le_bytes());
        }
        for v in &tri.vertices {
            for c in [v.x, v.y, v.z] {
                data.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    data
}

/// Encode triangles as ASCII STL under the solid name `name`.
pub fn to_ascii_stl(name: &str, triangles: &[Triangle]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "solid {name}");
    for tri in triangles {
        let n = unit_normal(tri);
        let _ = writeln!(out, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for v in &tri.vertices {
            let _ = writeln!(out, "      vertex {:e} {:e} {:e}", v.x, v.y, v.z);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    let _ = writeln!(out, "endsolid {name}");
    out
}

fn unit_normal(tri: &Triangle) -> Vec3 {
    let n = tri.normal();
    let len = n.norm();
    if len > LINEAR_TOLERANCE {
        n / len
    } else {
        Vec3::zeros()
    }
}
