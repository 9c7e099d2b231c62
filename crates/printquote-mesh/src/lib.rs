#![warn(missing_docs)]

//! STL decoding for printquote.
//!
//! Turns the raw bytes of an uploaded STL file, binary or ASCII, into a
//! [`MeshSummary`]: enclosed volume and axis-aligned bounding box. Volume
//! is integrated as a sum of signed tetrahedra over the surface triangles,
//! so it is only meaningful for closed, consistently wound meshes. No
//! repair or manifold check is attempted.
//!
//! # Example
//!
//! ```ignore
//! use printquote_mesh::decode;
//!
//! let bytes = std::fs::read("keychain.stl")?;
//! let summary = decode(&bytes)?;
//! println!("{:.1} mm³, {:.1} × {:.1} × {:.1} mm",
//!     summary.volume_mm3, summary.bbox.x, summary.bbox.y, summary.bbox.z);
//! ```

pub mod ascii;
pub mod binary;
pub mod detect;
pub mod error;
pub mod summary;
pub mod write;

pub use ascii::{decode_ascii, VertexScanner};
pub use binary::decode_binary;
pub use detect::{classify, Classified};
pub use error::{ParseError, Result};
pub use summary::{MeshFormat, MeshSummary};
pub use write::{to_ascii_stl, to_binary_stl};

/// Detect the serialization of `bytes` and decode it.
pub fn decode(bytes: &[u8]) -> Result<MeshSummary> {
    match classify(bytes)? {
        Classified::Binary { triangle_count } => decode_binary(bytes, triangle_count),
        Classified::Ascii(text) => decode_ascii(&text),
    }
}

/// Whether a file name carries the `.stl` extension (any case).
pub fn is_mesh_file_name(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("stl"))
}

/// Whether a MIME type denotes an STL upload.
pub fn is_mesh_media_type(media_type: &str) -> bool {
    matches!(media_type, "model/stl" | "application/sla")
}
