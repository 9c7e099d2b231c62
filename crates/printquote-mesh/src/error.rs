//! Error types for mesh decoding.

use thiserror::Error;

/// Errors that can occur while detecting or decoding a mesh buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Buffer is shorter than the 84-byte binary header.
    #[error("mesh file is too small: {len} bytes, need at least 84")]
    TooSmall {
        /// Length of the rejected buffer.
        len: usize,
    },

    /// Declared triangle count needs more records than the buffer holds.
    #[error("mesh file is truncated: header declares {declared} triangles, buffer holds {available}")]
    Truncated {
        /// Triangle count from the header.
        declared: u32,
        /// Complete 50-byte records actually present.
        available: usize,
    },

    /// ASCII body did not yield whole triangles.
    #[error("malformed ASCII STL: {vertex_count} vertices is not a positive multiple of three")]
    MalformedAscii {
        /// Number of `vertex` entries collected.
        vertex_count: usize,
    },
}

/// Result type for mesh decoding.
pub type Result<T> = std::result::Result<T, ParseError>;
