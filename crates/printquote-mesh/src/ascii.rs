//! ASCII STL decoding.
//!
//! Only `vertex x y z` entries matter; `facet`, `outer loop` and the rest
//! of the structure are skipped. Vertices are grouped into triangles in
//! the order they appear.

use std::str::SplitWhitespace;

use printquote_math::{Point3, Triangle};
use tracing::debug;

use crate::error::{ParseError, Result};
use crate::summary::{MeshFormat, MeshSummary, SummaryBuilder};

/// Decode the text body of an ASCII STL.
pub fn decode_ascii(text: &str) -> Result<MeshSummary> {
    let vertices: Vec<Point3> = VertexScanner::new(text).collect();

    if vertices.is_empty() || vertices.len() % 3 != 0 {
        return Err(ParseError::MalformedAscii {
            vertex_count: vertices.len(),
        });
    }

    let mut builder = SummaryBuilder::new();
    for corners in vertices.chunks_exact(3) {
        builder.add(&Triangle::new(corners[0], corners[1], corners[2]));
    }

    let summary = builder.finish(MeshFormat::Ascii);
    debug!(
        vertices = vertices.len(),
        volume_mm3 = summary.volume_mm3,
        "decoded ASCII STL"
    );
    Ok(summary)
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    /// Looking for the `vertex` keyword.
    Seeking,
    /// Inside a `vertex` entry with `filled` coordinates read.
    Coords { coords: [f64; 3], filled: usize },
}

/// Iterator over the `vertex x y z` entries of a text body.
///
/// A `vertex` keyword not followed by three numbers is dropped and scanning
/// resumes at the token that broke the entry.
pub struct VertexScanner<'a> {
    tokens: SplitWhitespace<'a>,
    state: ScanState,
}

impl<'a> VertexScanner<'a> {
    /// Scan `text` from the start.
    pub fn new(text: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace(),
            state: ScanState::Seeking,
        }
    }
}

impl Iterator for VertexScanner<'_> {
    type Item = Point3;

    fn next(&mut self) -> Option<Point3> {
        loop {
            let token = self.tokens.next()?;
            self.state = match self.state {
                ScanState::Seeking => {
                    if is_vertex_keyword(token) {
                        ScanState::Coords {
                            coords: [0.0; 3],
                            filled: 0,
                        }
                    } else {
                        ScanState::Seeking
                    }
                }
                ScanState::Coords { mut coords, filled } => match parse_coordinate(token) {
                    Some(value) => {
                        coords[filled] = value;
                        if filled == 2 {
                            self.state = ScanState::Seeking;
                            return Some(Point3::new(coords[0], coords[1], coords[2]));
                        }
                        ScanState::Coords {
                            coords,
                            filled: filled + 1,
                        }
                    }
                    None if is_vertex_keyword(token) => ScanState::Coords {
                        coords: [0.0; 3],
                        filled: 0,
                    },
                    None => ScanState::Seeking,
                },
            };
        }
    }
}

fn is_vertex_keyword(token: &str) -> bool {
    token == "vertex"
}

/// Parse a decimal or exponential number made only of `[-+.0-9eE]`.
///
/// Rejects `inf`, `nan` and other words that `f64::from_str` would accept.
fn parse_coordinate(token: &str) -> Option<f64> {
    let numeric = token
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E'));
    if !numeric {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TETRA: &str = "solid tetra
  facet normal 0 0 -1
    outer loop
      vertex 0 0 0
      vertex 0 10 0
      vertex 10 0 0
    endloop
  endfacet
  facet normal 0 -1 0
    outer loop
      vertex 0 0 0
      vertex 10 0 0
      vertex 0 0 10
    endloop
  endfacet
  facet normal -1 0 0
    outer loop
      vertex 0 0 0
      vertex 0 0 10
      vertex 0 10 0
    endloop
  endfacet
  facet normal 1 1 1
    outer loop
      vertex 10 0 0
      vertex 0 10 0
      vertex 0 0 10
    endloop
  endfacet
endsolid tetra
";

    #[test]
    fn test_tetra_volume() {
        let summary = decode_ascii(TETRA).unwrap();
        assert_eq!(summary.format, MeshFormat::Ascii);
        assert_eq!(summary.triangle_count, 4);
        assert_relative_eq!(summary.volume_mm3, 1000.0 / 6.0, epsilon = 1e-9);
        assert_relative_eq!(summary.bbox.x, 10.0);
        assert_relative_eq!(summary.bbox.y, 10.0);
        assert_relative_eq!(summary.bbox.z, 10.0);
    }

    #[test]
    fn test_exponent_and_signs() {
        let points: Vec<Point3> =
            VertexScanner::new("vertex 1.5e1 -2E-1 +.25\nvertex -0 3. 1e+2").collect();
        assert_eq!(points.len(), 2);
        assert_relative_eq!(points[0].x, 15.0);
        assert_relative_eq!(points[0].y, -0.2);
        assert_relative_eq!(points[0].z, 0.25);
        assert_relative_eq!(points[1].z, 100.0);
    }

    #[test]
    fn test_incomplete_vertex_is_skipped() {
        let points: Vec<Point3> =
            VertexScanner::new("vertex 1 2 endloop vertex 4 5 6 vertex nan 1 2").collect();
        assert_eq!(points, vec![Point3::new(4.0, 5.0, 6.0)]);
    }

    #[test]
    fn test_keyword_restarts_entry() {
        let points: Vec<Point3> = VertexScanner::new("vertex 1 vertex 7 8 9").collect();
        assert_eq!(points, vec![Point3::new(7.0, 8.0, 9.0)]);
    }

    #[test]
    fn test_keyword_is_case_sensitive() {
        let points: Vec<Point3> =
            VertexScanner::new("VERTEX 1 2 3 Vertex 4 5 6 vertex 7 8 9").collect();
        assert_eq!(points, vec![Point3::new(7.0, 8.0, 9.0)]);
    }

    #[test]
    fn test_no_vertices_is_malformed() {
        assert_eq!(
            decode_ascii("solid empty\nendsolid empty\n"),
            Err(ParseError::MalformedAscii { vertex_count: 0 })
        );
    }

    #[test]
    fn test_partial_triangle_is_malformed() {
        let text = "solid x\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nvertex 0 0 1\nendsolid x";
        assert_eq!(
            decode_ascii(text),
            Err(ParseError::MalformedAscii { vertex_count: 4 })
        );
    }
}
